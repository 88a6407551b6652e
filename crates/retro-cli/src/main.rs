use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use retro_cli::{Report, Session};
use retro_domain::{Category, Stage, User};
use retro_form::{FormConfig, HttpIdeaClient, IdeaRestClient, IdeaSubmissionForm};
use retro_store::{StoreConfig, TracingNotifier};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn cli() -> Command {
    Command::new("retro-sync")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Retro board state synchronization tools")
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("replay")
                .about("Replay a recorded channel session through the store")
                .arg(
                    Arg::new("session")
                        .long("session")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Session file with the join reply and pushed events"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Store configuration (TOML)"),
                )
                .arg(
                    Arg::new("user-token")
                        .long("user-token")
                        .help("Viewer's presence token"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("submit")
                .about("Submit an idea through the REST endpoint")
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .default_value("http://localhost:4000")
                        .help("Server base URL"),
                )
                .arg(
                    Arg::new("author")
                        .long("author")
                        .required(true)
                        .help("Submitter's given name"),
                )
                .arg(
                    Arg::new("body")
                        .long("body")
                        .required(true)
                        .help("Idea text"),
                )
                .arg(
                    Arg::new("stage")
                        .long("stage")
                        .default_value("idea-generation")
                        .value_parser(value_parser!(Stage))
                        .help("Retro stage, selects the offered categories"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .value_parser(value_parser!(Category))
                        .help("Idea category (defaults to the stage's first option)"),
                ),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

async fn replay(args: &ArgMatches) -> anyhow::Result<()> {
    let session_path = args
        .get_one::<PathBuf>("session")
        .context("--session is required")?;
    let config = match args.get_one::<PathBuf>("config") {
        Some(path) => StoreConfig::from_file(path)?,
        None => StoreConfig::default(),
    };
    let user_token = args.get_one::<String>("user-token").map(String::as_str);

    let session = Session::from_file(session_path)?;
    let snapshot = session.replay(config, Arc::new(TracingNotifier)).await?;
    let report = Report::new(&snapshot, user_token);

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

async fn submit(args: &ArgMatches) -> anyhow::Result<()> {
    let base_url = args
        .get_one::<String>("base-url")
        .context("--base-url is required")?;
    let author = args.get_one::<String>("author").context("--author is required")?;
    let body = args.get_one::<String>("body").context("--body is required")?;
    let stage = args.get_one::<Stage>("stage").copied().unwrap_or_default();

    let mut form = IdeaSubmissionForm::new(&User::new(author.as_str(), false), FormConfig::for_stage(stage));
    if let Some(&category) = args.get_one::<Category>("category") {
        form.select_category(category)?;
    }
    form.set_body(body.as_str());

    let client = HttpIdeaClient::new(base_url);
    let idea = form.draft()?;
    client.post(idea).await?;
    info!(endpoint = client.endpoint(), "idea submitted");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("replay", args)) => replay(args).await,
        Some(("submit", args)) => submit(args).await,
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn submit_parses_stage_and_category() {
        let matches = cli()
            .try_get_matches_from([
                "retro-sync", "submit", "--author", "Derek", "--body", "more eugoogly",
                "--stage", "action-items", "--category", "action-item",
            ])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<Stage>("stage"), Some(&Stage::ActionItems));
        assert_eq!(args.get_one::<Category>("category"), Some(&Category::ActionItem));
    }

    #[test]
    fn replay_requires_session() {
        assert!(cli().try_get_matches_from(["retro-sync", "replay"]).is_err());
    }
}
