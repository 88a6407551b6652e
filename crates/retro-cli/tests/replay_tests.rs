//! Session replay tests

use pretty_assertions::assert_eq;
use retro_cli::{Report, Session};
use retro_domain::{IdeaId, Stage};
use retro_store::{JoinPolicy, JoinStatus, RecordingNotifier, StoreConfig, DISTRIBUTION_NOTICE};
use retro_test_utils::{idea_json, join_snapshot, FACILITATOR_TOKEN};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;

fn session_json() -> serde_json::Value {
    json!({
        "join": serde_json::to_value(join_snapshot()).unwrap(),
        "events": [
            { "event": "new_idea_created", "payload": idea_json(3, "Magnum") },
            { "event": "enable_edit_state", "payload": { "id": 3 } },
            { "event": "idea_live_edit", "payload": { "id": 3, "liveEditText": "Magnum!" } },
            { "event": "idea_deleted", "payload": { "id": 1 } },
            { "event": "proceed_to_next_stage", "payload": { "stage": "action-item-distribution" } },
            { "event": "not_a_real_event", "payload": {} },
        ],
    })
}

fn fast_config() -> StoreConfig {
    StoreConfig::new().with_join_policy(JoinPolicy {
        max_attempts: 2,
        initial_backoff_ms: 1,
        max_backoff_ms: 1,
        timeout_ms: None,
    })
}

#[tokio::test]
async fn test_replay_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", session_json()).unwrap();

    let session = Session::from_file(file.path()).unwrap();
    assert_eq!(session.events.len(), 6);

    let notifier = Arc::new(RecordingNotifier::new());
    let snapshot = session.replay(fast_config(), notifier.clone()).await.unwrap();

    assert_eq!(snapshot.join, JoinStatus::Joined);
    assert_eq!(snapshot.stage, Stage::ActionItemDistribution);
    assert_eq!(snapshot.ideas.ids(), vec![IdeaId(2), IdeaId(3)]);
    assert_eq!(notifier.messages(), vec![DISTRIBUTION_NOTICE.to_string()]);

    let report = Report::new(&snapshot, Some(FACILITATOR_TOKEN));
    assert_eq!(report.viewer.as_deref(), Some("Mugatu"));
    assert_eq!(report.ideas[1].text, "Magnum!");
    assert_eq!(report.ideas[1].mode, "edit-form");
}

#[tokio::test]
async fn test_replay_without_join_reply() {
    let session = Session::from_json_str(
        &json!({
            "join": null,
            "events": [{ "event": "new_idea_created", "payload": idea_json(7, "Hansel") }],
        })
        .to_string(),
    )
    .unwrap();

    let snapshot = session
        .replay(fast_config(), Arc::new(RecordingNotifier::new()))
        .await
        .unwrap();

    assert_eq!(snapshot.join, JoinStatus::Failed { attempts: 2 });
    assert_eq!(snapshot.ideas.ids(), vec![IdeaId(7)]);
    assert_eq!(snapshot.stage, Stage::IdeaGeneration);
}

#[tokio::test]
async fn test_report_json_shape() {
    let session = Session::from_json_str(&session_json().to_string()).unwrap();
    let snapshot = session
        .replay(fast_config(), Arc::new(RecordingNotifier::new()))
        .await
        .unwrap();

    let value = serde_json::to_value(Report::new(&snapshot, None)).unwrap();
    assert_eq!(value["stage"], "action-item-distribution");
    assert_eq!(value["join"], "joined");
    assert_eq!(value["users"], json!(["Hansel", "Mugatu"]));
    assert_eq!(value["viewer"], serde_json::Value::Null);
    assert_eq!(value["ideas"][0]["mode"], "read-only");
    assert_eq!(value["ideas"][1]["mode"], "facilitator-editing");
    assert_eq!(value["ideas"][1]["category"], "happy");
}

#[test]
fn test_missing_session_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Session::from_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read session"));
}
