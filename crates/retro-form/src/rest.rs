//! Idea creation REST client
//!
//! The form only produces the payload and triggers the call; the created idea
//! arrives later as a `new_idea_created` channel event.

use crate::error::RestError;
use async_trait::async_trait;
use retro_domain::Category;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Payload for creating an idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIdea {
    /// Selected category
    pub category: Category,
    /// Idea text
    pub body: String,
    /// Submitter's display name
    pub author: String,
}

/// Endpoint that stores new ideas
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdeaRestClient: Send + Sync {
    /// Create an idea
    ///
    /// # Errors
    /// Returns the transport or status failure.
    async fn post(&self, idea: NewIdea) -> Result<(), RestError>;
}

/// [`IdeaRestClient`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpIdeaClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpIdeaClient {
    /// Client posting to `{base_url}/api/ideas`
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Client reusing an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/api/ideas", base_url.trim_end_matches('/')),
        }
    }

    /// Full endpoint URL
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl IdeaRestClient for HttpIdeaClient {
    async fn post(&self, idea: NewIdea) -> Result<(), RestError> {
        let response = self.http.post(&self.endpoint).json(&idea).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RestError::Status(status.as_u16()));
        }
        debug!(endpoint = %self.endpoint, status = status.as_u16(), "idea posted");
        Ok(())
    }
}
