//! Save collaborator: forwards submissions to the spreadsheet webhook.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use shared::{
    domain::{InterestRecord, SaveKind, UserProfile},
    protocol::SubmissionPayload,
};
use tracing::{debug, error, info};
use url::Url;

use crate::config::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SaveRecord {
    Enrollment(UserProfile),
    Interest(InterestRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The webhook accepted the request at the transport level.
    Stored,
    /// No endpoint configured; the save was simulated.
    Simulated,
    Failed,
}

impl SaveOutcome {
    pub fn is_ok(self) -> bool {
        !matches!(self, SaveOutcome::Failed)
    }
}

#[async_trait]
pub trait SaveSink: Send + Sync {
    async fn save(&self, record: SaveRecord, kind: SaveKind) -> SaveOutcome;
}

/// Posts submissions to a Google Apps Script style webhook.
///
/// The webhook answers without usable CORS headers, so its response is treated
/// as opaque: any completed exchange counts as stored regardless of status, and
/// only transport failures are reported as [`SaveOutcome::Failed`].
pub struct SheetClient {
    http: Client,
    endpoint: Option<Url>,
    user_agent: String,
    demo_delay: Duration,
}

impl SheetClient {
    pub fn new(endpoint: Option<Url>, user_agent: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            user_agent: user_agent.into(),
            demo_delay: Settings::default().demo_save_delay,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.script_url.clone(), settings.user_agent.clone())
            .with_demo_delay(settings.demo_save_delay)
    }

    pub fn with_demo_delay(mut self, demo_delay: Duration) -> Self {
        self.demo_delay = demo_delay;
        self
    }

    pub fn is_demo(&self) -> bool {
        self.endpoint.is_none()
    }

    async fn post(&self, url: &Url, payload: &SubmissionPayload<SaveRecord>) -> reqwest::Result<()> {
        let response = self.http.post(url.clone()).json(payload).send().await?;
        debug!(
            status = %response.status(),
            kind = %payload.kind,
            "sheet webhook responded; body ignored"
        );
        Ok(())
    }
}

#[async_trait]
impl SaveSink for SheetClient {
    async fn save(&self, record: SaveRecord, kind: SaveKind) -> SaveOutcome {
        let payload = SubmissionPayload::new(record, kind, Utc::now(), self.user_agent.clone());
        info!(%kind, demo = self.is_demo(), "saving submission to sheet");
        if let Ok(json) = serde_json::to_string(&payload) {
            debug!(%kind, payload = %json, "sheet payload");
        }

        let Some(url) = &self.endpoint else {
            tokio::time::sleep(self.demo_delay).await;
            return SaveOutcome::Simulated;
        };

        match self.post(url, &payload).await {
            Ok(()) => SaveOutcome::Stored,
            Err(err) => {
                error!(%kind, "error saving to sheet: {err}");
                SaveOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/save_tests.rs"]
mod tests;
