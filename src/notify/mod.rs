//! Grade notification delivery
//!
//! Fire-and-forget notification posted after a successful grade entry. The
//! delivery result never reaches the HTTP response; failures are logged and
//! dropped.

use crate::core::config::NotifierConfig;
use serde::Serialize;
use std::time::Duration;

/// Payload posted to the configured notification endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GradeNotification {
    pub enrollment_id: String,
    pub grade: String,
    pub entered_by: String,
}

/// Outbound notifier for grade entries
pub struct GradeNotifier {
    client: reqwest::Client,
    config: NotifierConfig,
}

impl GradeNotifier {
    /// Create a new notifier from configuration
    pub fn new(config: NotifierConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    /// Whether deliveries will actually be attempted
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Dispatch a notification on a background task
    ///
    /// Returns immediately; the spawned task logs and swallows any delivery
    /// failure.
    pub fn dispatch(&self, notification: GradeNotification) {
        if !self.config.enabled {
            return;
        }

        let client = self.client.clone();
        let endpoint = self.config.endpoint.clone();

        tokio::spawn(async move {
            match client.post(&endpoint).json(&notification).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(
                        enrollment_id = %notification.enrollment_id,
                        "Grade notification delivered"
                    );
                }
                Ok(response) => {
                    tracing::warn!(
                        enrollment_id = %notification.enrollment_id,
                        status = %response.status(),
                        "Grade notification rejected by endpoint"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        enrollment_id = %notification.enrollment_id,
                        error = %e,
                        "Grade notification delivery failed"
                    );
                }
            }
        });
    }
}
