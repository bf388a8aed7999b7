//! Receipt delivery for completed donations.

pub mod http;
pub mod logging;
pub mod template;

use std::{sync::Arc, time::Duration};

use common_utils::CustomResult;
use domain_types::errors::MailerError;
use hyperswitch_masking::{PeekInterface, Secret};
use interfaces::mailer::ReceiptMailer;

pub use self::{http::HttpReceiptMailer, logging::LoggingReceiptMailer};

/// Email provider settings.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    /// Provider API key. Receipts are only logged when absent.
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub from_address: String,
    pub subject: String,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub retry_backoff_ms: u64,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.resend.com".to_string(),
            from_address: "Donations <donations@example.org>".to_string(),
            subject: "Thank you for your donation".to_string(),
            timeout_secs: 10,
            max_attempts: 3,
            retry_backoff_ms: 500,
        }
    }
}

impl EmailSettings {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.peek().trim())
            .filter(|key| !key.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

/// Picks the provider-backed mailer when an API key is configured.
pub fn build_receipt_mailer(
    settings: &EmailSettings,
) -> CustomResult<Arc<dyn ReceiptMailer>, MailerError> {
    match settings.api_key() {
        Some(_) => Ok(Arc::new(HttpReceiptMailer::new(settings.clone())?)),
        None => {
            tracing::warn!("email api key is not configured, receipts will only be logged");
            Ok(Arc::new(LoggingReceiptMailer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_api_key_counts_as_missing() {
        let settings = EmailSettings {
            api_key: Some(Secret::new("  ".to_string())),
            ..Default::default()
        };
        assert_eq!(settings.api_key(), None);
    }

    #[test]
    fn backoff_grows_linearly() {
        let settings = EmailSettings {
            retry_backoff_ms: 200,
            ..Default::default()
        };
        assert_eq!(settings.backoff(1), Duration::from_millis(200));
        assert_eq!(settings.backoff(3), Duration::from_millis(600));
    }
}
