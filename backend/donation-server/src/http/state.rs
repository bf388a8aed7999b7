use std::sync::Arc;

use interfaces::{mailer::ReceiptMailer, store::DonationStore};

use crate::configs::Config;

/// Everything a request handler may touch.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn DonationStore>,
    pub mailer: Arc<dyn ReceiptMailer>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        store: Arc<dyn DonationStore>,
        mailer: Arc<dyn ReceiptMailer>,
    ) -> Self {
        Self {
            config,
            store,
            mailer,
        }
    }
}
