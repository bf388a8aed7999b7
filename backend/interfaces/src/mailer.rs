use common_utils::CustomResult;
use domain_types::{api::ReceiptDetails, errors::MailerError};

/// Sends donation receipts to donors.
#[async_trait::async_trait]
pub trait ReceiptMailer: Send + Sync {
    async fn send_receipt(&self, receipt: &ReceiptDetails) -> CustomResult<(), MailerError>;
}
