use common_utils::{date_time, CustomResult};
use domain_types::{api::ReceiptDetails, errors::MailerError};
use interfaces::mailer::ReceiptMailer;
use serde_json::json;

use super::template;
use crate::service::{debug_log, info_log};

/// Stands in for a real provider when no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReceiptMailer;

#[async_trait::async_trait]
impl ReceiptMailer for LoggingReceiptMailer {
    async fn send_receipt(&self, receipt: &ReceiptDetails) -> CustomResult<(), MailerError> {
        info_log(
            "RECEIPT_LOGGED",
            &json!({
                "txnid": receipt.txnid,
                "amount": receipt.amount.to_major_unit_as_string(),
            }),
        );
        debug_log(
            "RECEIPT_BODY",
            &json!(template::render_receipt(receipt, date_time::now())),
        );
        Ok(())
    }
}
