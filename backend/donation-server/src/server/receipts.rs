use common_utils::errors::{CustomResult, ReportSwitchExt};
use domain_types::{api::ReceiptRequest, errors::DonationError};
use serde::Serialize;

use crate::{http::AppState, logger};

#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub success: bool,
}

/// Sends one receipt on request. Unlike the callback path, delivery failures
/// are reported to the caller.
#[logger::instrument(skip_all)]
pub async fn send_receipt(
    state: &AppState,
    request: ReceiptRequest,
) -> CustomResult<ReceiptResponse, DonationError> {
    let receipt = request.validate()?;
    state.mailer.send_receipt(&receipt).await.switch()?;
    logger::info!(txnid = %receipt.txnid, "receipt sent on request");

    Ok(ReceiptResponse { success: true })
}
