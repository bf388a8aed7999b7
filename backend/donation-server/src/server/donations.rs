use common_utils::{
    errors::{CustomResult, ReportSwitchExt},
    id_type::TransactionId,
};
use domain_types::{
    api::{CreateDonationRequest, StatusUpdateRequest},
    donation::DonationRecord,
    errors::DonationError,
};
use error_stack::report;
use serde::Serialize;

use crate::{http::AppState, logger};

#[derive(Debug, Serialize)]
pub struct CreateDonationResponse {
    pub success: bool,
    pub created: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub success: bool,
    pub applied: bool,
    pub donation: DonationRecord,
}

/// Records a pending donation unless one with the same txnid exists.
#[logger::instrument(skip_all)]
pub async fn create_donation(
    state: &AppState,
    request: CreateDonationRequest,
) -> CustomResult<CreateDonationResponse, DonationError> {
    let donation = request.validate()?;
    let record = DonationRecord::new_pending(
        donation.txnid,
        donation.order.amount,
        donation.order.email,
        donation.order.firstname,
        donation.order.phone,
    );
    let txnid = record.txnid.clone();
    let created = state.store.create_if_absent(record).await.switch()?;
    logger::info!(%txnid, created, "donation logged");

    Ok(CreateDonationResponse {
        success: true,
        created,
    })
}

#[logger::instrument(skip_all)]
pub async fn update_status(
    state: &AppState,
    request: StatusUpdateRequest,
) -> CustomResult<StatusUpdateResponse, DonationError> {
    let update = request.validate()?;
    let transition = state
        .store
        .transition_status(&update.txnid, update.status, update.payu_money_id)
        .await
        .switch()?;
    logger::info!(
        txnid = %update.txnid,
        status = %update.status,
        applied = transition.is_applied(),
        "donation status updated"
    );

    Ok(StatusUpdateResponse {
        success: true,
        applied: transition.is_applied(),
        donation: transition.record().clone(),
    })
}

pub async fn get_donation(
    state: &AppState,
    txnid: TransactionId,
) -> CustomResult<DonationRecord, DonationError> {
    state.store.find(&txnid).await.switch()?.ok_or_else(|| {
        report!(DonationError::DonationNotFound {
            txnid: txnid.to_string(),
        })
    })
}
