use axum::{
    extract::{Path, State},
    Json,
};
use common_utils::id_type::TransactionId;
use domain_types::{
    api::{CreateDonationRequest, StatusUpdateRequest},
    donation::DonationRecord,
};

use crate::{
    http::{error::HttpError, state::AppState, ValidatedJson},
    server::donations::{self, CreateDonationResponse, StatusUpdateResponse},
};

pub async fn create_donation(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDonationRequest>,
) -> Result<Json<CreateDonationResponse>, HttpError> {
    Ok(Json(donations::create_donation(&state, payload).await?))
}

pub async fn update_status(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>, HttpError> {
    Ok(Json(donations::update_status(&state, payload).await?))
}

pub async fn get_donation(
    State(state): State<AppState>,
    Path(txnid): Path<String>,
) -> Result<Json<DonationRecord>, HttpError> {
    let txnid = TransactionId::new_unchecked(txnid);
    Ok(Json(donations::get_donation(&state, txnid).await?))
}
