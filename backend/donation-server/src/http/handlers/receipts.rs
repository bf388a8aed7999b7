use axum::{extract::State, Json};
use domain_types::api::ReceiptRequest;

use crate::{
    http::{error::HttpError, state::AppState, ValidatedJson},
    server::receipts::{self, ReceiptResponse},
};

pub async fn send_receipt(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ReceiptRequest>,
) -> Result<Json<ReceiptResponse>, HttpError> {
    Ok(Json(receipts::send_receipt(&state, payload).await?))
}
