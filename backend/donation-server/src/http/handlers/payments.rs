use axum::{extract::State, Json};
use connector_integration::connectors::payu::transformers::PayuCallbackForm;
use domain_types::api::DonationOrderRequest;

use crate::{
    http::{error::HttpError, state::AppState, ValidatedForm, ValidatedJson},
    server::payments::{self, CallbackAcknowledgement, DonationOrderResponse},
};

pub async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DonationOrderRequest>,
) -> Result<Json<DonationOrderResponse>, HttpError> {
    let response = payments::create_order(&state, payload).await?;
    Ok(Json(response))
}

pub async fn callback(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<PayuCallbackForm>,
) -> Result<Json<CallbackAcknowledgement>, HttpError> {
    let response = payments::handle_callback(&state, form).await?;
    Ok(Json(response))
}
