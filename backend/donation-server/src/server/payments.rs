use common_utils::{
    errors::{CustomResult, ReportSwitchExt},
    id_type::TransactionId,
    types::MinorUnit,
};
use connector_integration::connectors::{
    payu::transformers::{
        PayuAuthType, PayuCallbackForm, PayuOrderPayload, PayuPaymentStatus, PayuRedirectUrls,
        VerifiedCallback,
    },
    Payu,
};
use domain_types::{
    api::{DonationOrderRequest, ReceiptDetails},
    donation::DonationRecord,
    errors::DonationError,
};
use serde::Serialize;

use crate::{configs::Config, http::AppState, logger};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationOrderResponse {
    pub success: bool,
    pub payu_data: PayuOrderPayload,
    pub payment_url: String,
}

#[derive(Debug, Serialize)]
pub struct CallbackAcknowledgement {
    pub success: bool,
}

/// PayU connector built from the merchant settings. Missing credentials are a
/// [`DonationError::MissingConfiguration`].
pub fn payu_connector(config: &Config) -> CustomResult<Payu, DonationError> {
    let auth = PayuAuthType::new(
        config.payu.merchant_key.clone(),
        config.payu.merchant_salt.clone(),
    )?;
    Ok(Payu::new(
        auth,
        config.payu.environment,
        config.payu.product_info.clone(),
    ))
}

/// Signs a new order for the donor's browser to submit to PayU and records
/// it as pending.
#[logger::instrument(skip_all, fields(txnid = tracing::field::Empty))]
pub async fn create_order(
    state: &AppState,
    request: DonationOrderRequest,
) -> CustomResult<DonationOrderResponse, DonationError> {
    let order = request.validate()?;
    let connector = payu_connector(&state.config)?;
    let redirect_urls = PayuRedirectUrls::new(
        &state.config.application.base_url,
        &state.config.payu.success_path,
        &state.config.payu.failure_path,
    )?;

    let txnid = TransactionId::generate();
    tracing::Span::current().record("txnid", txnid.get_string_repr());
    let payload = connector.build_order_payload(&txnid, &order, &redirect_urls);

    let record = DonationRecord::new_pending(
        txnid,
        order.amount,
        order.email,
        order.firstname,
        order.phone,
    );
    if let Err(error) = state.store.create_if_absent(record).await {
        logger::warn!(?error, "failed to record pending donation");
    }

    logger::info!(amount = %payload.amount, "donation order created");

    Ok(DonationOrderResponse {
        success: true,
        payu_data: payload,
        payment_url: connector.payment_url().to_string(),
    })
}

/// Authenticates a PayU callback and applies it. Once the hash checks out the
/// callback is acknowledged whatever happens to bookkeeping or the receipt.
/// A success receipt goes out when the transition is newly applied or when
/// the store could not be reached.
#[logger::instrument(skip_all, fields(txnid = tracing::field::Empty, status = tracing::field::Empty))]
pub async fn handle_callback(
    state: &AppState,
    form: PayuCallbackForm,
) -> CustomResult<CallbackAcknowledgement, DonationError> {
    let connector = payu_connector(&state.config)?;
    let callback = connector.verify_callback(&form)?;

    let span = tracing::Span::current();
    span.record("txnid", callback.txnid.get_string_repr());
    span.record("status", tracing::field::debug(&callback.status));
    logger::info!(error_message = ?callback.error_message, "verified callback received");

    ensure_recorded(state, &callback).await;

    let receipt_due = match callback.status.donation_status() {
        Some(next) => {
            match state
                .store
                .transition_status(&callback.txnid, next, callback.payu_reference.clone())
                .await
                .switch()
            {
                Ok(transition) => {
                    if !transition.is_applied() {
                        logger::info!(status = %next, "callback already applied");
                    }
                    transition.is_applied()
                }
                // Outcome unknown when the store is unreachable, receipt still due.
                Err(error) => {
                    logger::warn!(?error, "failed to update donation status");
                    matches!(error.current_context(), DonationError::StoreFailure)
                }
            }
        }
        None => {
            logger::info!("payment still pending, donation left unchanged");
            false
        }
    };

    if callback.status == PayuPaymentStatus::Success && receipt_due {
        send_receipt(state, &callback).await;
    }

    Ok(CallbackAcknowledgement { success: true })
}

/// Callbacks may arrive for orders that were never recorded.
async fn ensure_recorded(state: &AppState, callback: &VerifiedCallback) {
    let amount = match MinorUnit::from_major_unit_str(&callback.amount) {
        Ok(amount) => amount,
        Err(error) => {
            logger::warn!(?error, amount = %callback.amount, "callback amount is not a valid amount");
            return;
        }
    };
    let record = DonationRecord::new_pending(
        callback.txnid.clone(),
        amount,
        callback.email.clone(),
        callback.firstname.clone(),
        callback.phone.clone(),
    );
    match state.store.create_if_absent(record).await {
        Ok(true) => logger::info!("recorded donation first seen in callback"),
        Ok(false) => {}
        Err(error) => logger::warn!(?error, "failed to record donation"),
    }
}

async fn send_receipt(state: &AppState, callback: &VerifiedCallback) {
    let amount = match MinorUnit::from_major_unit_str(&callback.amount) {
        Ok(amount) => amount,
        Err(error) => {
            logger::warn!(?error, "receipt skipped, callback amount is not a valid amount");
            return;
        }
    };
    let receipt = ReceiptDetails {
        email: callback.email.clone(),
        firstname: callback.firstname.clone(),
        amount,
        txnid: callback.txnid.clone(),
        payu_money_id: callback.payu_reference.clone().unwrap_or_default(),
    };

    match state.mailer.send_receipt(&receipt).await {
        Ok(()) => logger::info!("receipt sent"),
        Err(error) => logger::error!(?error, "failed to send receipt"),
    }
}
