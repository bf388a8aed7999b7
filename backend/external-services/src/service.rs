use std::time::Duration;

use common_utils::CustomResult;
use domain_types::errors::MailerError;
use error_stack::{report, ResultExt};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::field::Empty;

/// Idle pooled connections are dropped after this long.
const IDLE_POOL_CONNECTION_TIMEOUT_SECS: u64 = 90;

/// Raw outcome of an outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

impl Response {
    pub fn is_server_error(&self) -> bool {
        (500..=599).contains(&self.status_code)
    }
}

/// Builds an HTTP client whose every request is bounded by `request_timeout`.
pub fn create_client(request_timeout: Duration) -> CustomResult<Client, MailerError> {
    Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(IDLE_POOL_CONNECTION_TIMEOUT_SECS))
        .timeout(request_timeout)
        .build()
        .change_context(MailerError::ClientConstructionFailed)
        .inspect_err(|err| {
            error_log(
                "ERROR",
                &json!(format!("Failed to construct base client. Error: {:?}", err)),
            );
        })
}

/// Sends one request. `Ok(Err(_))` carries a 4xx/5xx answer, `Err(_)` means
/// nothing usable came back.
#[tracing::instrument(
    name = "call_external_api",
    skip_all,
    fields(
        request.url = Empty,
        response.status_code = Empty,
        latency = Empty,
    )
)]
pub async fn call_external_api(
    client: &Client,
    request: reqwest::RequestBuilder,
) -> CustomResult<Result<Response, Response>, MailerError> {
    let request = request
        .build()
        .change_context(MailerError::RequestEncodingFailed)?;
    tracing::Span::current().record("request.url", tracing::field::display(request.url()));

    let start = tokio::time::Instant::now();
    let response = client.execute(request).await.map_err(|error| {
        let api_error = match error {
            error if error.is_timeout() => MailerError::RequestTimeoutReceived,
            _ => MailerError::RequestNotSent(error.to_string()),
        };
        info_log(
            "REQUEST_FAILURE",
            &json!("Unable to send request to email provider."),
        );
        report!(api_error)
    });

    let result = handle_response(response).await;
    tracing::Span::current().record("latency", start.elapsed().as_millis());
    result
}

async fn handle_response(
    response: CustomResult<reqwest::Response, MailerError>,
) -> CustomResult<Result<Response, Response>, MailerError> {
    let response = response?;
    let status_code = response.status().as_u16();
    tracing::Span::current().record("response.status_code", status_code);

    let body = response.text().await.map_err(|error| {
        let api_error = match error {
            error if error.is_timeout() => MailerError::RequestTimeoutReceived,
            _ => MailerError::RequestNotSent(error.to_string()),
        };
        report!(api_error)
    })?;
    let response = Response { status_code, body };

    match status_code {
        200..=299 => Ok(Ok(response)),
        400..=599 => Ok(Err(response)),
        _ => {
            info_log(
                "UNEXPECTED_RESPONSE",
                &json!("Unexpected response from server."),
            );
            Err(report!(MailerError::UnexpectedResponse { status_code }))
        }
    }
}

pub fn debug_log(action: &str, message: &Value) {
    tracing::debug!(tags = %action, json_value= %message);
}

pub fn info_log(action: &str, message: &Value) {
    tracing::info!(tags = %action, json_value= %message);
}

pub fn error_log(action: &str, message: &Value) {
    tracing::error!(tags = %action, json_value= %message);
}

pub fn warn_log(action: &str, message: &Value) {
    tracing::warn!(tags = %action, json_value= %message);
}
