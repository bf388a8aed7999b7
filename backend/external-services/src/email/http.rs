use common_utils::{date_time, CustomResult};
use domain_types::{api::ReceiptDetails, errors::MailerError};
use error_stack::report;
use interfaces::mailer::ReceiptMailer;
use reqwest::Client;
use serde_json::json;

use super::{template, EmailSettings};
use crate::service::{call_external_api, create_client, info_log, warn_log};

#[derive(Debug, serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

/// Posts receipts to a Resend compatible `/emails` endpoint.
///
/// Transport failures, timeouts and 5xx answers are retried up to
/// `max_attempts` times with a linearly growing delay. A 4xx answer is final.
#[derive(Debug, Clone)]
pub struct HttpReceiptMailer {
    client: Client,
    settings: EmailSettings,
}

impl HttpReceiptMailer {
    pub fn new(settings: EmailSettings) -> CustomResult<Self, MailerError> {
        let client = create_client(settings.request_timeout())?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.settings.base_url.trim_end_matches('/'))
    }

    fn build_request(&self, receipt: &ReceiptDetails) -> reqwest::RequestBuilder {
        let body = SendEmailRequest {
            from: &self.settings.from_address,
            to: [receipt.email.as_str()],
            subject: &self.settings.subject,
            html: template::render_receipt(receipt, date_time::now()),
        };
        let request = self.client.post(self.endpoint()).json(&body);
        match self.settings.api_key() {
            Some(api_key) => request.bearer_auth(api_key),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl ReceiptMailer for HttpReceiptMailer {
    async fn send_receipt(&self, receipt: &ReceiptDetails) -> CustomResult<(), MailerError> {
        let max_attempts = self.settings.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let error = match call_external_api(&self.client, self.build_request(receipt)).await {
                Ok(Ok(_)) => {
                    info_log(
                        "RECEIPT_SENT",
                        &json!({ "txnid": receipt.txnid, "attempt": attempt }),
                    );
                    return Ok(());
                }
                Ok(Err(response)) if response.is_server_error() => {
                    report!(MailerError::UnexpectedResponse {
                        status_code: response.status_code,
                    })
                    .attach_printable(response.body)
                }
                Ok(Err(response)) => {
                    return Err(report!(MailerError::UnexpectedResponse {
                        status_code: response.status_code,
                    })
                    .attach_printable(response.body));
                }
                Err(error) => error,
            };

            if attempt >= max_attempts {
                return Err(error.attach_printable(format!("gave up after {attempt} attempts")));
            }
            warn_log(
                "RECEIPT_RETRY",
                &json!({
                    "txnid": receipt.txnid,
                    "attempt": attempt,
                    "error": error.current_context().to_string(),
                }),
            );
            tokio::time::sleep(self.settings.backoff(attempt)).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        routing::post,
        Router,
    };
    use common_utils::{id_type::TransactionId, types::MinorUnit};
    use hyperswitch_masking::Secret;

    use super::*;

    #[derive(Clone)]
    struct Provider {
        calls: Arc<AtomicUsize>,
        failures_before_success: usize,
        failure_status: StatusCode,
    }

    async fn emails(
        State(provider): State<Provider>,
        headers: HeaderMap,
        body: String,
    ) -> StatusCode {
        let call = provider.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(
            headers.get("authorization").and_then(|v| v.to_str().ok()),
            Some("Bearer re_test_key")
        );
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["to"][0], "asha@example.com");
        if call < provider.failures_before_success {
            provider.failure_status
        } else {
            StatusCode::OK
        }
    }

    async fn spawn_provider(
        failures_before_success: usize,
        failure_status: StatusCode,
    ) -> (String, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = Router::new().route("/emails", post(emails)).with_state(Provider {
            calls: Arc::clone(&calls),
            failures_before_success,
            failure_status,
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), calls)
    }

    fn settings(base_url: String) -> EmailSettings {
        EmailSettings {
            api_key: Some(Secret::new("re_test_key".to_string())),
            base_url,
            timeout_secs: 5,
            max_attempts: 3,
            retry_backoff_ms: 1,
            ..Default::default()
        }
    }

    fn receipt() -> ReceiptDetails {
        ReceiptDetails {
            email: "asha@example.com".to_string(),
            firstname: "Asha".to_string(),
            amount: MinorUnit::new(50_000),
            txnid: TransactionId::new_unchecked("DN1760745600000AbCdEfGhIj"),
            payu_money_id: "403993715531".to_string(),
        }
    }

    #[tokio::test]
    async fn server_errors_are_retried() {
        let (base_url, calls) = spawn_provider(2, StatusCode::SERVICE_UNAVAILABLE).await;
        let mailer = HttpReceiptMailer::new(settings(base_url)).unwrap();

        mailer.send_receipt(&receipt()).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let (base_url, calls) = spawn_provider(usize::MAX, StatusCode::INTERNAL_SERVER_ERROR).await;
        let mailer = HttpReceiptMailer::new(settings(base_url)).unwrap();

        let error = mailer.send_receipt(&receipt()).await.unwrap_err();
        assert_eq!(
            error.current_context(),
            &MailerError::UnexpectedResponse { status_code: 500 }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let (base_url, calls) = spawn_provider(usize::MAX, StatusCode::UNPROCESSABLE_ENTITY).await;
        let mailer = HttpReceiptMailer::new(settings(base_url)).unwrap();

        let error = mailer.send_receipt(&receipt()).await.unwrap_err();
        assert_eq!(
            error.current_context(),
            &MailerError::UnexpectedResponse { status_code: 422 }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mailer = HttpReceiptMailer::new(settings(format!("http://{addr}"))).unwrap();
        let error = mailer.send_receipt(&receipt()).await.unwrap_err();
        assert!(matches!(
            error.current_context(),
            MailerError::RequestNotSent(_) | MailerError::RequestTimeoutReceived
        ));
    }
}
