#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common_utils::{id_type::TransactionId, CustomResult};
use connector_integration::connectors::payu::transformers::PayuVerifyInput;
use domain_types::{
    api::ReceiptDetails,
    donation::{DonationRecord, DonationStatus, StatusTransition},
    errors::{MailerError, StoreError},
};
use donation_server::{app, configs::Config, http::AppState};
use error_stack::report;
use external_services::store::InMemoryDonationStore;
use http_body_util::BodyExt;
use interfaces::{mailer::ReceiptMailer, store::DonationStore};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const MERCHANT_KEY: &str = "gtKFFx";
pub const MERCHANT_SALT: &str = "eCwWELxi";
pub const BASE_URL: &str = "https://donate.example.org";

/// In-memory store that can be switched into a failing mode.
#[derive(Default)]
pub struct FakeStore {
    inner: InMemoryDonationStore,
    unavailable: AtomicBool,
}

impl FakeStore {
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.is_empty().await
    }

    fn check(&self) -> CustomResult<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(report!(StoreError::Unavailable));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl DonationStore for FakeStore {
    async fn create_if_absent(&self, record: DonationRecord) -> CustomResult<bool, StoreError> {
        self.check()?;
        self.inner.create_if_absent(record).await
    }

    async fn transition_status(
        &self,
        txnid: &TransactionId,
        status: DonationStatus,
        payu_money_id: Option<String>,
    ) -> CustomResult<StatusTransition, StoreError> {
        self.check()?;
        self.inner.transition_status(txnid, status, payu_money_id).await
    }

    async fn find(&self, txnid: &TransactionId) -> CustomResult<Option<DonationRecord>, StoreError> {
        self.check()?;
        self.inner.find(txnid).await
    }
}

/// Mailer that remembers what it was asked to send.
#[derive(Default)]
pub struct FakeMailer {
    sent: Mutex<Vec<ReceiptDetails>>,
    failing: AtomicBool,
}

impl FakeMailer {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<ReceiptDetails> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ReceiptMailer for FakeMailer {
    async fn send_receipt(&self, receipt: &ReceiptDetails) -> CustomResult<(), MailerError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(report!(MailerError::UnexpectedResponse { status_code: 503 }));
        }
        self.sent.lock().unwrap().push(receipt.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<FakeStore>,
    pub mailer: Arc<FakeMailer>,
}

pub fn test_config(merchant_salt: Option<&str>) -> Config {
    serde_json::from_value(json!({
        "common": { "environment": "development" },
        "server": { "host": "127.0.0.1", "port": 8000 },
        "log": {
            "console": {
                "enabled": false,
                "level": "INFO",
                "log_format": "default",
                "filtering_directive": null
            }
        },
        "application": { "base_url": BASE_URL },
        "payu": {
            "merchant_key": MERCHANT_KEY,
            "merchant_salt": merchant_salt,
            "environment": "test"
        }
    }))
    .unwrap()
}

pub fn test_app() -> TestApp {
    test_app_with_config(test_config(Some(MERCHANT_SALT)))
}

pub fn test_app_with_config(config: Config) -> TestApp {
    let store = Arc::new(FakeStore::default());
    let mailer = Arc::new(FakeMailer::default());
    let state = AppState::new(Arc::new(config), store.clone(), mailer.clone());
    TestApp {
        router: app::router_with_layers(state),
        store,
        mailer,
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

pub fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

/// Hash PayU would attach to a callback for these fields.
pub fn callback_hash(
    status: &str,
    txnid: &str,
    amount: &str,
    firstname: &str,
    email: &str,
) -> String {
    PayuVerifyInput {
        additional_charges: None,
        status,
        key: MERCHANT_KEY,
        txnid,
        amount,
        productinfo: "Dog Adoption Donation",
        firstname,
        email,
        udf: [""; 5],
        salt: MERCHANT_SALT,
    }
    .generate_hash()
}

pub struct Callback<'a> {
    pub status: &'a str,
    pub txnid: &'a str,
    pub amount: &'a str,
    pub firstname: &'a str,
    pub email: &'a str,
    pub mihpayid: &'a str,
}

impl Callback<'_> {
    pub fn request(&self) -> Request<Body> {
        let hash = callback_hash(
            self.status,
            self.txnid,
            self.amount,
            self.firstname,
            self.email,
        );
        self.request_with_hash(&hash)
    }

    pub fn request_with_hash(&self, hash: &str) -> Request<Body> {
        form_request(
            "/api/payu/callback",
            &[
                ("mihpayid", self.mihpayid),
                ("mode", "UPI"),
                ("status", self.status),
                ("key", MERCHANT_KEY),
                ("txnid", self.txnid),
                ("amount", self.amount),
                ("productinfo", "Dog Adoption Donation"),
                ("firstname", self.firstname),
                ("email", self.email),
                ("udf1", ""),
                ("hash", hash),
            ],
        )
    }
}
