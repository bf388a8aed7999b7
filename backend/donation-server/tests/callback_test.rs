mod common;

use axum::http::StatusCode;
use common::{send, test_app, test_app_with_config, test_config, Callback};
use common_utils::{id_type::TransactionId, types::MinorUnit};
use domain_types::donation::DonationStatus;
use interfaces::store::DonationStore;
use serde_json::json;

async fn place_order(app: &common::TestApp) -> String {
    let (status, body) = send(
        &app.router,
        common::json_request(
            "/api/payu/order",
            json!({"amount": 500, "firstname": "Asha", "email": "asha@example.com"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["payuData"]["txnid"].as_str().unwrap().to_string()
}

fn callback<'a>(status: &'a str, txnid: &'a str) -> Callback<'a> {
    Callback {
        status,
        txnid,
        amount: "500.00",
        firstname: "Asha",
        email: "asha@example.com",
        mihpayid: "403993715531",
    }
}

async fn status_of(app: &common::TestApp, txnid: &str) -> Option<DonationStatus> {
    app.store
        .find(&TransactionId::new_unchecked(txnid))
        .await
        .unwrap()
        .map(|record| record.status)
}

#[tokio::test]
async fn successful_payment_completes_the_donation_and_sends_a_receipt() {
    let app = test_app();
    let txnid = place_order(&app).await;

    let (status, body) = send(&app.router, callback("success", &txnid).request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let record = app
        .store
        .find(&TransactionId::new_unchecked(txnid.as_str()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, DonationStatus::Completed);
    assert_eq!(record.payu_money_id.as_deref(), Some("403993715531"));

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].email, "asha@example.com");
    assert_eq!(sent[0].firstname, "Asha");
    assert_eq!(sent[0].amount, MinorUnit::new(50_000));
    assert_eq!(sent[0].txnid.get_string_repr(), txnid);
    assert_eq!(sent[0].payu_money_id, "403993715531");
}

#[tokio::test]
async fn replayed_success_sends_no_second_receipt() {
    let app = test_app();
    let txnid = place_order(&app).await;

    for _ in 0..3 {
        let (status, _) = send(&app.router, callback("success", &txnid).request()).await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(status_of(&app, &txnid).await, Some(DonationStatus::Completed));
    assert_eq!(app.mailer.sent().len(), 1);
}

#[tokio::test]
async fn failed_payment_marks_the_donation_failed() {
    let app = test_app();
    let txnid = place_order(&app).await;

    let (status, body) = send(&app.router, callback("failure", &txnid).request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(status_of(&app, &txnid).await, Some(DonationStatus::Failed));
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn late_success_cannot_revive_a_failed_donation() {
    let app = test_app();
    let txnid = place_order(&app).await;

    send(&app.router, callback("failure", &txnid).request()).await;
    let (status, _) = send(&app.router, callback("success", &txnid).request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(status_of(&app, &txnid).await, Some(DonationStatus::Failed));
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn pending_callback_leaves_the_donation_pending() {
    let app = test_app();
    let txnid = place_order(&app).await;

    let (status, _) = send(&app.router, callback("pending", &txnid).request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(status_of(&app, &txnid).await, Some(DonationStatus::Pending));
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn forged_hash_is_rejected_without_side_effects() {
    let app = test_app();
    let txnid = "DN1700000000000forged0001";

    let (status, body) = send(
        &app.router,
        callback("success", txnid).request_with_hash(&"0".repeat(128)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "400");
    assert_eq!(status_of(&app, txnid).await, None);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn tampered_amount_is_rejected() {
    let app = test_app();
    let txnid = place_order(&app).await;
    let genuine = callback("success", &txnid);
    let hash = common::callback_hash("success", &txnid, "500.00", "Asha", "asha@example.com");

    let tampered = Callback {
        amount: "5.00",
        ..genuine
    };
    let (status, _) = send(&app.router, tampered.request_with_hash(&hash)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(status_of(&app, &txnid).await, Some(DonationStatus::Pending));
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn callback_for_an_unknown_order_is_recorded_and_applied() {
    let app = test_app();
    let txnid = "DN1700000000000unknown001";

    let (status, _) = send(&app.router, callback("success", txnid).request()).await;
    assert_eq!(status, StatusCode::OK);

    let record = app
        .store
        .find(&TransactionId::new_unchecked(txnid))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, DonationStatus::Completed);
    assert_eq!(record.amount.to_string(), "500.00");
    assert_eq!(record.email, "asha@example.com");
    assert_eq!(app.mailer.sent().len(), 1);
}

#[tokio::test]
async fn mailer_failure_is_still_acknowledged() {
    let app = test_app();
    let txnid = place_order(&app).await;
    app.mailer.set_failing(true);

    let (status, body) = send(&app.router, callback("success", &txnid).request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(status_of(&app, &txnid).await, Some(DonationStatus::Completed));
}

#[tokio::test]
async fn store_outage_still_sends_the_receipt() {
    let app = test_app();
    let txnid = place_order(&app).await;
    app.store.set_unavailable(true);

    let (status, body) = send(&app.router, callback("success", &txnid).request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].txnid.get_string_repr(), txnid);
    assert_eq!(sent[0].payu_money_id, "403993715531");

    app.store.set_unavailable(false);
    assert_eq!(status_of(&app, &txnid).await, Some(DonationStatus::Pending));
}

#[tokio::test]
async fn store_outage_sends_no_receipt_for_a_failed_payment() {
    let app = test_app();
    let txnid = place_order(&app).await;
    app.store.set_unavailable(true);

    let (status, _) = send(&app.router, callback("failure", &txnid).request()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn missing_salt_fails_the_callback() {
    let app = test_app_with_config(test_config(None));
    let (status, body) = send(
        &app.router,
        callback("success", "DN1700000000000nosalt001").request(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Something went wrong");
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn callback_without_a_hash_is_rejected() {
    let app = test_app();
    let request = common::form_request(
        "/api/payu/callback",
        &[
            ("status", "success"),
            ("txnid", "DN1700000000000nohash0001"),
            ("amount", "500.00"),
        ],
    );
    let (status, _) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.mailer.sent().is_empty());
}
