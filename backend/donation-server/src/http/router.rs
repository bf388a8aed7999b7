use axum::{
    routing::{get, post},
    Router,
};

use super::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        // PayU checkout
        .route("/api/payu/order", post(handlers::payments::create_order))
        .route("/api/payu/callback", post(handlers::payments::callback))
        // Donation log
        .route("/api/donations", post(handlers::donations::create_donation))
        .route(
            "/api/donations/status",
            post(handlers::donations::update_status),
        )
        .route(
            "/api/donations/{txnid}",
            get(handlers::donations::get_donation),
        )
        .route("/api/receipts", post(handlers::receipts::send_receipt))
        .with_state(state)
}
