use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{self, PaymentState};

pub fn payment_routes(state: Arc<PaymentState>) -> Router {
    Router::new()
        .route("/khalti/initiate", post(handlers::initiate_payment))
        .route("/khalti/verify", get(handlers::verify_payment))
        .route("/khalti/confirm", post(handlers::confirm_payment))
        .with_state(state)
}
