use std::sync::Arc;

use axum::{Router, routing::get};

use appointment_cell::router::appointment_routes;
use doctor_cell::router::doctor_routes;
use message_cell::handlers::MessageState;
use message_cell::router::message_routes;
use message_cell::services::poller::NotificationCache;
use payment_cell::handlers::PaymentState;
use payment_cell::router::payment_routes;
use payment_cell::store::PendingPaymentStore;
use shared_config::AppConfig;

pub fn create_router(
    config: AppConfig,
    pending_payments: Arc<PendingPaymentStore>,
    notifications: Arc<NotificationCache>,
) -> Router {
    let shared_config = Arc::new(config.clone());

    let payment_state = Arc::new(PaymentState {
        config: config.clone(),
        store: pending_payments,
    });

    let message_state = Arc::new(MessageState {
        config,
        notifications,
    });

    Router::new()
        .route("/", get(|| async { "Medibook gateway is running!" }))
        .nest("/doctors", doctor_routes(shared_config.clone()))
        .nest("/appointments", appointment_routes(shared_config))
        .nest("/payments", payment_routes(payment_state))
        .nest("/messages", message_routes(message_state))
}
