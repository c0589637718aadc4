use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{self, MessageState};

pub fn message_routes(state: Arc<MessageState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_messages))
        .route("/", post(handlers::send_message))
        .route("/notifications", get(handlers::list_notifications))
        .with_state(state)
}
