// libs/message-cell/src/services/messages.rs
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use shared_backend::BackendClient;
use shared_config::AppConfig;
use shared_models::api::ApiMessage;

use crate::models::{Message, MessageError, MessageListResponse, SendMessageRequest};

const MAX_CONTENT_CHARS: usize = 2000;

pub struct MessageService {
    backend: BackendClient,
}

impl MessageService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    pub async fn list_messages(&self, auth_token: &str) -> Result<Vec<Message>, MessageError> {
        if auth_token.is_empty() {
            return Err(MessageError::Unauthenticated);
        }

        let response: MessageListResponse = self
            .backend
            .request(Method::GET, "/api/user/messages", Some(auth_token), None)
            .await?;

        if !response.success {
            return Err(MessageError::BackendRejection(
                "Failed to load messages".to_string(),
            ));
        }

        Ok(response.messages)
    }

    pub async fn send_message(
        &self,
        request: SendMessageRequest,
        auth_token: &str,
    ) -> Result<ApiMessage, MessageError> {
        if auth_token.is_empty() {
            return Err(MessageError::Unauthenticated);
        }

        let content = request.content.trim();
        if content.is_empty() {
            return Err(MessageError::ValidationError(
                "Message must not be empty".to_string(),
            ));
        }
        if content.chars().count() > MAX_CONTENT_CHARS {
            return Err(MessageError::ValidationError(format!(
                "Message must be at most {} characters",
                MAX_CONTENT_CHARS
            )));
        }

        debug!("Sending message to doctor {}", request.doctor_id);

        let response: ApiMessage = self
            .backend
            .request(
                Method::POST,
                "/api/user/send-message",
                Some(auth_token),
                Some(json!({
                    "docId": request.doctor_id,
                    "content": content,
                })),
            )
            .await?;

        if !response.success {
            return Err(MessageError::BackendRejection(response.message));
        }

        info!("Message delivered to doctor {}", request.doctor_id);
        Ok(response)
    }
}
