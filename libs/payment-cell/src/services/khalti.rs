// libs/payment-cell/src/services/khalti.rs
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use shared_backend::BackendClient;
use shared_config::AppConfig;
use shared_models::api::ApiMessage;

use crate::models::{
    GatewayStatus, InitiatePaymentRequest, PaymentError, PaymentRecord, VerifyResponse,
};

/// Client for the backend's Khalti endpoints. The gateway itself is never
/// called directly; the backend brokers every gateway interaction.
pub struct KhaltiService {
    backend: BackendClient,
}

impl KhaltiService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    /// Start a gateway payment. On success the backend's `message` field is
    /// the redirect URL the user must be sent to.
    pub async fn initiate(
        &self,
        request: &InitiatePaymentRequest,
        auth_token: &str,
    ) -> Result<String, PaymentError> {
        if auth_token.is_empty() {
            return Err(PaymentError::Unauthenticated);
        }
        if request.amount <= 0.0 {
            return Err(PaymentError::ValidationError(
                "Amount must be positive".to_string(),
            ));
        }

        debug!(
            "Initiating {} payment for appointment {}",
            request.method, request.appointment_id
        );

        let body = json!({
            "product_id": request.appointment_id,
            "buyer_name": request.buyer_name,
            "amount": request.amount,
            "appointment_id": request.appointment_id,
        });

        let response: ApiMessage = self
            .backend
            .request(
                Method::POST,
                "/khalti/complete-khalti-payment",
                Some(auth_token),
                Some(body),
            )
            .await?;

        if !response.success {
            return Err(PaymentError::BackendRejection(response.message));
        }

        info!(
            "Gateway redirect issued for appointment {}",
            request.appointment_id
        );
        Ok(response.message)
    }

    /// Ask the backend to verify a gateway transaction.
    pub async fn verify(&self, transaction_id: &str) -> Result<GatewayStatus, PaymentError> {
        debug!("Verifying gateway transaction {}", transaction_id);

        let response: VerifyResponse = self
            .backend
            .request(
                Method::POST,
                "/khalti/verify",
                None,
                Some(json!({ "pidx": transaction_id })),
            )
            .await?;

        let status = response.message.status().unwrap_or_default();
        Ok(GatewayStatus::from_backend(status))
    }

    /// Record a completed payment against its appointment.
    pub async fn save_payment_details(
        &self,
        record: &PaymentRecord,
    ) -> Result<ApiMessage, PaymentError> {
        let response: ApiMessage = self
            .backend
            .request(
                Method::POST,
                "/khalti/save-payment-details",
                None,
                Some(json!(record)),
            )
            .await?;

        if !response.success {
            return Err(PaymentError::BackendRejection(response.message));
        }

        Ok(response)
    }
}
