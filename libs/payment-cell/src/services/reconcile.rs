// libs/payment-cell/src/services/reconcile.rs
use std::sync::Arc;

use chrono::Utc;
use reqwest::Url;
use tracing::{debug, info, warn};

use shared_config::AppConfig;

use crate::models::{
    GatewayStatus, InitiatePaymentRequest, PaymentError, PaymentRecord, PendingPayment,
    ReconcileOutcome, RedirectQuery,
};
use crate::services::khalti::KhaltiService;
use crate::store::PendingPaymentStore;

/// Query keys a gateway redirect may carry the transaction id under.
const TRANSACTION_ID_KEYS: &[&str] = &["pidx", "txnId", "transaction_uuid"];

/// Matches a gateway redirect back to the session's cached pending payment
/// and records the completion against the backend.
pub struct ReconcileService {
    khalti: KhaltiService,
    store: Arc<PendingPaymentStore>,
}

impl ReconcileService {
    pub fn new(config: &AppConfig, store: Arc<PendingPaymentStore>) -> Self {
        Self {
            khalti: KhaltiService::new(config),
            store,
        }
    }

    /// Start a gateway payment and cache the pending record for the session
    /// before handing back the redirect URL.
    pub async fn initiate(
        &self,
        session_id: &str,
        request: InitiatePaymentRequest,
        auth_token: &str,
    ) -> Result<String, PaymentError> {
        let redirect_url = self.khalti.initiate(&request, auth_token).await?;

        self.store
            .insert(
                session_id,
                PendingPayment {
                    appointment_id: request.appointment_id,
                    buyer_name: request.buyer_name,
                    amount: request.amount,
                    method: request.method,
                    created_at: Utc::now(),
                },
            )
            .await;

        Ok(redirect_url)
    }

    /// Redirect-verify flow: interpret the gateway's redirect query, confirm
    /// the transaction with the backend and report the outcome.
    ///
    /// The cached entry is cleared only on terminal outcomes; a `Pending`
    /// gateway status keeps it for manual retry. A missing transaction id
    /// fails without touching the backend.
    pub async fn verify_redirect(
        &self,
        session_id: &str,
        query: &RedirectQuery,
    ) -> Result<ReconcileOutcome, PaymentError> {
        let Some(transaction_id) = query.transaction_id() else {
            warn!("Gateway redirect carried no transaction identifier");
            self.store.clear(session_id).await;
            return Ok(ReconcileOutcome::Failed {
                reason: "Missing transaction identifier".to_string(),
            });
        };

        // A transport failure leaves the entry cached: the user can reload
        // and retry verification, which stays idempotent backend-side.
        let status = self.khalti.verify(transaction_id).await?;

        match status {
            GatewayStatus::Completed => {
                if let Some(pending) = self.store.get(session_id).await {
                    self.persist_completion(&pending, transaction_id).await;
                } else {
                    warn!(
                        "Transaction {} verified but no pending payment cached for session {}",
                        transaction_id, session_id
                    );
                }
                self.store.clear(session_id).await;

                info!("Payment {} reconciled as completed", transaction_id);
                Ok(ReconcileOutcome::Completed {
                    transaction_id: transaction_id.to_string(),
                })
            }
            GatewayStatus::Pending => {
                debug!("Transaction {} still pending at the gateway", transaction_id);
                Ok(ReconcileOutcome::Pending)
            }
            GatewayStatus::Other(status) => {
                warn!(
                    "Ambiguous gateway status '{}' for transaction {}",
                    status, transaction_id
                );
                self.store.clear(session_id).await;
                Ok(ReconcileOutcome::Failed {
                    reason: format!("Unexpected payment status: {}", status),
                })
            }
        }
    }

    /// Direct-confirm flow, used by the alternate success page: take the
    /// session's cached pending payment, pull the transaction id out of the
    /// raw redirect URL and post the completion record. The post is
    /// fire-and-forget: its failure is logged but never blocks the success
    /// confirmation.
    pub async fn confirm_from_redirect(
        &self,
        session_id: &str,
        redirect_url: &str,
    ) -> Result<ReconcileOutcome, PaymentError> {
        let Some(pending) = self.store.take(session_id).await else {
            return Err(PaymentError::NoPendingPayment);
        };

        let Some(transaction_id) = extract_transaction_id(redirect_url) else {
            warn!("Could not extract a transaction id from redirect URL");
            return Ok(ReconcileOutcome::Failed {
                reason: "Redirect URL carried no transaction identifier".to_string(),
            });
        };

        self.persist_completion(&pending, &transaction_id).await;

        info!(
            "Payment for appointment {} confirmed (transaction {})",
            pending.appointment_id, transaction_id
        );
        Ok(ReconcileOutcome::Completed { transaction_id })
    }

    async fn persist_completion(&self, pending: &PendingPayment, transaction_id: &str) {
        let record = PaymentRecord {
            appointment_id: pending.appointment_id.clone(),
            user: pending.buyer_name.clone(),
            amount: pending.amount,
            payment_method: pending.method,
            payment_status: "Completed".to_string(),
            transaction_id: transaction_id.to_string(),
            payment_date: Utc::now(),
        };

        if let Err(e) = self.khalti.save_payment_details(&record).await {
            warn!(
                "Failed to save payment details for appointment {}: {}",
                pending.appointment_id, e
            );
        }
    }
}

/// Structured parse of a gateway redirect URL. The transaction id lives in
/// the query string under one of a small set of documented keys; its position
/// in the URL is irrelevant.
fn extract_transaction_id(redirect_url: &str) -> Option<String> {
    let url = Url::parse(redirect_url).ok()?;

    for key in TRANSACTION_ID_KEYS {
        if let Some((_, value)) = url.query_pairs().find(|(k, _)| k == key) {
            if !value.is_empty() {
                return Some(value.into_owned());
            }
        }
    }

    None
}
