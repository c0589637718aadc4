// libs/payment-cell/src/store.rs
use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

use crate::models::PendingPayment;

/// Session-scoped cache of in-flight gateway payments.
///
/// Replaces the old global browser-storage cache: the store is passed by
/// reference (Arc) into the payment flow, and `clear` is called exactly once,
/// on a terminal reconciliation outcome. A `Pending` gateway status leaves
/// the entry in place for manual retry. Two sessions never see each other's
/// entries; concurrent completion of the *same* session relies on the backend
/// being idempotent on transaction id.
#[derive(Default)]
pub struct PendingPaymentStore {
    inner: RwLock<HashMap<String, PendingPayment>>,
}

impl PendingPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session_id: &str, payment: PendingPayment) {
        debug!(
            "Caching pending payment for session {} (appointment {})",
            session_id, payment.appointment_id
        );
        self.inner
            .write()
            .await
            .insert(session_id.to_string(), payment);
    }

    pub async fn get(&self, session_id: &str) -> Option<PendingPayment> {
        self.inner.read().await.get(session_id).cloned()
    }

    /// Remove and return the entry in one step.
    pub async fn take(&self, session_id: &str) -> Option<PendingPayment> {
        self.inner.write().await.remove(session_id)
    }

    /// Drop the entry for a session once its reconciliation reached a
    /// terminal outcome. Idempotent, but callers must not reach for it on a
    /// `Pending` outcome.
    pub async fn clear(&self, session_id: &str) {
        if self.inner.write().await.remove(session_id).is_some() {
            debug!("Cleared pending payment for session {}", session_id);
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
