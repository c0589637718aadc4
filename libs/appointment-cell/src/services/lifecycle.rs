// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{AppointmentError, AppointmentStatus};

pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed.
    pub fn validate_status_transition(
        &self,
        current_status: &AppointmentStatus,
        new_status: &AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!(
            "Validating status transition from {} to {}",
            current_status, new_status
        );

        let valid_transitions = self.get_valid_transitions(current_status);

        if !valid_transitions.contains(new_status) {
            warn!(
                "Invalid status transition attempted: {} -> {}",
                current_status, new_status
            );
            return Err(AppointmentError::InvalidStatusTransition(
                current_status.clone(),
            ));
        }

        Ok(())
    }

    /// All valid next statuses for a given current status. Payment requires
    /// confirmation first; paid, rejected and cancelled are terminal.
    pub fn get_valid_transitions(
        &self,
        current_status: &AppointmentStatus,
    ) -> Vec<AppointmentStatus> {
        match current_status {
            AppointmentStatus::Pending => vec![
                AppointmentStatus::Confirmed,
                AppointmentStatus::Rejected,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Confirmed => vec![
                AppointmentStatus::Paid,
                AppointmentStatus::Cancelled,
            ],
            // Terminal states - no transitions allowed
            AppointmentStatus::Paid => vec![],
            AppointmentStatus::Rejected => vec![],
            AppointmentStatus::Cancelled => vec![],
        }
    }

    pub fn is_terminal(&self, status: &AppointmentStatus) -> bool {
        self.get_valid_transitions(status).is_empty()
    }
}

impl Default for AppointmentLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn pending_can_confirm_reject_or_cancel() {
        let lifecycle = AppointmentLifecycleService::new();
        for next in [
            AppointmentStatus::Confirmed,
            AppointmentStatus::Rejected,
            AppointmentStatus::Cancelled,
        ] {
            assert!(lifecycle
                .validate_status_transition(&AppointmentStatus::Pending, &next)
                .is_ok());
        }
    }

    #[test]
    fn payment_requires_confirmation_first() {
        let lifecycle = AppointmentLifecycleService::new();
        let err = lifecycle
            .validate_status_transition(&AppointmentStatus::Pending, &AppointmentStatus::Paid)
            .unwrap_err();
        assert_matches!(err, AppointmentError::InvalidStatusTransition(_));

        assert!(lifecycle
            .validate_status_transition(&AppointmentStatus::Confirmed, &AppointmentStatus::Paid)
            .is_ok());
    }

    #[test]
    fn terminal_states_admit_no_transitions() {
        let lifecycle = AppointmentLifecycleService::new();
        for terminal in [
            AppointmentStatus::Paid,
            AppointmentStatus::Rejected,
            AppointmentStatus::Cancelled,
        ] {
            assert!(lifecycle.is_terminal(&terminal));
            for next in [
                AppointmentStatus::Pending,
                AppointmentStatus::Confirmed,
                AppointmentStatus::Paid,
                AppointmentStatus::Cancelled,
            ] {
                assert!(lifecycle
                    .validate_status_transition(&terminal, &next)
                    .is_err());
            }
        }
    }
}
