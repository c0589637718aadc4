// libs/doctor-cell/src/services/review.rs
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use shared_backend::BackendClient;
use shared_config::AppConfig;
use shared_models::api::ApiMessage;

use crate::models::{DoctorError, SubmitReviewRequest};

const MAX_COMMENT_CHARS: usize = 1000;

pub struct ReviewService {
    backend: BackendClient,
}

impl ReviewService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    /// Submit a patient review for a doctor. Rating and comment are validated
    /// locally; the backend message is surfaced verbatim on rejection.
    pub async fn submit_review(
        &self,
        doctor_id: &str,
        request: SubmitReviewRequest,
        auth_token: &str,
    ) -> Result<ApiMessage, DoctorError> {
        if auth_token.is_empty() {
            return Err(DoctorError::Unauthenticated);
        }

        if !(1..=5).contains(&request.rating) {
            return Err(DoctorError::ValidationError(
                "Rating must be between 1 and 5".to_string(),
            ));
        }

        let comment = request.comment.trim();
        if comment.is_empty() {
            return Err(DoctorError::ValidationError(
                "Comment must not be empty".to_string(),
            ));
        }
        if comment.chars().count() > MAX_COMMENT_CHARS {
            return Err(DoctorError::ValidationError(format!(
                "Comment must be at most {} characters",
                MAX_COMMENT_CHARS
            )));
        }

        debug!("Submitting review for doctor {}", doctor_id);

        let body = json!({
            "docId": doctor_id,
            "rating": request.rating,
            "comment": comment,
        });

        let response: ApiMessage = self
            .backend
            .request(Method::POST, "/api/user/review", Some(auth_token), Some(body))
            .await?;

        if !response.success {
            return Err(DoctorError::BackendRejection(response.message));
        }

        info!("Review recorded for doctor {}", doctor_id);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_utils::test_utils::TestConfig;

    fn service() -> ReviewService {
        ReviewService::new(&TestConfig::with_backend("http://localhost:4000"))
    }

    #[tokio::test]
    async fn rejects_out_of_range_rating() {
        let request = SubmitReviewRequest {
            rating: 6,
            comment: "Very helpful".to_string(),
        };
        let err = service().submit_review("doc-1", request, "token").await.unwrap_err();
        assert_matches!(err, DoctorError::ValidationError(_));
    }

    #[tokio::test]
    async fn rejects_blank_comment() {
        let request = SubmitReviewRequest {
            rating: 4,
            comment: "   ".to_string(),
        };
        let err = service().submit_review("doc-1", request, "token").await.unwrap_err();
        assert_matches!(err, DoctorError::ValidationError(_));
    }

    #[tokio::test]
    async fn rejects_missing_token_before_any_network_call() {
        let request = SubmitReviewRequest {
            rating: 4,
            comment: "Great doctor".to_string(),
        };
        let err = service().submit_review("doc-1", request, "").await.unwrap_err();
        assert_matches!(err, DoctorError::Unauthenticated);
    }
}
