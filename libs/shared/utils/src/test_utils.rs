use serde_json::{Value, json};

use shared_config::AppConfig;

pub struct TestConfig {
    pub backend_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:4000".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_backend(backend_url: &str) -> AppConfig {
        AppConfig {
            backend_url: backend_url.to_string(),
            notification_poll_secs: 30,
            notification_poll_max_backoff_secs: 300,
        }
    }
}

/// Canned backend responses shared across cell tests.
pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn doctor_profile(doctor_id: &str, slots_booked: Value) -> Value {
        json!({
            "id": doctor_id,
            "name": "Dr. Richard James",
            "speciality": "General physician",
            "degree": "MBBS",
            "experience": "4 Years",
            "about": "Dr. James has a strong commitment to delivering comprehensive medical care.",
            "fees": 50.0,
            "available": true,
            "slots_booked": slots_booked
        })
    }

    pub fn appointment(appointment_id: &str, user_id: &str, doctor_id: &str) -> Value {
        json!({
            "id": appointment_id,
            "user_id": user_id,
            "doc_id": doctor_id,
            "slot_date": "5_6_2024",
            "slot_time": "11:00 AM",
            "amount": 50.0,
            "status": "pending"
        })
    }

    pub fn success_message(message: &str) -> Value {
        json!({
            "success": true,
            "message": message
        })
    }

    pub fn failure_message(message: &str) -> Value {
        json!({
            "success": false,
            "message": message
        })
    }
}
