use serde::{Deserialize, Serialize};

/// The envelope every backend mutation responds with. Extra fields are
/// carried by per-cell response types that flatten over this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
