use serde::{Deserialize, Serialize};

pub type TokenId = i64;

/// Filler for the `token` field of an update. The API schema requires the
/// field but ignores it when changing the active flag.
pub const UPDATE_TOKEN_PLACEHOLDER: &str = "dummy";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub id: TokenId,
    pub token: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Server timestamp, kept as sent.
    pub created_at: String,
}

fn default_active() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUpdate {
    pub token: String,
    pub is_active: bool,
}

impl TokenUpdate {
    pub fn set_active(is_active: bool) -> Self {
        Self {
            token: UPDATE_TOKEN_PLACEHOLDER.to_string(),
            is_active,
        }
    }
}

/// Response of the generate endpoint. Only `token` is needed here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedToken {
    pub token: String,
    #[serde(default)]
    pub id: Option<TokenId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCheck {
    pub token: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCheckResponse {
    pub is_valid: bool,
}

/// Error body returned by the token API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorDetail {
    /// The `detail` field as display text. Validation errors carry a list
    /// instead of a string; those are rendered as JSON.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::String(_) | serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
