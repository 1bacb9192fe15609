use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Basic-auth credential, the base64 encoding of `username:password`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn encode(username: &str, password: &str) -> Self {
        Self(STANDARD.encode(format!("{username}:{password}")))
    }

    /// Wrap an already encoded credential, e.g. one restored from storage.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("Basic {}", self.0)
    }

    /// The username half, if the credential decodes cleanly.
    pub fn username(&self) -> Option<String> {
        let decoded = STANDARD.decode(&self.0).ok()?;
        let text = String::from_utf8(decoded).ok()?;
        text.split_once(':').map(|(user, _)| user.to_string())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"REDACTED").finish()
    }
}

#[derive(Clone, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Keep the credential in local storage for auto-login.
    pub remember: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            remember: true,
        }
    }
}

impl LoginForm {
    pub fn credential(&self) -> Credential {
        Credential::encode(&self.username, &self.password)
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"REDACTED")
            .field("remember", &self.remember)
            .finish()
    }
}
