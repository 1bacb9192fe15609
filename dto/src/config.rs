use serde::{Deserialize, Serialize};

pub const DEFAULT_CREDENTIAL_KEY: &str = "token_console:credential";
pub const DEFAULT_THEME_KEY: &str = "token_console:theme";

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Prefix for every API path. Empty means same origin.
    pub api_base: String,
    /// Local storage key of the remembered credential.
    pub credential_key: String,
    /// Local storage key of the theme preference.
    pub theme_key: String,
    /// Seconds an error toast stays up.
    pub error_toast_secs: u64,
    /// Seconds any other toast stays up.
    pub toast_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            credential_key: DEFAULT_CREDENTIAL_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
            error_toast_secs: 10,
            toast_secs: 5,
        }
    }
}

impl ConsoleConfig {
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.credential_key.is_empty() || self.theme_key.is_empty() {
            return Err("storage keys cannot be empty".into());
        }
        if self.credential_key == self.theme_key {
            return Err("credential_key and theme_key must differ".into());
        }
        Ok(())
    }
}
