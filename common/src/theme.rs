use crate::storage::KeyValueStore;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString};

/// Class PatternFly uses to switch to its dark palette.
pub const DARK_THEME_CLASS: &str = "pf-v5-theme-dark";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Label of the button that switches away from this theme.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "🌙 Dark",
            Theme::Dark => "☀️ Light",
        }
    }

    /// Stored preference, `light` when missing or unreadable.
    pub fn load(store: &impl KeyValueStore, key: &str) -> Self {
        store
            .get(key)
            .and_then(|value| Theme::from_str(&value).ok())
            .unwrap_or_default()
    }

    pub fn save(self, store: &impl KeyValueStore, key: &str) {
        if let Err(e) = store.set(key, self.as_ref()) {
            log::error!("Failed to save theme preference: {e}");
        }
    }
}
