use strum::{AsRefStr, Display};

/// Which part of the console a message belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoticeScope {
    Auth,
    Generate,
    Tokens,
    Check,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A user-facing message produced by a console operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub scope: NoticeScope,
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(scope: NoticeScope, level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            scope,
            level,
            text: text.into(),
        }
    }

    pub fn success(scope: NoticeScope, text: impl Into<String>) -> Self {
        Self::new(scope, NoticeLevel::Success, text)
    }

    pub fn info(scope: NoticeScope, text: impl Into<String>) -> Self {
        Self::new(scope, NoticeLevel::Info, text)
    }

    pub fn error(scope: NoticeScope, text: impl Into<String>) -> Self {
        Self::new(scope, NoticeLevel::Error, text)
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
