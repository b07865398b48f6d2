//! User-facing notices
//!
//! Failures caught at the repository boundary are published here instead of
//! propagating as uncaught errors.

use serde::Serialize;

/// How a notice should be surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Must be acknowledged by the user
    Blocking,
    /// Diagnostic record only
    Diagnostic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn blocking(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Blocking,
            message: message.into(),
        }
    }

    pub fn diagnostic(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Diagnostic,
            message: message.into(),
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.level == NoticeLevel::Blocking
    }
}
