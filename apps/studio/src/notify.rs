use serde::Serialize;

/// Auto-dismiss delay for every notification.
pub const DISMISS_AFTER_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Warning,
    Error,
}

/// Transient message shown to the user after save, load or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub dismiss_after_ms: u64,
}

impl Notification {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            dismiss_after_ms: DISMISS_AFTER_MS,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_serializes_lowercase_level() {
        let value = serde_json::to_value(Notification::warning("Saved locally only")).unwrap();
        assert_eq!(
            value,
            json!({
                "level": "warning",
                "message": "Saved locally only",
                "dismiss_after_ms": 3000
            })
        );
    }
}
