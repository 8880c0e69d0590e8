//! User-facing notifications for completed and failed actions.

use std::fmt;

use tally_core::StoreError;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A short message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: &'static str,
    pub description: String,
}

impl Notification {
    pub fn success(title: &'static str, description: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title,
            description: description.into(),
        }
    }

    pub fn error(title: &'static str, description: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title,
            description: description.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// How a user action ended once storage errors have been absorbed.
#[derive(Debug)]
pub enum Outcome {
    Done,
    Failed(Notification),
}

/// Logs a storage failure and turns it into an error notification.
///
/// `action` completes the sentence "There was an error ...".
pub fn failure(action: &str, err: &StoreError) -> Notification {
    tracing::error!(error = %err, action, "storage operation failed");
    Notification::error("Error", format!("There was an error {action}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use tally_core::RecordId;

    #[test]
    fn failure_describes_action_and_cause() {
        let notification = failure("saving the record", &StoreError::NotFound(RecordId::new(4)));
        assert_eq!(notification.level, Level::Error);
        assert_eq!(
            notification.to_string(),
            "Error: There was an error saving the record: record 4 not found"
        );
    }

    #[test]
    fn success_display() {
        let notification = Notification::success("Record deleted", "Record #2 was deleted.");
        assert_eq!(notification.to_string(), "Record deleted: Record #2 was deleted.");
    }
}
