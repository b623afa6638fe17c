//! Short operator messages for capture events

use std::fmt;

use serde::Serialize;
use weighbridge_domain::model::TransactionRecord;
use weighbridge_types::{format_kg, Kilograms};

use super::CaptureServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A title plus one line of detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn info(title: &str, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.to_string(),
            description: description.into(),
        }
    }

    fn error(title: &str, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.to_string(),
            description: description.into(),
        }
    }

    pub fn first_captured(kg: Kilograms) -> Self {
        Self::info("First Mass Captured", format!("{} kg recorded", format_kg(kg)))
    }

    pub fn second_captured(kg: Kilograms) -> Self {
        Self::info("Second Mass Captured", format!("{} kg recorded", format_kg(kg)))
    }

    /// Capture button pressed while the reading is unusable
    pub fn capture_unavailable() -> Self {
        Self::error("Scale Not Ready", "Wait for a stable, non-zero reading")
    }

    pub fn saved(record: &TransactionRecord) -> Self {
        Self::info(
            "Transaction Saved",
            format!("Transaction {} has been saved", record.transaction_no),
        )
    }

    pub fn from_error(err: &CaptureServiceError) -> Self {
        match err {
            CaptureServiceError::Validation(e) => Self::error("Validation Error", e.to_string()),
            CaptureServiceError::NotFound(no) => {
                Self::error("Not Found", format!("Transaction {} does not exist", no))
            }
            CaptureServiceError::StoreError(msg) => Self::error("Save Failed", msg.clone()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weighbridge_types::ValidationError;

    #[test]
    fn test_capture_notice_formats_kg() {
        let notice = Notice::first_captured(35420.0);
        assert_eq!(notice.title, "First Mass Captured");
        assert_eq!(notice.description, "35,420 kg recorded");
        assert!(!notice.is_error());
    }

    #[test]
    fn test_capture_unavailable_is_error() {
        let notice = Notice::capture_unavailable();
        assert!(notice.is_error());
        assert_eq!(notice.to_string(), "Scale Not Ready: Wait for a stable, non-zero reading");
    }

    #[test]
    fn test_error_notice_carries_validation_message() {
        let err = CaptureServiceError::Validation(ValidationError::FirstMassMissing);
        let notice = Notice::from_error(&err);
        assert!(notice.is_error());
        assert_eq!(
            notice.to_string(),
            "Validation Error: Please capture first mass before second mass"
        );
    }
}
