//! Shared value types: masses, scale readings, transaction direction

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Mass in kilograms
pub type Kilograms = f64;

/// Scale status as reported by a weight source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleStatus {
    /// Displayed weight is settled and safe to capture
    #[default]
    Stable,
    /// Weight is changing; the displayed value is unreliable
    Reading,
    /// Scale fault
    Error,
}

impl ScaleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ScaleStatus::Stable => "STABLE",
            ScaleStatus::Reading => "READING",
            ScaleStatus::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for ScaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single weight reading paired with its stability status
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleReading {
    /// Current weight (kg)
    pub weight_kg: Kilograms,
    /// Scale status at the time of the reading
    pub status: ScaleStatus,
}

impl ScaleReading {
    pub fn stable(weight_kg: Kilograms) -> Self {
        Self {
            weight_kg,
            status: ScaleStatus::Stable,
        }
    }

    pub fn reading(weight_kg: Kilograms) -> Self {
        Self {
            weight_kg,
            status: ScaleStatus::Reading,
        }
    }

    /// A reading can be captured only when stable and above zero
    pub fn is_capturable(&self) -> bool {
        self.status == ScaleStatus::Stable && self.weight_kg > 0.0
    }
}

/// Transaction direction (incoming vs outgoing material)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum TransactionType {
    #[default]
    Receipt,
    Dispatch,
}

impl TransactionType {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Receipt => "Receipt",
            TransactionType::Dispatch => "Dispatch",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Completion status of a stored transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// First mass recorded, vehicle has not returned for the second weighing
    Pending,
    /// Both masses recorded
    Complete,
}

impl TransactionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Complete => "Complete",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Bucket size for range reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ReportPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            ReportPeriod::Daily => "Daily",
            ReportPeriod::Weekly => "Weekly",
            ReportPeriod::Monthly => "Monthly",
            ReportPeriod::Yearly => "Yearly",
        }
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Format kilograms with thousands separators ("35,420")
pub fn format_kg(weight: Kilograms) -> String {
    let rounded = weight.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
