use chrono::{DateTime, Utc};
use weighbridge_types::Kilograms;

/// A mass taken from the scale, with the moment it was captured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapturedMass {
    pub kg: Kilograms,
    pub captured_at: DateTime<Utc>,
}

impl CapturedMass {
    pub fn now(kg: Kilograms) -> Self {
        Self {
            kg,
            captured_at: Utc::now(),
        }
    }
}

/// Capture progress
///
/// A second mass only exists alongside a first mass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum CaptureState {
    #[default]
    Empty,
    FirstCaptured {
        first: CapturedMass,
    },
    BothCaptured {
        first: CapturedMass,
        second: CapturedMass,
    },
}

impl CaptureState {
    pub fn first(&self) -> Option<CapturedMass> {
        match self {
            CaptureState::Empty => None,
            CaptureState::FirstCaptured { first } | CaptureState::BothCaptured { first, .. } => {
                Some(*first)
            }
        }
    }

    pub fn second(&self) -> Option<CapturedMass> {
        match self {
            CaptureState::BothCaptured { second, .. } => Some(*second),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CaptureState::Empty => "empty",
            CaptureState::FirstCaptured { .. } => "first captured",
            CaptureState::BothCaptured { .. } => "both captured",
        }
    }
}
