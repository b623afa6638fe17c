use serde::{Deserialize, Serialize};

/// Vehicle master data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub registration: String,   // e.g. "ABC123GP"
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub owner: String,          // haulier operating the vehicle
}
