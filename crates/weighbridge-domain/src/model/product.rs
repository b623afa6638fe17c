use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub code: String,           // e.g. "COAL-A"
    pub name: String,
    #[serde(default)]
    pub category: String,
}
