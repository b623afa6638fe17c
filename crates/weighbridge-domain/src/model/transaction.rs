//! Weighing transaction types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use weighbridge_types::{Kilograms, TransactionStatus, TransactionType};

use crate::service::net_mass::compute_net_mass;

/// A finalized weighing transaction, as handed to the transaction store
///
/// Net mass is not a field: it is always derived from the two masses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighingTransaction {
    pub id: Uuid,
    pub transaction_type: TransactionType,
    pub vehicle_registration: String,
    pub customer_id: String,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub haulier_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// First scale reading (kg)
    pub first_mass: Kilograms,
    pub first_mass_at: DateTime<Utc>,
    /// Second scale reading (kg), absent until the vehicle returns
    #[serde(default)]
    pub second_mass: Option<Kilograms>,
    #[serde(default)]
    pub second_mass_at: Option<DateTime<Utc>>,
}

impl WeighingTransaction {
    /// First mass minus second mass, when both are present
    pub fn net_mass(&self) -> Option<Kilograms> {
        compute_net_mass(Some(self.first_mass), self.second_mass)
    }

    pub fn status(&self) -> TransactionStatus {
        if self.second_mass.is_some() {
            TransactionStatus::Complete
        } else {
            TransactionStatus::Pending
        }
    }
}

/// A transaction as held by the store, with its sequential number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Zero-padded sequence number ("000001")
    pub transaction_no: String,
    pub saved_at: DateTime<Utc>,
    pub transaction: WeighingTransaction,
}

impl TransactionRecord {
    pub fn format_number(sequence: u64) -> String {
        format!("{:06}", sequence)
    }
}
