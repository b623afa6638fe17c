//! Daily weighing statistics

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use weighbridge_types::{Kilograms, TransactionStatus, TransactionType};

use crate::model::TransactionRecord;

/// Totals for transactions whose first weighing fell on a given (UTC) date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub weighings: usize,
    pub vehicles: usize,
    pub completed: usize,
    pub pending: usize,
    pub completion_percent: Option<f64>,
    pub received_net_kg: Kilograms,
    pub dispatched_net_kg: Kilograms,
}

impl DailySummary {
    pub fn for_date(records: &[TransactionRecord], date: NaiveDate) -> Self {
        let todays: Vec<_> = records
            .iter()
            .map(|r| &r.transaction)
            .filter(|tx| tx.first_mass_at.date_naive() == date)
            .collect();

        let vehicles: HashSet<String> = todays
            .iter()
            .map(|tx| tx.vehicle_registration.to_uppercase())
            .collect();
        let completed = todays
            .iter()
            .filter(|tx| tx.status() == TransactionStatus::Complete)
            .count();

        let net_total = |kind: TransactionType| -> Kilograms {
            todays
                .iter()
                .filter(|tx| tx.transaction_type == kind)
                .filter_map(|tx| tx.net_mass())
                .map(f64::abs)
                .sum()
        };

        let weighings = todays.len();
        Self {
            date,
            weighings,
            vehicles: vehicles.len(),
            completed,
            pending: weighings - completed,
            completion_percent: if weighings > 0 {
                Some(completed as f64 / weighings as f64 * 100.0)
            } else {
                None
            },
            received_net_kg: net_total(TransactionType::Receipt),
            dispatched_net_kg: net_total(TransactionType::Dispatch),
        }
    }
}
