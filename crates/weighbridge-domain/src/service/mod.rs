//! Domain services

pub mod daily_summary;
pub mod net_mass;
pub mod period_summary;
pub mod search;

pub use daily_summary::DailySummary;
pub use net_mass::compute_net_mass;
pub use period_summary::{period_start, CustomerTotal, PeriodBucket, PeriodSummary, TypeBreakdown};
pub use search::{filter_customers, filter_transactions, filter_vehicles};
