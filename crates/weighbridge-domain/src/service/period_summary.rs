//! Weighing statistics over a date range, grouped by calendar period

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use weighbridge_types::{Kilograms, ReportPeriod, TransactionType};

use crate::model::{TransactionRecord, WeighingTransaction};

/// One calendar period inside the range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodBucket {
    /// First day of the calendar period (may precede the range start)
    pub start: NaiveDate,
    pub weighings: usize,
    pub vehicles: usize,
    pub net_mass_kg: Kilograms,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeBreakdown {
    pub receipts: usize,
    pub dispatches: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerTotal {
    pub customer_id: String,
    pub transactions: usize,
    pub net_mass_kg: Kilograms,
}

/// Totals for transactions whose first weighing fell inside `from..=to` (UTC)
///
/// Net mass is summed as an absolute value over completed transactions, the
/// same way the daily summary does it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub period: ReportPeriod,
    pub weighings: usize,
    pub net_mass_kg: Kilograms,
    pub average_per_day: f64,
    pub buckets: Vec<PeriodBucket>,
    pub by_type: TypeBreakdown,
    /// Heaviest customer first
    pub by_customer: Vec<CustomerTotal>,
}

/// Start of the calendar period containing `date`; weeks start on Monday
pub fn period_start(date: NaiveDate, period: ReportPeriod) -> NaiveDate {
    match period {
        ReportPeriod::Daily => date,
        ReportPeriod::Weekly => date
            .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
            .unwrap_or(date),
        ReportPeriod::Monthly => date.with_day(1).unwrap_or(date),
        ReportPeriod::Yearly => date.with_ordinal(1).unwrap_or(date),
    }
}

fn net_kg(tx: &WeighingTransaction) -> Kilograms {
    tx.net_mass().map(f64::abs).unwrap_or(0.0)
}

#[derive(Default)]
struct BucketAcc {
    weighings: usize,
    vehicles: HashSet<String>,
    net_mass_kg: Kilograms,
}

impl PeriodSummary {
    /// A reversed range is swapped rather than rejected
    pub fn for_range(
        records: &[TransactionRecord],
        from: NaiveDate,
        to: NaiveDate,
        period: ReportPeriod,
    ) -> Self {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };

        let in_range: Vec<&WeighingTransaction> = records
            .iter()
            .map(|r| &r.transaction)
            .filter(|tx| {
                let day = tx.first_mass_at.date_naive();
                from <= day && day <= to
            })
            .collect();

        let mut buckets: BTreeMap<NaiveDate, BucketAcc> = BTreeMap::new();
        let mut customers: BTreeMap<&str, (usize, Kilograms)> = BTreeMap::new();
        let mut by_type = TypeBreakdown::default();

        for tx in in_range.iter().copied() {
            let net = net_kg(tx);

            let bucket = buckets
                .entry(period_start(tx.first_mass_at.date_naive(), period))
                .or_default();
            bucket.weighings += 1;
            bucket.vehicles.insert(tx.vehicle_registration.to_uppercase());
            bucket.net_mass_kg += net;

            let customer = customers.entry(tx.customer_id.as_str()).or_default();
            customer.0 += 1;
            customer.1 += net;

            match tx.transaction_type {
                TransactionType::Receipt => by_type.receipts += 1,
                TransactionType::Dispatch => by_type.dispatches += 1,
            }
        }

        let mut by_customer: Vec<CustomerTotal> = customers
            .into_iter()
            .map(|(id, (transactions, net_mass_kg))| CustomerTotal {
                customer_id: id.to_string(),
                transactions,
                net_mass_kg,
            })
            .collect();
        by_customer.sort_by(|a, b| {
            b.net_mass_kg
                .total_cmp(&a.net_mass_kg)
                .then_with(|| a.customer_id.cmp(&b.customer_id))
        });

        let weighings = in_range.len();
        let days = (to - from).num_days() + 1;
        Self {
            from,
            to,
            period,
            weighings,
            net_mass_kg: in_range.iter().copied().map(net_kg).sum(),
            average_per_day: weighings as f64 / days as f64,
            buckets: buckets
                .into_iter()
                .map(|(start, acc)| PeriodBucket {
                    start,
                    weighings: acc.weighings,
                    vehicles: acc.vehicles.len(),
                    net_mass_kg: acc.net_mass_kg,
                })
                .collect(),
            by_type,
            by_customer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(
        day: NaiveDate,
        registration: &str,
        customer: &str,
        kind: TransactionType,
        first: Kilograms,
        second: Option<Kilograms>,
    ) -> TransactionRecord {
        let at = Utc
            .with_ymd_and_hms(day.year(), day.month(), day.day(), 9, 30, 0)
            .unwrap();
        TransactionRecord {
            transaction_no: "000001".to_string(),
            saved_at: at,
            transaction: WeighingTransaction {
                id: Uuid::new_v4(),
                transaction_type: kind,
                vehicle_registration: registration.to_string(),
                customer_id: customer.to_string(),
                product: None,
                driver_name: None,
                haulier_name: None,
                notes: None,
                first_mass: first,
                first_mass_at: at,
                second_mass: second,
                second_mass_at: second.map(|_| at),
            },
        }
    }

    fn february() -> Vec<TransactionRecord> {
        use TransactionType::{Dispatch, Receipt};
        vec![
            record(date(2024, 2, 5), "ABC123GP", "acme", Receipt, 35420.0, Some(12500.0)),
            record(date(2024, 2, 7), "abc123gp", "acme", Receipt, 42150.0, Some(15200.0)),
            record(date(2024, 2, 7), "DEF456GP", "global", Dispatch, 18680.0, None),
            record(date(2024, 2, 12), "JKL654GP", "global", Dispatch, 11000.0, Some(28900.0)),
            record(date(2024, 2, 20), "XYZ987GP", "acme", Receipt, 35410.0, Some(10000.0)),
        ]
    }

    #[test]
    fn test_period_start() {
        // 2024-02-29 is a Thursday
        let day = date(2024, 2, 29);
        assert_eq!(period_start(day, ReportPeriod::Daily), day);
        assert_eq!(period_start(day, ReportPeriod::Weekly), date(2024, 2, 26));
        assert_eq!(period_start(day, ReportPeriod::Monthly), date(2024, 2, 1));
        assert_eq!(period_start(day, ReportPeriod::Yearly), date(2024, 1, 1));
    }

    #[test]
    fn test_weekly_range_with_breakdowns() {
        let summary = PeriodSummary::for_range(
            &february(),
            date(2024, 2, 5),
            date(2024, 2, 18),
            ReportPeriod::Weekly,
        );

        assert_eq!(summary.weighings, 4);
        assert_eq!(summary.net_mass_kg, 22920.0 + 26950.0 + 17900.0);
        assert!((summary.average_per_day - 4.0 / 14.0).abs() < 1e-9);

        assert_eq!(summary.buckets.len(), 2);
        assert_eq!(summary.buckets[0].start, date(2024, 2, 5));
        assert_eq!(summary.buckets[0].weighings, 3);
        assert_eq!(summary.buckets[0].vehicles, 2);
        assert_eq!(summary.buckets[0].net_mass_kg, 49870.0);
        assert_eq!(summary.buckets[1].start, date(2024, 2, 12));
        assert_eq!(summary.buckets[1].net_mass_kg, 17900.0);

        assert_eq!(summary.by_type, TypeBreakdown { receipts: 2, dispatches: 2 });

        assert_eq!(summary.by_customer.len(), 2);
        assert_eq!(summary.by_customer[0].customer_id, "acme");
        assert_eq!(summary.by_customer[0].transactions, 2);
        assert_eq!(summary.by_customer[0].net_mass_kg, 49870.0);
        assert_eq!(summary.by_customer[1].customer_id, "global");
        assert_eq!(summary.by_customer[1].transactions, 2);
    }

    #[test]
    fn test_monthly_and_yearly_collapse_to_one_bucket() {
        let records = february();
        for (period, start) in [
            (ReportPeriod::Monthly, date(2024, 2, 1)),
            (ReportPeriod::Yearly, date(2024, 1, 1)),
        ] {
            let summary =
                PeriodSummary::for_range(&records, date(2024, 1, 15), date(2024, 3, 31), period);
            assert_eq!(summary.buckets.len(), 1);
            assert_eq!(summary.buckets[0].start, start);
            assert_eq!(summary.buckets[0].weighings, 5);
            assert_eq!(summary.buckets[0].vehicles, 4);
        }
    }

    #[test]
    fn test_reversed_range_is_swapped() {
        let summary = PeriodSummary::for_range(
            &february(),
            date(2024, 2, 7),
            date(2024, 2, 5),
            ReportPeriod::Daily,
        );
        assert_eq!(summary.from, date(2024, 2, 5));
        assert_eq!(summary.to, date(2024, 2, 7));
        assert_eq!(summary.weighings, 3);
        assert_eq!(summary.buckets.len(), 2);
    }

    #[test]
    fn test_empty_range() {
        let day = date(2024, 3, 1);
        let summary = PeriodSummary::for_range(&february(), day, day, ReportPeriod::Daily);
        assert_eq!(summary.weighings, 0);
        assert_eq!(summary.average_per_day, 0.0);
        assert!(summary.buckets.is_empty());
        assert!(summary.by_customer.is_empty());
    }
}
