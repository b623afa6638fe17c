//! CSV export of stored transactions

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use weighbridge_domain::model::TransactionRecord;
use weighbridge_types::{Kilograms, Result};

/// One CSV line per transaction; net mass is derived at export time
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    transaction_no: &'a str,
    #[serde(rename = "type")]
    transaction_type: &'static str,
    vehicle_registration: &'a str,
    customer_id: &'a str,
    product: &'a str,
    driver: &'a str,
    haulier: &'a str,
    first_mass_kg: Kilograms,
    second_mass_kg: Option<Kilograms>,
    net_mass_kg: Option<Kilograms>,
    status: &'static str,
    first_mass_at: String,
}

impl<'a> From<&'a TransactionRecord> for CsvRow<'a> {
    fn from(record: &'a TransactionRecord) -> Self {
        let tx = &record.transaction;
        Self {
            transaction_no: &record.transaction_no,
            transaction_type: tx.transaction_type.label(),
            vehicle_registration: &tx.vehicle_registration,
            customer_id: &tx.customer_id,
            product: tx.product.as_deref().unwrap_or(""),
            driver: tx.driver_name.as_deref().unwrap_or(""),
            haulier: tx.haulier_name.as_deref().unwrap_or(""),
            first_mass_kg: tx.first_mass,
            second_mass_kg: tx.second_mass,
            net_mass_kg: tx.net_mass(),
            status: tx.status().label(),
            first_mass_at: tx.first_mass_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Write records as CSV (with header) to any writer
pub fn write_transactions_csv<W: Write>(records: &[TransactionRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(CsvRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export records to a CSV file
pub fn export_to_csv(records: &[TransactionRecord], output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path)?;
    write_transactions_csv(records, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;
    use weighbridge_domain::model::WeighingTransaction;
    use weighbridge_types::TransactionType;

    fn record(no: &str, second: Option<f64>) -> TransactionRecord {
        let at = Utc.with_ymd_and_hms(2024, 2, 5, 13, 23, 18).unwrap();
        TransactionRecord {
            transaction_no: no.to_string(),
            saved_at: at,
            transaction: WeighingTransaction {
                id: Uuid::new_v4(),
                transaction_type: TransactionType::Receipt,
                vehicle_registration: "ABC123GP".to_string(),
                customer_id: "acme".to_string(),
                product: Some("COAL-A".to_string()),
                driver_name: Some("John Smith".to_string()),
                haulier_name: Some("FastHaul Ltd".to_string()),
                notes: None,
                first_mass: 35420.0,
                first_mass_at: at,
                second_mass: second,
                second_mass_at: second.map(|_| at),
            },
        }
    }

    #[test]
    fn test_csv_contains_header_and_net_mass() {
        let mut buf = Vec::new();
        write_transactions_csv(&[record("000001", Some(12500.0))], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "transaction_no,type,vehicle_registration,customer_id,product,driver,haulier,first_mass_kg,second_mass_kg,net_mass_kg,status,first_mass_at"
        );
        assert_eq!(
            lines.next().unwrap(),
            "000001,Receipt,ABC123GP,acme,COAL-A,John Smith,FastHaul Ltd,35420.0,12500.0,22920.0,Complete,2024-02-05 13:23:18"
        );
    }

    #[test]
    fn test_pending_has_empty_masses() {
        let mut buf = Vec::new();
        write_transactions_csv(&[record("000002", None)], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.ends_with(",35420.0,,,Pending,2024-02-05 13:23:18"));
    }
}
