//! Excel export functionality

use std::path::Path;

use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use weighbridge_domain::model::TransactionRecord;
use weighbridge_types::{Error, Result, TransactionStatus, TransactionType};

fn xlsx<T>(result: std::result::Result<T, XlsxError>) -> Result<T> {
    result.map_err(|e| Error::Excel(e.to_string()))
}

/// Export transactions to an Excel file with a summary and a detail sheet
pub fn export_to_excel(records: &[TransactionRecord], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, records)?;

    let details_sheet = workbook.add_worksheet();
    write_transactions_sheet(details_sheet, records)?;

    xlsx(workbook.save(output_path))?;
    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, records: &[TransactionRecord]) -> Result<()> {
    xlsx(sheet.set_name("Summary"))?;
    let header_format = Format::new().set_bold();

    let completed = records
        .iter()
        .filter(|r| r.transaction.status() == TransactionStatus::Complete)
        .count();
    let net_total = |kind: TransactionType| -> f64 {
        records
            .iter()
            .map(|r| &r.transaction)
            .filter(|tx| tx.transaction_type == kind)
            .filter_map(|tx| tx.net_mass())
            .map(f64::abs)
            .sum()
    };

    xlsx(sheet.write_string_with_format(0, 0, "Weighbridge Transaction Report", &header_format))?;

    let rows: [(&str, f64); 5] = [
        ("Transactions:", records.len() as f64),
        ("Completed:", completed as f64),
        ("Pending:", (records.len() - completed) as f64),
        ("Received Net (kg):", net_total(TransactionType::Receipt)),
        ("Dispatched Net (kg):", net_total(TransactionType::Dispatch)),
    ];

    xlsx(sheet.write_string(2, 0, "Exported At:"))?;
    xlsx(sheet.write_string(2, 1, Utc::now().to_rfc3339()))?;
    for (i, (label, value)) in rows.iter().enumerate() {
        let row = 3 + i as u32;
        xlsx(sheet.write_string(row, 0, *label))?;
        xlsx(sheet.write_number(row, 1, *value))?;
    }

    xlsx(sheet.set_column_width(0, 22))?;
    xlsx(sheet.set_column_width(1, 28))?;
    Ok(())
}

fn write_transactions_sheet(sheet: &mut Worksheet, records: &[TransactionRecord]) -> Result<()> {
    xlsx(sheet.set_name("Transactions"))?;
    let header_format = Format::new().set_bold();
    let mass_format = Format::new().set_num_format("#,##0");

    let headers = [
        "Transaction No",
        "Type",
        "Vehicle",
        "Customer",
        "Product",
        "Driver",
        "Haulier",
        "First Mass (kg)",
        "Second Mass (kg)",
        "Net Mass (kg)",
        "Status",
        "First Weighed",
        "Notes",
    ];
    for (col, header) in headers.iter().enumerate() {
        xlsx(sheet.write_string_with_format(0, col as u16, *header, &header_format))?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        let tx = &record.transaction;

        xlsx(sheet.write_string(row, 0, &record.transaction_no))?;
        xlsx(sheet.write_string(row, 1, tx.transaction_type.label()))?;
        xlsx(sheet.write_string(row, 2, &tx.vehicle_registration))?;
        xlsx(sheet.write_string(row, 3, &tx.customer_id))?;
        if let Some(ref product) = tx.product {
            xlsx(sheet.write_string(row, 4, product))?;
        }
        if let Some(ref driver) = tx.driver_name {
            xlsx(sheet.write_string(row, 5, driver))?;
        }
        if let Some(ref haulier) = tx.haulier_name {
            xlsx(sheet.write_string(row, 6, haulier))?;
        }
        xlsx(sheet.write_number_with_format(row, 7, tx.first_mass, &mass_format))?;
        if let Some(second) = tx.second_mass {
            xlsx(sheet.write_number_with_format(row, 8, second, &mass_format))?;
        }
        if let Some(net) = tx.net_mass() {
            xlsx(sheet.write_number_with_format(row, 9, net, &mass_format))?;
        }
        xlsx(sheet.write_string(row, 10, tx.status().label()))?;
        xlsx(sheet.write_string(
            row,
            11,
            tx.first_mass_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ))?;
        if let Some(ref notes) = tx.notes {
            xlsx(sheet.write_string(row, 12, notes))?;
        }
    }

    xlsx(sheet.set_column_width(0, 15))?;
    xlsx(sheet.set_column_width(2, 14))?;
    xlsx(sheet.set_column_width(3, 14))?;
    xlsx(sheet.set_column_width(11, 20))?;
    xlsx(sheet.set_column_width(12, 40))?;
    Ok(())
}
