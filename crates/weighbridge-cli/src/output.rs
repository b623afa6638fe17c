//! Output formatting module

use serde::Serialize;
use weighbridge_app::app::Notice;
use weighbridge_domain::model::{Customer, Product, TransactionRecord, Vehicle};
use weighbridge_domain::service::{DailySummary, PeriodSummary};
use weighbridge_types::{format_kg, Kilograms, OutputFormat, ReportPeriod, Result, ScaleReading};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

fn kg_or_dash(weight: Option<Kilograms>) -> String {
    weight
        .map(|w| format!("{} kg", format_kg(w)))
        .unwrap_or_else(|| "-".to_string())
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

/// Operator message; JSON output stays machine-readable so notices are skipped
pub fn output_notice(output_format: OutputFormat, notice: &Notice) {
    if output_format == OutputFormat::Table {
        let marker = if notice.is_error() { "✗" } else { "✓" };
        println!("{} {}", marker, notice);
    }
}

/// One line of the scale display
pub fn format_reading(scale_name: &str, reading: &ScaleReading, clock: &str) -> String {
    format!(
        "[{}] {:<12} {:>10} kg  {}",
        clock,
        scale_name,
        format_kg(reading.weight_kg),
        reading.status.label()
    )
}

/// Weighing ticket for a single transaction
pub fn output_record(output_format: OutputFormat, record: &TransactionRecord) -> Result<()> {
    if output_format == OutputFormat::Json {
        #[derive(Serialize)]
        struct RecordView<'a> {
            #[serde(flatten)]
            record: &'a TransactionRecord,
            net_mass: Option<Kilograms>,
            status: &'static str,
        }
        return print_json(&RecordView {
            record,
            net_mass: record.transaction.net_mass(),
            status: record.transaction.status().label(),
        });
    }

    let tx = &record.transaction;
    println!("\nTransaction {}", record.transaction_no);
    println!("==================");
    println!("Type:          {}", tx.transaction_type);
    println!("Status:        {}", tx.status());
    println!("Vehicle:       {}", tx.vehicle_registration);
    println!("Customer:      {}", tx.customer_id);
    if let Some(ref product) = tx.product {
        println!("Product:       {}", product);
    }
    if let Some(ref driver) = tx.driver_name {
        println!("Driver:        {}", driver);
    }
    if let Some(ref haulier) = tx.haulier_name {
        println!("Haulier:       {}", haulier);
    }

    println!("\n--- Masses ---");
    println!(
        "First mass:    {:>12}  ({})",
        kg_or_dash(Some(tx.first_mass)),
        tx.first_mass_at.format("%Y-%m-%d %H:%M:%S")
    );
    match tx.second_mass_at {
        Some(at) => println!(
            "Second mass:   {:>12}  ({})",
            kg_or_dash(tx.second_mass),
            at.format("%Y-%m-%d %H:%M:%S")
        ),
        None => println!("Second mass:   {:>12}", kg_or_dash(tx.second_mass)),
    }
    println!("Net mass:      {:>12}", kg_or_dash(tx.net_mass()));

    if let Some(ref notes) = tx.notes {
        println!("\nNotes:");
        println!("{}", notes);
    }
    Ok(())
}

pub fn output_transactions(output_format: OutputFormat, records: &[TransactionRecord]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(records);
    }

    println!("Transactions");
    println!("============");
    if records.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    println!(
        "{:<8} {:<9} {:<12} {:<12} {:>12} {:>12} {:>12} {:<9} {:>11}",
        "No", "Type", "Vehicle", "Customer", "First", "Second", "Net", "Status", "Date"
    );
    println!("{}", "-".repeat(105));

    for record in records {
        let tx = &record.transaction;
        println!(
            "{:<8} {:<9} {:<12} {:<12} {:>12} {:>12} {:>12} {:<9} {:>11}",
            record.transaction_no,
            tx.transaction_type.label(),
            truncate(&tx.vehicle_registration, 12),
            truncate(&tx.customer_id, 12),
            kg_or_dash(Some(tx.first_mass)),
            kg_or_dash(tx.second_mass),
            kg_or_dash(tx.net_mass()),
            tx.status().label(),
            tx.first_mass_at.format("%m/%d %H:%M").to_string()
        );
    }
    Ok(())
}

pub fn output_customers(output_format: OutputFormat, customers: &[Customer]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(customers);
    }

    println!("{:<12} {:<24} {:<18} {:<28}", "ID", "Name", "Contact", "Email");
    println!("{}", "-".repeat(84));
    for c in customers {
        println!(
            "{:<12} {:<24} {:<18} {:<28}",
            c.id,
            truncate(&c.name, 24),
            or_dash(&c.contact),
            or_dash(&c.email)
        );
    }
    println!("\n{} customer(s)", customers.len());
    Ok(())
}

pub fn output_vehicles(output_format: OutputFormat, vehicles: &[Vehicle]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(vehicles);
    }

    println!("{:<12} {:<12} {:<14} {:>6} {:<20}", "Registration", "Make", "Model", "Year", "Owner");
    println!("{}", "-".repeat(68));
    for v in vehicles {
        println!(
            "{:<12} {:<12} {:<14} {:>6} {:<20}",
            v.registration,
            or_dash(&v.make),
            or_dash(&v.model),
            v.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
            or_dash(&v.owner)
        );
    }
    println!("\n{} vehicle(s)", vehicles.len());
    Ok(())
}

pub fn output_products(output_format: OutputFormat, products: &[Product]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(products);
    }

    println!("{:<10} {:<24} {:<16}", "Code", "Name", "Category");
    println!("{}", "-".repeat(52));
    for p in products {
        println!(
            "{:<10} {:<24} {:<16}",
            p.code,
            p.name,
            or_dash(&p.category)
        );
    }
    Ok(())
}

pub fn output_summary(output_format: OutputFormat, summary: &DailySummary) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(summary);
    }

    println!("Daily Summary ({})", summary.date);
    println!("==========================");
    println!("Weighings:       {}", summary.weighings);
    println!("Vehicles:        {}", summary.vehicles);
    println!("Completed:       {}", summary.completed);
    println!("Pending:         {}", summary.pending);
    if let Some(pct) = summary.completion_percent {
        println!("Completion:      {:.0}%", pct);
    }
    println!("Received net:    {} kg", format_kg(summary.received_net_kg));
    println!("Dispatched net:  {} kg", format_kg(summary.dispatched_net_kg));
    Ok(())
}

/// Row label for a bucket start ("2024-02-05", "2024-W06", "2024-02", "2024")
fn bucket_label(start: chrono::NaiveDate, period: ReportPeriod) -> String {
    match period {
        ReportPeriod::Daily => start.format("%Y-%m-%d").to_string(),
        ReportPeriod::Weekly => start.format("%G-W%V").to_string(),
        ReportPeriod::Monthly => start.format("%Y-%m").to_string(),
        ReportPeriod::Yearly => start.format("%Y").to_string(),
    }
}

/// Range report; JSON always carries every breakdown
pub fn output_period_summary(
    output_format: OutputFormat,
    summary: &PeriodSummary,
    by_customer: bool,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(summary);
    }

    println!("{} Report ({} to {})", summary.period, summary.from, summary.to);
    println!("=====================================");
    println!("Weighings:       {}", summary.weighings);
    println!("Net mass:        {} kg", format_kg(summary.net_mass_kg));
    println!("Avg. per day:    {:.1}", summary.average_per_day);
    println!("Receipts:        {}", summary.by_type.receipts);
    println!("Dispatches:      {}", summary.by_type.dispatches);

    if summary.buckets.is_empty() {
        println!("
No transactions in range.");
        return Ok(());
    }

    println!("
{:<12} {:>10} {:>9} {:>14}", "Period", "Weighings", "Vehicles", "Net");
    println!("{}", "-".repeat(48));
    for bucket in &summary.buckets {
        println!(
            "{:<12} {:>10} {:>9} {:>14}",
            bucket_label(bucket.start, summary.period),
            bucket.weighings,
            bucket.vehicles,
            kg_or_dash(Some(bucket.net_mass_kg))
        );
    }

    if by_customer {
        println!("
{:<16} {:>12} {:>14}", "Customer", "Transactions", "Net");
        println!("{}", "-".repeat(44));
        for customer in &summary.by_customer {
            println!(
                "{:<16} {:>12} {:>14}",
                truncate(&customer.customer_id, 16),
                customer.transactions,
                kg_or_dash(Some(customer.net_mass_kg))
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_long_values() {
        assert_eq!(truncate("ABC123GP", 12), "ABC123GP");
        assert_eq!(truncate("Global Mining Company", 12), "Global Mi...");
    }

    #[test]
    fn test_bucket_labels() {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(bucket_label(start, ReportPeriod::Daily), "2024-02-05");
        assert_eq!(bucket_label(start, ReportPeriod::Weekly), "2024-W06");
        assert_eq!(bucket_label(start, ReportPeriod::Monthly), "2024-02");
        assert_eq!(bucket_label(start, ReportPeriod::Yearly), "2024");
    }

    #[test]
    fn test_reading_line() {
        let line = format_reading("Scale No. 1", &ScaleReading::stable(35420.0), "13:23:18");
        assert_eq!(line, "[13:23:18] Scale No. 1      35,420 kg  STABLE");
    }
}
