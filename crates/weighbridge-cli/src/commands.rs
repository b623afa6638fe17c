//! Command handlers

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};
use weighbridge_app::app::{query_service, CaptureSession, Notice, SessionOptions};
use weighbridge_app::config::Config;
use weighbridge_app::export::{export_to_csv, export_to_excel};
use weighbridge_app::repository::{open_master_data, open_transaction_repo};
use weighbridge_domain::model::TransactionRecord;
use weighbridge_domain::repository::{MasterDataRepository, TransactionRepository};
use weighbridge_domain::WeightSource;
use weighbridge_infra::persistence::FileTransactionRepository;
use weighbridge_scale::{spawn_driver, ManualScale, SimulatedScale};
use weighbridge_types::{
    Error, Kilograms, OutputFormat, ReportPeriod, Result, ScaleReading, TransactionType,
    ValidationError,
};

use crate::cli::{Cli, Commands};
use crate::output::{
    format_reading, output_customers, output_notice, output_period_summary, output_products,
    output_record, output_summary, output_transactions, output_vehicles,
};

/// Virtual time the simulator waits for a load before giving up
const SIMULATION_TIMEOUT: Duration = Duration::from_secs(600);

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref dir) = cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Weigh {
            vehicle,
            customer,
            transaction_type,
            driver,
            haulier,
            notes,
            product,
            first,
            second,
        } => cmd_weigh(
            &config,
            output_format,
            WeighInput {
                vehicle,
                customer,
                transaction_type,
                driver,
                haulier,
                notes,
                product,
                first,
                second,
            },
        ),

        Commands::Complete {
            transaction_no,
            second,
        } => cmd_complete(&config, output_format, &transaction_no, second),

        Commands::Scale { seconds, seed } => cmd_scale(&config, output_format, seconds, seed),

        Commands::Simulate {
            vehicle,
            customer,
            seed,
        } => cmd_simulate(&config, output_format, &vehicle, &customer, seed),

        Commands::Transactions { search, limit } => {
            let repo = open_transaction_repo(&config)?;
            let records = query_service::list_transactions(&repo, search.as_deref(), limit)?;
            output_transactions(output_format, &records)
        }

        Commands::Show { transaction_no } => {
            let repo = open_transaction_repo(&config)?;
            let record = query_service::get_transaction(&repo, &transaction_no)?;
            output_record(output_format, &record)
        }

        Commands::Delete { transaction_no } => {
            let mut repo = open_transaction_repo(&config)?;
            query_service::delete_transaction(&mut repo, &transaction_no)?;
            println!("Deleted transaction {}", transaction_no);
            Ok(())
        }

        Commands::Customers { search } => {
            let master = open_master_data(&config)?;
            output_customers(
                output_format,
                &query_service::list_customers(&master, search.as_deref()),
            )
        }

        Commands::Vehicles { search } => {
            let master = open_master_data(&config)?;
            output_vehicles(
                output_format,
                &query_service::list_vehicles(&master, search.as_deref()),
            )
        }

        Commands::Products => {
            let master = open_master_data(&config)?;
            output_products(output_format, &query_service::list_products(&master))
        }

        Commands::Summary {
            date,
            from,
            to,
            period,
            by_customer,
        } => {
            if from.is_some() || to.is_some() || period.is_some() || by_customer {
                cmd_period_summary(
                    &config,
                    output_format,
                    from,
                    to,
                    period.unwrap_or_default(),
                    by_customer,
                )
            } else {
                cmd_summary(&config, output_format, date)
            }
        }

        Commands::Export { output, csv } => cmd_export(&config, output, csv),

        Commands::Config {
            show,
            set_output,
            set_data_dir,
            set_auto_capture,
            set_validate_customers,
            reset,
        } => cmd_config(
            show,
            set_output,
            set_data_dir,
            set_auto_capture,
            set_validate_customers,
            reset,
        ),
    }
}

/// Form input for a weighing entered on the command line
struct WeighInput {
    vehicle: String,
    customer: String,
    transaction_type: TransactionType,
    driver: Option<String>,
    haulier: Option<String>,
    notes: Option<String>,
    product: Option<String>,
    first: Kilograms,
    second: Option<Kilograms>,
}

fn session_options(config: &Config, master: &impl MasterDataRepository) -> SessionOptions {
    let options = SessionOptions::new().with_auto_capture_first(config.auto_capture_first);
    if config.validate_customers {
        options.with_customers_from(master)
    } else {
        options
    }
}

fn open_session<S: WeightSource>(
    config: &Config,
    source: S,
) -> Result<CaptureSession<S, FileTransactionRepository>> {
    let repo = open_transaction_repo(config)?;
    let master = open_master_data(config)?;
    Ok(CaptureSession::open(source, repo, session_options(config, &master)))
}

/// Capture refused because the entered mass is not a usable reading
fn not_capturable(output_format: OutputFormat, label: &str, weight: Kilograms) -> Error {
    output_notice(output_format, &Notice::capture_unavailable());
    Error::Validation(ValidationError::InvalidMass(format!(
        "{} must be greater than zero, got {}",
        label, weight
    )))
}

fn save_session<S: WeightSource>(
    session: &mut CaptureSession<S, FileTransactionRepository>,
    output_format: OutputFormat,
) -> Result<TransactionRecord> {
    let record = session.save()?;
    output_notice(output_format, &Notice::saved(&record));
    Ok(record)
}

fn cmd_weigh(config: &Config, output_format: OutputFormat, input: WeighInput) -> Result<()> {
    let mut session = open_session(config, ManualScale::new())?;

    let flow = session.flow_mut();
    flow.set_transaction_type(input.transaction_type);
    flow.set_vehicle_registration(input.vehicle);
    flow.set_customer(input.customer);
    flow.set_product(input.product);
    flow.set_driver(input.driver);
    flow.set_haulier(input.haulier);
    flow.set_notes(input.notes);

    session.source_mut().set_stable(input.first);
    let first = session
        .capture_first_mass()
        .ok_or_else(|| not_capturable(output_format, "first mass", input.first))?;
    output_notice(output_format, &Notice::first_captured(first));

    if let Some(second) = input.second {
        session.source_mut().set_stable(second);
        let captured = session
            .capture_second_mass()?
            .ok_or_else(|| not_capturable(output_format, "second mass", second))?;
        output_notice(output_format, &Notice::second_captured(captured));
    }

    let record = save_session(&mut session, output_format)?;
    output_record(output_format, &record)
}

fn cmd_complete(
    config: &Config,
    output_format: OutputFormat,
    transaction_no: &str,
    second: Kilograms,
) -> Result<()> {
    let mut session = open_session(config, ManualScale::new())?;
    session.resume(transaction_no)?;

    session.source_mut().set_stable(second);
    let captured = session
        .capture_second_mass()?
        .ok_or_else(|| not_capturable(output_format, "second mass", second))?;
    output_notice(output_format, &Notice::second_captured(captured));

    let record = save_session(&mut session, output_format)?;
    output_record(output_format, &record)
}

#[derive(Serialize)]
struct ReadingLine {
    clock: String,
    #[serde(flatten)]
    reading: ScaleReading,
}

fn print_reading(output_format: OutputFormat, scale_name: &str, reading: ScaleReading, clock: String) {
    if output_format == OutputFormat::Json {
        if let Ok(line) = serde_json::to_string(&ReadingLine { clock, reading }) {
            println!("{}", line);
        }
    } else {
        println!("{}", format_reading(scale_name, &reading, &clock));
    }
}

fn cmd_scale(
    config: &Config,
    output_format: OutputFormat,
    seconds: u64,
    seed: Option<u64>,
) -> Result<()> {
    let mut settings = config.scale.clone();
    if let Some(seed) = seed {
        settings = settings.with_seed(seed);
    }
    let scale_name = settings.scale_name.clone();
    let display_interval = settings.clock_interval();
    let scale = Arc::new(Mutex::new(SimulatedScale::new(settings)));

    info!(scale = %scale_name, seconds, "watching simulated scale");
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let driver = spawn_driver(Arc::clone(&scale));
        let mut ticker = tokio::time::interval(display_interval);
        let deadline = tokio::time::sleep(Duration::from_secs(seconds));
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = &mut deadline => break,
                _ = tokio::signal::ctrl_c() => break,
                _ = ticker.tick() => {
                    let (reading, clock) = {
                        let guard = scale.lock().unwrap_or_else(|e| e.into_inner());
                        (guard.reading(), guard.clock().format("%H:%M:%S").to_string())
                    };
                    print_reading(output_format, &scale_name, reading, clock);
                }
            }
        }

        driver.shutdown().await;
    });
    Ok(())
}

/// Advance virtual time until the scale settles on a capturable weight
/// other than `previous`
fn wait_for_load(
    session: &mut CaptureSession<SimulatedScale, FileTransactionRepository>,
    output_format: OutputFormat,
    previous: Option<Kilograms>,
) -> Result<()> {
    let step = session.source().settings().clock_interval();
    let scale_name = session.source().settings().scale_name.clone();
    let mut elapsed = Duration::ZERO;
    let mut last_shown = None;

    while elapsed < SIMULATION_TIMEOUT {
        session.source_mut().advance(step);
        elapsed += step;

        let reading = session.reading();
        if last_shown != Some(reading) {
            let clock = session.source().clock().format("%H:%M:%S").to_string();
            print_reading(output_format, &scale_name, reading, clock);
            last_shown = Some(reading);
        }
        if reading.is_capturable() && Some(reading.weight_kg) != previous {
            return Ok(());
        }
    }

    Err(Error::Service(format!(
        "Scale did not settle on a new load within {} s",
        SIMULATION_TIMEOUT.as_secs()
    )))
}

fn cmd_simulate(
    config: &Config,
    output_format: OutputFormat,
    vehicle: &str,
    customer: &str,
    seed: Option<u64>,
) -> Result<()> {
    let mut settings = config.scale.clone();
    if let Some(seed) = seed {
        settings = settings.with_seed(seed);
    }
    let mut session = open_session(config, SimulatedScale::new(settings))?;
    session.flow_mut().set_vehicle_registration(vehicle);
    session.flow_mut().set_customer(customer);

    // Vehicle drives on loaded
    if session.flow().first_mass().is_none() {
        wait_for_load(&mut session, output_format, None)?;
    }
    let first = match session.flow().first_mass() {
        Some(kg) => kg,
        None => session
            .capture_first_mass()
            .ok_or_else(|| Error::Service("First mass capture failed".to_string()))?,
    };
    output_notice(output_format, &Notice::first_captured(first));

    // Returns after unloading
    wait_for_load(&mut session, output_format, Some(first))?;
    let second = session
        .capture_second_mass()?
        .ok_or_else(|| Error::Service("Second mass capture failed".to_string()))?;
    debug!(first, second, "simulated weighing complete");
    output_notice(output_format, &Notice::second_captured(second));

    let record = save_session(&mut session, output_format)?;
    output_record(output_format, &record)
}

fn cmd_summary(config: &Config, output_format: OutputFormat, date: Option<NaiveDate>) -> Result<()> {
    let repo = open_transaction_repo(config)?;
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let summary = query_service::daily_summary(&repo, date)?;
    output_summary(output_format, &summary)
}

fn cmd_period_summary(
    config: &Config,
    output_format: OutputFormat,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    period: ReportPeriod,
    by_customer: bool,
) -> Result<()> {
    let repo = open_transaction_repo(config)?;
    let to = to.unwrap_or_else(|| Utc::now().date_naive());
    let from = from.unwrap_or(to);
    let summary = query_service::period_summary(&repo, from, to, period)?;
    output_period_summary(output_format, &summary, by_customer)
}

fn cmd_export(config: &Config, output: PathBuf, csv: bool) -> Result<()> {
    let repo = open_transaction_repo(config)?;
    let records = repo.find_all()?;

    if csv {
        export_to_csv(&records, &output)?;
    } else {
        export_to_excel(&records, &output)?;
    }

    info!(count = records.len(), path = %output.display(), "transactions exported");
    println!("Exported {} transactions to {}", records.len(), output.display());
    Ok(())
}

fn cmd_config(
    show: bool,
    set_output: Option<OutputFormat>,
    set_data_dir: Option<PathBuf>,
    set_auto_capture: Option<bool>,
    set_validate_customers: Option<bool>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }

    if let Some(enabled) = set_auto_capture {
        config.auto_capture_first = enabled;
        modified = true;
    }

    if let Some(enabled) = set_validate_customers {
        config.validate_customers = enabled;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
