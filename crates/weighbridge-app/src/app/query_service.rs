//! Query Service - read and housekeeping access to stored data

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;
use weighbridge_domain::model::{Customer, Product, TransactionRecord, Vehicle};
use weighbridge_domain::repository::{MasterDataRepository, TransactionRepository};
use weighbridge_domain::service::{filter_customers, filter_vehicles, DailySummary, PeriodSummary};
use weighbridge_types::{Error, ReportPeriod, StoreError};

/// Errors specific to the query service
#[derive(Debug, Error)]
pub enum QueryServiceError {
    #[error("Transaction not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    StoreError(String),
}

impl From<Error> for QueryServiceError {
    fn from(err: Error) -> Self {
        QueryServiceError::StoreError(err.to_string())
    }
}

impl From<QueryServiceError> for Error {
    fn from(err: QueryServiceError) -> Self {
        match err {
            QueryServiceError::NotFound(no) => Error::Store(StoreError::NotFound(no)),
            QueryServiceError::StoreError(msg) => Error::Service(msg),
        }
    }
}

/// Stored transactions, newest first, optionally filtered and truncated
pub fn list_transactions(
    repo: &impl TransactionRepository,
    query: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<TransactionRecord>, QueryServiceError> {
    let mut records = match query {
        Some(q) => repo.search(q)?,
        None => repo.find_all()?,
    };
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    Ok(records)
}

pub fn get_transaction(
    repo: &impl TransactionRepository,
    transaction_no: &str,
) -> Result<TransactionRecord, QueryServiceError> {
    repo.find_by_number(transaction_no)?
        .ok_or_else(|| QueryServiceError::NotFound(transaction_no.to_string()))
}

pub fn delete_transaction(
    repo: &mut impl TransactionRepository,
    transaction_no: &str,
) -> Result<(), QueryServiceError> {
    if repo.delete(transaction_no)? {
        info!(transaction_no, "transaction deleted");
        Ok(())
    } else {
        Err(QueryServiceError::NotFound(transaction_no.to_string()))
    }
}

pub fn list_customers(master: &impl MasterDataRepository, query: Option<&str>) -> Vec<Customer> {
    filter_customers(master.customers(), query.unwrap_or(""))
}

pub fn list_vehicles(master: &impl MasterDataRepository, query: Option<&str>) -> Vec<Vehicle> {
    filter_vehicles(master.vehicles(), query.unwrap_or(""))
}

pub fn list_products(master: &impl MasterDataRepository) -> Vec<Product> {
    master.products()
}

pub fn daily_summary(
    repo: &impl TransactionRepository,
    date: NaiveDate,
) -> Result<DailySummary, QueryServiceError> {
    let records = repo.find_all()?;
    Ok(DailySummary::for_date(&records, date))
}

/// Totals over `from..=to`, bucketed by `period`
pub fn period_summary(
    repo: &impl TransactionRepository,
    from: NaiveDate,
    to: NaiveDate,
    period: ReportPeriod,
) -> Result<PeriodSummary, QueryServiceError> {
    let records = repo.find_all()?;
    Ok(PeriodSummary::for_range(&records, from, to, period))
}
