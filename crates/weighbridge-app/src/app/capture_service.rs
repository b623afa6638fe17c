//! Capture Service - a weighing session bound to a scale and a store
//!
//! The session:
//! 1. Subscribes to the weight source and queues its readings
//! 2. Feeds queued readings into the capture flow on each operation
//! 3. Checks the customer against master data before saving
//! 4. Hands finalized transactions to the transaction repository
//!
//! A failed save (validation or storage) leaves the flow untouched.

use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver};

use thiserror::Error;
use tracing::{debug, error, info, warn};
use weighbridge_domain::model::TransactionRecord;
use weighbridge_domain::repository::{MasterDataRepository, TransactionRepository};
use weighbridge_domain::{CaptureFlow, WeightSource};
use weighbridge_types::{format_kg, Error, Kilograms, ScaleReading, StoreError, ValidationError};

/// Errors specific to the capture service
#[derive(Debug, Error)]
pub enum CaptureServiceError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Transaction not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    StoreError(String),
}

impl From<Error> for CaptureServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(e) => CaptureServiceError::Validation(e),
            Error::Store(StoreError::NotFound(no)) => CaptureServiceError::NotFound(no),
            other => CaptureServiceError::StoreError(other.to_string()),
        }
    }
}

/// Session behavior switches
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Capture the first mass on open when the reading is capturable
    pub auto_capture_first: bool,

    /// Customer ids accepted on save; `None` accepts any non-empty id
    pub known_customers: Option<HashSet<String>>,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_capture_first(mut self, enabled: bool) -> Self {
        self.auto_capture_first = enabled;
        self
    }

    pub fn with_customers_from(mut self, master_data: &impl MasterDataRepository) -> Self {
        self.known_customers = Some(master_data.customers().into_iter().map(|c| c.id).collect());
        self
    }
}

/// An open capture session
pub struct CaptureSession<S: WeightSource, R: TransactionRepository> {
    source: S,
    repository: R,
    flow: CaptureFlow,
    readings: Receiver<ScaleReading>,
    options: SessionOptions,
}

impl<S: WeightSource, R: TransactionRepository> CaptureSession<S, R> {
    /// Open a session on `source`, saving into `repository`
    pub fn open(mut source: S, repository: R, options: SessionOptions) -> Self {
        let (tx, rx) = mpsc::channel();
        source.subscribe(Box::new(move |reading: &ScaleReading| {
            // Receiver gone means the session was dropped
            let _ = tx.send(*reading);
        }));

        let mut flow = CaptureFlow::new();
        flow.update_reading(source.reading());

        let mut session = Self {
            source,
            repository,
            flow,
            readings: rx,
            options,
        };

        if session.options.auto_capture_first {
            if let Some(kg) = session.flow.capture_first_mass() {
                info!(first_mass_kg = kg, "first mass captured on open");
            }
        }
        session
    }

    /// Apply every queued reading to the flow; returns how many were applied
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(reading) = self.readings.try_recv() {
            self.flow.update_reading(reading);
            applied += 1;
        }
        applied
    }

    pub fn flow(&self) -> &CaptureFlow {
        &self.flow
    }

    /// Form edits go straight to the flow
    pub fn flow_mut(&mut self) -> &mut CaptureFlow {
        &mut self.flow
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Current reading after applying queued updates
    pub fn reading(&mut self) -> ScaleReading {
        self.pump();
        self.flow.effective_reading()
    }

    pub fn capture_first_mass(&mut self) -> Option<Kilograms> {
        self.pump();
        match self.flow.capture_first_mass() {
            Some(kg) => {
                info!(first_mass_kg = kg, "first mass captured");
                Some(kg)
            }
            None => {
                debug!(
                    reading = ?self.flow.effective_reading(),
                    state = self.flow.state().label(),
                    "first mass capture disabled"
                );
                None
            }
        }
    }

    pub fn capture_second_mass(&mut self) -> Result<Option<Kilograms>, CaptureServiceError> {
        self.pump();
        match self.flow.capture_second_mass() {
            Ok(Some(kg)) => {
                info!(
                    second_mass_kg = kg,
                    net_mass_kg = ?self.flow.net_mass(),
                    "second mass captured"
                );
                Ok(Some(kg))
            }
            Ok(None) => {
                debug!(reading = ?self.flow.effective_reading(), "second mass capture disabled");
                Ok(None)
            }
            Err(e) => {
                warn!("second mass rejected: {}", e);
                Err(e.into())
            }
        }
    }

    /// Finalize, persist and reset
    pub fn save(&mut self) -> Result<TransactionRecord, CaptureServiceError> {
        let mut staged = self.flow.clone();
        let transaction = staged.save().map_err(|e| {
            warn!("save rejected: {}", e);
            CaptureServiceError::from(e)
        })?;
        // Missing fields take precedence over an unknown customer
        self.check_customer()?;

        let record = self.repository.save(transaction).map_err(|e| {
            error!("failed to store transaction: {}", e);
            CaptureServiceError::from(e)
        })?;

        self.flow = staged;
        info!(
            transaction_no = %record.transaction_no,
            vehicle = %record.transaction.vehicle_registration,
            net_mass = %record
                .transaction
                .net_mass()
                .map(|kg| format!("{} kg", format_kg(kg)))
                .unwrap_or_else(|| "-".to_string()),
            "transaction saved"
        );
        Ok(record)
    }

    pub fn clear(&mut self) {
        self.flow.clear();
        debug!("capture form cleared");
    }

    /// Reopen a stored transaction so its second mass can be captured
    pub fn resume(&mut self, transaction_no: &str) -> Result<TransactionRecord, CaptureServiceError> {
        let record = self
            .repository
            .find_by_number(transaction_no)?
            .ok_or_else(|| CaptureServiceError::NotFound(transaction_no.to_string()))?;
        self.pump();
        self.flow.load(&record.transaction);
        info!(transaction_no, "transaction reopened");
        Ok(record)
    }

    fn check_customer(&self) -> Result<(), CaptureServiceError> {
        let customer = self.flow.form().customer_id.trim();
        if customer.is_empty() {
            // Reported with the other missing fields by the flow
            return Ok(());
        }
        match &self.options.known_customers {
            Some(known) if !known.contains(customer) => {
                warn!(customer, "unknown customer");
                Err(ValidationError::UnknownCustomer(customer.to_string()).into())
            }
            _ => Ok(()),
        }
    }
}

impl From<CaptureServiceError> for Error {
    fn from(err: CaptureServiceError) -> Self {
        match err {
            CaptureServiceError::Validation(e) => Error::Validation(e),
            CaptureServiceError::NotFound(no) => Error::Store(StoreError::NotFound(no)),
            CaptureServiceError::StoreError(msg) => Error::Service(msg),
        }
    }
}
