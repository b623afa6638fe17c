//! Weighing capture state machine
//!
//! ```text
//! Empty --capture_first_mass--> FirstCaptured --capture_second_mass--> BothCaptured
//! {FirstCaptured, BothCaptured} --save (valid)--> Empty
//! any --clear--> Empty
//! ```
//!
//! Every failed operation leaves the flow exactly as it was.

use uuid::Uuid;
use weighbridge_types::{
    Kilograms, RequiredField, ScaleReading, TransactionType, ValidationError,
};

use super::form::non_blank;
use super::{CaptureState, CapturedMass, TransactionForm};
use crate::model::WeighingTransaction;
use crate::service::net_mass::compute_net_mass;

/// An open capture session: masses, form input and the latest scale reading
#[derive(Debug, Clone, Default)]
pub struct CaptureFlow {
    state: CaptureState,
    form: TransactionForm,
    reading: ScaleReading,
    manual_weight: Option<Kilograms>,
    /// Id of a stored transaction being completed, if any
    resumed_id: Option<Uuid>,
}

impl CaptureFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn form(&self) -> &TransactionForm {
        &self.form
    }

    pub fn first_mass(&self) -> Option<Kilograms> {
        self.state.first().map(|m| m.kg)
    }

    pub fn second_mass(&self) -> Option<Kilograms> {
        self.state.second().map(|m| m.kg)
    }

    /// Derived on every call, never cached
    pub fn net_mass(&self) -> Option<Kilograms> {
        compute_net_mass(self.first_mass(), self.second_mass())
    }

    pub fn is_resumed(&self) -> bool {
        self.resumed_id.is_some()
    }

    // ------------------------------------------------------------------
    // Scale input
    // ------------------------------------------------------------------

    /// Record the latest reading pushed by the weight source
    pub fn update_reading(&mut self, reading: ScaleReading) {
        self.reading = reading;
    }

    pub fn live_reading(&self) -> ScaleReading {
        self.reading
    }

    /// Override the live reading with an operator-entered weight
    ///
    /// A manual weight counts as stable. `None` returns to the live reading.
    pub fn set_manual_weight(&mut self, weight: Option<Kilograms>) -> Result<(), ValidationError> {
        if let Some(w) = weight {
            if !w.is_finite() || w < 0.0 {
                return Err(ValidationError::InvalidMass(format!(
                    "manual weight must be a non-negative number, got {}",
                    w
                )));
            }
        }
        self.manual_weight = weight;
        Ok(())
    }

    pub fn manual_weight(&self) -> Option<Kilograms> {
        self.manual_weight
    }

    /// Reading the capture buttons act on
    pub fn effective_reading(&self) -> ScaleReading {
        match self.manual_weight {
            Some(w) => ScaleReading::stable(w),
            None => self.reading,
        }
    }

    // ------------------------------------------------------------------
    // Captures
    // ------------------------------------------------------------------

    pub fn can_capture_first(&self) -> bool {
        matches!(self.state, CaptureState::Empty) && self.effective_reading().is_capturable()
    }

    pub fn can_capture_second(&self) -> bool {
        matches!(self.state, CaptureState::FirstCaptured { .. })
            && self.effective_reading().is_capturable()
    }

    /// Take the current reading as the first mass
    ///
    /// Returns `None` without touching state when the capture is disabled:
    /// a first mass already exists, or the reading is unstable or zero.
    pub fn capture_first_mass(&mut self) -> Option<Kilograms> {
        if !self.can_capture_first() {
            return None;
        }
        let first = CapturedMass::now(self.effective_reading().weight_kg);
        self.state = CaptureState::FirstCaptured { first };
        Some(first.kg)
    }

    /// Take the current reading as the second mass
    ///
    /// Capturing out of order is a validation error. An unusable reading is
    /// a disabled no-op (`Ok(None)`).
    pub fn capture_second_mass(&mut self) -> Result<Option<Kilograms>, ValidationError> {
        let first = match self.state {
            CaptureState::Empty => return Err(ValidationError::FirstMassMissing),
            CaptureState::BothCaptured { .. } => {
                return Err(ValidationError::SecondMassAlreadyCaptured)
            }
            CaptureState::FirstCaptured { first } => first,
        };

        let reading = self.effective_reading();
        if !reading.is_capturable() {
            return Ok(None);
        }

        let second = CapturedMass::now(reading.weight_kg);
        self.state = CaptureState::BothCaptured { first, second };
        Ok(Some(second.kg))
    }

    // ------------------------------------------------------------------
    // Form input
    // ------------------------------------------------------------------

    pub fn set_transaction_type(&mut self, transaction_type: TransactionType) {
        self.form.transaction_type = transaction_type;
    }

    pub fn set_vehicle_registration(&mut self, registration: impl Into<String>) {
        self.form.vehicle_registration = registration.into();
    }

    pub fn set_customer(&mut self, customer_id: impl Into<String>) {
        self.form.customer_id = customer_id.into();
    }

    pub fn set_product(&mut self, product: Option<String>) {
        self.form.product = product;
    }

    pub fn set_driver(&mut self, driver: Option<String>) {
        self.form.driver_name = driver;
    }

    pub fn set_haulier(&mut self, haulier: Option<String>) {
        self.form.haulier_name = haulier;
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.form.notes = notes;
    }

    // ------------------------------------------------------------------
    // Finalization
    // ------------------------------------------------------------------

    /// Fields that would block `save` right now
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = self.form.missing_fields();
        if self.state.first().is_none() {
            missing.push(RequiredField::FirstMass);
        }
        missing
    }

    /// Finalize the transaction and reset the flow
    ///
    /// On failure the error names every missing field and nothing changes.
    pub fn save(&mut self) -> Result<WeighingTransaction, ValidationError> {
        let missing = self.missing_fields();
        let first = match self.state.first() {
            Some(first) if missing.is_empty() => first,
            _ => return Err(ValidationError::MissingFields(missing)),
        };
        let second = self.state.second();

        let form = self.form.clone();
        let transaction = WeighingTransaction {
            id: self.resumed_id.unwrap_or_else(Uuid::new_v4),
            transaction_type: form.transaction_type,
            vehicle_registration: form.vehicle_registration.trim().to_string(),
            customer_id: form.customer_id.trim().to_string(),
            product: non_blank(form.product),
            driver_name: non_blank(form.driver_name),
            haulier_name: non_blank(form.haulier_name),
            notes: non_blank(form.notes),
            first_mass: first.kg,
            first_mass_at: first.captured_at,
            second_mass: second.map(|m| m.kg),
            second_mass_at: second.map(|m| m.captured_at),
        };

        self.clear();
        Ok(transaction)
    }

    /// Reset masses, form input and the manual override
    ///
    /// The live reading belongs to the weight source and is kept.
    pub fn clear(&mut self) {
        self.state = CaptureState::Empty;
        self.form = TransactionForm::default();
        self.manual_weight = None;
        self.resumed_id = None;
    }

    /// Reopen a stored transaction, typically a pending one whose vehicle
    /// has returned for its second weighing
    pub fn load(&mut self, transaction: &WeighingTransaction) {
        let first = CapturedMass {
            kg: transaction.first_mass,
            captured_at: transaction.first_mass_at,
        };
        self.state = match (transaction.second_mass, transaction.second_mass_at) {
            (Some(kg), Some(captured_at)) => CaptureState::BothCaptured {
                first,
                second: CapturedMass { kg, captured_at },
            },
            (Some(kg), None) => CaptureState::BothCaptured {
                first,
                second: CapturedMass::now(kg),
            },
            (None, _) => CaptureState::FirstCaptured { first },
        };
        self.form = TransactionForm {
            transaction_type: transaction.transaction_type,
            vehicle_registration: transaction.vehicle_registration.clone(),
            customer_id: transaction.customer_id.clone(),
            product: transaction.product.clone(),
            driver_name: transaction.driver_name.clone(),
            haulier_name: transaction.haulier_name.clone(),
            notes: transaction.notes.clone(),
        };
        self.manual_weight = None;
        self.resumed_id = Some(transaction.id);
    }
}
