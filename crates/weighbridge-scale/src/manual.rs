//! Scale whose reading is set by the caller
//!
//! Used for operator-entered weights and as the test double for the
//! capture session. A hardware adapter pushing readings from a serial
//! driver would look the same.

use weighbridge_domain::{ReadingListener, WeightSource};
use weighbridge_types::{Kilograms, ScaleReading};

use crate::listeners::Listeners;

#[derive(Debug, Default)]
pub struct ManualScale {
    reading: ScaleReading,
    listeners: Listeners,
}

impl ManualScale {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a reading to every listener
    pub fn set(&mut self, reading: ScaleReading) {
        self.reading = reading;
        self.listeners.notify(&reading);
    }

    /// Publish a settled weight
    pub fn set_stable(&mut self, weight_kg: Kilograms) {
        self.set(ScaleReading::stable(weight_kg));
    }

    /// Publish an unsettled weight
    pub fn set_reading(&mut self, weight_kg: Kilograms) {
        self.set(ScaleReading::reading(weight_kg));
    }
}

impl WeightSource for ManualScale {
    fn reading(&self) -> ScaleReading {
        self.reading
    }

    fn subscribe(&mut self, listener: ReadingListener) {
        self.listeners.push(listener);
    }
}
