//! Weight source abstraction
//!
//! Any scale (simulated or a hardware adapter) exposes the same two-field
//! contract: a weight and a stability status, pushed to listeners on change.

use std::sync::{Arc, Mutex};

use weighbridge_types::ScaleReading;

/// Callback invoked with every new reading
pub type ReadingListener = Box<dyn FnMut(&ScaleReading) + Send>;

pub trait WeightSource {
    /// Latest reading
    fn reading(&self) -> ScaleReading;

    /// Register a listener for subsequent readings
    fn subscribe(&mut self, listener: ReadingListener);
}

/// Shared sources, as driven by background timers
impl<T: WeightSource> WeightSource for Arc<Mutex<T>> {
    fn reading(&self) -> ScaleReading {
        self.lock().unwrap_or_else(|e| e.into_inner()).reading()
    }

    fn subscribe(&mut self, listener: ReadingListener) {
        self.lock()
            .unwrap_or_else(|e| e.into_inner())
            .subscribe(listener)
    }
}
