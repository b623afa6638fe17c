//! Weighbridge domain layer
//!
//! Models, the two-stage weighing capture flow, domain services, the
//! weight source abstraction, and repository traits.

pub mod capture;
pub mod model;
pub mod repository;
pub mod service;
pub mod source;

pub use capture::{CaptureFlow, CaptureState, CapturedMass, TransactionForm};
pub use source::{ReadingListener, WeightSource};
