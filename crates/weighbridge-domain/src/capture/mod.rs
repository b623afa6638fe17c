//! Two-stage weighing capture
//!
//! A vehicle is weighed twice; the flow sequences both captures, holds the
//! form input, and finalizes a [`WeighingTransaction`](crate::model::WeighingTransaction).

mod flow;
mod form;
mod state;

pub use flow::CaptureFlow;
pub use form::TransactionForm;
pub use state::{CaptureState, CapturedMass};
