//! Weight sources for the capture flow
//!
//! - [`SimulatedScale`]: randomized scale that periodically settles on a new weight
//! - [`ManualScale`]: reading set explicitly by the caller
//! - [`spawn_driver`]: runs the simulated scale's timers on tokio

mod driver;
mod listeners;
mod manual;
mod settings;
mod simulated;

pub use driver::{spawn_driver, ScaleDriver};
pub use manual::ManualScale;
pub use settings::SimulationSettings;
pub use simulated::SimulatedScale;
