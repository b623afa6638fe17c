//! Simulated scale settings

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Timing and weight range of the simulated scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Display name ("Scale No. 1")
    #[serde(default = "default_scale_name")]
    pub scale_name: String,

    /// Clock tick period (ms)
    #[serde(default = "default_clock_interval_ms")]
    pub clock_interval_ms: u64,

    /// How often a new load may arrive (ms)
    #[serde(default = "default_change_interval_ms")]
    pub change_interval_ms: u64,

    /// Time between a load arriving and the reading settling (ms)
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Chance that a load arrives on each change tick (0.0-1.0)
    #[serde(default = "default_change_probability")]
    pub change_probability: f64,

    /// Lightest simulated load (kg)
    #[serde(default = "default_min_weight_kg")]
    pub min_weight_kg: u32,

    /// Simulated loads fall in [min, min + span) kg
    #[serde(default = "default_weight_span_kg")]
    pub weight_span_kg: u32,

    /// Fixed RNG seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_scale_name() -> String {
    "Scale No. 1".to_string()
}

fn default_clock_interval_ms() -> u64 {
    1000
}

fn default_change_interval_ms() -> u64 {
    5000
}

fn default_settle_delay_ms() -> u64 {
    1500
}

fn default_change_probability() -> f64 {
    0.3
}

fn default_min_weight_kg() -> u32 {
    10_000
}

fn default_weight_span_kg() -> u32 {
    50_000
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            scale_name: default_scale_name(),
            clock_interval_ms: default_clock_interval_ms(),
            change_interval_ms: default_change_interval_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            change_probability: default_change_probability(),
            min_weight_kg: default_min_weight_kg(),
            weight_span_kg: default_weight_span_kg(),
            seed: None,
        }
    }
}

impl SimulationSettings {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_change_probability(mut self, probability: f64) -> Self {
        self.change_probability = probability;
        self
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms.max(1))
    }

    pub fn change_interval(&self) -> Duration {
        Duration::from_millis(self.change_interval_ms.max(1))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Probability clamped to a valid range
    pub fn probability(&self) -> f64 {
        if self.change_probability.is_nan() {
            0.0
        } else {
            self.change_probability.clamp(0.0, 1.0)
        }
    }

    /// Loads drawn by the simulator; never empty, and the lower bound is
    /// pulled down so the range fits below `u32::MAX`
    pub fn weight_range(&self) -> RangeInclusive<u32> {
        let extra = self.weight_span_kg.max(1) - 1;
        let min = self.min_weight_kg.min(u32::MAX - extra);
        min..=min + extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_monitor_behavior() {
        let s = SimulationSettings::default();
        assert_eq!(s.change_interval(), Duration::from_millis(5000));
        assert_eq!(s.settle_delay(), Duration::from_millis(1500));
        assert_eq!(s.probability(), 0.3);
        assert_eq!(s.min_weight_kg, 10_000);
        assert_eq!(s.weight_span_kg, 50_000);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: SimulationSettings = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(s.seed, Some(7));
        assert_eq!(s.scale_name, "Scale No. 1");
    }

    #[test]
    fn test_probability_clamped() {
        assert_eq!(SimulationSettings::default().with_change_probability(3.0).probability(), 1.0);
        assert_eq!(SimulationSettings::default().with_change_probability(-1.0).probability(), 0.0);
    }

    #[test]
    fn test_weight_range_near_upper_limit() {
        let s = SimulationSettings::default();
        assert_eq!(s.weight_range(), 10_000..=59_999);

        let mut s = SimulationSettings::default();
        s.min_weight_kg = u32::MAX;
        assert_eq!(*s.weight_range().end(), u32::MAX);
        assert!(!s.weight_range().is_empty());

        s.weight_span_kg = 0;
        assert_eq!(s.weight_range(), u32::MAX..=u32::MAX);
    }
}
