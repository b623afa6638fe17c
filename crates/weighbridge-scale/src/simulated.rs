//! Simulated weighbridge scale
//!
//! Two independent timers drive the scale:
//! - the clock timer refreshes the displayed wall-clock time
//! - the change timer occasionally puts a new load on the platform; the
//!   scale shows `Reading` until the load settles, then `Stable` with the
//!   new weight
//!
//! The timers write disjoint fields. [`SimulatedScale::advance`] runs both on
//! virtual time; [`crate::spawn_driver`] runs them on tokio.

use std::time::Duration;

use chrono::{DateTime, Local};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use weighbridge_domain::{ReadingListener, WeightSource};
use weighbridge_types::{Kilograms, ScaleReading, ScaleStatus};

use crate::listeners::Listeners;
use crate::settings::SimulationSettings;

/// A load that has arrived but not yet settled
#[derive(Debug, Clone, Copy)]
struct PendingChange {
    weight_kg: Kilograms,
    remaining: Duration,
}

#[derive(Debug)]
pub struct SimulatedScale {
    settings: SimulationSettings,
    rng: ChaCha8Rng,
    reading: ScaleReading,
    pending: Option<PendingChange>,
    /// Virtual time since the last change tick
    since_change_tick: Duration,
    clock: DateTime<Local>,
    listeners: Listeners,
}

impl SimulatedScale {
    pub fn new(settings: SimulationSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            settings,
            rng,
            reading: ScaleReading::stable(0.0),
            pending: None,
            since_change_tick: Duration::ZERO,
            clock: Local::now(),
            listeners: Listeners::default(),
        }
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn clock(&self) -> DateTime<Local> {
        self.clock
    }

    pub fn is_settling(&self) -> bool {
        self.pending.is_some()
    }

    /// Clock timer callback
    pub fn tick_clock(&mut self, now: DateTime<Local>) {
        self.clock = now;
    }

    /// Change timer callback
    ///
    /// With the configured probability a new load arrives: the scale enters
    /// `Reading` (still showing the old weight) and returns the weight it
    /// will settle on. Ignored while a previous load is still settling.
    pub fn begin_change(&mut self) -> Option<Kilograms> {
        if self.pending.is_some() {
            return None;
        }
        if !self.rng.gen_bool(self.settings.probability()) {
            return None;
        }

        let weight_kg = f64::from(self.rng.gen_range(self.settings.weight_range()));

        self.pending = Some(PendingChange {
            weight_kg,
            remaining: self.settings.settle_delay(),
        });
        self.publish(ScaleReading {
            weight_kg: self.reading.weight_kg,
            status: ScaleStatus::Reading,
        });
        debug!(scale = %self.settings.scale_name, target_kg = weight_kg, "load arriving");
        Some(weight_kg)
    }

    /// Settle a pending load: the new weight becomes the stable reading
    pub fn settle(&mut self) -> Option<Kilograms> {
        let pending = self.pending.take()?;
        self.publish(ScaleReading::stable(pending.weight_kg));
        debug!(scale = %self.settings.scale_name, weight_kg = pending.weight_kg, "reading settled");
        Some(pending.weight_kg)
    }

    /// Zero the scale, discarding any load still settling
    pub fn zero(&mut self) {
        self.pending = None;
        self.publish(ScaleReading::stable(0.0));
    }

    /// Run both timers forward by `elapsed` of virtual time
    pub fn advance(&mut self, elapsed: Duration) {
        let change_interval = self.settings.change_interval();
        let mut remaining = elapsed;

        loop {
            if self.pending.map(|p| p.remaining.is_zero()).unwrap_or(false) {
                self.settle();
            }
            if self.since_change_tick >= change_interval {
                self.since_change_tick = Duration::ZERO;
                self.begin_change();
                continue;
            }
            if remaining.is_zero() {
                break;
            }

            let mut step = remaining.min(change_interval - self.since_change_tick);
            if let Some(pending) = self.pending {
                step = step.min(pending.remaining);
            }

            remaining -= step;
            self.since_change_tick += step;
            if let Some(pending) = self.pending.as_mut() {
                pending.remaining -= step;
            }
            if let Ok(delta) = chrono::Duration::from_std(step) {
                self.clock += delta;
            }
        }
    }

    fn publish(&mut self, reading: ScaleReading) {
        self.reading = reading;
        self.listeners.notify(&reading);
    }
}

impl WeightSource for SimulatedScale {
    fn reading(&self) -> ScaleReading {
        self.reading
    }

    fn subscribe(&mut self, listener: ReadingListener) {
        self.listeners.push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn always_changing(seed: u64) -> SimulatedScale {
        SimulatedScale::new(
            SimulationSettings::default()
                .with_seed(seed)
                .with_change_probability(1.0),
        )
    }

    #[test]
    fn test_starts_stable_at_zero() {
        let scale = SimulatedScale::new(SimulationSettings::default().with_seed(1));
        assert_eq!(scale.reading(), ScaleReading::stable(0.0));
        assert!(!scale.reading().is_capturable());
    }

    #[test]
    fn test_load_at_upper_weight_limit() {
        let mut settings = SimulationSettings::default()
            .with_seed(3)
            .with_change_probability(1.0);
        settings.min_weight_kg = u32::MAX;
        let mut scale = SimulatedScale::new(settings);

        assert_eq!(scale.begin_change(), Some(f64::from(u32::MAX)));
        assert_eq!(scale.settle(), Some(f64::from(u32::MAX)));
    }

    #[test]
    fn test_load_arrives_then_settles() {
        let mut scale = always_changing(42);

        scale.advance(Duration::from_millis(4999));
        assert_eq!(scale.reading(), ScaleReading::stable(0.0));

        scale.advance(Duration::from_millis(1));
        assert_eq!(scale.reading().status, ScaleStatus::Reading);
        assert_eq!(scale.reading().weight_kg, 0.0);
        assert!(scale.is_settling());

        scale.advance(Duration::from_millis(1500));
        let reading = scale.reading();
        assert_eq!(reading.status, ScaleStatus::Stable);
        assert!(reading.weight_kg >= 10_000.0 && reading.weight_kg < 60_000.0);
        assert!(reading.is_capturable());
    }

    #[test]
    fn test_never_changes_with_zero_probability() {
        let mut scale = SimulatedScale::new(
            SimulationSettings::default()
                .with_seed(3)
                .with_change_probability(0.0),
        );
        scale.advance(Duration::from_secs(600));
        assert_eq!(scale.reading(), ScaleReading::stable(0.0));
    }

    #[test]
    fn test_same_seed_same_weights() {
        let mut a = always_changing(7);
        let mut b = always_changing(7);
        for _ in 0..5 {
            a.advance(Duration::from_secs(5));
            b.advance(Duration::from_secs(5));
            assert_eq!(a.reading(), b.reading());
        }
    }

    #[test]
    fn test_listener_sees_reading_then_stable() {
        let mut scale = always_changing(11);
        let (tx, rx) = mpsc::channel();
        scale.subscribe(Box::new(move |r: &ScaleReading| {
            let _ = tx.send(*r);
        }));

        scale.advance(Duration::from_millis(6500));
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].status, ScaleStatus::Reading);
        assert_eq!(events[1].status, ScaleStatus::Stable);
    }

    #[test]
    fn test_zero_discards_pending_load() {
        let mut scale = always_changing(5);
        scale.advance(Duration::from_secs(5));
        assert!(scale.is_settling());

        scale.zero();
        assert!(!scale.is_settling());
        assert_eq!(scale.reading(), ScaleReading::stable(0.0));
        assert_eq!(scale.settle(), None);
    }

    #[test]
    fn test_begin_change_ignored_while_settling() {
        let mut scale = always_changing(9);
        let first = scale.begin_change();
        assert!(first.is_some());
        assert_eq!(scale.begin_change(), None);
        assert_eq!(scale.settle(), first);
    }

    #[test]
    fn test_clock_advances_with_virtual_time() {
        let mut scale = SimulatedScale::new(SimulationSettings::default().with_seed(1));
        let start = scale.clock();
        scale.advance(Duration::from_secs(3));
        assert_eq!((scale.clock() - start).num_seconds(), 3);
    }
}
