//=========================================================================
// Cooldown
//=========================================================================
//
// Minimum interval between successive triggers, driven by caller-supplied
// instants so it can be tested without sleeping.
//
//=========================================================================

use std::time::{Duration, Instant};

use crate::core::error::{GridError, Result};

//=== Cooldown ============================================================

/// Gate that opens at most once per `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    interval: Duration,
    last: Option<Instant>,
}

impl Cooldown {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    /// Builds a cooldown from a seconds value as found in configuration.
    ///
    /// # Errors
    ///
    /// [`GridError::Configuration`] for negative, NaN or infinite values.
    pub fn from_secs_f64(secs: f64) -> Result<Self> {
        Duration::try_from_secs_f64(secs).map(Self::new).map_err(|e| {
            GridError::Configuration(format!("invalid cooldown of {} seconds: {}", secs, e))
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// `true` if a trigger at `now` would be accepted.
    pub fn is_ready(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Accepts the trigger and restarts the interval, or rejects it.
    pub fn try_trigger(&mut self, now: Instant) -> bool {
        if !self.is_ready(now) {
            return false;
        }
        self.last = Some(now);
        true
    }

    /// Forgets the last trigger; the next one is accepted immediately.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(200);

    #[test]
    fn first_trigger_is_accepted() {
        let mut cooldown = Cooldown::new(INTERVAL);
        assert!(cooldown.try_trigger(Instant::now()));
    }

    #[test]
    fn rejects_within_interval() {
        let t0 = Instant::now();
        let mut cooldown = Cooldown::new(INTERVAL);

        assert!(cooldown.try_trigger(t0));
        assert!(!cooldown.try_trigger(t0 + Duration::from_millis(199)));
        assert!(cooldown.try_trigger(t0 + INTERVAL));
    }

    #[test]
    fn rejected_trigger_does_not_restart_interval() {
        let t0 = Instant::now();
        let mut cooldown = Cooldown::new(INTERVAL);

        cooldown.try_trigger(t0);
        cooldown.try_trigger(t0 + Duration::from_millis(150));

        assert!(cooldown.is_ready(t0 + Duration::from_millis(210)));
    }

    #[test]
    fn reset_reopens_gate() {
        let t0 = Instant::now();
        let mut cooldown = Cooldown::new(INTERVAL);

        cooldown.try_trigger(t0);
        cooldown.reset();

        assert!(cooldown.try_trigger(t0 + Duration::from_millis(1)));
    }

    #[test]
    fn zero_interval_never_blocks() {
        let t0 = Instant::now();
        let mut cooldown = Cooldown::new(Duration::ZERO);
        assert!(cooldown.try_trigger(t0));
        assert!(cooldown.try_trigger(t0));
    }

    #[test]
    fn earlier_instant_is_not_ready() {
        let t0 = Instant::now() + Duration::from_secs(1);
        let mut cooldown = Cooldown::new(INTERVAL);
        cooldown.try_trigger(t0);
        assert!(!cooldown.is_ready(t0 - Duration::from_millis(500)));
    }

    #[test]
    fn from_secs_validates() {
        assert_eq!(Cooldown::from_secs_f64(0.25).unwrap().interval(), Duration::from_millis(250));
        assert!(matches!(Cooldown::from_secs_f64(-1.0), Err(GridError::Configuration(_))));
        assert!(matches!(Cooldown::from_secs_f64(f64::NAN), Err(GridError::Configuration(_))));
        assert!(matches!(Cooldown::from_secs_f64(f64::INFINITY), Err(GridError::Configuration(_))));
    }
}
