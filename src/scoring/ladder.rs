//! Ordered severity boundary tables
//!
//! Every aggregator check reduces its signal to a single number. A ladder
//! decides whether that number triggers an indicator at all, and if so which
//! severity applies: the first step whose boundary the value strictly
//! exceeds wins, otherwise the ladder's floor.
//!
//! Signals are often differences of scores built from decimal weights, so
//! "exceeds" means by more than [`TOLERANCE`]. `1.0 - 0.85` does not exceed
//! `0.15`.

use crate::models::Severity;

/// Margin a value must clear before it counts as above a boundary
pub const TOLERANCE: f64 = 1e-9;

fn exceeds(value: f64, boundary: f64) -> bool {
    value - boundary > TOLERANCE
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityLadder {
    /// Value must be strictly greater than this to trigger
    pub trigger: f64,
    /// Boundaries in descending order
    pub steps: &'static [(f64, Severity)],
    pub floor: Severity,
}

impl SeverityLadder {
    pub const fn new(trigger: f64, steps: &'static [(f64, Severity)], floor: Severity) -> Self {
        Self {
            trigger,
            steps,
            floor,
        }
    }

    /// A ladder that always grades to one severity once triggered
    pub const fn fixed(trigger: f64, severity: Severity) -> Self {
        Self::new(trigger, &[], severity)
    }

    /// Severity for `value`, or `None` when the value does not trigger.
    /// NaN never triggers.
    pub fn grade(&self, value: f64) -> Option<Severity> {
        if value.is_nan() || !exceeds(value, self.trigger) {
            return None;
        }
        let severity = self
            .steps
            .iter()
            .find(|(boundary, _)| exceeds(value, *boundary))
            .map_or(self.floor, |(_, severity)| *severity);
        Some(severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LADDER: SeverityLadder = SeverityLadder::new(
        0.3,
        &[(0.6, Severity::High), (0.4, Severity::Medium)],
        Severity::Low,
    );

    #[test]
    fn test_below_trigger() {
        assert_eq!(LADDER.grade(0.0), None);
        assert_eq!(LADDER.grade(0.3), None);
        assert_eq!(LADDER.grade(f64::NAN), None);
    }

    #[test]
    fn test_steps_are_strict() {
        assert_eq!(LADDER.grade(0.31), Some(Severity::Low));
        assert_eq!(LADDER.grade(0.4), Some(Severity::Low));
        assert_eq!(LADDER.grade(0.41), Some(Severity::Medium));
        assert_eq!(LADDER.grade(0.6), Some(Severity::Medium));
        assert_eq!(LADDER.grade(0.61), Some(Severity::High));
        assert_eq!(LADDER.grade(f64::INFINITY), Some(Severity::High));
    }

    #[test]
    fn test_fixed() {
        let ladder = SeverityLadder::fixed(0.2, Severity::Medium);
        assert_eq!(ladder.grade(0.2), None);
        assert_eq!(ladder.grade(0.9), Some(Severity::Medium));
    }

    #[test]
    fn test_rounding_noise_does_not_cross_boundaries() {
        let ladder = SeverityLadder::new(0.15, &[(0.25, Severity::High)], Severity::Medium);
        // Each of these is 0.15000000000000002 in f64
        assert_eq!(ladder.grade(1.0 - 0.85), None);
        assert_eq!(ladder.grade(0.85 - 0.7), None);
        assert_eq!(ladder.grade(0.9 - 0.75), None);
        assert_eq!(ladder.grade(0.85 - 0.6), Some(Severity::Medium));
        assert_eq!(ladder.grade(0.151), Some(Severity::Medium));
        assert_eq!(ladder.grade(0.251), Some(Severity::High));
    }
}
