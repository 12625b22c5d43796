//! Clamped-range policy for a single joint angle.

use std::f64::consts::PI;

/// Allowed range of a joint angle, in radians.
///
/// When disabled, [`apply`](Self::apply) is a pass-through and the stored
/// range is informational only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleLimit {
    low: f64,
    high: f64,
    enabled: bool,
}

impl Default for AngleLimit {
    /// A disabled limit covering one full turn.
    fn default() -> Self {
        Self {
            low: -PI,
            high: PI,
            enabled: false,
        }
    }
}

impl AngleLimit {
    /// An enabled limit clamping into `[low, high]`.
    ///
    /// # Panics
    ///
    /// Panics if `low > high` or either bound is NaN.
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        assert!(low <= high, "angle limit low ({low}) must be <= high ({high})");
        Self {
            low,
            high,
            enabled: true,
        }
    }

    /// A pass-through limit.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Lower bound (rad).
    #[must_use]
    pub const fn low(&self) -> f64 {
        self.low
    }

    /// Upper bound (rad).
    #[must_use]
    pub const fn high(&self) -> f64 {
        self.high
    }

    /// Whether clamping is active.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Clamp `angle` into the range, inclusive. Unchanged when disabled.
    #[must_use]
    pub fn apply(&self, angle: f64) -> f64 {
        if self.enabled {
            angle.clamp(self.low, self.high)
        } else {
            angle
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_disabled_full_turn() {
        let limit = AngleLimit::default();
        assert!(!limit.is_enabled());
        assert_eq!(limit.low(), -PI);
        assert_eq!(limit.high(), PI);
    }

    #[test]
    fn disabled_passes_through() {
        let limit = AngleLimit::disabled();
        assert_eq!(limit.apply(42.0), 42.0);
        assert_eq!(limit.apply(-1e9), -1e9);
    }

    #[test]
    fn enabled_clamps_inclusive() {
        let limit = AngleLimit::new(-FRAC_PI_2, FRAC_PI_2);
        assert_eq!(limit.apply(PI), FRAC_PI_2);
        assert_eq!(limit.apply(-10.0), -FRAC_PI_2);
        assert_eq!(limit.apply(FRAC_PI_2), FRAC_PI_2);
        assert_eq!(limit.apply(0.25), 0.25);
    }

    #[test]
    fn wide_range_is_kept_verbatim() {
        let limit = AngleLimit::new(0.0, 8.0);
        assert_eq!(limit.apply(7.5), 7.5);
        assert_eq!(limit.apply(9.0), 8.0);
        assert_eq!(limit.apply(-0.1), 0.0);
    }

    #[test]
    fn degenerate_range_pins_value() {
        let limit = AngleLimit::new(1.0, 1.0);
        assert_eq!(limit.apply(-3.0), 1.0);
        assert_eq!(limit.apply(3.0), 1.0);
    }

    #[test]
    #[should_panic(expected = "must be <= high")]
    fn inverted_range_panics() {
        let _ = AngleLimit::new(1.0, -1.0);
    }

    proptest! {
        #[test]
        fn apply_is_idempotent(angle in -1e6..1e6f64, low in -10.0..0.0f64, span in 0.0..20.0f64) {
            let limit = AngleLimit::new(low, low + span);
            let once = limit.apply(angle);
            prop_assert_eq!(limit.apply(once), once);
            prop_assert!(once >= limit.low() && once <= limit.high());
        }
    }
}
