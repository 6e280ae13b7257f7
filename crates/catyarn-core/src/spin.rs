/// Degrees of yarn-ball rotation per pixel scrolled down.
pub const SPIN_RATE: f64 = 0.15;

/// Accumulated yarn-ball rotation. Only ever winds forward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpinState {
    angle: f64,
}

impl SpinState {
    /// Rotation in degrees, always in `[0, 360)`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Advance by a vertical scroll delta in pixels. Upward (or zero) deltas
    /// leave the angle untouched. Returns whether the angle changed.
    pub fn advance(&mut self, delta: f64) -> bool {
        if !(delta > 0.0) || !delta.is_finite() {
            return false;
        }
        self.angle = (self.angle + delta * SPIN_RATE).rem_euclid(360.0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_down_100_adds_15_degrees() {
        let mut spin = SpinState::default();
        assert!(spin.advance(100.0));
        assert_eq!(spin.angle(), 15.0);
    }

    #[test]
    fn scroll_up_never_unwinds() {
        let mut spin = SpinState::default();
        spin.advance(200.0);
        let before = spin.angle();
        assert!(!spin.advance(-150.0));
        assert!(!spin.advance(0.0));
        assert_eq!(spin.angle(), before);
    }

    #[test]
    fn wraps_at_full_turn() {
        let mut spin = SpinState::default();
        // 2500px * 0.15 = 375 degrees
        spin.advance(2500.0);
        assert!((spin.angle() - 15.0).abs() < 1e-9, "angle = {}", spin.angle());
    }

    #[test]
    fn non_finite_delta_ignored() {
        let mut spin = SpinState::default();
        assert!(!spin.advance(f64::NAN));
        assert!(!spin.advance(f64::INFINITY));
        assert_eq!(spin.angle(), 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn angle_stays_in_range(deltas in proptest::collection::vec(-5000.0f64..5000.0, 1..64)) {
                let mut spin = SpinState::default();
                for d in deltas {
                    let before = spin.angle();
                    spin.advance(d);
                    prop_assert!(spin.angle() >= 0.0 && spin.angle() < 360.0);
                    if d <= 0.0 {
                        prop_assert_eq!(spin.angle(), before);
                    }
                }
            }
        }
    }
}
