use crate::spin::SpinState;

/// Clamp to `[0, 1]`. NaN maps to 0.
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Raw page measurements read from the host on a scroll or resize event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_y: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            scroll_y,
            viewport_height,
            document_height,
        }
    }

    /// How far the page can scroll. Zero or negative when the document fits
    /// in the viewport.
    pub fn scrollable_height(&self) -> f64 {
        self.document_height - self.viewport_height
    }
}

/// Normalized scroll position in `[0, 1]`. A document that does not scroll
/// (or reports non-finite metrics) is at progress 0.
pub fn scroll_progress(metrics: &ScrollMetrics) -> f64 {
    let max = metrics.scrollable_height();
    if !(max > 0.0) || !max.is_finite() || !metrics.scroll_y.is_finite() {
        return 0.0;
    }
    clamp01(metrics.scroll_y / max.max(1.0))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub progress: f64,
    pub viewport_height: f64,
}

/// Tracks scroll progress and the yarn-ball spin for one mounted overlay.
///
/// With reduce-motion active the tracker is frozen at its mount-time values:
/// scroll events are ignored, only viewport resizes are applied.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    state: ScrollState,
    spin: SpinState,
    last_y: f64,
    reduce_motion: bool,
}

impl ScrollTracker {
    pub fn mount(metrics: ScrollMetrics, reduce_motion: bool) -> Self {
        let last_y = if metrics.scroll_y.is_finite() {
            metrics.scroll_y
        } else {
            0.0
        };
        Self {
            state: ScrollState {
                progress: scroll_progress(&metrics),
                viewport_height: sanitize_height(metrics.viewport_height),
            },
            spin: SpinState::default(),
            last_y,
            reduce_motion,
        }
    }

    /// Apply a scroll event. Returns whether anything visible changed.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if self.reduce_motion {
            return false;
        }
        let progress = scroll_progress(&metrics);
        let mut changed = progress != self.state.progress;
        self.state.progress = progress;

        if metrics.scroll_y.is_finite() {
            let delta = metrics.scroll_y - self.last_y;
            changed |= self.spin.advance(delta);
            self.last_y = metrics.scroll_y;
        }
        changed
    }

    pub fn on_resize(&mut self, viewport_height: f64) -> bool {
        let height = sanitize_height(viewport_height);
        let changed = height != self.state.viewport_height;
        self.state.viewport_height = height;
        changed
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    pub fn viewport_height(&self) -> f64 {
        self.state.viewport_height
    }

    pub fn angle(&self) -> f64 {
        self.spin.angle()
    }

    pub fn reduce_motion(&self) -> bool {
        self.reduce_motion
    }
}

fn sanitize_height(h: f64) -> f64 {
    if h.is_finite() { h.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp01_bounds() {
        assert_eq!(clamp01(-3.0), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(7.0), 1.0);
        assert_eq!(clamp01(f64::NAN), 0.0);
        assert_eq!(clamp01(f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp01(f64::INFINITY), 1.0);
    }

    #[test]
    fn progress_halfway() {
        let m = ScrollMetrics::new(400.0, 800.0, 1600.0);
        assert_eq!(scroll_progress(&m), 0.5);
    }

    #[test]
    fn degenerate_document_is_zero() {
        let m = ScrollMetrics::new(0.0, 800.0, 800.0);
        let p = scroll_progress(&m);
        assert_eq!(p, 0.0);
        assert!(p.is_finite());

        // Shorter than the viewport
        let m = ScrollMetrics::new(10.0, 800.0, 300.0);
        assert_eq!(scroll_progress(&m), 0.0);
    }

    #[test]
    fn tiny_scroll_range_uses_unit_denominator() {
        // Half a pixel of scroll range divides by 1, not 0.5
        let m = ScrollMetrics::new(0.25, 800.0, 800.5);
        assert_eq!(scroll_progress(&m), 0.25);
    }

    #[test]
    fn overscroll_clamps() {
        // Rubber-band scrolling reports values past either end
        assert_eq!(scroll_progress(&ScrollMetrics::new(-40.0, 800.0, 1600.0)), 0.0);
        assert_eq!(scroll_progress(&ScrollMetrics::new(900.0, 800.0, 1600.0)), 1.0);
    }

    #[test]
    fn mount_reads_initial_offset() {
        let tracker = ScrollTracker::mount(ScrollMetrics::new(200.0, 800.0, 1600.0), false);
        assert_eq!(tracker.progress(), 0.25);
        assert_eq!(tracker.viewport_height(), 800.0);
        assert_eq!(tracker.angle(), 0.0);
    }

    #[test]
    fn scrolling_down_spins_and_up_does_not() {
        let mut tracker = ScrollTracker::mount(ScrollMetrics::new(0.0, 800.0, 1600.0), false);
        assert!(tracker.on_scroll(ScrollMetrics::new(100.0, 800.0, 1600.0)));
        assert_eq!(tracker.angle(), 15.0);

        tracker.on_scroll(ScrollMetrics::new(20.0, 800.0, 1600.0));
        assert_eq!(tracker.angle(), 15.0);
        assert_eq!(tracker.progress(), 0.025);

        // Going back down from the new low point spins again
        tracker.on_scroll(ScrollMetrics::new(120.0, 800.0, 1600.0));
        assert_eq!(tracker.angle(), 30.0);
    }

    #[test]
    fn reduce_motion_freezes_progress_and_spin() {
        let mut tracker = ScrollTracker::mount(ScrollMetrics::new(400.0, 800.0, 1600.0), true);
        assert!(tracker.reduce_motion());
        assert_eq!(tracker.progress(), 0.5);

        assert!(!tracker.on_scroll(ScrollMetrics::new(800.0, 800.0, 1600.0)));
        assert_eq!(tracker.progress(), 0.5);
        assert_eq!(tracker.angle(), 0.0);

        // Resize still applies
        assert!(tracker.on_resize(900.0));
        assert_eq!(tracker.viewport_height(), 900.0);
    }

    #[test]
    fn resize_ignores_garbage() {
        let mut tracker = ScrollTracker::mount(ScrollMetrics::new(0.0, 800.0, 1600.0), false);
        tracker.on_resize(f64::NAN);
        assert_eq!(tracker.viewport_height(), 0.0);
        assert!(!tracker.on_resize(0.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clamp01_in_unit_interval(x in proptest::num::f64::ANY) {
                let y = clamp01(x);
                prop_assert!((0.0..=1.0).contains(&y));
            }

            #[test]
            fn clamp01_identity_on_unit(x in 0.0f64..=1.0) {
                prop_assert_eq!(clamp01(x), x);
            }

            #[test]
            fn progress_always_finite_and_bounded(
                scroll_y in -10_000.0f64..10_000.0,
                viewport in 0.0f64..4000.0,
                document in 0.0f64..20_000.0,
            ) {
                let p = scroll_progress(&ScrollMetrics::new(scroll_y, viewport, document));
                prop_assert!(p.is_finite());
                prop_assert!((0.0..=1.0).contains(&p));
            }
        }
    }
}
