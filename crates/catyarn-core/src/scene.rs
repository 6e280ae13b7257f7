//! Per-frame render description for the overlay.
//!
//! The browser layer does no math of its own; it copies these strings onto
//! SVG attributes and inline styles.

use glam::DVec2;

use crate::bounce::BounceSimulator;
use crate::config::CatYarnConfig;
use crate::motion::{Geometry, map_geometry};
use crate::scroll::ScrollTracker;

/// Rope stroke width in px.
pub const ROPE_WIDTH: f64 = 3.0;
/// Stacking order of the fixed overlay.
pub const OVERLAY_Z_INDEX: u32 = 30;

/// Pointer cursor over the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallCursor {
    /// Idle; a click will bounce.
    Pointer,
    /// Already bouncing; clicks are ignored.
    Default,
}

impl BallCursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Default => "default",
        }
    }
}

/// Which ball drawing is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallSource {
    Image,
    Vector,
}

/// The image wins while it is configured and has not failed to load.
pub fn ball_source(has_image: bool, image_failed: bool) -> BallSource {
    if has_image && !image_failed {
        BallSource::Image
    } else {
        BallSource::Vector
    }
}

/// Attribute values for one rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub geometry: Geometry,
    /// Ball center including the bounce offset.
    pub ball_center: DVec2,
    pub angle: f64,
    pub cursor: BallCursor,
    pub visible: bool,
}

impl SceneFrame {
    pub fn compose(
        tracker: &ScrollTracker,
        bounce: &BounceSimulator,
        config: &CatYarnConfig,
        viewport_width: f64,
    ) -> Self {
        let state = tracker.state();
        let geometry = map_geometry(state.progress, state.viewport_height, config);
        let ball_center = geometry.ball + DVec2::new(0.0, bounce.offset());
        Self {
            geometry,
            ball_center,
            angle: tracker.angle(),
            cursor: if bounce.is_running() {
                BallCursor::Default
            } else {
                BallCursor::Pointer
            },
            visible: config.hide_below.is_visible(viewport_width),
        }
    }

    pub fn box_width(&self) -> f64 {
        self.geometry.scene.width
    }

    /// Box height, never negative on very short viewports.
    pub fn box_height(&self) -> f64 {
        self.geometry.scene.height.max(0.0)
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.box_width(), self.box_height())
    }

    /// SVG path data for the rope: a quadratic curve from the paw to the
    /// (bouncing) ball.
    pub fn rope_path(&self) -> String {
        let g = &self.geometry;
        format!(
            "M {} {} Q {} {} {} {}",
            g.paw.x, g.paw.y, g.control.x, g.control.y, self.ball_center.x, self.ball_center.y
        )
    }

    pub fn ball_transform(&self) -> String {
        format!(
            "translate({}, {}) rotate({})",
            self.ball_center.x, self.ball_center.y, self.angle
        )
    }

    pub fn ball_diameter(&self) -> f64 {
        self.geometry.ball_diameter
    }

    pub fn ball_style(&self) -> String {
        format!(
            "pointer-events:auto;cursor:{};touch-action:manipulation",
            self.cursor.as_css()
        )
    }

    /// Inline style for the fixed overlay container.
    pub fn overlay_style(&self, config: &CatYarnConfig) -> String {
        format!(
            "position:fixed;z-index:{OVERLAY_Z_INDEX};pointer-events:none;user-select:none;\
             border:0;border-radius:0;box-shadow:none;\
             top:{}px;right:{}px;width:{}px;height:{}px;display:{}",
            config.top_offset,
            config.right_offset,
            self.box_width(),
            self.box_height(),
            if self.visible { "block" } else { "none" },
        )
    }
}

/// Path data for the yarn strands drawn over the vector ball, centered on
/// the origin so the ball group's `rotate` spins them.
pub fn yarn_strands(diameter: f64) -> [String; 3] {
    let r = diameter / 2.0;
    let s = r * 0.7;
    let bend = r * 0.45;
    [
        format!("M {} {} Q {} {} {} {}", -s, -s * 0.5, 0.0, -bend, s, -s * 0.5),
        format!("M {} {} Q {} {} {} {}", -r * 0.85, 0.0, 0.0, bend * 0.4, r * 0.85, 0.0),
        format!("M {} {} Q {} {} {} {}", -s, s * 0.5, 0.0, bend, s, s * 0.5),
    ]
}

/// Stroke width for the yarn strands, thinning with the ball.
pub fn yarn_strand_width(diameter: f64) -> f64 {
    (diameter / 24.0).clamp(1.0, 2.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HideBelow;
    use crate::scroll::ScrollMetrics;

    fn mounted(scroll_y: f64) -> ScrollTracker {
        ScrollTracker::mount(ScrollMetrics::new(scroll_y, 800.0, 1600.0), false)
    }

    #[test]
    fn idle_frame_has_no_offset() {
        let cfg = CatYarnConfig::default();
        let frame = SceneFrame::compose(&mounted(0.0), &BounceSimulator::default(), &cfg, 1440.0);
        assert_eq!(frame.ball_center, frame.geometry.ball);
        assert_eq!(frame.cursor, BallCursor::Pointer);
        assert!(frame.visible);
        assert_eq!(frame.view_box(), "0 0 260 680");
        assert_eq!(frame.rope_path(), "M 143.49 90 Q 143 100 143.49 190");
        assert_eq!(frame.ball_transform(), "translate(143.49, 190) rotate(0)");
    }

    #[test]
    fn bouncing_frame_lifts_ball() {
        let cfg = CatYarnConfig::default();
        let tracker = mounted(0.0);
        let mut bounce = BounceSimulator::default();
        bounce.trigger(-900.0, 0.0);
        bounce.step(16.0);

        let frame = SceneFrame::compose(&tracker, &bounce, &cfg, 1440.0);
        assert!(frame.ball_center.y < frame.geometry.ball.y);
        assert_eq!(frame.ball_center.y, frame.geometry.ball.y + bounce.offset());
        assert_eq!(frame.cursor, BallCursor::Default);
        assert!(frame.ball_style().contains("cursor:default"));
        // The rope follows the ball; the paw end stays put
        assert!(frame.rope_path().starts_with("M 143.49 90 Q "));
    }

    #[test]
    fn hidden_below_breakpoint() {
        let cfg = CatYarnConfig {
            hide_below: HideBelow::Lg,
            ..Default::default()
        };
        let frame = SceneFrame::compose(&mounted(0.0), &BounceSimulator::default(), &cfg, 800.0);
        assert!(!frame.visible);
        assert!(frame.overlay_style(&cfg).ends_with("display:none"));
    }

    #[test]
    fn overlay_style_positions_box() {
        let cfg = CatYarnConfig::default();
        let frame = SceneFrame::compose(&mounted(0.0), &BounceSimulator::default(), &cfg, 1440.0);
        let style = frame.overlay_style(&cfg);
        assert!(style.contains("top:96px"));
        assert!(style.contains("right:16px"));
        assert!(style.contains("width:260px"));
        assert!(style.contains("height:680px"));
        assert!(style.contains("pointer-events:none"));
        assert!(style.ends_with("display:block"));
    }

    #[test]
    fn short_viewport_box_height_not_negative() {
        let cfg = CatYarnConfig::default();
        let tracker = ScrollTracker::mount(ScrollMetrics::new(0.0, 100.0, 100.0), false);
        let frame = SceneFrame::compose(&tracker, &BounceSimulator::default(), &cfg, 1440.0);
        assert_eq!(frame.box_height(), 0.0);
    }

    #[test]
    fn ball_source_falls_back_to_vector() {
        assert_eq!(ball_source(true, false), BallSource::Image);
        assert_eq!(ball_source(true, true), BallSource::Vector);
        assert_eq!(ball_source(false, false), BallSource::Vector);
    }

    #[test]
    fn compose_reads_frozen_tracker_state() {
        let cfg = CatYarnConfig::default();
        let mut tracker = ScrollTracker::mount(ScrollMetrics::new(400.0, 800.0, 1600.0), true);
        tracker.on_scroll(ScrollMetrics::new(800.0, 800.0, 1600.0));
        let state = tracker.state();
        let frame = SceneFrame::compose(&tracker, &BounceSimulator::default(), &cfg, 1440.0);
        assert_eq!(
            frame.geometry,
            map_geometry(state.progress, state.viewport_height, &cfg)
        );
        assert_eq!(frame.geometry.ball_diameter, 46.0);
    }

    #[test]
    fn strands_scale_with_ball() {
        let big = yarn_strands(64.0);
        let small = yarn_strands(28.0);
        assert_ne!(big, small);
        assert!(big.iter().all(|d| d.starts_with("M ")));
        assert_eq!(yarn_strand_width(64.0), 2.5);
        assert_eq!(yarn_strand_width(12.0), 1.0);
    }
}
