use glam::DVec2;

use crate::config::CatYarnConfig;
use crate::scroll::{clamp01, lerp};

/// Rope length at the top of the page.
pub const MIN_ROPE_LENGTH: f64 = 100.0;
/// Lower bound for the rope length at the bottom of the page.
pub const MIN_MAX_ROPE_LENGTH: f64 = 140.0;
/// The ball never draws smaller than this.
pub const MIN_BALL_DIAMETER: f64 = 12.0;
/// Upward kick (px/s) with the rope fully retracted.
pub const MIN_BOUNCE_IMPULSE: f64 = 300.0;
/// Upward kick (px/s) with the rope fully extended.
pub const MAX_BOUNCE_IMPULSE: f64 = 1100.0;
/// Rope control point rises this far above the chord midpoint.
pub const ROPE_SLACK: f64 = 40.0;

const SCENE_MIN_WIDTH: f64 = 260.0;
const SCENE_SIDE_PADDING: f64 = 40.0;
const SCENE_BOTTOM_MARGIN: f64 = 24.0;
const ROPE_BOTTOM_MARGIN: f64 = 80.0;
const PAW_X_RATIO: f64 = 0.45;
const PAW_Y_RATIO: f64 = 0.5;
const PAW_X_NUDGE: f64 = 35.51;

/// Size of the fixed overlay box in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBox {
    pub width: f64,
    pub height: f64,
}

impl SceneBox {
    pub fn for_viewport(viewport_height: f64, config: &CatYarnConfig) -> Self {
        Self {
            width: (config.cat_width + SCENE_SIDE_PADDING).max(SCENE_MIN_WIDTH),
            height: viewport_height - config.top_offset - SCENE_BOTTOM_MARGIN,
        }
    }
}

/// Everything drawn for one frame, before the bounce offset is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub scene: SceneBox,
    /// Where the rope leaves the cat's paw.
    pub paw: DVec2,
    /// Ball center at rest.
    pub ball: DVec2,
    /// Quadratic curve control point between paw and ball.
    pub control: DVec2,
    pub rope_length: f64,
    pub max_rope_length: f64,
    pub ball_diameter: f64,
    /// How far the rope is extended between its shortest and longest, `[0, 1]`.
    pub rope_tension: f64,
    /// Signed kick for a click at this tension (negative is up).
    pub bounce_impulse: f64,
}

/// Map scroll progress to overlay geometry.
pub fn map_geometry(progress: f64, viewport_height: f64, config: &CatYarnConfig) -> Geometry {
    let progress = clamp01(progress);
    let scene = SceneBox::for_viewport(viewport_height, config);

    let paw = DVec2::new(
        scene.width - (config.cat_width * PAW_X_RATIO).round() - PAW_X_NUDGE,
        (config.cat_width * PAW_Y_RATIO).round(),
    );

    let max_rope_length = (scene.height - paw.y - ROPE_BOTTOM_MARGIN).max(MIN_MAX_ROPE_LENGTH);
    let rope_length = lerp(MIN_ROPE_LENGTH, max_rope_length, progress).round();
    let rope_tension = rope_tension(rope_length, max_rope_length);

    let ball_diameter = lerp(config.ball_start, config.ball_end, progress)
        .round()
        .max(MIN_BALL_DIAMETER);

    let ball = DVec2::new(paw.x, paw.y + rope_length);
    let control = DVec2::new(
        ((paw.x + ball.x) / 2.0).round(),
        ((paw.y + ball.y) / 2.0 - ROPE_SLACK).round(),
    );

    Geometry {
        scene,
        paw,
        ball,
        control,
        rope_length,
        max_rope_length,
        ball_diameter,
        rope_tension,
        bounce_impulse: bounce_impulse(rope_tension),
    }
}

pub fn rope_tension(rope_length: f64, max_rope_length: f64) -> f64 {
    clamp01((rope_length - MIN_ROPE_LENGTH) / (max_rope_length - MIN_ROPE_LENGTH).max(1.0))
}

/// More rope out gives a bigger kick.
pub fn bounce_impulse(rope_tension: f64) -> f64 {
    -lerp(MIN_BOUNCE_IMPULSE, MAX_BOUNCE_IMPULSE, clamp01(rope_tension))
}
