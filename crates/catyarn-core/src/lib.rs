//! Platform-independent core of the cat-and-yarn overlay: scroll tracking,
//! geometry mapping, bounce physics and per-frame scene composition.

pub mod bounce;
pub mod config;
pub mod error;
pub mod motion;
pub mod scene;
pub mod scroll;
pub mod spin;

pub use bounce::{BouncePhase, BounceSimulator, BounceStep, PhysicsConfig};
pub use config::{CatYarnConfig, HideBelow};
pub use error::ConfigError;
pub use motion::{Geometry, SceneBox, map_geometry};
pub use scene::{BallSource, SceneFrame, ball_source};
pub use scroll::{ScrollMetrics, ScrollState, ScrollTracker, clamp01, lerp, scroll_progress};
pub use spin::SpinState;
