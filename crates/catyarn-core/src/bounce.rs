use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Downward acceleration in px/s^2.
pub const GRAVITY: f64 = 2000.0;
/// Fraction of speed kept after hitting the rest position.
pub const RESTITUTION: f64 = 0.55;
/// Below this speed (px/s) the ball may settle.
pub const STOP_VELOCITY: f64 = 60.0;
/// Within this distance (px) of rest the ball may settle.
pub const STOP_OFFSET: f64 = 2.0;
/// Longest integration step. Frame drops are integrated as several short
/// frames' worth of motion, not one long one.
pub const MAX_STEP_SECS: f64 = 0.032;
/// Impulse used when the caller has no rope tension to scale by.
pub const DEFAULT_IMPULSE: f64 = -900.0;

/// Bounce physics parameters, loadable from the `[physics]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f64,
    pub restitution: f64,
    #[serde(alias = "stopVelocity")]
    pub stop_velocity: f64,
    #[serde(alias = "stopOffset")]
    pub stop_offset: f64,
    #[serde(alias = "maxStepSecs")]
    pub max_step_secs: f64,
    #[serde(alias = "defaultImpulse")]
    pub default_impulse: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            restitution: RESTITUTION,
            stop_velocity: STOP_VELOCITY,
            stop_offset: STOP_OFFSET,
            max_step_secs: MAX_STEP_SECS,
            default_impulse: DEFAULT_IMPULSE,
        }
    }
}

impl PhysicsConfig {
    /// A bounce only settles if every floor contact loses energy, so
    /// restitution must stay in `[0, 1)`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gravity > 0.0) || !self.gravity.is_finite() {
            return Err(ConfigError::Invalid("physics.gravity must be > 0".to_string()));
        }
        if !(0.0..1.0).contains(&self.restitution) {
            return Err(ConfigError::Invalid(
                "physics.restitution must be in [0, 1)".to_string(),
            ));
        }
        if !(self.stop_velocity > 0.0) || !(self.stop_offset > 0.0) {
            return Err(ConfigError::Invalid(
                "physics stop thresholds must be > 0".to_string(),
            ));
        }
        if !(self.max_step_secs > 0.0) || !self.max_step_secs.is_finite() {
            return Err(ConfigError::Invalid(
                "physics.max_step_secs must be > 0".to_string(),
            ));
        }
        if !self.default_impulse.is_finite() {
            return Err(ConfigError::Invalid(
                "physics.default_impulse must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BouncePhase {
    #[default]
    Idle,
    Running,
}

/// Result of advancing the simulation by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceStep {
    /// Still in flight; schedule another frame.
    Moving,
    /// At rest with offset exactly 0; stop scheduling frames.
    Settled,
}

/// Vertical bounce of the yarn ball around its rest position.
///
/// `offset` is the displacement from rest in pixels, never positive
/// (negative is up). At most one bounce runs at a time: triggering while
/// running is ignored, not queued.
#[derive(Debug, Clone)]
pub struct BounceSimulator {
    params: PhysicsConfig,
    phase: BouncePhase,
    velocity: f64,
    offset: f64,
    last_ms: f64,
    floor_hits: u32,
}

impl Default for BounceSimulator {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl BounceSimulator {
    pub fn new(params: PhysicsConfig) -> Self {
        Self {
            params,
            phase: BouncePhase::Idle,
            velocity: 0.0,
            offset: 0.0,
            last_ms: 0.0,
            floor_hits: 0,
        }
    }

    pub fn params(&self) -> &PhysicsConfig {
        &self.params
    }

    pub fn phase(&self) -> BouncePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == BouncePhase::Running
    }

    /// Displacement to add to the ball's rest Y. Always 0 while idle.
    pub fn offset(&self) -> f64 {
        match self.phase {
            BouncePhase::Running => self.offset,
            BouncePhase::Idle => 0.0,
        }
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Floor contacts in the current (or most recent) bounce.
    pub fn floor_hits(&self) -> u32 {
        self.floor_hits
    }

    /// Kick the ball with a signed impulse in px/s (negative is up).
    ///
    /// Returns `false` without touching any state if a bounce is already
    /// running.
    pub fn trigger(&mut self, impulse: f64, now_ms: f64) -> bool {
        if self.is_running() {
            return false;
        }
        let impulse = if impulse.is_finite() {
            impulse
        } else {
            self.params.default_impulse
        };
        self.phase = BouncePhase::Running;
        self.velocity = impulse;
        self.offset = 0.0;
        self.last_ms = now_ms;
        self.floor_hits = 0;
        tracing::debug!(impulse, "Yarn ball bounce started");
        true
    }

    /// Advance to the animation-frame timestamp `now_ms`.
    pub fn step(&mut self, now_ms: f64) -> BounceStep {
        if !self.is_running() {
            return BounceStep::Settled;
        }
        let elapsed = (now_ms - self.last_ms) / 1000.0;
        self.last_ms = now_ms;
        let dt = if elapsed.is_finite() {
            elapsed.clamp(0.0, self.params.max_step_secs)
        } else {
            0.0
        };
        self.integrate(dt)
    }

    /// One explicit Euler step of `dt` seconds (capped at the max step).
    pub fn integrate(&mut self, dt: f64) -> BounceStep {
        if !self.is_running() {
            return BounceStep::Settled;
        }
        let dt = dt.clamp(0.0, self.params.max_step_secs);

        self.velocity += self.params.gravity * dt;
        self.offset += self.velocity * dt;

        // Floor at the rest position
        if self.offset > 0.0 {
            self.offset = 0.0;
            self.velocity = -self.velocity * self.params.restitution;
            self.floor_hits += 1;
        }

        if self.velocity.abs() < self.params.stop_velocity
            && self.offset.abs() < self.params.stop_offset
        {
            self.settle();
            tracing::debug!(floor_hits = self.floor_hits, "Yarn ball settled");
            return BounceStep::Settled;
        }
        BounceStep::Moving
    }

    /// Drop any bounce in progress and return to rest.
    pub fn cancel(&mut self) {
        self.settle();
    }

    fn settle(&mut self) {
        self.phase = BouncePhase::Idle;
        self.velocity = 0.0;
        self.offset = 0.0;
    }
}
