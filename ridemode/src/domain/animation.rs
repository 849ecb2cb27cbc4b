//! Presentation spring for the toggle thumb.
//!
//! Maps the discrete toggle state onto a continuously animated drive value
//! and eases between the two rest points with a damped spring. The renderer
//! owns stepping; nothing here performs I/O or touches the reconciler.

use std::time::Duration;

/// Drive value at rest when the toggle is on (role `user`). The on state
/// parks the thumb at the track origin, so its rest drive is zero.
pub const DRIVE_ON: f64 = 0.0;
/// Drive value at rest when the toggle is off (role `rider`).
pub const DRIVE_OFF: f64 = 1.0;

/// Rest drive value for a toggle state.
pub fn drive_for(on: bool) -> f64 {
    if on { DRIVE_ON } else { DRIVE_OFF }
}

/// Spring coefficients. The defaults give a lightly damped UI spring with a
/// visible but brief overshoot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub mass: f64,
    pub stiffness: f64,
    pub damping: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 100.0,
            damping: 10.0,
        }
    }
}

/// Displacement and velocity below which the spring snaps to its target.
const REST_DISPLACEMENT: f64 = 0.001;
const REST_VELOCITY: f64 = 0.001;
/// Integration substep ceiling; a stalled frame is subdivided rather than
/// fed to the solver in one unstable step.
const MAX_STEP_SECONDS: f64 = 1.0 / 30.0;

/// Damped spring easing the drive value between its two rest points.
///
/// Retargeting mid-flight keeps the current position and velocity, so rapid
/// state changes bend the motion instead of restarting it.
#[derive(Debug, Clone)]
pub struct ToggleSpring {
    config: SpringConfig,
    target_on: bool,
    position: f64,
    velocity: f64,
}

impl ToggleSpring {
    /// Spring at rest on the drive value matching `initial_on`.
    pub fn new(initial_on: bool) -> Self {
        Self::with_config(initial_on, SpringConfig::default())
    }

    /// Spring at rest with explicit coefficients. Non-positive mass or
    /// stiffness values are clamped to a small positive floor; negative
    /// damping is clamped to zero.
    pub fn with_config(initial_on: bool, config: SpringConfig) -> Self {
        let config = SpringConfig {
            mass: config.mass.max(0.001),
            stiffness: config.stiffness.max(0.001),
            damping: config.damping.max(0.0),
        };
        Self {
            config,
            target_on: initial_on,
            position: drive_for(initial_on),
            velocity: 0.0,
        }
    }

    /// Ease towards the drive value for `on`.
    pub fn set_target(&mut self, on: bool) {
        self.target_on = on;
    }

    /// The state the spring is easing towards.
    pub fn target_on(&self) -> bool {
        self.target_on
    }

    /// The drive value the spring is easing towards.
    pub fn target_drive(&self) -> f64 {
        drive_for(self.target_on)
    }

    /// Current drive value.
    pub fn value(&self) -> f64 {
        self.position
    }

    /// Whether the spring is at rest on its target.
    pub fn is_settled(&self) -> bool {
        (self.position - self.target_drive()).abs() < REST_DISPLACEMENT
            && self.velocity.abs() < REST_VELOCITY
    }

    /// Advance the spring by `dt` and return the new drive value.
    ///
    /// Semi-implicit Euler over at most [`MAX_STEP_SECONDS`] substeps; once
    /// within the rest thresholds the spring snaps onto the target and
    /// zeroes its velocity.
    pub fn step(&mut self, dt: Duration) -> f64 {
        let target = self.target_drive();
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECONDS);
            remaining -= step;
            let displacement = self.position - target;
            let acceleration = (-self.config.stiffness * displacement
                - self.config.damping * self.velocity)
                / self.config.mass;
            self.velocity += acceleration * step;
            self.position += self.velocity * step;
        }
        if self.is_settled() {
            self.position = target;
            self.velocity = 0.0;
        }
        self.position
    }
}
