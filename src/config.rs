//! Simulation tuning configuration.
//!
//! A [`SimConfig`] carries the externally-adjustable tuning values - timestep,
//! gravity, bounce drag, restitution scale, and integrator scheme - and is
//! passed explicitly into every `step` call. The core never reads ambient
//! global state, so a system can be driven (and tested) with nothing but a
//! config in hand.
//!
//! # Example
//!
//! ```ignore
//! let cfg = SimConfig::default()
//!     .with_dt(1.0 / 120.0)
//!     .with_scheme(Scheme::AdamsBashforth);
//! system.step(&cfg);
//! ```

use crate::integrator::Scheme;

/// Shared tuning values read (never mutated) by forces, constraints, and the
/// integrator during a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    /// Timestep per simulation step, in seconds.
    pub dt: f32,
    /// Gravitational acceleration, applied along -z by gravity forces.
    pub gravity: f32,
    /// Fraction of incoming speed a bouncing particle keeps before
    /// restitution is applied.
    pub drag: f32,
    /// Global restitution scale; multiplies each constraint's own
    /// restitution.
    pub restitution: f32,
    /// Integration scheme used to advance the state.
    pub scheme: Scheme,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            gravity: 9.832,
            drag: 0.985,
            restitution: 1.0,
            scheme: Scheme::Midpoint,
        }
    }
}

impl SimConfig {
    /// Set the timestep.
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// Set the gravitational acceleration.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the bounce drag factor.
    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    /// Set the global restitution scale.
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set the integration scheme.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = SimConfig::default();
        assert!((cfg.dt - 1.0 / 60.0).abs() < 1e-9);
        assert_eq!(cfg.scheme, Scheme::Midpoint);
    }

    #[test]
    fn test_builder_chain() {
        let cfg = SimConfig::default()
            .with_dt(0.01)
            .with_gravity(1.6)
            .with_scheme(Scheme::Euler);
        assert_eq!(cfg.dt, 0.01);
        assert_eq!(cfg.gravity, 1.6);
        assert_eq!(cfg.scheme, Scheme::Euler);
    }
}
