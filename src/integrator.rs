//! Numerical integration schemes.
//!
//! Given the current state, its derivative, and a timestep, an
//! [`Integrator`] produces the next state. Every scheme operates uniformly
//! over the whole flat buffer - the per-field semantics live entirely in
//! [`derivative`], which advances only the kinematic fields.
//!
//! Multi-stage schemes keep their intermediate samples as named, separately
//! owned snapshots (`s_mid`, `s_back`, `err`) rather than one shared scratch
//! array, so no stage can observe another stage's writes.

use crate::state::StateBuffer;

/// Masses at or below this contribute zero acceleration instead of dividing
/// by zero.
pub const MASS_EPSILON: f32 = 1e-9;

/// Available integration schemes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scheme {
    /// Explicit Euler: `s2 = s1 + s1dot * dt`.
    Euler,
    /// Explicit midpoint: derivative re-evaluated at the half step.
    #[default]
    Midpoint,
    /// Midpoint with a reversed-step truncation-error estimate folded back
    /// into the result.
    MidpointCorrected,
    /// Two-step Adams-Bashforth, using the retained previous derivative.
    /// The first step (and the first step after a scheme switch) falls back
    /// to midpoint while the history refills.
    AdamsBashforth,
}

/// Compute the state derivative (the "dot" buffer).
///
/// Per particle: position-dot = velocity, velocity-dot = force / mass.
/// Every other field - color, mass, radius, age, the force accumulator
/// itself - has zero derivative; those fields are only ever mutated by
/// constraints and driver bookkeeping.
pub fn derivative(s: &StateBuffer) -> StateBuffer {
    let mut dot = StateBuffer::new(s.count());
    for i in 0..s.count() {
        dot.set_position(i, s.velocity(i));
        let m = s.mass(i);
        if m > MASS_EPSILON {
            dot.set_velocity(i, s.force(i) / m);
        }
    }
    dot
}

/// Scheme dispatcher with the retained state multi-step methods need.
#[derive(Clone, Debug, Default)]
pub struct Integrator {
    /// Previous step's derivative, kept only while Adams-Bashforth runs.
    prev_dot: Option<StateBuffer>,
}

impl Integrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `s1` by `dt` using `scheme`, returning the next state.
    pub fn advance(
        &mut self,
        s1: &StateBuffer,
        s1dot: &StateBuffer,
        dt: f32,
        scheme: Scheme,
    ) -> StateBuffer {
        match scheme {
            Scheme::Euler => {
                self.prev_dot = None;
                s1.step_scaled(s1dot, dt)
            }
            Scheme::Midpoint => {
                self.prev_dot = None;
                midpoint(s1, s1dot, dt)
            }
            Scheme::MidpointCorrected => {
                self.prev_dot = None;
                let mut s2 = midpoint(s1, s1dot, dt);
                // Run the same scheme backward from the candidate; the
                // failure to land exactly on s1 estimates the local
                // truncation error.
                let s2dot = derivative(&s2);
                let s_back = s2.step_scaled(&s2dot, -dt * 0.5);
                let back_dot = derivative(&s_back);
                let s3 = s2.step_scaled(&back_dot, -dt);
                let err = s3.diff(s1);
                s2.add_scaled(&err, -0.5);
                s2
            }
            Scheme::AdamsBashforth => {
                let s2 = match self.prev_dot.take() {
                    Some(s0dot) => {
                        let mut s2 = s1.step_scaled(s1dot, 1.5 * dt);
                        s2.add_scaled(&s0dot, -0.5 * dt);
                        s2
                    }
                    // No history yet: bootstrap with a midpoint step.
                    None => midpoint(s1, s1dot, dt),
                };
                self.prev_dot = Some(s1dot.clone());
                s2
            }
        }
    }
}

fn midpoint(s1: &StateBuffer, s1dot: &StateBuffer, dt: f32) -> StateBuffer {
    let s_mid = s1.step_scaled(s1dot, dt * 0.5);
    let mid_dot = derivative(&s_mid);
    s1.step_scaled(&mid_dot, dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn falling_particle() -> StateBuffer {
        let mut s = StateBuffer::new(1);
        s.set_mass(0, 2.0);
        s.set_position(0, Vec3::new(0.0, 0.0, 1.0));
        s.set_velocity(0, Vec3::new(1.0, 0.0, 0.0));
        s.set_force(0, Vec3::new(0.0, 0.0, -4.0));
        s
    }

    #[test]
    fn test_derivative_fields() {
        let s = falling_particle();
        let dot = derivative(&s);
        assert_eq!(dot.position(0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(dot.velocity(0), Vec3::new(0.0, 0.0, -2.0));
        // Non-kinematic fields never advance.
        assert_eq!(dot.mass(0), 0.0);
        assert_eq!(dot.age(0), 0.0);
        assert_eq!(dot.force(0), Vec3::ZERO);
    }

    #[test]
    fn test_derivative_zero_mass_guard() {
        let mut s = StateBuffer::new(1);
        s.set_force(0, Vec3::new(5.0, 0.0, 0.0));
        let dot = derivative(&s);
        assert_eq!(dot.velocity(0), Vec3::ZERO);
    }

    #[test]
    fn test_euler_zero_derivative_is_identity() {
        let s = falling_particle();
        let dot = StateBuffer::new(1);
        let s2 = Integrator::new().advance(&s, &dot, 1.0 / 60.0, Scheme::Euler);
        assert_eq!(s2, s);
    }

    #[test]
    fn test_euler_advances_kinematics_only() {
        let s = falling_particle();
        let dot = derivative(&s);
        let s2 = Integrator::new().advance(&s, &dot, 0.5, Scheme::Euler);
        assert_eq!(s2.position(0), Vec3::new(0.5, 0.0, 1.0));
        assert_eq!(s2.velocity(0), Vec3::new(1.0, 0.0, -1.0));
        assert_eq!(s2.mass(0), 2.0);
        assert_eq!(s2.force(0), Vec3::new(0.0, 0.0, -4.0));
    }

    #[test]
    fn test_midpoint_matches_euler_without_curvature() {
        // Constant velocity, no force: the re-evaluated midpoint derivative
        // equals the initial one, so midpoint reduces to Euler.
        let mut s = StateBuffer::new(1);
        s.set_mass(0, 1.0);
        s.set_velocity(0, Vec3::new(0.3, -0.1, 0.2));
        let dot = derivative(&s);
        let mut integ = Integrator::new();
        let euler = integ.advance(&s, &dot, 0.1, Scheme::Euler);
        let mid = integ.advance(&s, &dot, 0.1, Scheme::Midpoint);
        assert_eq!(euler, mid);
    }

    #[test]
    fn test_midpoint_sees_half_step_velocity() {
        // Under constant force, midpoint advances position with the
        // half-step velocity: z = z0 + (v0 + a*dt/2)*dt.
        let s = falling_particle();
        let dot = derivative(&s);
        let dt = 0.1;
        let s2 = Integrator::new().advance(&s, &dot, dt, Scheme::Midpoint);
        let expected_z = 1.0 + (0.0 + -2.0 * dt * 0.5) * dt;
        assert!((s2.position(0).z - expected_z).abs() < 1e-6);
    }

    #[test]
    fn test_corrected_midpoint_matches_midpoint_on_linear_motion() {
        // With a constant derivative the backward replay lands exactly on
        // s1, so the correction is zero.
        let mut s = StateBuffer::new(1);
        s.set_mass(0, 1.0);
        s.set_velocity(0, Vec3::new(0.5, 0.0, 0.0));
        let dot = derivative(&s);
        let mut integ = Integrator::new();
        let plain = integ.advance(&s, &dot, 0.1, Scheme::Midpoint);
        let corrected = integ.advance(&s, &dot, 0.1, Scheme::MidpointCorrected);
        assert!((plain.position(0).x - corrected.position(0).x).abs() < 1e-6);
    }

    #[test]
    fn test_adams_bashforth_bootstrap_then_history() {
        let mut s = StateBuffer::new(1);
        s.set_mass(0, 1.0);
        s.set_velocity(0, Vec3::new(1.0, 0.0, 0.0));
        let dot = derivative(&s);
        let mut integ = Integrator::new();

        // First call has no history: bootstraps via midpoint.
        let first = integ.advance(&s, &dot, 0.1, Scheme::AdamsBashforth);
        assert!((first.position(0).x - 0.1).abs() < 1e-6);

        // Second call blends 1.5 * current - 0.5 * previous; with a
        // constant derivative that is an exact Euler step.
        let dot2 = derivative(&first);
        let second = integ.advance(&first, &dot2, 0.1, Scheme::AdamsBashforth);
        assert!((second.position(0).x - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_scheme_switch_clears_history() {
        let mut s = StateBuffer::new(1);
        s.set_mass(0, 1.0);
        s.set_velocity(0, Vec3::X);
        let dot = derivative(&s);
        let mut integ = Integrator::new();
        integ.advance(&s, &dot, 0.1, Scheme::AdamsBashforth);
        assert!(integ.prev_dot.is_some());
        integ.advance(&s, &dot, 0.1, Scheme::Euler);
        assert!(integ.prev_dot.is_none());
    }
}
