//! # Plume
//!
//! A particle simulation engine with composable forces, geometric
//! constraints, and explicit numerical integrators.
//!
//! Plume is the simulation core behind effects like snowfall, flocking
//! boids, fire fountains, and spring-mesh cloth. It owns a flat,
//! fixed-layout float buffer per system and advances it one frame at a
//! time; rendering, windowing, and UI stay outside - the engine hands the
//! presentation layer a ready-to-upload byte slice each step.
//!
//! ## Quick Start
//!
//! ```ignore
//! use plume::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let count = 1_000;
//!     let everyone: Vec<usize> = (0..count).collect();
//!
//!     let mut system = ParticleSystem::new(count);
//!     system.spawn(|ctx| ParticleInit {
//!         position: ctx.random_in_sphere(1.0),
//!         ..ParticleInit::default()
//!     });
//!     system.add_force(Force::gravity(everyone.clone(), 1.0)?)?;
//!     system.add_constraint(Constraint::bounce(everyone, Aabb::cube(2.0)?)?)?;
//!
//!     let cfg = SimConfig::default();
//!     loop {
//!         system.step(&cfg);
//!         // upload system.as_bytes() and draw
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### State
//!
//! Each particle is a fixed 16-float record (position, velocity, force
//! accumulator, color, mass, radius, age) inside one contiguous buffer -
//! see [`layout`]. The [`StateBuffer`] owns the floats; the
//! [`ParticleSystem`] owns the buffers.
//!
//! ### Forces
//!
//! [`Force`]s accumulate into particles' force slots each step and compose
//! by superposition. Each force targets an explicit set of particle
//! indices, can be toggled, and may carry a countdown lifetime.
//!
//! ### Constraints
//!
//! [`Constraint`]s run after integration and repair the new state against a
//! geometric invariant: stay inside a box, outside a box or sphere, wrap
//! around a domain, or sit pinned at a point.
//!
//! ### Integrators
//!
//! [`Scheme`] selects how state advances: explicit Euler, midpoint,
//! error-corrected midpoint, or two-step Adams-Bashforth.
//!
//! ## Feature Overview
//!
//! | Category | Types |
//! |----------|-------|
//! | Forces | [`Force::gravity`], [`Force::drag`], [`Force::wind`], [`Force::spring`], [`Force::flock`], [`Force::attract`], [`Force::vortex`], [`Force::pull`] |
//! | Constraints | [`Constraint::bounce`], [`Constraint::reverse`], [`Constraint::sphere`], [`Constraint::wrap`], [`Constraint::solid`], [`Constraint::pin`] |
//! | Integrators | [`Scheme::Euler`], [`Scheme::Midpoint`], [`Scheme::MidpointCorrected`], [`Scheme::AdamsBashforth`] |
//! | Bookkeeping | [`Lifecycle::Snowfall`], [`Lifecycle::Fountain`] |
//! | Presets | [`scenes::snow`], [`scenes::boids`], [`scenes::fountain`], [`scenes::cloth`] |

pub mod config;
pub mod constraints;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod layout;
pub mod lifecycle;
pub mod scenes;
pub mod spawn;
pub mod state;
pub mod system;
pub mod time;

pub use bytemuck;
pub use config::SimConfig;
pub use constraints::{Aabb, Constraint, ConstraintKind, Walls};
pub use error::{ConstraintError, ForceError, SceneError};
pub use forces::{FlockParams, Force, ForceKind};
pub use glam::{Vec3, Vec4};
pub use integrator::{derivative, Integrator, Scheme};
pub use layout::{Field, RECORD_SIZE};
pub use lifecycle::Lifecycle;
pub use spawn::{ParticleInit, SpawnContext};
pub use state::StateBuffer;
pub use system::ParticleSystem;
pub use time::Time;

/// Convenience re-exports for scene code.
pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::constraints::{Aabb, Constraint, Walls};
    pub use crate::error::SceneError;
    pub use crate::forces::{FlockParams, Force};
    pub use crate::integrator::Scheme;
    pub use crate::lifecycle::Lifecycle;
    pub use crate::spawn::ParticleInit;
    pub use crate::system::ParticleSystem;
    pub use crate::time::Time;
    pub use glam::{Vec3, Vec4};
}
