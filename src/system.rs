//! The simulation driver.
//!
//! A [`ParticleSystem`] owns the state buffers of one simulated system and
//! runs the per-step state machine:
//!
//! 1. zero force accumulators,
//! 2. apply enabled forces (pruning expired ones),
//! 3. compute the state derivative,
//! 4. advance via the configured integrator,
//! 5. lifecycle bookkeeping,
//! 6. constraints against the (previous, next) buffer pair,
//! 7. publish the next buffer,
//! 8. swap.
//!
//! The order is fixed; nothing is skipped or reordered. Several systems
//! (snow + boids + fire + cloth) run sequentially within one frame, each its
//! own driver instance, sharing nothing but the read-only [`SimConfig`].
//!
//! # Example
//!
//! ```ignore
//! let mut system = ParticleSystem::with_seed(500, 42);
//! system.spawn(|ctx| ParticleInit {
//!     position: ctx.random_in_sphere(1.0),
//!     ..ParticleInit::default()
//! });
//! let all: Vec<usize> = (0..500).collect();
//! system.add_force(Force::gravity(all.clone(), 1.0)?)?;
//! system.add_constraint(Constraint::bounce(all, Aabb::cube(2.0)?)?)?;
//!
//! let cfg = SimConfig::default();
//! loop {
//!     system.step(&cfg);
//!     upload(system.as_bytes());
//! }
//! ```

use crate::config::SimConfig;
use crate::constraints::Constraint;
use crate::error::SceneError;
use crate::forces::Force;
use crate::integrator::{derivative, Integrator};
use crate::lifecycle::Lifecycle;
use crate::spawn::{ParticleInit, SpawnContext};
use crate::state::StateBuffer;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// One simulated particle system: state buffers, force and constraint
/// registrations, integrator, and lifecycle bookkeeping.
pub struct ParticleSystem {
    count: usize,
    /// Current published state (s1).
    curr: StateBuffer,
    /// Next state under construction (s2); swapped in at the end of a step.
    next: StateBuffer,
    forces: Vec<Force>,
    constraints: Vec<Constraint>,
    integrator: Integrator,
    lifecycle: Lifecycle,
    rng: SmallRng,
    seed: u64,
    steps: u64,
}

impl ParticleSystem {
    /// Create a system of `count` zero-initialized particles.
    pub fn new(count: usize) -> Self {
        Self::with_seed(count, rand::random())
    }

    /// Create a system with a fixed RNG seed; two systems built with the
    /// same seed, spawns, and registrations evolve identically.
    pub fn with_seed(count: usize, seed: u64) -> Self {
        Self {
            count,
            curr: StateBuffer::new(count),
            next: StateBuffer::new(count),
            forces: Vec::new(),
            constraints: Vec::new(),
            integrator: Integrator::new(),
            lifecycle: Lifecycle::None,
            rng: SmallRng::seed_from_u64(seed),
            seed,
            steps: 0,
        }
    }

    /// Number of particles.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Steps taken since construction.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    // ========== Ingest: initial state ==========

    /// Initialize every particle record through a spawner closure.
    pub fn spawn<F>(&mut self, mut spawner: F)
    where
        F: FnMut(&mut SpawnContext) -> ParticleInit,
    {
        for i in 0..self.count {
            let mut ctx = SpawnContext::new(i, self.count, self.seed);
            let init = spawner(&mut ctx);
            self.curr.set_position(i, init.position);
            self.curr.set_velocity(i, init.velocity);
            self.curr.set_color(i, init.color);
            self.curr.set_mass(i, init.mass);
            self.curr.set_radius(i, init.radius);
            self.curr.set_age(i, init.age);
        }
    }

    // ========== Ingest: forces ==========

    /// Register a force; returns its index for later lookup. Rejects
    /// targets outside this system.
    pub fn add_force(&mut self, force: Force) -> Result<usize, SceneError> {
        self.check_targets(force.targets())?;
        self.forces.push(force);
        Ok(self.forces.len() - 1)
    }

    /// Replace the whole force set.
    pub fn set_forces(&mut self, forces: Vec<Force>) -> Result<(), SceneError> {
        for f in &forces {
            self.check_targets(f.targets())?;
        }
        self.forces = forces;
        Ok(())
    }

    /// Registered forces, in application order.
    pub fn forces(&self) -> &[Force] {
        &self.forces
    }

    /// Mutable access to one force, e.g. to toggle it.
    pub fn force_mut(&mut self, index: usize) -> Option<&mut Force> {
        self.forces.get_mut(index)
    }

    /// Remove a force by index. Later indices shift down, as in `Vec`.
    pub fn remove_force(&mut self, index: usize) -> Option<Force> {
        (index < self.forces.len()).then(|| self.forces.remove(index))
    }

    // ========== Ingest: constraints ==========

    /// Register a constraint; returns its index. Rejects targets outside
    /// this system.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<usize, SceneError> {
        self.check_targets(constraint.targets())?;
        self.constraints.push(constraint);
        Ok(self.constraints.len() - 1)
    }

    /// Replace the whole constraint set.
    pub fn set_constraints(&mut self, constraints: Vec<Constraint>) -> Result<(), SceneError> {
        for c in &constraints {
            self.check_targets(c.targets())?;
        }
        self.constraints = constraints;
        Ok(())
    }

    /// Registered constraints, in evaluation order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Mutable access to one constraint, e.g. to release a cloth pin or
    /// apply a live bounds edit.
    pub fn constraint_mut(&mut self, index: usize) -> Option<&mut Constraint> {
        self.constraints.get_mut(index)
    }

    /// Remove a constraint by index.
    pub fn remove_constraint(&mut self, index: usize) -> Option<Constraint> {
        (index < self.constraints.len()).then(|| self.constraints.remove(index))
    }

    /// Select lifecycle bookkeeping.
    pub fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        self.lifecycle = lifecycle;
    }

    fn check_targets(&self, targets: &[usize]) -> Result<(), SceneError> {
        match targets.iter().find(|&&i| i >= self.count) {
            Some(&index) => Err(SceneError::TargetOutOfRange {
                index,
                count: self.count,
            }),
            None => Ok(()),
        }
    }

    // ========== The step ==========

    /// Advance the system by one timestep.
    pub fn step(&mut self, cfg: &SimConfig) {
        // 1. A fresh accumulator for this step's forces.
        self.curr.zero_forces();

        // 2. Superpose all live forces, then drop the ones that just ran
        //    out.
        for force in &mut self.forces {
            if force.enabled() && !force.expired() {
                force.apply(&mut self.curr, cfg, &mut self.rng);
                force.tick_lifetime();
            }
        }
        self.forces.retain(|f| !f.expired());

        // 3-4. Derivative, then integrate the whole buffer forward.
        let dot = derivative(&self.curr);
        self.next = self
            .integrator
            .advance(&self.curr, &dot, cfg.dt, cfg.scheme);

        // 5. Bookkeeping sees the integrated state, constraints see the
        //    bookkept state.
        self.lifecycle.tick(&mut self.next, &mut self.rng);

        // 6. Repair in registration order against the pre-step buffer.
        for constraint in &self.constraints {
            if constraint.enabled() {
                constraint.constrain(&self.curr, &mut self.next, cfg);
            }
        }

        // 7-8. Publish and swap.
        std::mem::swap(&mut self.curr, &mut self.next);
        self.steps += 1;
    }

    // ========== Egress ==========

    /// The published state buffer.
    #[inline]
    pub fn state(&self) -> &StateBuffer {
        &self.curr
    }

    /// The published buffer as a flat float slice, in the layout of
    /// [`crate::layout`].
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        self.curr.as_slice()
    }

    /// The published buffer as raw bytes for GPU upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.curr.as_bytes()
    }
}
