//! Spawn context for particle initialization.
//!
//! A [`SpawnContext`] is handed to the spawner closure once per particle and
//! bundles the particle's index with random-placement helpers, so scene code
//! does not set up its own RNG:
//!
//! ```ignore
//! system.spawn(|ctx| ParticleInit {
//!     position: ctx.random_in_box(&region),
//!     velocity: ctx.random_unit_vector() * 0.1,
//!     ..ParticleInit::default()
//! });
//! ```

use crate::constraints::Aabb;
use glam::{Vec3, Vec4};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Initial values for one particle record.
///
/// `Default` gives a unit-mass, white, stationary particle at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleInit {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Vec4,
    pub mass: f32,
    pub radius: f32,
    pub age: f32,
}

impl Default for ParticleInit {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            color: Vec4::ONE,
            mass: 1.0,
            radius: 0.02,
            age: 0.0,
        }
    }
}

/// Context provided to spawner functions, one per particle.
pub struct SpawnContext {
    /// Index of the particle being spawned (0 to count-1).
    pub index: usize,
    /// Total number of particles being spawned.
    pub count: usize,
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a spawn context. Each particle gets its own RNG stream derived
    /// from the system seed, so spawning particle `i` is independent of how
    /// many came before it.
    pub(crate) fn new(index: usize, count: usize, seed: u64) -> Self {
        Self {
            index,
            count,
            rng: SmallRng::seed_from_u64(seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        }
    }

    /// Normalized progress through the spawn (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.count.max(1) as f32
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    // ========== Random positions ==========

    /// Uniform random point inside a sphere at the origin.
    pub fn random_in_sphere(&mut self, radius: f32) -> Vec3 {
        // Cube-root radial distribution keeps the density uniform.
        let r = radius * self.rng.gen::<f32>().cbrt();
        unit_vector(&mut self.rng) * r
    }

    /// Uniform random point on the surface of a sphere at the origin.
    pub fn random_on_sphere(&mut self, radius: f32) -> Vec3 {
        unit_vector(&mut self.rng) * radius
    }

    /// Uniform random point inside an axis-aligned box.
    pub fn random_in_box(&mut self, bounds: &Aabb) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(bounds.min.x..bounds.max.x),
            self.rng.gen_range(bounds.min.y..bounds.max.y),
            self.rng.gen_range(bounds.min.z..bounds.max.z),
        )
    }

    /// Random direction of unit length.
    pub fn random_unit_vector(&mut self) -> Vec3 {
        unit_vector(&mut self.rng)
    }

    /// Position on a grid filling `bounds`, by spawn index. Lays particles
    /// out row-major: x fastest, then y, then z.
    pub fn grid_position(&self, bounds: &Aabb, nx: usize, ny: usize, nz: usize) -> Vec3 {
        let i = self.index;
        let (ix, iy, iz) = (i % nx, (i / nx) % ny, (i / (nx * ny)) % nz.max(1));
        let t = |k: usize, n: usize| {
            if n <= 1 {
                0.5
            } else {
                k as f32 / (n - 1) as f32
            }
        };
        bounds.min + bounds.size() * Vec3::new(t(ix, nx), t(iy, ny), t(iz, nz))
    }
}

/// Uniformly distributed unit vector.
pub(crate) fn unit_vector(rng: &mut SmallRng) -> Vec3 {
    let z = rng.gen_range(-1.0_f32..1.0);
    let theta = rng.gen_range(0.0..TAU);
    let r = (1.0 - z * z).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}
