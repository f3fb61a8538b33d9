//! Age-based bookkeeping.
//!
//! Some simulated systems recycle their particles: snow melts at the ground
//! and falls again from the sky, a fire fountain's sparks cool and are
//! re-emitted. A [`Lifecycle`] encodes that per-particle bookkeeping. The
//! driver applies it at one fixed point in the step - after integration,
//! before constraints - so constraints always see the fully bookkept state.
//!
//! Ages count simulation steps, not seconds.
//!
//! # Example
//!
//! ```ignore
//! system.set_lifecycle(Lifecycle::Snowfall {
//!     region: Aabb::new(Vec3::new(-2.0, -2.0, 1.8), Vec3::new(2.0, 2.0, 2.0))?,
//!     lifespan: 120.0..300.0,
//! });
//! ```

use crate::constraints::Aabb;
use crate::spawn::unit_vector;
use crate::state::StateBuffer;
use glam::{Vec3, Vec4};
use rand::rngs::SmallRng;
use rand::Rng;
use std::ops::Range;

/// Alpha floor for fountain particles far from the source.
pub const ALPHA_MIN: f32 = 0.05;
/// Alpha ceiling for fountain particles at the source surface.
pub const ALPHA_MAX: f32 = 1.0;

/// Per-step, per-particle bookkeeping applied between integration and
/// constraints.
#[derive(Clone, Debug, PartialEq)]
pub enum Lifecycle {
    /// No bookkeeping; ages are left alone.
    None,

    /// Snow-style recycling: ages tick down, and an expired particle
    /// respawns somewhere in the source region with a fresh lifespan and a
    /// slight sideways drift.
    Snowfall {
        /// Where expired particles reappear.
        region: Aabb,
        /// New age drawn uniformly from this range, in steps.
        lifespan: Range<f32>,
    },

    /// Fountain-style recycling on a sphere: ages tick down, colors cool
    /// geometrically, alpha fades with distance from the source surface,
    /// and an expired particle is re-emitted outward from the surface.
    Fountain {
        /// Center of the source sphere.
        center: Vec3,
        /// Radius of the source sphere.
        radius: f32,
        /// Per-step multiplier on RGB; below 1.0 cools toward black.
        cooling: f32,
        /// New age drawn uniformly from this range, in steps.
        lifespan: Range<f32>,
        /// Outward emission speed scale.
        speed: f32,
        /// Color restored on re-emission.
        hot_color: Vec4,
    },
}

impl Lifecycle {
    /// Apply one step of bookkeeping to every particle in `s`.
    pub fn tick(&self, s: &mut StateBuffer, rng: &mut SmallRng) {
        match self {
            Lifecycle::None => {}

            Lifecycle::Snowfall { region, lifespan } => {
                for i in 0..s.count() {
                    let age = s.age(i) - 1.0;
                    if age > 0.0 {
                        s.set_age(i, age);
                        continue;
                    }
                    let pos = Vec3::new(
                        rng.gen_range(region.min.x..region.max.x),
                        rng.gen_range(region.min.y..region.max.y),
                        rng.gen_range(region.min.z..region.max.z),
                    );
                    let drift = Vec3::new(
                        rng.gen_range(-0.05..0.05),
                        rng.gen_range(-0.05..0.05),
                        0.0,
                    );
                    s.set_position(i, pos);
                    s.set_velocity(i, drift);
                    s.set_age(i, rng.gen_range(lifespan.clone()));
                }
            }

            Lifecycle::Fountain {
                center,
                radius,
                cooling,
                lifespan,
                speed,
                hot_color,
            } => {
                for i in 0..s.count() {
                    let age = s.age(i) - 1.0;
                    if age > 0.0 {
                        s.set_age(i, age);
                        let c = s.color(i);
                        let surface_dist =
                            ((s.position(i) - *center).length() - radius).max(0.0);
                        let alpha = (1.0 - surface_dist / radius).clamp(ALPHA_MIN, ALPHA_MAX);
                        s.set_color(
                            i,
                            Vec4::new(c.x * cooling, c.y * cooling, c.z * cooling, alpha),
                        );
                        continue;
                    }
                    let dir = unit_vector(rng);
                    s.set_position(i, *center + dir * *radius);
                    s.set_velocity(i, dir * (speed * rng.gen_range(0.5..1.0)));
                    s.set_color(i, *hot_color);
                    s.set_age(i, rng.gen_range(lifespan.clone()));
                }
            }
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Lifecycle::None
    }
}
