//! Preset scenes.
//!
//! Common particle-system setups available as one-liners, each wiring a
//! particle count, initial spawn, forces, constraints, and lifecycle into a
//! ready-to-step [`ParticleSystem`]:
//!
//! ```ignore
//! let mut snow = scenes::snow(800)?;
//! let mut flock = scenes::boids(120)?;
//! let cfg = SimConfig::default();
//! snow.step(&cfg);
//! flock.step(&cfg);
//! ```
//!
//! The presets are also the reference wiring for building custom scenes by
//! hand.

use crate::constraints::{Aabb, Constraint, Walls};
use crate::error::SceneError;
use crate::forces::{FlockParams, Force};
use crate::lifecycle::Lifecycle;
use crate::spawn::ParticleInit;
use crate::system::ParticleSystem;
use glam::{Vec3, Vec4};

fn everyone(count: usize) -> Vec<usize> {
    (0..count).collect()
}

/// Snowfall: slow mass-scaled gravity, gusty wind, linear drag, sideways
/// wrap, a hard floor, and age-based respawn from a spawn slab near the top
/// of the domain.
pub fn snow(count: usize) -> Result<ParticleSystem, SceneError> {
    let domain = Aabb::new(Vec3::new(-2.0, -2.0, -2.0), Vec3::new(2.0, 2.0, 2.0))?;
    let cloud = Aabb::new(Vec3::new(-2.0, -2.0, 1.7), Vec3::new(2.0, 2.0, 2.0))?;

    let mut sys = ParticleSystem::new(count);
    sys.spawn(|ctx| ParticleInit {
        position: ctx.random_in_box(&domain),
        velocity: Vec3::new(0.0, 0.0, -ctx.random_range(0.1, 0.4)),
        color: Vec4::new(0.9, 0.95, 1.0, 1.0),
        mass: ctx.random_range(0.8, 1.2),
        age: ctx.random_range(100.0, 400.0),
        ..ParticleInit::default()
    });

    sys.add_force(Force::gravity(everyone(count), 0.08)?)?;
    sys.add_force(Force::drag(everyone(count), 0.4)?)?;
    sys.add_force(Force::wind(
        everyone(count),
        Vec3::new(0.3, 0.1, 0.0),
        0.2,
    )?)?;

    // Sides wrap; the floor kills downward motion without a bounce.
    let sides = Walls {
        bottom: false,
        top: false,
        ..Walls::ALL
    };
    sys.add_constraint(Constraint::wrap(everyone(count), domain)?.with_walls(sides))?;
    sys.add_constraint(
        Constraint::reverse(everyone(count), domain)?
            .with_walls(Walls::FLOOR)
            .with_restitution(0.0),
    )?;

    sys.set_lifecycle(Lifecycle::Snowfall {
        region: cloud,
        lifespan: 200.0..500.0,
    });
    Ok(sys)
}

/// A boid flock steering inside a wrap-around domain.
pub fn boids(count: usize) -> Result<ParticleSystem, SceneError> {
    let domain = Aabb::cube(1.5)?;

    let mut sys = ParticleSystem::new(count);
    sys.spawn(|ctx| ParticleInit {
        position: ctx.random_in_sphere(1.0),
        velocity: ctx.random_unit_vector() * ctx.random_range(0.2, 0.6),
        color: Vec4::new(0.4, 0.7, 1.0, 1.0),
        ..ParticleInit::default()
    });

    sys.add_force(Force::flock(
        everyone(count),
        FlockParams {
            inner_radius: 0.2,
            outer_radius: 0.8,
            separation_weight: 0.6,
            alignment_weight: 1.0,
            cohesion_weight: 0.8,
            ..FlockParams::default()
        },
    )?)?;
    sys.add_force(Force::drag(everyone(count), 0.05)?)?;
    sys.add_constraint(Constraint::wrap(everyone(count), domain)?)?;
    Ok(sys)
}

/// A fire fountain: sparks re-emitted from a source sphere, cooled and
/// faded by the fountain lifecycle, swirled by a vortex, kept out of the
/// source, and caught by a floor.
pub fn fountain(count: usize) -> Result<ParticleSystem, SceneError> {
    let source = Vec3::new(0.0, 0.0, -1.0);
    let radius = 0.3;
    let hot = Vec4::new(1.0, 0.85, 0.3, 1.0);
    let domain = Aabb::new(Vec3::new(-2.0, -2.0, -1.5), Vec3::new(2.0, 2.0, 3.0))?;

    let mut sys = ParticleSystem::new(count);
    sys.spawn(move |ctx| {
        let dir = ctx.random_unit_vector();
        ParticleInit {
            position: source + dir * radius,
            velocity: dir * ctx.random_range(0.5, 1.5) + Vec3::new(0.0, 0.0, 1.0),
            color: hot,
            mass: ctx.random_range(0.5, 1.0),
            age: ctx.random_range(30.0, 180.0),
            ..ParticleInit::default()
        }
    });

    sys.add_force(Force::gravity(everyone(count), 0.25)?)?;
    sys.add_force(Force::vortex(
        everyone(count),
        source,
        Vec3::Z,
        3.0,
        0.5,
        0.08,
    )?)?;

    sys.add_constraint(Constraint::sphere(everyone(count), source, radius)?)?;
    sys.add_constraint(
        Constraint::bounce(everyone(count), domain)?
            .with_walls(Walls::FLOOR)
            .with_restitution(0.3),
    )?;

    sys.set_lifecycle(Lifecycle::Fountain {
        center: source,
        radius,
        cooling: 0.985,
        lifespan: 60.0..240.0,
        speed: 1.2,
        hot_color: hot,
    });
    Ok(sys)
}

/// A hanging cloth: a rows x cols grid of particles joined by structural,
/// shear, and bend springs, pinned at its two top corners.
///
/// The pin constraints are registered first (indices 0 and 1), so a caller
/// can release a corner with
/// `system.constraint_mut(0).unwrap().set_enabled(false)`.
pub fn cloth(rows: usize, cols: usize, spacing: f32) -> Result<ParticleSystem, SceneError> {
    let count = rows * cols;
    let idx = |r: usize, c: usize| r * cols + c;

    let mut sys = ParticleSystem::new(count);
    let origin = Vec3::new(-(cols as f32 - 1.0) * spacing * 0.5, 0.0, 1.5);
    sys.spawn(|ctx| {
        let (r, c) = (ctx.index / cols, ctx.index % cols);
        ParticleInit {
            position: origin + Vec3::new(c as f32 * spacing, 0.0, -(r as f32) * spacing),
            color: Vec4::new(0.8, 0.3, 0.3, 1.0),
            mass: 0.5,
            ..ParticleInit::default()
        }
    });

    // Pins first so their indices are stable and documented.
    sys.add_constraint(Constraint::pin(idx(0, 0), origin)?)?;
    sys.add_constraint(Constraint::pin(
        idx(0, cols - 1),
        origin + Vec3::new((cols as f32 - 1.0) * spacing, 0.0, 0.0),
    )?)?;

    // Three spring families hold the weave together: structural along rows
    // and columns, shear across cell diagonals, bend across every second
    // neighbor.
    let structural = 60.0;
    let shear = 40.0;
    let bend = 20.0;
    let diag = spacing * std::f32::consts::SQRT_2;
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                sys.add_force(
                    Force::spring(idx(r, c), idx(r, c + 1), structural, spacing)?
                        .with_damping(1.5),
                )?;
            }
            if r + 1 < rows {
                sys.add_force(
                    Force::spring(idx(r, c), idx(r + 1, c), structural, spacing)?
                        .with_damping(1.5),
                )?;
            }
            if r + 1 < rows && c + 1 < cols {
                sys.add_force(Force::spring(idx(r, c), idx(r + 1, c + 1), shear, diag)?)?;
                sys.add_force(Force::spring(idx(r + 1, c), idx(r, c + 1), shear, diag)?)?;
            }
            if c + 2 < cols {
                sys.add_force(Force::spring(
                    idx(r, c),
                    idx(r, c + 2),
                    bend,
                    spacing * 2.0,
                )?)?;
            }
            if r + 2 < rows {
                sys.add_force(Force::spring(
                    idx(r, c),
                    idx(r + 2, c),
                    bend,
                    spacing * 2.0,
                )?)?;
            }
        }
    }

    sys.add_force(Force::gravity(everyone(count), 0.4)?)?;
    sys.add_force(Force::drag(everyone(count), 0.8)?)?;
    sys.add_force(Force::wind(
        everyone(count),
        Vec3::new(0.0, 0.4, 0.0),
        0.15,
    )?)?;
    sys.add_constraint(Constraint::bounce(everyone(count), Aabb::cube(2.5)?)?)?;
    Ok(sys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    #[test]
    fn test_presets_build_and_step() {
        let cfg = SimConfig::default();
        for mut sys in [
            snow(50).unwrap(),
            boids(30).unwrap(),
            fountain(40).unwrap(),
            cloth(4, 4, 0.1).unwrap(),
        ] {
            for _ in 0..10 {
                sys.step(&cfg);
            }
            // Nothing in a preset may go non-finite.
            assert!(sys.as_slice().iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_cloth_pins_hold_corners() {
        let cfg = SimConfig::default();
        let mut sys = cloth(5, 6, 0.1).unwrap();
        let p0 = sys.state().position(0);
        let p5 = sys.state().position(5);
        let interior_before = sys.state().position(3 * 6 + 2);
        for _ in 0..30 {
            sys.step(&cfg);
        }
        assert_eq!(sys.state().position(0), p0);
        assert_eq!(sys.state().position(5), p5);
        // Interior sags under gravity.
        assert!(sys.state().position(3 * 6 + 2).z < interior_before.z);
    }

    #[test]
    fn test_cloth_release_pin() {
        let cfg = SimConfig::default();
        let mut sys = cloth(4, 4, 0.1).unwrap();
        sys.constraint_mut(0).unwrap().set_enabled(false);
        let before = sys.state().position(0);
        for _ in 0..30 {
            sys.step(&cfg);
        }
        // Released corner falls.
        assert!(sys.state().position(0).z < before.z);
    }

    #[test]
    fn test_snow_stays_in_domain() {
        let cfg = SimConfig::default();
        let mut sys = snow(40).unwrap();
        for _ in 0..200 {
            sys.step(&cfg);
        }
        for i in 0..sys.count() {
            let p = sys.state().position(i);
            assert!(p.z >= -2.0 - 1e-4);
            assert!(p.x.abs() <= 2.0 + 1e-3);
        }
    }

    #[test]
    fn test_fountain_particles_stay_out_of_source() {
        let cfg = SimConfig::default();
        let mut sys = fountain(30).unwrap();
        for _ in 0..50 {
            sys.step(&cfg);
        }
        let source = Vec3::new(0.0, 0.0, -1.0);
        for i in 0..sys.count() {
            let d = (sys.state().position(i) - source).length();
            assert!(d >= 0.3 - 1e-3);
        }
    }
}
