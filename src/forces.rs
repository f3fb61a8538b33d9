//! Force generators.
//!
//! Forces accumulate into the force slots of targeted particles each step.
//! They are applied in registration order and compose by superposition: a
//! force only ever adds into the accumulator, never writes position or
//! velocity directly.
//!
//! # Force Categories
//!
//! - **Field forces**: Gravity, Drag, Wind - independent per target particle
//! - **Pairwise**: Spring - exactly two endpoints, equal and opposite
//! - **Group**: Flock - all-pairs boid steering over the target set
//! - **Attractors**: Attract (line), Vortex, Pull (uniform point)
//!
//! Each force carries an explicit target set, an enabled flag, and an
//! optional countdown lifetime (`None` = infinite). Constructors validate
//! parameters up front; a malformed force never reaches the per-frame path.
//!
//! # Example
//!
//! ```ignore
//! let everyone: Vec<usize> = (0..count).collect();
//! system.add_force(Force::gravity(everyone.clone(), 1.0)?)?;
//! system.add_force(Force::wind(everyone, Vec3::X, 0.4)?.with_lifetime(600))?;
//! system.add_force(Force::spring(0, 1, 10.0, 0.15)?)?;
//! ```

use crate::config::SimConfig;
use crate::error::ForceError;
use crate::state::StateBuffer;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::Rng;

/// Separations below this skip the contribution entirely, so degenerate
/// geometry can never put a NaN in the buffer.
pub const MIN_SEPARATION: f32 = 1e-6;

/// Per-axis clamp on spring force magnitude. Keeps stiff springs from
/// exploding when endpoints get very close.
pub const SPRING_FORCE_LIMIT: f32 = 12.0;

/// Tuning for a [`Force::flock`] boid force.
///
/// Visibility combines a distance falloff and an angular falloff:
/// a neighbor closer than `inner_radius` has full distance weight, ramping
/// linearly to zero at `outer_radius`; a neighbor within the binocular
/// half-angle has full view weight, ramping to zero at the monocular
/// half-angle. Neighbors beyond `outer_radius` or the monocular half-angle
/// are invisible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlockParams {
    /// Full-weight visual radius.
    pub inner_radius: f32,
    /// Outer visual radius; weight reaches zero here.
    pub outer_radius: f32,
    /// Full-weight half-angle of view, radians.
    pub binocular_angle: f32,
    /// Limit half-angle of view, radians; weight reaches zero here.
    pub monocular_angle: f32,
    /// Weight of the collision-avoidance contribution.
    pub separation_weight: f32,
    /// Weight of the velocity-matching contribution.
    pub alignment_weight: f32,
    /// Weight of the centering contribution.
    pub cohesion_weight: f32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            inner_radius: 0.3,
            outer_radius: 1.2,
            binocular_angle: std::f32::consts::FRAC_PI_4,
            monocular_angle: 2.0 * std::f32::consts::FRAC_PI_3,
            separation_weight: 1.0,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
        }
    }
}

/// The closed set of force types.
///
/// Constructed only through the validating constructors on [`Force`];
/// parameters live with their variant.
#[derive(Clone, Debug, PartialEq)]
pub enum ForceKind {
    /// Mass-scaled downward pull: `f.z -= mass * cfg.gravity * scale`.
    /// Mass-scaling makes the integrator's mass normalization cancel to a
    /// constant acceleration.
    Gravity {
        /// Multiplier on the config's gravitational acceleration.
        scale: f32,
    },

    /// Linear drag: `f -= velocity * coefficient`.
    Drag {
        /// Drag coefficient.
        coefficient: f32,
    },

    /// Stochastic impulse: each axis gets `direction * strength * r` with a
    /// fresh random `r` in [0, 1) per axis, per application.
    Wind {
        /// Directional envelope of the gusts.
        direction: Vec3,
        /// Gust strength.
        strength: f32,
    },

    /// Hooke spring between exactly two particles (the two entries of the
    /// target set). The force on the first endpoint is the exact negation of
    /// the force on the second.
    Spring {
        /// Spring constant.
        stiffness: f32,
        /// Separation at which the spring is relaxed.
        rest_length: f32,
        /// Relative-velocity damping along the spring axis. Zero disables
        /// the term; see [`Force::with_damping`].
        damping: f32,
    },

    /// Boid steering over all ordered pairs of the target set.
    Flock(FlockParams),

    /// Inverse-power attraction toward a line through `anchor` along `axis`.
    /// Particles farther than `cutoff` along the axis are out of range.
    Attract {
        /// Point on the attractor axis.
        anchor: Vec3,
        /// Axis direction, normalized at construction.
        axis: Vec3,
        /// Longitudinal cutoff along the axis.
        cutoff: f32,
        /// Falloff exponent: magnitude is `strength * r^-(power + 1)`.
        power: f32,
        /// Attraction strength.
        strength: f32,
    },

    /// Tangential swirl around a line through `anchor` along `axis`, with
    /// the same range gating and falloff as [`ForceKind::Attract`].
    Vortex {
        /// Point on the vortex axis.
        anchor: Vec3,
        /// Axis direction, normalized at construction.
        axis: Vec3,
        /// Longitudinal cutoff along the axis.
        cutoff: f32,
        /// Falloff exponent.
        power: f32,
        /// Swirl strength.
        strength: f32,
    },

    /// Constant-magnitude pull toward a fixed point, regardless of distance.
    Pull {
        /// Target position.
        point: Vec3,
        /// Pull strength.
        strength: f32,
    },
}

/// A force generator with its target set and lifecycle state.
#[derive(Clone, Debug, PartialEq)]
pub struct Force {
    kind: ForceKind,
    targets: Vec<usize>,
    enabled: bool,
    lifetime: Option<u32>,
}

fn finite(value: f32, name: &'static str) -> Result<f32, ForceError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ForceError::NonFinite(name))
    }
}

fn non_negative(value: f32, name: &'static str) -> Result<f32, ForceError> {
    let value = finite(value, name)?;
    if value < 0.0 {
        Err(ForceError::Negative(name))
    } else {
        Ok(value)
    }
}

impl Force {
    fn build(kind: ForceKind, targets: Vec<usize>) -> Result<Self, ForceError> {
        if targets.is_empty() {
            return Err(ForceError::EmptyTargets);
        }
        Ok(Self {
            kind,
            targets,
            enabled: true,
            lifetime: None,
        })
    }

    // ========== Constructors ==========

    /// Mass-scaled gravity along -z. `scale` multiplies the config's
    /// gravitational acceleration (1.0 = full strength).
    pub fn gravity(targets: Vec<usize>, scale: f32) -> Result<Self, ForceError> {
        let scale = finite(scale, "scale")?;
        Self::build(ForceKind::Gravity { scale }, targets)
    }

    /// Linear velocity-proportional drag.
    pub fn drag(targets: Vec<usize>, coefficient: f32) -> Result<Self, ForceError> {
        let coefficient = non_negative(coefficient, "coefficient")?;
        Self::build(ForceKind::Drag { coefficient }, targets)
    }

    /// Randomized directional gusts, resampled per axis every application.
    pub fn wind(targets: Vec<usize>, direction: Vec3, strength: f32) -> Result<Self, ForceError> {
        finite(direction.x, "direction.x")?;
        finite(direction.y, "direction.y")?;
        finite(direction.z, "direction.z")?;
        let strength = finite(strength, "strength")?;
        Self::build(
            ForceKind::Wind {
                direction,
                strength,
            },
            targets,
        )
    }

    /// Hooke spring between particles `a` and `b`.
    ///
    /// Damping starts disabled; opt in with [`Force::with_damping`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let structural = Force::spring(i, i + 1, 80.0, spacing)?;
    /// let damped = Force::spring(i, i + 1, 80.0, spacing)?.with_damping(0.8);
    /// ```
    pub fn spring(
        a: usize,
        b: usize,
        stiffness: f32,
        rest_length: f32,
    ) -> Result<Self, ForceError> {
        if a == b {
            return Err(ForceError::SpringEndpointsEqual(a));
        }
        let stiffness = non_negative(stiffness, "stiffness")?;
        let rest_length = non_negative(rest_length, "rest_length")?;
        Self::build(
            ForceKind::Spring {
                stiffness,
                rest_length,
                damping: 0.0,
            },
            vec![a, b],
        )
    }

    /// Boid steering over the target set.
    pub fn flock(targets: Vec<usize>, params: FlockParams) -> Result<Self, ForceError> {
        if !(params.inner_radius > 0.0 && params.inner_radius <= params.outer_radius) {
            return Err(ForceError::InvalidFlockRadii {
                inner: params.inner_radius,
                outer: params.outer_radius,
            });
        }
        if !(params.binocular_angle > 0.0 && params.binocular_angle <= params.monocular_angle) {
            return Err(ForceError::InvalidFlockAngles {
                binocular: params.binocular_angle,
                monocular: params.monocular_angle,
            });
        }
        non_negative(params.separation_weight, "separation_weight")?;
        non_negative(params.alignment_weight, "alignment_weight")?;
        non_negative(params.cohesion_weight, "cohesion_weight")?;
        Self::build(ForceKind::Flock(params), targets)
    }

    /// Inverse-power line attractor.
    pub fn attract(
        targets: Vec<usize>,
        anchor: Vec3,
        axis: Vec3,
        cutoff: f32,
        power: f32,
        strength: f32,
    ) -> Result<Self, ForceError> {
        let axis = axis.try_normalize().ok_or(ForceError::NonFinite("axis"))?;
        let cutoff = non_negative(cutoff, "cutoff")?;
        let power = non_negative(power, "power")?;
        let strength = finite(strength, "strength")?;
        Self::build(
            ForceKind::Attract {
                anchor,
                axis,
                cutoff,
                power,
                strength,
            },
            targets,
        )
    }

    /// Tangential vortex around an axis.
    pub fn vortex(
        targets: Vec<usize>,
        anchor: Vec3,
        axis: Vec3,
        cutoff: f32,
        power: f32,
        strength: f32,
    ) -> Result<Self, ForceError> {
        let axis = axis.try_normalize().ok_or(ForceError::NonFinite("axis"))?;
        let cutoff = non_negative(cutoff, "cutoff")?;
        let power = non_negative(power, "power")?;
        let strength = finite(strength, "strength")?;
        Self::build(
            ForceKind::Vortex {
                anchor,
                axis,
                cutoff,
                power,
                strength,
            },
            targets,
        )
    }

    /// Uniform pull toward a point.
    pub fn pull(targets: Vec<usize>, point: Vec3, strength: f32) -> Result<Self, ForceError> {
        let strength = finite(strength, "strength")?;
        Self::build(ForceKind::Pull { point, strength }, targets)
    }

    // ========== Builder-style options ==========

    /// Enable spring damping with the given coefficient. No effect on other
    /// force kinds.
    pub fn with_damping(mut self, damping: f32) -> Self {
        if let ForceKind::Spring {
            damping: ref mut d, ..
        } = self.kind
        {
            *d = damping.max(0.0);
        }
        self
    }

    /// Limit the force to `steps` applications, after which the driver
    /// prunes it.
    pub fn with_lifetime(mut self, steps: u32) -> Self {
        self.lifetime = Some(steps);
        self
    }

    // ========== Accessors ==========

    /// The force's type and parameters.
    #[inline]
    pub fn kind(&self) -> &ForceKind {
        &self.kind
    }

    /// The particle indices this force affects.
    #[inline]
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Whether the force participates in the next apply pass.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle without removing; a disabled force keeps its remaining
    /// lifetime.
    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Remaining applications, if finite.
    #[inline]
    pub fn lifetime(&self) -> Option<u32> {
        self.lifetime
    }

    /// True once a finite lifetime has counted down to zero.
    #[inline]
    pub fn expired(&self) -> bool {
        self.lifetime == Some(0)
    }

    /// Decrement a finite lifetime after an application.
    pub(crate) fn tick_lifetime(&mut self) {
        if let Some(n) = self.lifetime.as_mut() {
            *n = n.saturating_sub(1);
        }
    }

    // ========== Application ==========

    /// Accumulate this force into the targeted particles' force slots.
    ///
    /// Pure accumulation: position and velocity are read-only here.
    pub fn apply(&self, s: &mut StateBuffer, cfg: &SimConfig, rng: &mut SmallRng) {
        match self.kind {
            ForceKind::Gravity { scale } => {
                for &i in &self.targets {
                    let pull = s.mass(i) * cfg.gravity * scale;
                    s.add_force(i, Vec3::new(0.0, 0.0, -pull));
                }
            }

            ForceKind::Drag { coefficient } => {
                for &i in &self.targets {
                    s.add_force(i, -s.velocity(i) * coefficient);
                }
            }

            ForceKind::Wind {
                direction,
                strength,
            } => {
                for &i in &self.targets {
                    let gust = Vec3::new(
                        direction.x * strength * rng.gen::<f32>(),
                        direction.y * strength * rng.gen::<f32>(),
                        direction.z * strength * rng.gen::<f32>(),
                    );
                    s.add_force(i, gust);
                }
            }

            ForceKind::Spring {
                stiffness,
                rest_length,
                damping,
            } => {
                let (p0, p1) = (self.targets[0], self.targets[1]);
                let span = s.position(p1) - s.position(p0);
                let dist = span.length();
                if dist < MIN_SEPARATION {
                    return;
                }
                let dir = span / dist;
                let stretch = dist - rest_length;
                let mut f = dir * (stiffness * stretch);
                if damping > 0.0 {
                    let closing = (s.velocity(p1) - s.velocity(p0)).dot(dir);
                    f += dir * (damping * closing);
                }
                f = f.clamp(
                    Vec3::splat(-SPRING_FORCE_LIMIT),
                    Vec3::splat(SPRING_FORCE_LIMIT),
                );
                s.add_force(p0, f);
                s.add_force(p1, -f);
            }

            ForceKind::Flock(params) => self.apply_flock(s, &params),

            ForceKind::Attract {
                anchor,
                axis,
                cutoff,
                power,
                strength,
            } => {
                for &i in &self.targets {
                    let offset = s.position(i) - anchor;
                    let along = offset.dot(axis);
                    if along.abs() > cutoff {
                        continue;
                    }
                    let radial = offset - axis * along;
                    let r = radial.length();
                    if r < MIN_SEPARATION {
                        continue;
                    }
                    let magnitude = strength * r.powf(-(power + 1.0));
                    s.add_force(i, -(radial / r) * magnitude);
                }
            }

            ForceKind::Vortex {
                anchor,
                axis,
                cutoff,
                power,
                strength,
            } => {
                for &i in &self.targets {
                    let offset = s.position(i) - anchor;
                    let along = offset.dot(axis);
                    if along.abs() > cutoff {
                        continue;
                    }
                    let radial = offset - axis * along;
                    let r = radial.length();
                    if r < MIN_SEPARATION {
                        continue;
                    }
                    let tangent = axis.cross(radial / r);
                    let magnitude = strength * r.powf(-(power + 1.0));
                    s.add_force(i, tangent * magnitude);
                }
            }

            ForceKind::Pull { point, strength } => {
                for &i in &self.targets {
                    let toward = point - s.position(i);
                    let dist = toward.length();
                    if dist < MIN_SEPARATION {
                        continue;
                    }
                    s.add_force(i, (toward / dist) * strength);
                }
            }
        }
    }

    /// Boid pass: every ordered pair (i, j) of the target set, i != j.
    ///
    /// Visibility of j from i gates on the separation vector's angle against
    /// j's heading and on distance; the weighted avoidance, matching, and
    /// centering terms accumulate as accelerations (mass-scaled into the
    /// force slots).
    fn apply_flock(&self, s: &mut StateBuffer, params: &FlockParams) {
        for (a, &i) in self.targets.iter().enumerate() {
            let mut accel = Vec3::ZERO;
            for (b, &j) in self.targets.iter().enumerate() {
                if a == b {
                    continue;
                }
                let sep = s.position(j) - s.position(i);
                let dist = sep.length();
                if dist < MIN_SEPARATION || dist > params.outer_radius {
                    continue;
                }

                let heading = s.velocity(j);
                let speed = heading.length();
                // A stationary neighbor has no heading to gate on: fully
                // visible.
                let angle = if speed < MIN_SEPARATION {
                    0.0
                } else {
                    (sep.dot(heading) / (dist * speed)).clamp(-1.0, 1.0).acos()
                };
                if angle > params.monocular_angle {
                    continue;
                }

                let k_d = if dist <= params.inner_radius {
                    1.0
                } else {
                    (params.outer_radius - dist) / (params.outer_radius - params.inner_radius)
                };
                let k_t = if angle <= params.binocular_angle {
                    1.0
                } else {
                    (params.monocular_angle - angle)
                        / (params.monocular_angle - params.binocular_angle)
                };
                let k = k_d * k_t;

                let avoid = -(sep / dist) * (params.separation_weight / dist);
                let matching = (s.velocity(j) - s.velocity(i)) * params.alignment_weight;
                let center = sep * params.cohesion_weight;
                accel += (avoid + matching + center) * k;
            }
            s.add_force(i, accel * s.mass(i));
        }
    }
}
