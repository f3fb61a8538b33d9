//! Geometric constraints.
//!
//! Constraints run after integration and repair the freshly-integrated
//! buffer in place so that targeted particles satisfy a geometric invariant:
//! stay inside a box, outside a box, outside a sphere, wrapped in a domain,
//! or pinned to a point. A repair reads pre-step velocity from the previous
//! buffer (for restitution scaling) and writes only the current buffer.
//!
//! Constraints are evaluated in registration order; each sees the cumulative
//! repairs of the ones before it in the same pass. Walls of box constraints
//! are checked in the fixed order left, right, front, back, bottom, top, so
//! a corner crossing may receive two or three axis corrections in one call.
//!
//! Bounds, restitution, and the enabled flag are live-editable between steps
//! (the GUI inspection path); edits apply on the next step without
//! reconstruction.

use crate::config::SimConfig;
use crate::error::ConstraintError;
use crate::state::StateBuffer;
use glam::Vec3;

/// Minimum extent kept between min and max when bounds are edited live.
pub const EDIT_MARGIN: f32 = 1e-3;

/// Axis-aligned box bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Build bounds, rejecting `min >= max` on any axis.
    pub fn new(min: Vec3, max: Vec3) -> Result<Self, ConstraintError> {
        for v in [min, max] {
            if !v.is_finite() {
                return Err(ConstraintError::NonFinite("bounds"));
            }
        }
        for (axis, name) in ['x', 'y', 'z'].into_iter().enumerate() {
            if min[axis] >= max[axis] {
                return Err(ConstraintError::InvertedBounds { axis: name });
            }
        }
        Ok(Self { min, max })
    }

    /// Centered cube of half-size `half`, the common demo domain.
    pub fn cube(half: f32) -> Result<Self, ConstraintError> {
        Self::new(Vec3::splat(-half), Vec3::splat(half))
    }

    /// Extent per axis.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Whether `p` lies strictly inside on every axis.
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        (0..3).all(|a| p[a] > self.min[a] && p[a] < self.max[a])
    }
}

/// Per-wall enable mask for box constraints.
///
/// left/right gate x, front/back gate y, bottom/top gate z.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Walls {
    pub left: bool,
    pub right: bool,
    pub front: bool,
    pub back: bool,
    pub bottom: bool,
    pub top: bool,
}

impl Walls {
    /// All six walls active.
    pub const ALL: Walls = Walls {
        left: true,
        right: true,
        front: true,
        back: true,
        bottom: true,
        top: true,
    };

    /// No walls active.
    pub const NONE: Walls = Walls {
        left: false,
        right: false,
        front: false,
        back: false,
        bottom: false,
        top: false,
    };

    /// Only the floor (lower z wall).
    pub const FLOOR: Walls = Walls {
        left: false,
        right: false,
        front: false,
        back: false,
        bottom: true,
        top: false,
    };
}

impl Default for Walls {
    fn default() -> Self {
        Walls::ALL
    }
}

/// The closed set of constraint types.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConstraintKind {
    /// Impulsive containment box: crossing an enabled wall clamps position
    /// to the wall plane and re-aims the pre-step speed inward, scaled by
    /// drag and restitution.
    Bounce { bounds: Aabb },
    /// Velocity-reversal box: crossing an enabled wall flips that axis's
    /// velocity (scaled by restitution) without clamping position, plus an
    /// unconditional hard floor at the lower z bound.
    Reverse { bounds: Aabb },
    /// Keep particles on or outside a sphere.
    Sphere { center: Vec3, radius: f32 },
    /// Toroidal wrap: exit one face, re-enter the opposite face.
    Wrap { bounds: Aabb },
    /// Solid obstacle box particles must stay outside of.
    Solid { bounds: Aabb },
    /// Absolute pin to a fixed point.
    Pin { point: Vec3 },
}

/// A geometric constraint with its target set and repair parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    kind: ConstraintKind,
    targets: Vec<usize>,
    walls: Walls,
    restitution: f32,
    enabled: bool,
}

impl Constraint {
    fn build(kind: ConstraintKind, targets: Vec<usize>) -> Result<Self, ConstraintError> {
        if targets.is_empty() {
            return Err(ConstraintError::EmptyTargets);
        }
        Ok(Self {
            kind,
            targets,
            walls: Walls::ALL,
            restitution: 1.0,
            enabled: true,
        })
    }

    // ========== Constructors ==========

    /// Impulsive containment box.
    pub fn bounce(targets: Vec<usize>, bounds: Aabb) -> Result<Self, ConstraintError> {
        Self::build(ConstraintKind::Bounce { bounds }, targets)
    }

    /// Velocity-reversal box with a hard floor.
    pub fn reverse(targets: Vec<usize>, bounds: Aabb) -> Result<Self, ConstraintError> {
        Self::build(ConstraintKind::Reverse { bounds }, targets)
    }

    /// Keep targets outside the given sphere.
    pub fn sphere(targets: Vec<usize>, center: Vec3, radius: f32) -> Result<Self, ConstraintError> {
        if !center.is_finite() || !radius.is_finite() {
            return Err(ConstraintError::NonFinite("sphere"));
        }
        if radius <= 0.0 {
            return Err(ConstraintError::NonPositiveRadius(radius));
        }
        Self::build(ConstraintKind::Sphere { center, radius }, targets)
    }

    /// Toroidal wrap volume.
    pub fn wrap(targets: Vec<usize>, bounds: Aabb) -> Result<Self, ConstraintError> {
        Self::build(ConstraintKind::Wrap { bounds }, targets)
    }

    /// Solid obstacle box.
    pub fn solid(targets: Vec<usize>, bounds: Aabb) -> Result<Self, ConstraintError> {
        Self::build(ConstraintKind::Solid { bounds }, targets)
    }

    /// Pin one particle at a fixed point.
    pub fn pin(target: usize, point: Vec3) -> Result<Self, ConstraintError> {
        if !point.is_finite() {
            return Err(ConstraintError::NonFinite("point"));
        }
        Self::build(ConstraintKind::Pin { point }, vec![target])
    }

    // ========== Builder-style options ==========

    /// Restrict which walls of a box constraint are active.
    pub fn with_walls(mut self, walls: Walls) -> Self {
        self.walls = walls;
        self
    }

    /// Set this constraint's restitution (multiplied by the config's global
    /// restitution at repair time).
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.max(0.0);
        self
    }

    // ========== Live inspection / editing ==========

    #[inline]
    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    #[inline]
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    #[inline]
    pub fn walls(&self) -> Walls {
        self.walls
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    #[inline]
    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = restitution.max(0.0);
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle at runtime; used, for example, to pin and release cloth
    /// points.
    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Current box bounds, if this is a box-shaped constraint.
    pub fn bounds(&self) -> Option<Aabb> {
        match self.kind {
            ConstraintKind::Bounce { bounds }
            | ConstraintKind::Reverse { bounds }
            | ConstraintKind::Wrap { bounds }
            | ConstraintKind::Solid { bounds } => Some(bounds),
            _ => None,
        }
    }

    /// Replace box bounds from a live edit. Unlike construction, an edit is
    /// clamped rather than rejected: each axis keeps `min <= max -
    /// EDIT_MARGIN`.
    pub fn set_bounds(&mut self, mut bounds: Aabb) {
        for axis in 0..3 {
            if bounds.min[axis] > bounds.max[axis] - EDIT_MARGIN {
                bounds.min[axis] = bounds.max[axis] - EDIT_MARGIN;
            }
        }
        match &mut self.kind {
            ConstraintKind::Bounce { bounds: b }
            | ConstraintKind::Reverse { bounds: b }
            | ConstraintKind::Wrap { bounds: b }
            | ConstraintKind::Solid { bounds: b } => *b = bounds,
            _ => {}
        }
    }

    /// Move a sphere constraint from a live edit.
    pub fn set_sphere(&mut self, new_center: Vec3, new_radius: f32) {
        if let ConstraintKind::Sphere { center, radius } = &mut self.kind {
            *center = new_center;
            *radius = new_radius.max(EDIT_MARGIN);
        }
    }

    /// Move a pin target from a live edit.
    pub fn set_pin(&mut self, new_point: Vec3) {
        if let ConstraintKind::Pin { point } = &mut self.kind {
            *point = new_point;
        }
    }

    // ========== Repair ==========

    /// Repair `curr` in place so every targeted particle satisfies this
    /// constraint. `prev` is the pre-step state, read for restitution
    /// scaling and entry-face detection.
    pub fn constrain(&self, prev: &StateBuffer, curr: &mut StateBuffer, cfg: &SimConfig) {
        let resti = self.restitution * cfg.restitution;
        match self.kind {
            ConstraintKind::Bounce { bounds } => {
                for &i in &self.targets {
                    self.bounce_one(prev, curr, i, &bounds, cfg.drag * resti);
                }
            }
            ConstraintKind::Reverse { bounds } => {
                for &i in &self.targets {
                    self.reverse_one(curr, i, &bounds, resti);
                }
            }
            ConstraintKind::Sphere { center, radius } => {
                for &i in &self.targets {
                    sphere_one(curr, i, center, radius, resti);
                }
            }
            ConstraintKind::Wrap { bounds } => {
                for &i in &self.targets {
                    self.wrap_one(curr, i, &bounds);
                }
            }
            ConstraintKind::Solid { bounds } => {
                for &i in &self.targets {
                    solid_one(prev, curr, i, &bounds, resti);
                }
            }
            ConstraintKind::Pin { point } => {
                for &i in &self.targets {
                    curr.set_position(i, point);
                    curr.set_velocity(i, Vec3::ZERO);
                }
            }
        }
    }

    /// One particle against an impulsive box. Walls in fixed order; each
    /// axis correction is independent, so corner hits repair several axes.
    fn bounce_one(
        &self,
        prev: &StateBuffer,
        curr: &mut StateBuffer,
        i: usize,
        bounds: &Aabb,
        rebound: f32,
    ) {
        let mut pos = curr.position(i);
        let mut vel = curr.velocity(i);
        let prev_vel = prev.velocity(i);

        let low = [self.walls.left, self.walls.front, self.walls.bottom];
        let high = [self.walls.right, self.walls.back, self.walls.top];
        for axis in 0..3 {
            if low[axis] && pos[axis] < bounds.min[axis] && vel[axis] < 0.0 {
                pos[axis] = bounds.min[axis];
                vel[axis] = prev_vel[axis].abs() * rebound;
            }
            if high[axis] && pos[axis] > bounds.max[axis] && vel[axis] > 0.0 {
                pos[axis] = bounds.max[axis];
                vel[axis] = -prev_vel[axis].abs() * rebound;
            }
        }
        curr.set_position(i, pos);
        curr.set_velocity(i, vel);
    }

    /// One particle against a velocity-reversal box.
    fn reverse_one(&self, curr: &mut StateBuffer, i: usize, bounds: &Aabb, resti: f32) {
        let mut pos = curr.position(i);
        let mut vel = curr.velocity(i);

        let low = [self.walls.left, self.walls.front, self.walls.bottom];
        let high = [self.walls.right, self.walls.back, self.walls.top];
        for axis in 0..3 {
            let crossed_low = low[axis] && pos[axis] < bounds.min[axis] && vel[axis] < 0.0;
            let crossed_high = high[axis] && pos[axis] > bounds.max[axis] && vel[axis] > 0.0;
            if crossed_low || crossed_high {
                vel[axis] = -resti * vel[axis];
            }
        }
        // Hard floor, independent of the wall mask.
        if pos.z < bounds.min.z {
            pos.z = bounds.min.z;
        }
        curr.set_position(i, pos);
        curr.set_velocity(i, vel);
    }

    /// One particle against a wrap volume.
    fn wrap_one(&self, curr: &mut StateBuffer, i: usize, bounds: &Aabb) {
        let mut pos = curr.position(i);
        let size = bounds.size();

        let low = [self.walls.left, self.walls.front, self.walls.bottom];
        let high = [self.walls.right, self.walls.back, self.walls.top];
        for axis in 0..3 {
            if low[axis] && pos[axis] < bounds.min[axis] {
                pos[axis] += size[axis];
            } else if high[axis] && pos[axis] > bounds.max[axis] {
                pos[axis] -= size[axis];
            }
        }
        curr.set_position(i, pos);
    }
}

/// Project an interior particle radially onto the sphere surface. Velocity
/// becomes purely radial, keeping the pre-repair speed scaled by
/// restitution.
fn sphere_one(curr: &mut StateBuffer, i: usize, center: Vec3, radius: f32, resti: f32) {
    let offset = curr.position(i) - center;
    let dist = offset.length();
    if dist >= radius {
        return;
    }
    // A particle sitting exactly at the center has no radial direction;
    // eject it straight up.
    let dir = if dist < crate::forces::MIN_SEPARATION {
        Vec3::Z
    } else {
        offset / dist
    };
    let speed = curr.velocity(i).length();
    curr.set_position(i, center + dir * radius);
    curr.set_velocity(i, dir * speed * resti);
}

/// Push a particle out of a solid box through the face it entered: the one
/// axis whose previous position sat outside its range while the other two
/// were inside. If the previous position was already inside, there is no
/// entry face to undo and the repair is skipped.
fn solid_one(prev: &StateBuffer, curr: &mut StateBuffer, i: usize, bounds: &Aabb, resti: f32) {
    let pos = curr.position(i);
    if !bounds.contains(pos) {
        return;
    }
    let before = prev.position(i);
    let inside_axis = [
        before.x > bounds.min.x && before.x < bounds.max.x,
        before.y > bounds.min.y && before.y < bounds.max.y,
        before.z > bounds.min.z && before.z < bounds.max.z,
    ];
    let crossed: Vec<usize> = (0..3).filter(|&a| !inside_axis[a]).collect();
    if crossed.len() != 1 {
        return;
    }
    let axis = crossed[0];

    let mut pos = pos;
    let mut vel = curr.velocity(i);
    if before[axis] <= bounds.min[axis] {
        pos[axis] = bounds.min[axis];
    } else {
        pos[axis] = bounds.max[axis];
    }
    vel[axis] = -vel[axis] * resti;
    curr.set_position(i, pos);
    curr.set_velocity(i, vel);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_particle(pos: Vec3, vel: Vec3) -> StateBuffer {
        let mut s = StateBuffer::new(1);
        s.set_mass(0, 1.0);
        s.set_position(0, pos);
        s.set_velocity(0, vel);
        s
    }

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::ZERO, Vec3::ONE).unwrap()
    }

    #[test]
    fn test_aabb_rejects_inverted_bounds() {
        let err = Aabb::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 1.0, 0.5)).unwrap_err();
        assert_eq!(err, ConstraintError::InvertedBounds { axis: 'z' });
        assert!(Aabb::new(Vec3::splat(f32::NAN), Vec3::ONE).is_err());
    }

    #[test]
    fn test_bounce_idempotent_inside() {
        let cfg = SimConfig::default();
        let prev = one_particle(Vec3::splat(0.5), Vec3::new(0.1, 0.2, 0.3));
        let mut curr = prev.clone();
        let c = Constraint::bounce(vec![0], unit_box()).unwrap();
        c.constrain(&prev, &mut curr, &cfg);
        assert_eq!(curr, prev);
    }

    #[test]
    fn test_bounce_left_wall_boundary() {
        let cfg = SimConfig::default();
        let prev = one_particle(Vec3::new(0.01, 0.5, 0.5), Vec3::new(-1.0, 0.0, 0.0));
        let mut curr = one_particle(Vec3::new(-0.001, 0.5, 0.5), Vec3::new(-1.0, 0.0, 0.0));
        let c = Constraint::bounce(vec![0], unit_box()).unwrap();
        c.constrain(&prev, &mut curr, &cfg);
        assert_eq!(curr.position(0).x, 0.0);
        assert!(curr.velocity(0).x >= 0.0);
        // Restitution scaling comes from the pre-step speed.
        let expected = 1.0 * cfg.drag * cfg.restitution;
        assert!((curr.velocity(0).x - expected).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_ignores_inward_motion() {
        let cfg = SimConfig::default();
        // Past the wall but already heading back in: leave it alone.
        let prev = one_particle(Vec3::new(-0.05, 0.5, 0.5), Vec3::new(0.8, 0.0, 0.0));
        let mut curr = prev.clone();
        let c = Constraint::bounce(vec![0], unit_box()).unwrap();
        c.constrain(&prev, &mut curr, &cfg);
        assert_eq!(curr.position(0).x, -0.05);
        assert_eq!(curr.velocity(0).x, 0.8);
    }

    #[test]
    fn test_bounce_corner_repairs_multiple_axes() {
        let cfg = SimConfig::default();
        let vel = Vec3::new(-1.0, -1.0, -1.0);
        let prev = one_particle(Vec3::splat(0.01), vel);
        let mut curr = one_particle(Vec3::splat(-0.01), vel);
        let c = Constraint::bounce(vec![0], unit_box()).unwrap();
        c.constrain(&prev, &mut curr, &cfg);
        assert_eq!(curr.position(0), Vec3::ZERO);
        let v = curr.velocity(0);
        assert!(v.x > 0.0 && v.y > 0.0 && v.z > 0.0);
    }

    #[test]
    fn test_bounce_respects_wall_mask() {
        let cfg = SimConfig::default();
        let prev = one_particle(Vec3::new(-0.01, 0.5, -0.01), Vec3::new(-1.0, 0.0, -1.0));
        let mut curr = prev.clone();
        let c = Constraint::bounce(vec![0], unit_box())
            .unwrap()
            .with_walls(Walls::FLOOR);
        c.constrain(&prev, &mut curr, &cfg);
        // Floor repaired, left wall untouched.
        assert_eq!(curr.position(0).z, 0.0);
        assert!(curr.velocity(0).z > 0.0);
        assert_eq!(curr.position(0).x, -0.01);
        assert_eq!(curr.velocity(0).x, -1.0);
    }

    #[test]
    fn test_reverse_flips_velocity_without_clamp() {
        let cfg = SimConfig::default().with_restitution(1.0);
        let prev = one_particle(Vec3::new(1.05, 0.5, 0.5), Vec3::new(2.0, 0.0, 0.0));
        let mut curr = prev.clone();
        let c = Constraint::reverse(vec![0], unit_box())
            .unwrap()
            .with_restitution(0.5);
        c.constrain(&prev, &mut curr, &cfg);
        // No x position clamp, velocity reversed and scaled.
        assert_eq!(curr.position(0).x, 1.05);
        assert_eq!(curr.velocity(0).x, -1.0);
    }

    #[test]
    fn test_reverse_hard_floor() {
        let cfg = SimConfig::default();
        let prev = one_particle(Vec3::new(0.5, 0.5, -0.2), Vec3::new(0.0, 0.0, 0.1));
        let mut curr = prev.clone();
        let c = Constraint::reverse(vec![0], unit_box()).unwrap();
        c.constrain(&prev, &mut curr, &cfg);
        // Below the floor moving up: no reversal, but the clamp still holds.
        assert_eq!(curr.position(0).z, 0.0);
        assert_eq!(curr.velocity(0).z, 0.1);
    }

    #[test]
    fn test_sphere_projects_interior_to_surface() {
        let cfg = SimConfig::default().with_restitution(1.0);
        let center = Vec3::new(1.0, 1.0, 1.0);
        let prev = one_particle(center + Vec3::new(0.2, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0));
        let mut curr = prev.clone();
        let c = Constraint::sphere(vec![0], center, 0.5).unwrap();
        c.constrain(&prev, &mut curr, &cfg);
        let offset = curr.position(0) - center;
        assert!((offset.length() - 0.5).abs() < 1e-5);
        // Velocity turned radial, speed preserved.
        let v = curr.velocity(0);
        assert!((v.length() - 3.0).abs() < 1e-4);
        assert!(v.normalize().dot(offset.normalize()) > 0.999);
    }

    #[test]
    fn test_sphere_leaves_exterior_untouched() {
        let cfg = SimConfig::default();
        let prev = one_particle(Vec3::new(2.0, 0.0, 0.0), Vec3::ONE);
        let mut curr = prev.clone();
        let c = Constraint::sphere(vec![0], Vec3::ZERO, 0.5).unwrap();
        c.constrain(&prev, &mut curr, &cfg);
        assert_eq!(curr, prev);
    }

    #[test]
    fn test_wrap_conserves_velocity_and_other_axes() {
        let cfg = SimConfig::default();
        let vel = Vec3::new(1.0, 0.3, -0.2);
        let prev = one_particle(Vec3::new(0.95, 0.4, 0.6), vel);
        let mut curr = one_particle(Vec3::new(1.05, 0.4, 0.6), vel);
        let c = Constraint::wrap(vec![0], unit_box()).unwrap();
        c.constrain(&prev, &mut curr, &cfg);
        let p = curr.position(0);
        assert!((p.x - 0.05).abs() < 1e-6);
        assert_eq!(p.y, 0.4);
        assert_eq!(p.z, 0.6);
        assert_eq!(curr.velocity(0), vel);
    }

    #[test]
    fn test_solid_ejects_through_entry_face() {
        let cfg = SimConfig::default().with_drag(1.0).with_restitution(1.0);
        // Entered through the left (x min) face.
        let prev = one_particle(Vec3::new(-0.1, 0.5, 0.5), Vec3::new(2.0, 0.0, 0.0));
        let mut curr = one_particle(Vec3::new(0.1, 0.5, 0.5), Vec3::new(2.0, 0.0, 0.0));
        let c = Constraint::solid(vec![0], unit_box()).unwrap();
        c.constrain(&prev, &mut curr, &cfg);
        assert_eq!(curr.position(0).x, 0.0);
        assert_eq!(curr.velocity(0).x, -2.0);
        // Other axes untouched.
        assert_eq!(curr.position(0).y, 0.5);
        assert_eq!(curr.velocity(0).y, 0.0);
    }

    #[test]
    fn test_solid_skips_with_no_entry_face() {
        let cfg = SimConfig::default();
        // Previous position already inside: ambiguous, leave as-is.
        let prev = one_particle(Vec3::splat(0.5), Vec3::ZERO);
        let mut curr = one_particle(Vec3::splat(0.4), Vec3::ZERO);
        let c = Constraint::solid(vec![0], unit_box()).unwrap();
        c.constrain(&prev, &mut curr, &cfg);
        assert_eq!(curr.position(0), Vec3::splat(0.4));
    }

    #[test]
    fn test_pin_holds_position_and_zeroes_velocity() {
        let cfg = SimConfig::default();
        let point = Vec3::new(0.1, 0.2, 0.3);
        let prev = one_particle(Vec3::splat(5.0), Vec3::splat(2.0));
        let mut curr = prev.clone();
        let c = Constraint::pin(0, point).unwrap();
        c.constrain(&prev, &mut curr, &cfg);
        assert_eq!(curr.position(0), point);
        assert_eq!(curr.velocity(0), Vec3::ZERO);
    }

    #[test]
    fn test_disabled_pin_via_toggle() {
        let mut c = Constraint::pin(0, Vec3::ZERO).unwrap();
        assert!(c.enabled());
        c.set_enabled(false);
        assert!(!c.enabled());
    }

    #[test]
    fn test_live_bounds_edit_clamps() {
        let mut c = Constraint::bounce(vec![0], unit_box()).unwrap();
        // Inverted edit: min pushed down to max - EDIT_MARGIN, not rejected.
        c.set_bounds(Aabb {
            min: Vec3::new(2.0, 0.0, 0.0),
            max: Vec3::new(1.0, 1.0, 1.0),
        });
        let b = c.bounds().unwrap();
        assert!((b.min.x - (1.0 - EDIT_MARGIN)).abs() < 1e-6);
        assert_eq!(b.min.y, 0.0);
    }

    #[test]
    fn test_constructor_rejections() {
        assert_eq!(
            Constraint::bounce(vec![], unit_box()).unwrap_err(),
            ConstraintError::EmptyTargets
        );
        assert_eq!(
            Constraint::sphere(vec![0], Vec3::ZERO, 0.0).unwrap_err(),
            ConstraintError::NonPositiveRadius(0.0)
        );
        assert!(Constraint::pin(0, Vec3::splat(f32::INFINITY)).is_err());
    }
}
