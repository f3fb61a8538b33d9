//! Error types for scene assembly.
//!
//! Malformed forces and constraints are rejected when they are built or
//! registered, so a bad configuration never reaches the per-frame hot path.

use std::fmt;

/// Errors raised by [`crate::forces::Force`] constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum ForceError {
    /// The force was given an empty target set.
    EmptyTargets,
    /// A spring was given the same particle for both endpoints.
    SpringEndpointsEqual(usize),
    /// A parameter that must be finite was NaN or infinite.
    NonFinite(&'static str),
    /// A parameter that must be non-negative was negative.
    Negative(&'static str),
    /// Flock radii must satisfy `0 < inner <= outer`.
    InvalidFlockRadii { inner: f32, outer: f32 },
    /// Flock view angles must satisfy `0 < binocular <= monocular`.
    InvalidFlockAngles { binocular: f32, monocular: f32 },
}

impl fmt::Display for ForceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForceError::EmptyTargets => write!(f, "Force has an empty target set"),
            ForceError::SpringEndpointsEqual(i) => {
                write!(f, "Spring endpoints must differ, both are particle {}", i)
            }
            ForceError::NonFinite(param) => {
                write!(f, "Force parameter '{}' must be finite", param)
            }
            ForceError::Negative(param) => {
                write!(f, "Force parameter '{}' must be non-negative", param)
            }
            ForceError::InvalidFlockRadii { inner, outer } => write!(
                f,
                "Flock radii must satisfy 0 < inner <= outer, got inner={} outer={}",
                inner, outer
            ),
            ForceError::InvalidFlockAngles {
                binocular,
                monocular,
            } => write!(
                f,
                "Flock angles must satisfy 0 < binocular <= monocular, got binocular={} monocular={}",
                binocular, monocular
            ),
        }
    }
}

impl std::error::Error for ForceError {}

/// Errors raised by [`crate::constraints::Constraint`] and
/// [`crate::constraints::Aabb`] constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintError {
    /// Box bounds with `min >= max` on the named axis.
    InvertedBounds { axis: char },
    /// Sphere radius must be positive.
    NonPositiveRadius(f32),
    /// The constraint was given an empty target set.
    EmptyTargets,
    /// A parameter that must be finite was NaN or infinite.
    NonFinite(&'static str),
}

impl fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintError::InvertedBounds { axis } => {
                write!(f, "Box bounds inverted on {} axis (min >= max)", axis)
            }
            ConstraintError::NonPositiveRadius(r) => {
                write!(f, "Sphere radius must be positive, got {}", r)
            }
            ConstraintError::EmptyTargets => write!(f, "Constraint has an empty target set"),
            ConstraintError::NonFinite(param) => {
                write!(f, "Constraint parameter '{}' must be finite", param)
            }
        }
    }
}

impl std::error::Error for ConstraintError {}

/// Errors raised when registering forces and constraints with a
/// [`crate::system::ParticleSystem`].
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A target index does not exist in the system.
    TargetOutOfRange { index: usize, count: usize },
    /// A force failed validation.
    Force(ForceError),
    /// A constraint failed validation.
    Constraint(ConstraintError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::TargetOutOfRange { index, count } => write!(
                f,
                "Target particle {} out of range for a system of {} particles",
                index, count
            ),
            SceneError::Force(e) => write!(f, "Invalid force: {}", e),
            SceneError::Constraint(e) => write!(f, "Invalid constraint: {}", e),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Force(e) => Some(e),
            SceneError::Constraint(e) => Some(e),
            SceneError::TargetOutOfRange { .. } => None,
        }
    }
}

impl From<ForceError> for SceneError {
    fn from(e: ForceError) -> Self {
        SceneError::Force(e)
    }
}

impl From<ConstraintError> for SceneError {
    fn from(e: ConstraintError) -> Self {
        SceneError::Constraint(e)
    }
}
