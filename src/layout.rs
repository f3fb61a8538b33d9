//! Particle record layout.
//!
//! Every particle is a fixed-size record of [`RECORD_SIZE`] floats inside one
//! flat buffer. This module is the shared ABI between forces, constraints,
//! the integrator, and the presentation boundary: all of them address the
//! buffer through the offsets defined here, so a mismatch cannot arise by
//! construction.
//!
//! | Field | Slots | Offset |
//! |-------|-------|--------|
//! | position (xyz) | 3 | 0 |
//! | velocity (xyz) | 3 | 3 |
//! | force accumulator (xyz) | 3 | 6 |
//! | color (rgba) | 4 | 9 |
//! | mass | 1 | 13 |
//! | radius | 1 | 14 |
//! | age | 1 | 15 |
//!
//! Axis convention: x = left/right, y = front/back, z = vertical (up).

/// Number of f32 slots in one particle record.
pub const RECORD_SIZE: usize = 16;

/// Named fields of a particle record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// Position, 3 slots.
    Position,
    /// Velocity, 3 slots.
    Velocity,
    /// Force accumulator, 3 slots.
    Force,
    /// Color RGBA, 4 slots.
    Color,
    /// Mass, 1 slot.
    Mass,
    /// Radius, 1 slot.
    Radius,
    /// Remaining age, 1 slot.
    Age,
}

impl Field {
    /// All fields in record order.
    pub const ALL: [Field; 7] = [
        Field::Position,
        Field::Velocity,
        Field::Force,
        Field::Color,
        Field::Mass,
        Field::Radius,
        Field::Age,
    ];

    /// Offset of this field within a record.
    #[inline]
    pub const fn offset(self) -> usize {
        match self {
            Field::Position => 0,
            Field::Velocity => 3,
            Field::Force => 6,
            Field::Color => 9,
            Field::Mass => 13,
            Field::Radius => 14,
            Field::Age => 15,
        }
    }

    /// Number of f32 slots this field occupies.
    #[inline]
    pub const fn len(self) -> usize {
        match self {
            Field::Position | Field::Velocity | Field::Force => 3,
            Field::Color => 4,
            Field::Mass | Field::Radius | Field::Age => 1,
        }
    }
}

/// Flat offset of `field` for particle `index`.
#[inline]
pub const fn offset(index: usize, field: Field) -> usize {
    index * RECORD_SIZE + field.offset()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_formula() {
        for i in 0..8 {
            for field in Field::ALL {
                assert_eq!(offset(i, field), i * RECORD_SIZE + field.offset());
            }
        }
    }

    #[test]
    fn test_fields_cover_record_without_aliasing() {
        let mut claimed = [false; RECORD_SIZE];
        for field in Field::ALL {
            for slot in field.offset()..field.offset() + field.len() {
                assert!(!claimed[slot], "slot {} claimed twice", slot);
                claimed[slot] = true;
            }
        }
        assert!(claimed.iter().all(|&c| c), "record has unclaimed slots");
    }

    #[test]
    fn test_records_do_not_overlap() {
        assert_eq!(offset(1, Field::Position), RECORD_SIZE);
        assert!(offset(0, Field::Age) < offset(1, Field::Position));
    }
}
