//! Flat particle state buffer.
//!
//! A [`StateBuffer`] holds one fixed-layout record per particle (see
//! [`crate::layout`]) in a single contiguous `Vec<f32>`. The simulation
//! driver owns several buffers at once - current, next, and the integrator's
//! named scratch samples - and hands them to forces and constraints for the
//! duration of a single call.

use crate::layout::{offset, Field, RECORD_SIZE};
use glam::{Vec3, Vec4};

/// Contiguous per-particle state, `count * RECORD_SIZE` floats.
#[derive(Clone, Debug, PartialEq)]
pub struct StateBuffer {
    data: Vec<f32>,
    count: usize,
}

impl StateBuffer {
    /// Create a zeroed buffer for `count` particles.
    pub fn new(count: usize) -> Self {
        Self {
            data: vec![0.0; count * RECORD_SIZE],
            count,
        }
    }

    /// Number of particles.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The raw flat buffer, for presentation-layer upload.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The raw buffer as bytes, for copying into GPU-resident storage.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// The records of a sub-range of particles, for systems packed into a
    /// shared presentation buffer.
    pub fn records(&self, range: std::ops::Range<usize>) -> &[f32] {
        &self.data[range.start * RECORD_SIZE..range.end * RECORD_SIZE]
    }

    #[inline]
    fn vec3(&self, i: usize, field: Field) -> Vec3 {
        let o = offset(i, field);
        Vec3::new(self.data[o], self.data[o + 1], self.data[o + 2])
    }

    #[inline]
    fn set_vec3(&mut self, i: usize, field: Field, v: Vec3) {
        let o = offset(i, field);
        self.data[o] = v.x;
        self.data[o + 1] = v.y;
        self.data[o + 2] = v.z;
    }

    // ========== Typed field access ==========

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        self.vec3(i, Field::Position)
    }

    #[inline]
    pub fn set_position(&mut self, i: usize, v: Vec3) {
        self.set_vec3(i, Field::Position, v);
    }

    #[inline]
    pub fn velocity(&self, i: usize) -> Vec3 {
        self.vec3(i, Field::Velocity)
    }

    #[inline]
    pub fn set_velocity(&mut self, i: usize, v: Vec3) {
        self.set_vec3(i, Field::Velocity, v);
    }

    #[inline]
    pub fn force(&self, i: usize) -> Vec3 {
        self.vec3(i, Field::Force)
    }

    #[inline]
    pub fn set_force(&mut self, i: usize, v: Vec3) {
        self.set_vec3(i, Field::Force, v);
    }

    /// Accumulate into the force slots. Forces compose by superposition, so
    /// this is the only write path [`crate::forces`] uses.
    #[inline]
    pub fn add_force(&mut self, i: usize, v: Vec3) {
        let o = offset(i, Field::Force);
        self.data[o] += v.x;
        self.data[o + 1] += v.y;
        self.data[o + 2] += v.z;
    }

    #[inline]
    pub fn color(&self, i: usize) -> Vec4 {
        let o = offset(i, Field::Color);
        Vec4::new(
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        )
    }

    #[inline]
    pub fn set_color(&mut self, i: usize, c: Vec4) {
        let o = offset(i, Field::Color);
        self.data[o] = c.x;
        self.data[o + 1] = c.y;
        self.data[o + 2] = c.z;
        self.data[o + 3] = c.w;
    }

    #[inline]
    pub fn mass(&self, i: usize) -> f32 {
        self.data[offset(i, Field::Mass)]
    }

    #[inline]
    pub fn set_mass(&mut self, i: usize, m: f32) {
        self.data[offset(i, Field::Mass)] = m;
    }

    #[inline]
    pub fn radius(&self, i: usize) -> f32 {
        self.data[offset(i, Field::Radius)]
    }

    #[inline]
    pub fn set_radius(&mut self, i: usize, r: f32) {
        self.data[offset(i, Field::Radius)] = r;
    }

    #[inline]
    pub fn age(&self, i: usize) -> f32 {
        self.data[offset(i, Field::Age)]
    }

    #[inline]
    pub fn set_age(&mut self, i: usize, a: f32) {
        self.data[offset(i, Field::Age)] = a;
    }

    // ========== Whole-buffer operations ==========

    /// Zero every particle's force accumulator, leaving other fields intact.
    pub fn zero_forces(&mut self) {
        for i in 0..self.count {
            self.set_vec3(i, Field::Force, Vec3::ZERO);
        }
    }

    /// `self + dot * h`, uniformly over every slot. The integrators advance
    /// the whole record this way; fields with zero derivative pass through
    /// unchanged.
    pub fn step_scaled(&self, dot: &StateBuffer, h: f32) -> StateBuffer {
        debug_assert_eq!(self.count, dot.count);
        let data = self
            .data
            .iter()
            .zip(dot.data.iter())
            .map(|(s, d)| s + d * h)
            .collect();
        StateBuffer {
            data,
            count: self.count,
        }
    }

    /// In-place `self += dot * h` over every slot.
    pub fn add_scaled(&mut self, dot: &StateBuffer, h: f32) {
        debug_assert_eq!(self.count, dot.count);
        for (s, d) in self.data.iter_mut().zip(dot.data.iter()) {
            *s += d * h;
        }
    }

    /// Per-slot difference `self - other`.
    pub fn diff(&self, other: &StateBuffer) -> StateBuffer {
        debug_assert_eq!(self.count, other.count);
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a - b)
            .collect();
        StateBuffer {
            data,
            count: self.count,
        }
    }
}
