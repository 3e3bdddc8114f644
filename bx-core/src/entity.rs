//! Rectangular physics bodies.
//!
//! An entity is an axis-aligned box anchored at its top-left corner:
//!
//! ```text
//!   (x, y) ┌──────────── width ─┐
//!          │                    │
//!          │       (midX,midY)  height
//!          │            ●       │
//!          └────────────────────┘ (right, bottom)
//! ```
//!
//! Edges and midpoints are always computed from `pos` and the size, so they
//! can never go stale. Half extents are cached but only change through
//! [`Entity::set_size`], which recomputes them.

use serde::Serialize;

use crate::error::PhysicsError;
use crate::types::{constants, MotionKind, ResolutionKind, Vec2};

/// A rectangular body: kinematic state, size, motion kind and collision response.
///
/// Serializable for snapshots; construction always goes through the validating
/// constructors, so there is no `Deserialize`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,

    width: f64,
    height: f64,
    half_width: f64,
    half_height: f64,

    motion: MotionKind,
    resolution: ResolutionKind,
}

impl Entity {
    /// Create a 20×20 body at the origin, at rest.
    ///
    /// Fails if `resolution` carries a restitution outside [0, 1].
    pub fn new(resolution: ResolutionKind, motion: MotionKind) -> Result<Self, PhysicsError> {
        resolution.validate()?;

        let mut entity = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            width: constants::DEFAULT_SIZE,
            height: constants::DEFAULT_SIZE,
            half_width: 0.0,
            half_height: 0.0,
            motion,
            resolution,
        };
        entity.update_bounds();
        Ok(entity)
    }

    /// Same as [`Entity::new`] but with an explicit size.
    pub fn with_dimensions(
        resolution: ResolutionKind,
        motion: MotionKind,
        width: f64,
        height: f64,
    ) -> Result<Self, PhysicsError> {
        let mut entity = Self::new(resolution, motion)?;
        entity.set_size(width, height)?;
        Ok(entity)
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.pos = Vec2::new(x, y);
        self
    }

    pub fn moving(mut self, vx: f64, vy: f64) -> Self {
        self.vel = Vec2::new(vx, vy);
        self
    }

    pub fn accelerating(mut self, ax: f64, ay: f64) -> Self {
        self.acc = Vec2::new(ax, ay);
        self
    }

    /// Resize the body. Half extents are recomputed before returning.
    pub fn set_size(&mut self, width: f64, height: f64) -> Result<(), PhysicsError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(PhysicsError::InvalidDimensions { width, height });
        }
        self.width = width;
        self.height = height;
        self.update_bounds();
        Ok(())
    }

    fn update_bounds(&mut self) {
        self.half_width = self.width * 0.5;
        self.half_height = self.height * 0.5;
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    pub fn motion(&self) -> MotionKind {
        self.motion
    }

    pub fn resolution(&self) -> ResolutionKind {
        self.resolution
    }

    pub fn left(&self) -> f64 {
        self.pos.x
    }

    pub fn top(&self) -> f64 {
        self.pos.y
    }

    pub fn right(&self) -> f64 {
        self.pos.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.pos.y + self.height
    }

    pub fn mid_x(&self) -> f64 {
        self.pos.x + self.half_width
    }

    pub fn mid_y(&self) -> f64 {
        self.pos.y + self.half_height
    }

    pub fn mid(&self) -> Vec2 {
        Vec2::new(self.mid_x(), self.mid_y())
    }
}

// =============================================================================
// Tests
// =============================================================================
