//! External forces acting on dynamic bodies.
//!
//! The only field in this engine is uniform gravity. It is applied to
//! `Dynamic` bodies alone; kinematic platforms move on their own scripted
//! acceleration and static bodies don't move at all (see the integrator).

use crate::entity::Entity;
use crate::integrator::ForceModel;
use crate::types::{constants, Vec2};

/// Uniform gravitational field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    /// Acceleration in units/s² (positive y is down)
    pub vector: Vec2,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            vector: Vec2::new(constants::GRAVITY_X, constants::GRAVITY_Y),
        }
    }
}

impl Gravity {
    pub fn new(vector: Vec2) -> Self {
        Self { vector }
    }

    /// No gravity at all (top-down scenes, tests).
    pub fn none() -> Self {
        Self { vector: Vec2::ZERO }
    }
}

impl ForceModel for Gravity {
    fn external_acceleration(&self, _entity: &Entity) -> Vec2 {
        self.vector
    }
}
