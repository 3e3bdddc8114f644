//! Per-frame integration.
//!
//! Bodies are advanced with semi-implicit (symplectic) Euler: velocity is
//! updated first, then position moves by the *new* velocity.
//!
//! ```text
//! Dynamic:    v += a*dt + g*dt    x += v*dt
//! Kinematic:  v += a*dt           x += v*dt
//! Static:     (untouched)
//! ```
//!
//! Gravity only reaches dynamic bodies. Kinematic bodies (platforms) follow
//! their own scripted acceleration.

use crate::entity::Entity;
use crate::types::{MotionKind, Vec2};

/// Source of external acceleration for dynamic bodies.
pub trait ForceModel {
    /// Acceleration the field applies to `entity` (units/s²).
    fn external_acceleration(&self, entity: &Entity) -> Vec2;
}

/// Semi-implicit Euler integrator.
pub struct SymplecticEuler;

impl SymplecticEuler {
    /// Advance one body by `dt` seconds in place.
    ///
    /// `dt` is assumed to be validated by the caller (non-negative, finite).
    pub fn step<F: ForceModel>(entity: &mut Entity, forces: &F, dt: f64) {
        match entity.motion() {
            MotionKind::Dynamic => {
                let impulse = forces.external_acceleration(entity) * dt;
                entity.vel += entity.acc * dt + impulse;
                entity.pos += entity.vel * dt;
            }
            MotionKind::Kinematic => {
                entity.vel += entity.acc * dt;
                entity.pos += entity.vel * dt;
            }
            MotionKind::Static => {}
        }
    }

    /// Advance every body in `entities` by `dt`.
    pub fn step_all<'a, F, I>(entities: I, forces: &F, dt: f64)
    where
        F: ForceModel,
        I: IntoIterator<Item = &'a mut Entity>,
    {
        for entity in entities {
            Self::step(entity, forces, dt);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
