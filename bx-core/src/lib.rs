//! # BX Core
//!
//! A minimal 2D step loop for axis-aligned boxes: one player moving against a
//! list of obstacles.
//!
//! ## Architecture
//!
//! - `types`: Core data (Vec2, motion and resolution kinds, constants)
//! - `entity`: Rectangular bodies with computed edges
//! - `integrator`: Semi-implicit Euler integration
//! - `forces`: Uniform gravity
//! - `collision`: AABB overlap detection and displace/elastic resolution
//! - `presets`: YAML engine and body presets
//! - `engine`: Main orchestrator (integrate, detect, resolve)

pub mod collision;
pub mod engine;
pub mod entity;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod presets;
pub mod types;

pub use engine::{Engine, EngineConfig};
pub use entity::Entity;
pub use error::PhysicsError;
pub use types::{Axis, MotionKind, ResolutionKind, Vec2};
