//! The simulation step.
//!
//! One call to [`Engine::step`] runs, in order:
//!
//! 1. integrate the player and every collidable body
//! 2. detect the player's overlaps at the new positions
//! 3. resolve them, if there are any
//!
//! The player is owned separately from the collidable list and is never
//! tested against itself.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::collision::{AxisPicker, CollisionDetector, CollisionResolver, Contact, RandomAxis};
use crate::entity::Entity;
use crate::error::PhysicsError;
use crate::forces::Gravity;
use crate::integrator::SymplecticEuler;
use crate::types::{constants, ResolutionKind, Vec2};

// =============================================================================
// Configuration
// =============================================================================

/// Engine-wide constants, passed in at construction.
///
/// Every field has a default, so a YAML file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Gravity in units/s² (positive y is down)
    pub gravity: Vec2,
    /// Rebound speeds below this snap to zero
    pub sticky_threshold: f64,
    /// Restitution for elastic bodies created by selector without a coefficient
    pub default_restitution: f64,
    /// Seed for the corner tie-break; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(constants::GRAVITY_X, constants::GRAVITY_Y),
            sticky_threshold: constants::STICKY_THRESHOLD,
            default_restitution: constants::DEFAULT_RESTITUTION,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Defaults with gravity switched off.
    pub fn zero_gravity() -> Self {
        Self {
            gravity: Vec2::ZERO,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfig(format!(
                "gravity must be finite, got ({}, {})",
                self.gravity.x, self.gravity.y
            )));
        }
        if !(self.sticky_threshold.is_finite() && self.sticky_threshold > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "sticky_threshold must be > 0, got {}",
                self.sticky_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.default_restitution) {
            return Err(PhysicsError::InvalidRestitution(self.default_restitution));
        }
        Ok(())
    }

    /// Parse a resolution selector, filling in this config's default restitution.
    pub fn resolution(
        &self,
        selector: &str,
        restitution: Option<f64>,
    ) -> Result<ResolutionKind, PhysicsError> {
        let restitution = restitution.unwrap_or(self.default_restitution);
        ResolutionKind::from_selector(selector, Some(restitution))
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Owns the scene and advances it one frame at a time.
///
/// Not reentrant: `step` takes `&mut self` and finishes integration,
/// detection and resolution before returning.
pub struct Engine<P = RandomAxis> {
    config: EngineConfig,
    forces: Gravity,
    detector: CollisionDetector,
    resolver: CollisionResolver<P>,
    player: Entity,
    bodies: Vec<Entity>,
    time: f64,
    last_contacts: Vec<Contact>,
}

impl Engine<RandomAxis> {
    /// Build an engine whose corner tie-break is a coin flip seeded from
    /// `config.seed` (or from entropy when unset).
    pub fn new(
        config: EngineConfig,
        player: Entity,
        bodies: Vec<Entity>,
    ) -> Result<Self, PhysicsError> {
        let picker = match config.seed {
            Some(seed) => RandomAxis::seeded(seed),
            None => RandomAxis::from_entropy(),
        };
        Self::with_picker(config, player, bodies, picker)
    }
}

impl<P: AxisPicker> Engine<P> {
    pub fn with_picker(
        config: EngineConfig,
        player: Entity,
        bodies: Vec<Entity>,
        picker: P,
    ) -> Result<Self, PhysicsError> {
        config.validate()?;

        Ok(Self {
            forces: Gravity::new(config.gravity),
            detector: CollisionDetector::new(),
            resolver: CollisionResolver::new(picker, config.sticky_threshold),
            config,
            player,
            bodies,
            time: 0.0,
            last_contacts: Vec::new(),
        })
    }

    /// Advance the scene by `dt` seconds.
    ///
    /// `dt == 0` is allowed: nothing moves, but detection and resolution
    /// still run. Negative or non-finite `dt` is rejected and nothing changes.
    pub fn step(&mut self, dt: f64) -> Result<(), PhysicsError> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(PhysicsError::InvalidTimestep(dt));
        }

        SymplecticEuler::step(&mut self.player, &self.forces, dt);
        SymplecticEuler::step_all(self.bodies.iter_mut(), &self.forces, dt);

        self.last_contacts.clear();
        let hits = self.detector.detect(&self.player, &self.bodies);
        if !hits.is_empty() {
            debug!("t={:.4}: player overlaps {} bodies", self.time + dt, hits.len());
            self.last_contacts = self.resolver.resolve(&mut self.player, &hits);
        }

        self.time += dt;
        Ok(())
    }

    /// Run `steps` consecutive steps of `dt`.
    pub fn step_n(&mut self, dt: f64, steps: usize) -> Result<(), PhysicsError> {
        for _ in 0..steps {
            self.step(dt)?;
        }
        Ok(())
    }

    /// Append a collidable body, returning its index.
    pub fn add_body(&mut self, body: Entity) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    /// Mutable player access, e.g. for input to set `acc` between steps.
    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.player
    }

    pub fn bodies(&self) -> &[Entity] {
        &self.bodies
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.bodies.get_mut(index)
    }

    /// Total simulated time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Contacts resolved during the most recent step.
    pub fn last_contacts(&self) -> &[Contact] {
        &self.last_contacts
    }
}

// =============================================================================
// Tests
// =============================================================================
