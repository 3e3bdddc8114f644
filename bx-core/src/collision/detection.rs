//! Discrete AABB overlap detection.
//!
//! Tests the player's box against every candidate at its current
//! (post-integration) position. There is no sweep: a body fast enough to
//! pass through an obstacle within one frame will tunnel.

use crate::entity::Entity;

/// One overlapping candidate found during a detection pass.
///
/// The player side of the pair is implicit.
#[derive(Debug, Clone, Copy)]
pub struct Collision<'a> {
    /// Position of the obstacle in the candidate list
    pub index: usize,
    pub entity: &'a Entity,
}

/// Boundary-inclusive AABB test.
///
/// Boxes that merely share an edge count as overlapping. Symmetric in its
/// arguments.
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    !(a.bottom() < b.top() || a.top() > b.bottom() || a.right() < b.left() || a.left() > b.right())
}

/// Collision detector for the single-player scene.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollisionDetector;

impl CollisionDetector {
    pub fn new() -> Self {
        Self
    }

    /// Lazily yield a hit for each candidate the player overlaps, in list order.
    pub fn detect_iter<'a>(
        &self,
        player: &'a Entity,
        candidates: &'a [Entity],
    ) -> impl Iterator<Item = Collision<'a>> + 'a {
        candidates
            .iter()
            .enumerate()
            .filter(move |(_, candidate)| overlaps(player, candidate))
            .map(|(index, entity)| Collision { index, entity })
    }

    /// All hits for this frame, in candidate order. Empty means no contact.
    pub fn detect<'a>(&self, player: &Entity, candidates: &'a [Entity]) -> Vec<Collision<'a>> {
        candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| overlaps(player, candidate))
            .map(|(index, entity)| Collision { index, entity })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
