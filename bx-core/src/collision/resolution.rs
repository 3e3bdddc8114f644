//! Collision resolution for the player.
//!
//! Each hit is resolved on its own, in the order the detector produced them.
//! A later hit sees the position and velocity left behind by earlier ones;
//! there is no simultaneous multi-contact solve.
//!
//! ## Elastic response
//!
//! The player's center is compared to the obstacle's center, scaled by the
//! obstacle's half extents:
//!
//! ```text
//! dx = (obstacle.midX - player.midX) / obstacle.halfWidth
//! dy = (obstacle.midY - player.midY) / obstacle.halfHeight
//! ```
//!
//! so `|dx|` and `|dy|` near 1 mean "near that edge" whatever the box size.
//!
//! - `||dx| - |dy|| < 0.1`: corner. Snap flush on both axes, then bounce on
//!   one axis picked by an [`AxisPicker`].
//! - `|dx| > |dy|`: side hit. Snap flush left/right, bounce `vx`.
//! - otherwise: top/bottom hit. Snap flush above/below, bounce `vy`.
//!
//! A bounce is `v = -v * restitution`, snapped to zero under the sticky
//! threshold so resting bodies don't micro-bounce forever.
//!
//! ## Displace response
//!
//! The player is pushed out along the axis of least penetration depth (ties
//! go to y) and its velocity on that axis is zeroed.

use log::trace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::detection::Collision;
use crate::entity::Entity;
use crate::types::{constants, Axis, ResolutionKind};

// =============================================================================
// Corner tie-break
// =============================================================================

/// Chooses which velocity axis bounces on a corner hit.
pub trait AxisPicker {
    fn pick_axis(&mut self) -> Axis;
}

/// Fair coin flip backed by a seedable ChaCha generator.
#[derive(Debug, Clone)]
pub struct RandomAxis {
    rng: ChaCha8Rng,
}

impl RandomAxis {
    /// Reproducible sequence of picks.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl AxisPicker for RandomAxis {
    fn pick_axis(&mut self) -> Axis {
        if self.rng.gen_bool(0.5) {
            Axis::X
        } else {
            Axis::Y
        }
    }
}

/// Always picks the same axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAxis(pub Axis);

impl AxisPicker for FixedAxis {
    fn pick_axis(&mut self) -> Axis {
        self.0
    }
}

// =============================================================================
// Contacts
// =============================================================================

/// Which branch of the response handled a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Side,
    TopBottom,
    Corner,
    Displace,
}

/// What the resolver did for one hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// Index of the obstacle in the collidable list
    pub index: usize,
    /// Axis whose velocity was changed
    pub axis: Axis,
    pub kind: ContactKind,
}

// =============================================================================
// Resolver
// =============================================================================

/// Applies each obstacle's collision response to the player.
#[derive(Debug, Clone)]
pub struct CollisionResolver<P = RandomAxis> {
    picker: P,
    sticky_threshold: f64,
}

impl<P: AxisPicker> CollisionResolver<P> {
    pub fn new(picker: P, sticky_threshold: f64) -> Self {
        Self {
            picker,
            sticky_threshold,
        }
    }

    pub fn sticky_threshold(&self) -> f64 {
        self.sticky_threshold
    }

    /// Resolve every hit in order, mutating the player in place.
    pub fn resolve(&mut self, player: &mut Entity, hits: &[Collision<'_>]) -> Vec<Contact> {
        hits.iter().map(|hit| self.resolve_one(player, hit)).collect()
    }

    /// Resolve a single hit.
    pub fn resolve_one(&mut self, player: &mut Entity, hit: &Collision<'_>) -> Contact {
        let (axis, kind) = match hit.entity.resolution() {
            ResolutionKind::Elastic { restitution } => {
                self.resolve_elastic(player, hit.entity, restitution)
            }
            ResolutionKind::Displace => {
                let axis = Self::resolve_displace(player, hit.entity);
                (axis, ContactKind::Displace)
            }
        };

        trace!(
            "resolved hit with body {}: {:?} on {} -> pos=({:.3}, {:.3}) vel=({:.3}, {:.3})",
            hit.index,
            kind,
            axis,
            player.pos.x,
            player.pos.y,
            player.vel.x,
            player.vel.y
        );

        Contact {
            index: hit.index,
            axis,
            kind,
        }
    }

    fn resolve_elastic(
        &mut self,
        player: &mut Entity,
        entity: &Entity,
        restitution: f64,
    ) -> (Axis, ContactKind) {
        let dx = (entity.mid_x() - player.mid_x()) / entity.half_width();
        let dy = (entity.mid_y() - player.mid_y()) / entity.half_height();

        let abs_dx = dx.abs();
        let abs_dy = dy.abs();

        if (abs_dx - abs_dy).abs() < constants::CORNER_BAND {
            flush_x(player, entity, dx);
            flush_y(player, entity, dy);

            let axis = self.picker.pick_axis();
            let v = player.vel.get_mut(axis);
            *v = bounce(*v, restitution, self.sticky_threshold);
            (axis, ContactKind::Corner)
        } else if abs_dx > abs_dy {
            flush_x(player, entity, dx);
            player.vel.x = bounce(player.vel.x, restitution, self.sticky_threshold);
            (Axis::X, ContactKind::Side)
        } else {
            flush_y(player, entity, dy);
            player.vel.y = bounce(player.vel.y, restitution, self.sticky_threshold);
            (Axis::Y, ContactKind::TopBottom)
        }
    }

    fn resolve_displace(player: &mut Entity, entity: &Entity) -> Axis {
        let depth_x = player.right().min(entity.right()) - player.left().max(entity.left());
        let depth_y = player.bottom().min(entity.bottom()) - player.top().max(entity.top());

        let axis = if depth_x < depth_y { Axis::X } else { Axis::Y };
        match axis {
            Axis::X => flush_x(player, entity, entity.mid_x() - player.mid_x()),
            Axis::Y => flush_y(player, entity, entity.mid_y() - player.mid_y()),
        }
        *player.vel.get_mut(axis) = 0.0;
        axis
    }
}

/// Place the player against the obstacle's right edge when it sits to the
/// right of the obstacle's center (`dx < 0`), else against the left edge.
fn flush_x(player: &mut Entity, entity: &Entity, dx: f64) {
    player.pos.x = if dx < 0.0 {
        entity.right()
    } else {
        entity.left() - player.width()
    };
}

/// Same as [`flush_x`] for the bottom (`dy < 0`) and top edges.
fn flush_y(player: &mut Entity, entity: &Entity, dy: f64) {
    player.pos.y = if dy < 0.0 {
        entity.bottom()
    } else {
        entity.top() - player.height()
    };
}

fn bounce(v: f64, restitution: f64, sticky_threshold: f64) -> f64 {
    let v = -v * restitution;
    if v.abs() < sticky_threshold {
        0.0
    } else {
        v
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MotionKind, Vec2};

    const EPS: f64 = 1e-9;

    fn player_at(x: f64, y: f64, vx: f64, vy: f64) -> Entity {
        Entity::new(ResolutionKind::default(), MotionKind::Dynamic)
            .unwrap()
            .at(x, y)
            .moving(vx, vy)
    }

    fn obstacle(kind: ResolutionKind, x: f64, y: f64, w: f64, h: f64) -> Entity {
        Entity::with_dimensions(kind, MotionKind::Static, w, h)
            .unwrap()
            .at(x, y)
    }

    fn elastic(r: f64) -> ResolutionKind {
        ResolutionKind::elastic(r).unwrap()
    }

    fn hit(entity: &Entity) -> Collision<'_> {
        Collision { index: 0, entity }
    }

    fn resolver(threshold: f64) -> CollisionResolver<FixedAxis> {
        CollisionResolver::new(FixedAxis(Axis::X), threshold)
    }

    #[test]
    fn test_side_hit_reflects_with_restitution() {
        // Player moved right into a tall block
        let wall = obstacle(elastic(0.5), 25.0, -5.0, 20.0, 30.0);
        let mut player = player_at(15.0, 0.0, 30.0, 0.0);

        let contact = resolver(1.0).resolve_one(&mut player, &hit(&wall));

        assert_eq!(contact.kind, ContactKind::Side);
        assert_eq!(contact.axis, Axis::X);
        assert!((player.pos.x - 5.0).abs() < EPS);
        assert_eq!(player.pos.y, 0.0);
        assert!((player.vel.x + 15.0).abs() < EPS);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_side_hit_from_the_right() {
        let wall = obstacle(elastic(0.5), 0.0, 0.0, 20.0, 40.0);
        let mut player = player_at(15.0, 10.0, -8.0, 3.0);

        resolver(0.1).resolve_one(&mut player, &hit(&wall));

        assert_eq!(player.pos.x, 20.0);
        assert_eq!(player.pos.y, 10.0);
        assert!((player.vel.x - 4.0).abs() < EPS);
        assert_eq!(player.vel.y, 3.0, "vy must be untouched");
    }

    #[test]
    fn test_side_hit_snaps_slow_rebound_to_zero() {
        let wall = obstacle(elastic(0.5), 25.0, -5.0, 20.0, 30.0);
        let mut player = player_at(15.0, 0.0, 1.5, 0.0);

        resolver(1.0).resolve_one(&mut player, &hit(&wall));

        // -1.5 * 0.5 = -0.75 is under the threshold
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_landing_on_top() {
        let floor = obstacle(elastic(0.5), -40.0, 30.0, 100.0, 20.0);
        let mut player = player_at(0.0, 15.0, 2.0, 40.0);

        let contact = resolver(0.1).resolve_one(&mut player, &hit(&floor));

        assert_eq!(contact.kind, ContactKind::TopBottom);
        assert_eq!(player.pos.y, 10.0);
        assert_eq!(player.pos.x, 0.0);
        assert!((player.vel.y + 20.0).abs() < EPS);
        assert_eq!(player.vel.x, 2.0);
    }

    #[test]
    fn test_hitting_a_ceiling() {
        let ceiling = obstacle(elastic(1.0), -40.0, 0.0, 100.0, 20.0);
        let mut player = player_at(0.0, 15.0, 0.0, -12.0);

        resolver(0.1).resolve_one(&mut player, &hit(&ceiling));

        assert_eq!(player.pos.y, 20.0);
        assert_eq!(player.vel.y, 12.0);
    }

    #[test]
    fn test_corner_hit_bounces_the_picked_axis_only() {
        let block = obstacle(elastic(0.5), 0.0, 0.0, 20.0, 20.0);

        for axis in [Axis::X, Axis::Y] {
            // Centers offset equally on both axes: dx == dy == 1.5
            let mut player = player_at(-15.0, -15.0, 10.0, 20.0);
            let mut resolver = CollisionResolver::new(FixedAxis(axis), 0.1);

            let contact = resolver.resolve_one(&mut player, &hit(&block));

            assert_eq!(contact.kind, ContactKind::Corner);
            assert_eq!(contact.axis, axis);
            // Flush on both axes regardless of the pick
            assert_eq!(player.pos, Vec2::new(-20.0, -20.0));
            match axis {
                Axis::X => {
                    assert!((player.vel.x + 5.0).abs() < EPS);
                    assert_eq!(player.vel.y, 20.0);
                }
                Axis::Y => {
                    assert_eq!(player.vel.x, 10.0);
                    assert!((player.vel.y + 10.0).abs() < EPS);
                }
            }
        }
    }

    #[test]
    fn test_corner_band_is_strict() {
        // absDX - absDY just above the band: side case, not corner
        let block = obstacle(elastic(0.5), 0.0, 0.0, 20.0, 20.0);
        let mut player = player_at(-16.5, -15.0, 10.0, 20.0);

        let contact = resolver(0.1).resolve_one(&mut player, &hit(&block));

        assert_eq!(contact.kind, ContactKind::Side);
        assert_eq!(player.pos.y, -15.0, "side hit leaves y alone");
    }

    #[test]
    fn test_random_corner_changes_exactly_one_axis() {
        let block = obstacle(elastic(0.5), 0.0, 0.0, 20.0, 20.0);
        let mut resolver = CollisionResolver::new(RandomAxis::seeded(7), 0.1);
        let mut seen_x = false;
        let mut seen_y = false;

        for _ in 0..64 {
            let mut player = player_at(-15.0, -15.0, 10.0, 20.0);
            let contact = resolver.resolve_one(&mut player, &hit(&block));

            let x_changed = player.vel.x != 10.0;
            let y_changed = player.vel.y != 20.0;
            assert!(x_changed ^ y_changed, "exactly one axis must change");
            assert_eq!(player.pos, Vec2::new(-20.0, -20.0));

            match contact.axis {
                Axis::X => seen_x = true,
                Axis::Y => seen_y = true,
            }
        }
        assert!(seen_x && seen_y, "coin flip should land both ways");
    }

    #[test]
    fn test_seeded_picker_is_reproducible() {
        let mut a = RandomAxis::seeded(1234);
        let mut b = RandomAxis::seeded(1234);
        for _ in 0..32 {
            assert_eq!(a.pick_axis(), b.pick_axis());
        }
    }

    #[test]
    fn test_displace_landing_zeroes_velocity() {
        let ground = obstacle(ResolutionKind::Displace, 0.0, 25.0, 100.0, 20.0);
        let mut player = player_at(0.0, 25.0, 3.0, 50.0);

        let contact = resolver(0.1).resolve_one(&mut player, &hit(&ground));

        assert_eq!(contact.kind, ContactKind::Displace);
        assert_eq!(contact.axis, Axis::Y);
        assert_eq!(player.pos.y, 5.0);
        assert_eq!(player.vel.y, 0.0);
        assert_eq!(player.pos.x, 0.0);
        assert_eq!(player.vel.x, 3.0);
    }

    #[test]
    fn test_displace_side_push_out() {
        let wall = obstacle(ResolutionKind::Displace, 100.0, 0.0, 50.0, 100.0);
        let mut player = player_at(85.0, 30.0, 40.0, -7.0);

        let contact = resolver(0.1).resolve_one(&mut player, &hit(&wall));

        assert_eq!(contact.axis, Axis::X);
        assert_eq!(player.pos.x, 80.0);
        assert_eq!(player.vel.x, 0.0, "displace zeroes, never reflects");
        assert_eq!(player.vel.y, -7.0);

        // No penetration left on the resolved axis
        let depth_x = player.right().min(wall.right()) - player.left().max(wall.left());
        assert!(depth_x <= 0.0);
    }

    #[test]
    fn test_hits_resolve_in_order() {
        // Floor first (displace), then a wall (elastic) on the corrected position
        let floor = obstacle(ResolutionKind::Displace, -100.0, 100.0, 300.0, 20.0);
        let wall = obstacle(elastic(0.5), 15.0, 0.0, 20.0, 90.0);
        let mut player = player_at(0.0, 85.0, 10.0, 10.0);

        let hits = vec![
            Collision { index: 0, entity: &floor },
            Collision { index: 1, entity: &wall },
        ];
        let contacts = resolver(0.1).resolve(&mut player, &hits);

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].kind, ContactKind::Displace);
        assert_eq!(contacts[1].kind, ContactKind::Side);
        assert_eq!(contacts[1].index, 1);
        assert_eq!(player.pos, Vec2::new(-5.0, 80.0));
        assert!((player.vel.x + 5.0).abs() < EPS);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_bounce_threshold() {
        assert_eq!(bounce(10.0, 0.5, 1.0), -5.0);
        assert_eq!(bounce(1.0, 0.5, 1.0), 0.0);
        assert_eq!(bounce(-4.0, 0.0, 0.0004), 0.0);
        assert_eq!(bounce(-4.0, 1.0, 0.0004), 4.0);
    }
}
