//! Collision detection and resolution for the player.
//!
//! - **Detection**: boundary-inclusive AABB overlap of the player against
//!   every collidable, at post-integration positions
//! - **Resolution**: per-hit correction of the player's position and
//!   velocity, chosen by the obstacle's [`ResolutionKind`](crate::types::ResolutionKind)
//!
//! ```text
//!   elastic side hit           displace landing
//!
//!   ┌──┐→  ┃████             ┌──┐ ↓
//!   └──┘ ←─┃████             └──┘
//!          ┃████        ═══════════════ vy = 0
//! ```

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
