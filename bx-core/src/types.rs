//! Core types for the step loop.
//!
//! Screen-space convention throughout: x grows to the right, y grows
//! downward, so "top" is the smaller y and "bottom" the larger one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::PhysicsError;

// =============================================================================
// Vec2 - 2D Vector
// =============================================================================

/// A 2D vector used for positions, velocities, accelerations and gravity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Component-wise absolute value
    pub fn abs(&self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Read one component by axis.
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Mutable access to one component by axis.
    pub fn get_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Axis
// =============================================================================

/// One of the two coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

// =============================================================================
// Motion Kind
// =============================================================================

/// How the integrator treats a body.
///
/// The three kinds mirror the usual rigid-body taxonomy:
/// - `Dynamic`: own acceleration plus gravity
/// - `Kinematic`: own (scripted) acceleration only, e.g. moving platforms
/// - `Static`: never integrated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionKind {
    #[default]
    Dynamic,
    Kinematic,
    Static,
}

impl FromStr for MotionKind {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dynamic" => Ok(MotionKind::Dynamic),
            "kinematic" => Ok(MotionKind::Kinematic),
            "static" => Ok(MotionKind::Static),
            other => Err(PhysicsError::UnknownSelector {
                what: "motion kind",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MotionKind::Dynamic => "dynamic",
            MotionKind::Kinematic => "kinematic",
            MotionKind::Static => "static",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Resolution Kind
// =============================================================================

/// Collision response an obstacle imposes on the player that hits it.
///
/// In YAML this is written as `{ kind: elastic, restitution: 0.5 }` or
/// `{ kind: displace }`. A missing restitution falls back to
/// [`constants::DEFAULT_RESTITUTION`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResolutionKind {
    /// Push the player out and bounce it, scaling the rebound by `restitution`.
    Elastic {
        #[serde(default = "default_restitution")]
        restitution: f64,
    },
    /// Push the player out and stop it on the penetration axis.
    Displace,
}

fn default_restitution() -> f64 {
    constants::DEFAULT_RESTITUTION
}

impl ResolutionKind {
    /// Elastic response with a validated coefficient.
    pub fn elastic(restitution: f64) -> Result<Self, PhysicsError> {
        let kind = ResolutionKind::Elastic { restitution };
        kind.validate()?;
        Ok(kind)
    }

    /// Parse a selector string, using `restitution` when it names the elastic kind.
    pub fn from_selector(selector: &str, restitution: Option<f64>) -> Result<Self, PhysicsError> {
        match selector {
            "elastic" => Self::elastic(restitution.unwrap_or(constants::DEFAULT_RESTITUTION)),
            "displace" => Ok(ResolutionKind::Displace),
            other => Err(PhysicsError::UnknownSelector {
                what: "resolution kind",
                value: other.to_string(),
            }),
        }
    }

    /// Restitution coefficient, if this kind bounces.
    pub fn restitution(&self) -> Option<f64> {
        match self {
            ResolutionKind::Elastic { restitution } => Some(*restitution),
            ResolutionKind::Displace => None,
        }
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        match *self {
            ResolutionKind::Elastic { restitution } if !(0.0..=1.0).contains(&restitution) => {
                Err(PhysicsError::InvalidRestitution(restitution))
            }
            _ => Ok(()),
        }
    }
}

impl Default for ResolutionKind {
    fn default() -> Self {
        ResolutionKind::Elastic {
            restitution: constants::DEFAULT_RESTITUTION,
        }
    }
}

impl FromStr for ResolutionKind {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_selector(s, None)
    }
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionKind::Elastic { .. } => f.write_str("elastic"),
            ResolutionKind::Displace => f.write_str("displace"),
        }
    }
}

// =============================================================================
// Constants
// =============================================================================

/// Defaults used when a configuration leaves a value out.
pub mod constants {
    /// Gravity along x (units/s²)
    pub const GRAVITY_X: f64 = 0.0;

    /// Gravity along y (units/s², positive is down)
    pub const GRAVITY_Y: f64 = 9.8;

    /// Rebound speeds below this are snapped to zero
    pub const STICKY_THRESHOLD: f64 = 0.0004;

    /// Restitution for elastic bodies that don't specify one
    pub const DEFAULT_RESTITUTION: f64 = 0.2;

    /// Default body width and height
    pub const DEFAULT_SIZE: f64 = 20.0;

    /// When the normalized center offsets on x and y differ by less than
    /// this, the hit is treated as a corner hit.
    pub const CORNER_BAND: f64 = 0.1;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_operations() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, -5.0);

        assert_eq!(a + b, Vec2::new(5.0, -3.0));
        assert_eq!(a - b, Vec2::new(-3.0, 7.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
        assert_eq!(a.dot(&b), -6.0);
        assert_eq!(b.abs(), Vec2::new(4.0, 5.0));
    }

    #[test]
    fn test_vec2_axis_access() {
        let mut v = Vec2::new(3.0, 4.0);
        assert_eq!(v.get(Axis::X), 3.0);
        *v.get_mut(Axis::Y) = -1.0;
        assert_eq!(v, Vec2::new(3.0, -1.0));
        assert!((Vec2::new(3.0, 4.0).magnitude() - 5.0).abs() < constants::EPSILON);
    }

    #[test]
    fn test_motion_kind_selectors() {
        assert_eq!("dynamic".parse::<MotionKind>().unwrap(), MotionKind::Dynamic);
        assert_eq!("kinematic".parse::<MotionKind>().unwrap(), MotionKind::Kinematic);
        assert_eq!("static".parse::<MotionKind>().unwrap(), MotionKind::Static);

        match "floating".parse::<MotionKind>() {
            Err(PhysicsError::UnknownSelector { what, value }) => {
                assert_eq!(what, "motion kind");
                assert_eq!(value, "floating");
            }
            other => panic!("Expected UnknownSelector, got {:?}", other),
        }
    }

    #[test]
    fn test_resolution_kind_selectors() {
        assert_eq!(
            "elastic".parse::<ResolutionKind>().unwrap(),
            ResolutionKind::Elastic { restitution: 0.2 }
        );
        assert_eq!(
            ResolutionKind::from_selector("elastic", Some(0.5)).unwrap(),
            ResolutionKind::Elastic { restitution: 0.5 }
        );
        // Displace ignores the coefficient
        assert_eq!(
            ResolutionKind::from_selector("displace", Some(0.9)).unwrap(),
            ResolutionKind::Displace
        );
        assert!("sticky".parse::<ResolutionKind>().is_err());
    }

    #[test]
    fn test_restitution_range() {
        assert!(ResolutionKind::elastic(0.0).is_ok());
        assert!(ResolutionKind::elastic(1.0).is_ok());
        assert!(matches!(
            ResolutionKind::elastic(1.5),
            Err(PhysicsError::InvalidRestitution(r)) if r == 1.5
        ));
        assert!(ResolutionKind::elastic(-0.1).is_err());
        assert!(ResolutionKind::elastic(f64::NAN).is_err());
    }

    #[test]
    fn test_resolution_kind_yaml() {
        let kind: ResolutionKind = serde_yaml::from_str("kind: elastic").unwrap();
        assert_eq!(kind.restitution(), Some(constants::DEFAULT_RESTITUTION));

        let kind: ResolutionKind = serde_yaml::from_str("kind: elastic\nrestitution: 0.7").unwrap();
        assert_eq!(kind.restitution(), Some(0.7));

        let kind: ResolutionKind = serde_yaml::from_str("kind: displace").unwrap();
        assert_eq!(kind, ResolutionKind::Displace);

        assert!(serde_yaml::from_str::<ResolutionKind>("kind: bouncy").is_err());
    }
}
