//! Error type for entity construction and stepping.

/// Everything the core can reject.
///
/// No-overlap is not an error: an empty hit list simply skips resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Width or height is zero, negative, or not finite.
    InvalidDimensions { width: f64, height: f64 },
    /// Restitution outside [0, 1].
    InvalidRestitution(f64),
    /// A motion or resolution kind given by name that doesn't exist.
    UnknownSelector { what: &'static str, value: String },
    /// Negative or non-finite timestep.
    InvalidTimestep(f64),
    /// Engine configuration that can't drive a simulation.
    InvalidConfig(String),
}

impl std::fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhysicsError::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions: {}x{} (both must be > 0)", width, height)
            }
            PhysicsError::InvalidRestitution(r) => {
                write!(f, "Invalid restitution: {} (must be within [0, 1])", r)
            }
            PhysicsError::UnknownSelector { what, value } => {
                write!(f, "Unknown {}: {}", what, value)
            }
            PhysicsError::InvalidTimestep(dt) => write!(f, "Invalid timestep: {}", dt),
            PhysicsError::InvalidConfig(msg) => write!(f, "Invalid engine config: {}", msg),
        }
    }
}

impl std::error::Error for PhysicsError {}
