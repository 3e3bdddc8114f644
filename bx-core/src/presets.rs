//! Preset loader.
//!
//! Loads engine constants and body templates from YAML files, so scenes can be
//! tuned without recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! presets/
//! ├── engine/
//! │   ├── platformer.yaml
//! │   └── zero_g.yaml
//! └── bodies/
//!     ├── player.yaml
//!     ├── ground.yaml
//!     └── ...
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;
use crate::entity::Entity;
use crate::error::PhysicsError;
use crate::types::{MotionKind, ResolutionKind};

/// Error type for preset loading operations.
#[derive(Debug)]
pub enum PresetError {
    IoError(std::io::Error),
    ParseError(serde_yaml::Error),
    NotFound(String),
    /// The file parsed but describes something the engine would reject.
    Invalid(PhysicsError),
}

impl std::fmt::Display for PresetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresetError::IoError(e) => write!(f, "IO error: {}", e),
            PresetError::ParseError(e) => write!(f, "YAML parse error: {}", e),
            PresetError::NotFound(name) => write!(f, "Preset not found: {}", name),
            PresetError::Invalid(e) => write!(f, "Invalid preset: {}", e),
        }
    }
}

impl std::error::Error for PresetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PresetError::IoError(e) => Some(e),
            PresetError::ParseError(e) => Some(e),
            PresetError::Invalid(e) => Some(e),
            PresetError::NotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for PresetError {
    fn from(err: std::io::Error) -> Self {
        PresetError::IoError(err)
    }
}

impl From<serde_yaml::Error> for PresetError {
    fn from(err: serde_yaml::Error) -> Self {
        PresetError::ParseError(err)
    }
}

impl From<PhysicsError> for PresetError {
    fn from(err: PhysicsError) -> Self {
        PresetError::Invalid(err)
    }
}

/// Template for a body: size, motion kind and collision response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPreset {
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub motion: MotionKind,
    #[serde(default)]
    pub resolution: ResolutionKind,
}

impl BodyPreset {
    /// Build a validated entity from this template with its top-left corner at (x, y).
    pub fn spawn(&self, x: f64, y: f64) -> Result<Entity, PhysicsError> {
        Ok(Entity::with_dimensions(self.resolution, self.motion, self.width, self.height)?.at(x, y))
    }
}

/// Preset loader with configurable base directory.
pub struct PresetLoader {
    base_path: PathBuf,
}

impl PresetLoader {
    /// Create a new loader with the given base path.
    ///
    /// The base path should contain `engine/` and `bodies/` subdirectories.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load engine constants by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = PresetLoader::new("presets");
    /// let config = loader.load_engine("platformer")?;
    /// ```
    pub fn load_engine(&self, name: &str) -> Result<EngineConfig, PresetError> {
        let config: EngineConfig = self.load_yaml("engine", name)?;
        config.validate()?;
        info!("loaded engine preset '{}'", name);
        Ok(config)
    }

    /// Load a body template by name.
    pub fn load_body(&self, name: &str) -> Result<BodyPreset, PresetError> {
        let preset: BodyPreset = self.load_yaml("bodies", name)?;
        // Surface bad sizes or coefficients at load time, not at spawn time
        preset.spawn(0.0, 0.0)?;
        info!("loaded body preset '{}' ({})", name, preset.name);
        Ok(preset)
    }

    /// List all available engine presets.
    pub fn list_engines(&self) -> Result<Vec<String>, PresetError> {
        self.list_presets("engine")
    }

    /// List all available body presets.
    pub fn list_bodies(&self) -> Result<Vec<String>, PresetError> {
        self.list_presets("bodies")
    }

    fn load_yaml<T: serde::de::DeserializeOwned>(
        &self,
        subdir: &str,
        name: &str,
    ) -> Result<T, PresetError> {
        let path = self.base_path.join(subdir).join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(PresetError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    fn list_presets(&self, subdir: &str) -> Result<Vec<String>, PresetError> {
        let path = self.base_path.join(subdir);
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.ends_with(".yaml") {
                names.push(name.trim_end_matches(".yaml").to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
