//! Python bindings for the bx-core step loop.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from bx_physics import Simulation
//!
//! sim = Simulation(gravity_y=9.8, seed=42)
//! sim.set_player_position(0.0, 0.0)
//! sim.add_obstacle(0.0, 100.0, 640.0, 40.0, "displace")
//!
//! for _ in range(120):
//!     sim.step(1 / 60)
//!     pos = sim.player_position()
//!     print(f"Player at ({pos.x}, {pos.y})")
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use bx_core::collision::ContactKind;
use bx_core::{Engine, EngineConfig, Entity, MotionKind, PhysicsError, Vec2 as CoreVec2};

fn to_py_err(err: PhysicsError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// 2D vector for positions and velocities.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec2 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
}

#[pymethods]
impl Vec2 {
    #[new]
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn __repr__(&self) -> String {
        format!("Vec2({:.4}, {:.4})", self.x, self.y)
    }

    fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    fn to_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<CoreVec2> for Vec2 {
    fn from(v: CoreVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Main simulation class.
///
/// One player box against a list of obstacles.
#[pyclass]
pub struct Simulation {
    engine: Engine,
}

#[pymethods]
impl Simulation {
    /// Create a simulation with a default 20x20 dynamic player at the origin.
    #[new]
    #[pyo3(signature = (gravity_x=0.0, gravity_y=9.8, sticky_threshold=0.0004, seed=None))]
    fn new(
        gravity_x: f64,
        gravity_y: f64,
        sticky_threshold: f64,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let config = EngineConfig {
            gravity: CoreVec2::new(gravity_x, gravity_y),
            sticky_threshold,
            seed,
            ..EngineConfig::default()
        };
        let player = Entity::new(Default::default(), MotionKind::Dynamic).map_err(to_py_err)?;
        let engine = Engine::new(config, player, vec![]).map_err(to_py_err)?;
        Ok(Self { engine })
    }

    /// Current simulation time in seconds.
    #[getter]
    fn time(&self) -> f64 {
        self.engine.time()
    }

    fn player_position(&self) -> Vec2 {
        self.engine.player().pos.into()
    }

    fn player_velocity(&self) -> Vec2 {
        self.engine.player().vel.into()
    }

    fn set_player_position(&mut self, x: f64, y: f64) {
        self.engine.player_mut().pos = CoreVec2::new(x, y);
    }

    fn set_player_velocity(&mut self, vx: f64, vy: f64) {
        self.engine.player_mut().vel = CoreVec2::new(vx, vy);
    }

    /// Set the player's own acceleration (e.g. from input) before stepping.
    fn set_player_acceleration(&mut self, ax: f64, ay: f64) {
        self.engine.player_mut().acc = CoreVec2::new(ax, ay);
    }

    fn set_player_size(&mut self, width: f64, height: f64) -> PyResult<()> {
        self.engine
            .player_mut()
            .set_size(width, height)
            .map_err(to_py_err)
    }

    /// Add an obstacle and return its index.
    ///
    /// `resolution` is "elastic" or "displace"; `motion` is "static",
    /// "kinematic" or "dynamic".
    #[pyo3(signature = (
        x, y, width, height, resolution="elastic", restitution=None, motion="static"
    ))]
    #[allow(clippy::too_many_arguments)]
    fn add_obstacle(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        resolution: &str,
        restitution: Option<f64>,
        motion: &str,
    ) -> PyResult<usize> {
        let resolution = self
            .engine
            .config()
            .resolution(resolution, restitution)
            .map_err(to_py_err)?;
        let motion: MotionKind = motion.parse().map_err(to_py_err)?;
        let body = Entity::with_dimensions(resolution, motion, width, height)
            .map_err(to_py_err)?
            .at(x, y);
        Ok(self.engine.add_body(body))
    }

    /// Set an obstacle's velocity (kinematic platforms).
    fn set_obstacle_velocity(&mut self, index: usize, vx: f64, vy: f64) -> PyResult<()> {
        match self.engine.body_mut(index) {
            Some(body) => {
                body.vel = CoreVec2::new(vx, vy);
                Ok(())
            }
            None => Err(PyValueError::new_err(format!("No obstacle at index {}", index))),
        }
    }

    fn obstacle_position(&self, index: usize) -> PyResult<Vec2> {
        self.engine
            .bodies()
            .get(index)
            .map(|body| body.pos.into())
            .ok_or_else(|| PyValueError::new_err(format!("No obstacle at index {}", index)))
    }

    fn obstacle_count(&self) -> usize {
        self.engine.bodies().len()
    }

    /// Advance simulation by dt seconds.
    fn step(&mut self, dt: f64) -> PyResult<()> {
        self.engine.step(dt).map_err(to_py_err)
    }

    /// Run multiple steps at once (more efficient).
    fn step_n(&mut self, dt: f64, steps: usize) -> PyResult<()> {
        self.engine.step_n(dt, steps).map_err(to_py_err)
    }

    /// Contacts from the last step as (index, axis, kind) tuples,
    /// e.g. (0, "y", "displace").
    fn last_contacts(&self) -> Vec<(usize, String, &'static str)> {
        self.engine
            .last_contacts()
            .iter()
            .map(|contact| {
                let kind = match contact.kind {
                    ContactKind::Side => "side",
                    ContactKind::TopBottom => "top_bottom",
                    ContactKind::Corner => "corner",
                    ContactKind::Displace => "displace",
                };
                (contact.index, contact.axis.to_string(), kind)
            })
            .collect()
    }

    /// Get current state as dict for easy inspection.
    fn state_dict(&self) -> PyResult<PyObject> {
        Python::with_gil(|py| {
            let player = self.engine.player();
            let dict = pyo3::types::PyDict::new(py);
            dict.set_item("time", self.engine.time())?;
            dict.set_item("player_x", player.pos.x)?;
            dict.set_item("player_y", player.pos.y)?;
            dict.set_item("player_vx", player.vel.x)?;
            dict.set_item("player_vy", player.vel.y)?;
            dict.set_item("contacts", self.engine.last_contacts().len())?;
            Ok(dict.into())
        })
    }
}

/// Python module definition.
#[pymodule]
fn bx_physics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec2>()?;
    m.add_class::<Simulation>()?;
    Ok(())
}
