//! Solar system animation state: the body catalog, orbital phases, view
//! controls, and the per-frame model transform of every body.

pub mod body;
pub mod command;
pub mod orbital;
pub mod scene;

pub use body::{CelestialBody, Orbit, solar_system};
pub use command::{CommandOutcome, KeyCommand};
pub use orbital::OrbitPhase;
pub use scene::{AnimationSettings, SceneState, VIEW_ANGLE_LIMIT_DEG, VIEW_ANGLE_STEP_DEG};
