//! Configuration for the orrery.
//!
//! Settings persist to disk as `config.ron` and can be overridden from the
//! command line. Unknown fields are ignored and missing sections fall back to
//! their defaults, so older and newer config files both load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{AnimationConfig, AssetConfig, Config, DebugConfig, SphereConfig, WindowConfig};
pub use error::ConfigError;
