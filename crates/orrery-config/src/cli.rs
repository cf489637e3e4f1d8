//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Toy solar system animation")]
pub struct CliArgs {
    /// Longitude divisions per sphere.
    #[arg(long)]
    pub sectors: Option<u32>,

    /// Latitude divisions per sphere.
    #[arg(long)]
    pub stacks: Option<u32>,

    /// Use flat shading instead of smooth shading.
    #[arg(long)]
    pub flat: bool,

    /// Simulated hours per frame.
    #[arg(long)]
    pub increment: Option<f32>,

    /// Number of frames to run.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Directory containing body textures.
    #[arg(long)]
    pub texture_dir: Option<PathBuf>,

    /// Draw the wireframe overlay.
    #[arg(long)]
    pub wireframe: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(sectors) = args.sectors {
            self.sphere.sector_count = sectors;
        }
        if let Some(stacks) = args.stacks {
            self.sphere.stack_count = stacks;
        }
        if args.flat {
            self.sphere.smooth = false;
        }
        if let Some(increment) = args.increment {
            self.animation.increment_hours = increment;
        }
        if let Some(frames) = args.frames {
            self.animation.frames = frames;
        }
        if let Some(ref dir) = args.texture_dir {
            self.assets.texture_dir = dir.clone();
        }
        if args.wireframe {
            self.debug.wireframe = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
