//! Headless solar system animation.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p orrery-app -- --frames 480 --flat` to animate 480
//! steps with flat-shaded spheres.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use orrery_app::{FrameLoop, HeadlessRenderer, Orrery};
use orrery_assets::TextureSet;
use orrery_config::{CliArgs, Config};
use orrery_space::solar_system;
use tracing::info;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir: PathBuf = match args.config.clone() {
        Some(dir) => dir,
        None => match Config::default_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    if let Err(e) = orrery_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config))
    {
        eprintln!("Logging unavailable: {e}");
    }

    info!("Config directory: {}", config_dir.display());
    run(&config);
    ExitCode::SUCCESS
}

fn run(config: &Config) {
    let bodies = solar_system();
    let textures = TextureSet::load(
        &config.assets.texture_dir,
        bodies.iter().filter_map(|b| b.texture.as_deref()),
    );
    let mut orrery = Orrery::from_config(config, bodies, textures);

    if config.debug.print_meshes {
        for mesh in orrery.meshes() {
            println!("{mesh}");
        }
    }

    let frames = config.animation.frames;
    let mut frame_loop = FrameLoop::new(config.animation.target_fps);
    let mut renderer = HeadlessRenderer::new(config.window.width, config.window.height);
    let mut steps: u64 = 0;

    info!(
        "{}: animating {frames} steps of {}h",
        config.window.title, config.animation.increment_hours
    );
    while steps < frames {
        let tick = frame_loop.tick();
        for _ in 0..tick.updates {
            if steps == frames {
                break;
            }
            orrery.update();
            steps += 1;
        }
        orrery.render(&mut renderer);
        std::thread::sleep(frame_loop.time_until_next_update());
    }

    let stats = renderer.last_frame();
    info!(
        "Rendered {} frames; last frame: {} draws ({} visible), {} triangles, {} textured",
        orrery.frames_rendered(),
        stats.draw_calls,
        stats.visible_bodies,
        stats.triangles,
        stats.textured_draws
    );

    let scene = orrery.scene();
    println!("Hour of day: {:.1}", scene.hour_of_day());
    for (index, body) in scene.bodies().iter().enumerate() {
        let phase = scene.phase(index);
        println!(
            "{:>8}: {:>4} orbits + {:6.1} deg",
            body.name,
            phase.completed(),
            phase.angle_degrees()
        );
    }
}
