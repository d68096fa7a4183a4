use anyhow::{Context, Result};
use clap::Parser;
use ember_renderer::{random_scene, render_bands, save_ppm, scene_rng, single_sphere_scene, Camera, Color};
use std::time::Instant;

mod cli;

use cli::{Args, SceneChoice};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Ember");

    let config = args.render_config();
    let camera = Camera::new(&args.camera_settings());

    // Build the scene once; workers only read it
    let start = Instant::now();
    let scene = match args.scene {
        SceneChoice::Cover => {
            let mut rng = scene_rng(config.seed);
            random_scene(&mut rng)
        }
        SceneChoice::Single => single_sphere_scene(Color::splat(0.5)),
    };
    log::info!("Scene with {} objects built in {:.2?}", scene.len(), start.elapsed());

    let start = Instant::now();
    let image = render_bands(&camera, &scene, &config).context("Render failed")?;
    log::info!("Rendered in {:.2?}", start.elapsed());

    save_ppm(&args.output, &image).with_context(|| format!("Failed to save {}", args.output))?;

    log::info!("Done");
    Ok(())
}
