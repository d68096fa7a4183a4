use clap::{Parser, ValueEnum};
use ember_renderer::{CameraSettings, RenderConfig, Vec3};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Scenes that can be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// Random field of small spheres around three large ones
    Cover,
    /// A single grey sphere in front of the camera
    Single,
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "Offline path tracer for sphere scenes, writes a PPM image")]
pub struct Args {
    /// Output file path
    #[arg(short, long, default_value = "image.ppm")]
    pub output: String,

    /// Scene to render
    #[arg(long, value_enum, default_value = "cover")]
    pub scene: SceneChoice,

    /// Image width in pixels
    #[arg(long, default_value_t = RenderConfig::default().image_width)]
    pub width: u32,

    /// Image width over height
    #[arg(long, default_value_t = RenderConfig::default().aspect_ratio)]
    pub aspect_ratio: f32,

    /// Number of samples per pixel
    #[arg(short, long, default_value_t = RenderConfig::default().samples_per_pixel)]
    pub samples: u32,

    /// Maximum bounce depth per path
    #[arg(long, default_value_t = RenderConfig::default().max_depth)]
    pub max_depth: u32,

    /// Number of worker threads / row bands (defaults to available cores)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Seed for reproducible renders
    #[arg(long)]
    pub seed: Option<u64>,

    /// Vertical field of view in degrees [default: depends on the scene]
    #[arg(long)]
    pub vfov: Option<f32>,

    /// Lens aperture, 0 disables defocus blur [default: depends on the scene]
    #[arg(long)]
    pub aperture: Option<f32>,

    /// Distance to the plane of perfect focus [default: depends on the scene]
    #[arg(long)]
    pub focus_dist: Option<f32>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            image_width: self.width,
            aspect_ratio: self.aspect_ratio,
            samples_per_pixel: self.samples,
            max_depth: self.max_depth,
            threads: self.threads,
            seed: self.seed,
        }
    }

    /// Camera placement for the chosen scene, with lens overrides applied.
    pub fn camera_settings(&self) -> CameraSettings {
        let base = match self.scene {
            SceneChoice::Cover => CameraSettings::default(),
            SceneChoice::Single => CameraSettings::default()
                .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
                .with_lens(90.0, 0.0, 1.0),
        };
        base.with_lens(
            self.vfov.unwrap_or(base.vfov),
            self.aperture.unwrap_or(base.aperture),
            self.focus_dist.unwrap_or(base.focus_dist),
        )
        .with_aspect_ratio(self.aspect_ratio)
    }
}
