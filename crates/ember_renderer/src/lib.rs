//! Ember Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for scenes made of spheres with diffuse,
//! metallic and glass materials, lit by a sky gradient.
//!
//! The scene and camera are built once and shared read-only by every
//! worker. Each worker owns its random number generator and writes a
//! disjoint band of rows of the output image.

mod band;
mod camera;
mod config;
mod error;
mod hittable;
mod material;
mod ppm;
mod renderer;
mod sampling;
mod scene;
mod sphere;
mod world;

pub use band::{
    generate_bands, render_bands, resolve_worker_count, scene_rng, worker_rng, Band, FALLBACK_WORKERS,
};
pub use camera::{Camera, CameraSettings};
pub use config::RenderConfig;
pub use error::{RenderError, RenderResult, SceneError};
pub use hittable::{HitRecord, Hittable};
pub use material::{reflect, reflectance, refract, Color, Dielectric, Lambertian, Material, Metal, Scatter};
pub use ppm::{save_ppm, write_ppm};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, sky_gradient,
    ImageBuffer, T_MIN,
};
pub use sampling::{
    gen_f32, random_color, random_color_range, random_in_unit_disk, random_in_unit_sphere,
    random_range, random_unit_vector,
};
pub use scene::{MaterialId, Primitive, Scene};
pub use sphere::Sphere;
pub use world::{random_scene, single_sphere_scene};

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Interval, Ray, Vec3};
