//! Scene construction.

use ember_math::Vec3;
use rand::Rng;

use crate::sampling::{gen_f32, random_color, random_color_range, random_range};
use crate::{Color, Dielectric, Lambertian, Material, Metal, Scene};

/// The final render scene: a grey ground, a grid of small random spheres
/// and three large spheres (glass, diffuse, mirror).
pub fn random_scene<R: Rng + ?Sized>(rng: &mut R) -> Scene {
    let mut scene = Scene::new();

    // Ground
    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, Lambertian::new(Color::splat(0.5)));

    // Small random spheres
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(a as f32 + 0.9 * gen_f32(rng), 0.2, b as f32 + 0.9 * gen_f32(rng));

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material: Material = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_color(rng) * random_color(rng);
                Lambertian::new(albedo).into()
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_color_range(rng, 0.5, 1.0);
                let fuzz = random_range(rng, 0.0, 0.5);
                Metal::new(albedo, fuzz).into()
            } else {
                // Glass
                Dielectric::new(1.5).into()
            };
            scene.add_sphere(center, 0.2, material);
        }
    }

    // Three main spheres
    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, Dielectric::new(1.5));
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));

    log::info!("Created {} objects", scene.len());
    scene
}

/// One large diffuse sphere sitting in front of a camera at the origin
/// looking down -Z.
pub fn single_sphere_scene(albedo: Color) -> Scene {
    let mut scene = Scene::new();
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, Lambertian::new(albedo));
    scene
}
