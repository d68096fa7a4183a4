//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounce budget
//! - Sky gradient lighting
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction to 8-bit output

use crate::sampling::gen_f32;
use crate::{Camera, Color, Hittable, Ray, RenderConfig, Scene};
use ember_math::Interval;
use rand::Rng;

/// Lower bound for hit parameters; skips self-intersection at t ≈ 0.
pub const T_MIN: f32 = 0.001;

/// Range output channels are clamped to before quantizing.
const INTENSITY: Interval = Interval { min: 0.0, max: 0.999 };

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. Each bounce multiplies the
/// light gathered further along the path by the material's attenuation.
/// Recursion depth is bounded by `depth`.
pub fn ray_color<R: Rng + ?Sized>(ray: &Ray, scene: &Scene, depth: u32, rng: &mut R) -> Color {
    // Bounce budget exhausted, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match scene.material(rec.material).scatter(ray, &rec, rng) {
        Some(scatter) => scatter.attenuation * ray_color(&scatter.scattered, scene, depth - 1, rng),
        // Absorbed
        None => Color::ZERO,
    }
}

/// Compute sky gradient background.
///
/// Blends white (looking down) to sky blue (looking up) by the vertical
/// component of the normalized ray direction.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Estimate the linear color of pixel (i, j).
///
/// `i` counts columns from the left and `j` rows from the bottom of the
/// image plane. Returns the average over `samples_per_pixel` jittered rays.
pub fn render_pixel<R: Rng + ?Sized>(
    camera: &Camera,
    scene: &Scene,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut R,
) -> Color {
    let last_column = config.image_width.saturating_sub(1).max(1) as f32;
    let last_row = config.image_height().saturating_sub(1).max(1) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let u = (i as f32 + gen_f32(rng)) / last_column;
        let v = (j as f32 + gen_f32(rng)) / last_row;
        let ray = camera.get_ray(u, v, rng);
        pixel_color += ray_color(&ray, scene, config.max_depth, rng);
    }

    pixel_color / config.samples_per_pixel.max(1) as f32
}

/// Render consecutive image rows into `pixels`.
///
/// `first_row` is the scanline index (0 = top) of the first row in
/// `pixels`, which must hold a whole number of rows that all lie inside
/// the image.
pub(crate) fn render_rows<R: Rng + ?Sized>(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    first_row: u32,
    pixels: &mut [[u8; 3]],
    rng: &mut R,
) {
    let width = config.image_width as usize;
    let height = config.image_height();
    if width == 0 {
        return;
    }
    let rows = pixels.len().div_ceil(width) as u32;
    assert!(
        first_row.checked_add(rows).is_some_and(|end| end <= height),
        "rows {first_row}..{first_row}+{rows} outside image of height {height}"
    );

    for (offset, row) in pixels.chunks_mut(width).enumerate() {
        // Scanlines run top to bottom, image-plane rows bottom to top
        let j = height - 1 - (first_row + offset as u32);
        for (i, pixel) in row.iter_mut().enumerate() {
            let color = render_pixel(camera, scene, i as u32, j, config, rng);
            *pixel = color_to_rgb8(color);
        }
    }
}

/// Finished 8-bit image, stored in scanline order (top row first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at column x of scanline y.
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at column x of scanline y.
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// All pixels of scanline y.
    pub fn row(&self, y: u32) -> &[[u8; 3]] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded; every pixel is drawn from `rng`.
pub fn render<R: Rng + ?Sized>(camera: &Camera, scene: &Scene, config: &RenderConfig, rng: &mut R) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.image_width, config.image_height());
    render_rows(camera, scene, config, 0, &mut image.pixels, rng);
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CameraSettings, Dielectric, Lambertian, Metal, Vec3};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_camera() -> Camera {
        Camera::new(
            &CameraSettings::default()
                .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
                .with_lens(90.0, 0.0, 1.0)
                .with_aspect_ratio(2.0),
        )
    }

    fn test_config() -> RenderConfig {
        RenderConfig::default().with_resolution(40, 2.0).with_quality(8, 1)
    }

    fn grey_sphere_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, Lambertian::new(Color::splat(0.5)));
        scene
    }

    fn mixed_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, Lambertian::new(Color::new(0.8, 0.8, 0.0)));
        scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, Lambertian::new(Color::new(0.1, 0.2, 0.5)));
        scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, Dielectric::new(1.5));
        scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, Metal::new(Color::new(0.8, 0.6, 0.2), 0.3));
        scene
    }

    #[test]
    fn test_sky_gradient_endpoints() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::NEG_Y));

        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
        assert!((down - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_miss_returns_sky() {
        let scene = grey_sphere_scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.2));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(ray_color(&ray, &scene, 10, &mut rng), sky_gradient(&ray));
    }

    #[test]
    fn test_absorbing_last_bounce_is_black() {
        // Depth 1: the hit scatters but the continuation has no budget left
        let scene = grey_sphere_scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(ray_color(&ray, &scene, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_diffuse_hit_is_attenuated_sky() {
        let scene = grey_sphere_scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..200 {
            let color = ray_color(&ray, &scene, 50, &mut rng);
            // At most half of the brightest sky color after one bounce
            assert!(color.max_element() <= 0.5 + 1e-6, "{color:?}");
            assert!(color.min_element() >= 0.0);
        }
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(color_to_rgb8(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb8(Color::ONE), [255, 255, 255]);
        // Over-exposed values clamp instead of wrapping
        assert_eq!(color_to_rgb8(Color::splat(4.0)), [255, 255, 255]);
        // sqrt(0.25) * 256 = 128
        assert_eq!(color_to_rgb8(Color::splat(0.25)), [128, 128, 128]);
    }

    #[test]
    fn test_image_buffer_indexing() {
        let mut image = ImageBuffer::new(4, 3);
        image.set(2, 1, [1, 2, 3]);

        assert_eq!(image.get(2, 1), [1, 2, 3]);
        assert_eq!(image.pixels[6], [1, 2, 3]);
        assert_eq!(image.row(1)[2], [1, 2, 3]);
        assert_eq!(image.row(0), &[[0; 3]; 4]);
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let scene = grey_sphere_scene();
        let camera = test_camera();
        let config = test_config().with_quality(4, 5);
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel (should hit the sphere)
        let color = render_pixel(&camera, &scene, 20, 10, &config, &mut rng);
        assert!(color.length() > 0.0);
        assert!(color.max_element() <= 0.5 + 1e-6);
    }

    #[test]
    fn test_render_pixel_with_zero_samples_is_black() {
        let scene = grey_sphere_scene();
        let config = test_config().with_quality(0, 5);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(render_pixel(&test_camera(), &scene, 0, 0, &config, &mut rng), Color::ZERO);
    }

    /// True when the rays through all four corners of pixel (i, j) hit the scene.
    fn fully_covered(camera: &Camera, scene: &Scene, config: &RenderConfig, i: u32, j: u32) -> bool {
        let mut rng = StdRng::seed_from_u64(0);
        let w = (config.image_width - 1) as f32;
        let h = (config.image_height() - 1) as f32;
        [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)].iter().all(|(di, dj)| {
            let ray = camera.get_ray((i as f32 + di) / w, (j as f32 + dj) / h, &mut rng);
            scene.hit(&ray, Interval::new(T_MIN, f32::INFINITY)).is_some()
        })
    }

    #[test]
    fn test_sphere_silhouette_is_darker_than_sky_on_same_row() {
        let scene = grey_sphere_scene();
        let camera = test_camera();

        for max_depth in [1, 10] {
            let config = test_config().with_quality(8, max_depth);
            let mut rng = StdRng::seed_from_u64(max_depth as u64);
            let image = render(&camera, &scene, &config, &mut rng);
            let height = config.image_height();

            let mut covered = 0;
            for y in 0..height {
                let j = height - 1 - y;
                // Column 0 looks ~60 degrees left of the sphere: always sky
                let sky = image.get(0, y);
                let sky_sum: u32 = sky.iter().map(|&c| c as u32).sum();
                for x in 0..config.image_width {
                    if !fully_covered(&camera, &scene, &config, x, j) {
                        continue;
                    }
                    covered += 1;
                    let pixel = image.get(x, y);
                    let sum: u32 = pixel.iter().map(|&c| c as u32).sum();
                    assert!(sum < sky_sum, "pixel ({x},{y}) {pixel:?} not darker than sky {sky:?}");
                    assert!(pixel[2] < sky[2]);
                }
            }
            assert!(covered > 0, "the sphere must cover some pixels");
        }
    }

    #[test]
    fn test_render_rows_fills_a_band_in_place() {
        let scene = Scene::new();
        let config = test_config().with_quality(1, 2);
        let mut rng = StdRng::seed_from_u64(4);
        let mut band = vec![[0u8; 3]; 40 * 5];

        // Last five scanlines of the 20-row image
        render_rows(&test_camera(), &scene, &config, 15, &mut band, &mut rng);
        assert!(band.iter().all(|p| p.iter().any(|&c| c > 0)));
    }

    #[test]
    #[should_panic(expected = "outside image")]
    fn test_render_rows_rejects_rows_past_the_bottom() {
        let scene = Scene::new();
        let config = test_config().with_quality(1, 2);
        let mut rng = StdRng::seed_from_u64(4);
        let mut band = vec![[0u8; 3]; 40 * 6];

        render_rows(&test_camera(), &scene, &config, 15, &mut band, &mut rng);
    }

    #[test]
    fn test_render_is_scanline_ordered_sky_on_top() {
        // Empty scene: only the sky gradient, bluer towards the top
        let scene = Scene::new();
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(3);
        let image = render(&test_camera(), &scene, &config, &mut rng);

        let top = image.get(20, 0);
        let bottom = image.get(20, config.image_height() - 1);
        assert!(top[0] < bottom[0], "top {top:?} bottom {bottom:?}");
        assert_eq!(image.pixels.len(), 40 * 20);
    }

    #[test]
    fn test_render_mixed_scene_produces_finite_colors() {
        let scene = mixed_scene();
        let config = test_config().with_quality(4, 20);
        let mut rng = StdRng::seed_from_u64(8);
        let camera = test_camera();

        for j in 0..config.image_height() {
            for i in 0..config.image_width {
                let color = render_pixel(&camera, &scene, i, j, &config, &mut rng);
                assert!(color.is_finite());
                assert!(color.min_element() >= 0.0);
            }
        }
    }

    fn any_direction() -> impl Strategy<Value = Vec3> {
        (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0)
            .prop_map(|(x, y, z)| Vec3::new(x, y, z))
            .prop_filter("non-degenerate", |v| v.length_squared() > 1e-4)
    }

    proptest! {
        #[test]
        fn prop_zero_depth_is_black(
            origin in (-2.0f32..2.0, -2.0f32..2.0, -2.0f32..2.0),
            dir in any_direction(),
            seed in any::<u64>(),
        ) {
            let scene = mixed_scene();
            let ray = Ray::new(Vec3::new(origin.0, origin.1, origin.2), dir);
            let mut rng = StdRng::seed_from_u64(seed);
            prop_assert_eq!(ray_color(&ray, &scene, 0, &mut rng), Color::ZERO);
        }

        #[test]
        fn prop_miss_lies_on_sky_segment(dir in any_direction(), depth in 1u32..50) {
            let scene = Scene::new();
            let ray = Ray::new(Vec3::ZERO, dir);
            let mut rng = StdRng::seed_from_u64(0);
            let color = ray_color(&ray, &scene, depth, &mut rng);

            let a = 0.5 * (dir.normalize().y + 1.0);
            let expected = (1.0 - a) * Color::ONE + a * Color::new(0.5, 0.7, 1.0);
            prop_assert!((color - expected).length() < 1e-6);
            // On the segment: blue stays 1, red and green follow one parameter
            prop_assert!((color.z - 1.0).abs() < 1e-6);
            prop_assert!(((1.0 - color.x) / 0.5 - (1.0 - color.y) / 0.3).abs() < 1e-4);
        }
    }
}
