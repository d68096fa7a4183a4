//! Random sampling helpers for Monte Carlo integration.
//!
//! Every function takes the caller's generator explicitly. Workers own
//! their generator, so no global or thread-shared state is involved.

use ember_math::Vec3;
use rand::Rng;

use crate::Color;

/// Uniform deviate in [0, 1).
#[inline]
pub fn gen_f32<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>()
}

/// Uniform deviate in [min, max).
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Random point strictly inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random direction uniformly distributed on the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        // Too short to normalize reliably
        if len_sq > 1e-12 {
            return p / len_sq.sqrt();
        }
    }
}

/// Random point strictly inside the unit disk in the XY plane.
pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(random_range(rng, -1.0, 1.0), random_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random color with every channel in [0, 1).
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::new(gen_f32(rng), gen_f32(rng), gen_f32(rng))
}

/// Random color with every channel in [min, max).
pub fn random_color_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> Color {
    Color::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}
