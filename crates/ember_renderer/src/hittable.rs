//! Hittable trait and HitRecord for ray-object intersection.

use crate::{MaterialId, Ray};
use ember_math::{Interval, Vec3};

/// Record of a ray-object intersection.
///
/// Produced by a hit test and consumed by the following scatter step.
/// The material is referenced by id into the scene's material arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material at the intersection point
    pub material: MaterialId,
}

impl HitRecord {
    /// Build a record, orienting the normal against the ray.
    ///
    /// `outward_normal` must have unit length. If the ray travels along it
    /// the ray is inside the surface, so the stored normal is flipped and
    /// `front_face` is false.
    pub fn with_face_normal(
        ray: &Ray,
        t: f32,
        p: Vec3,
        outward_normal: Vec3,
        material: MaterialId,
    ) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p,
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object at a parameter strictly inside `ray_t`.
    ///
    /// A miss is a normal outcome and returns `None`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}
