//! Scene aggregate: a material arena plus an ordered list of primitives.

use ember_math::{Interval, Vec3};

use crate::error::SceneError;
use crate::{HitRecord, Hittable, Material, Ray, Sphere};

/// Index of a material in the scene's material arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// Geometry a scene can hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
}

impl Primitive {
    fn material(&self) -> MaterialId {
        match self {
            Primitive::Sphere(sphere) => sphere.material(),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

/// The immutable world consumed by the renderer.
///
/// Materials live in an arena owned by the scene and primitives refer to
/// them by [`MaterialId`]. Once built the scene is only read, so a shared
/// reference can be handed to every render worker.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    materials: Vec<Material>,
    objects: Vec<Primitive>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and return its id.
    pub fn add_material(&mut self, material: impl Into<Material>) -> MaterialId {
        self.materials.push(material.into());
        MaterialId(self.materials.len() - 1)
    }

    /// Add a primitive. Its material must already be registered.
    pub fn add(&mut self, primitive: impl Into<Primitive>) -> Result<(), SceneError> {
        let primitive = primitive.into();
        let id = primitive.material();
        if id.0 >= self.materials.len() {
            return Err(SceneError::UnknownMaterial(id));
        }
        self.objects.push(primitive);
        Ok(())
    }

    /// Add a sphere with a freshly registered material.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: impl Into<Material>) {
        let id = self.add_material(material);
        self.objects.push(Primitive::Sphere(Sphere::new(center, radius, id)));
    }

    /// Look up a material.
    ///
    /// Ids come from [`Scene::add_material`] and every stored primitive was
    /// checked on insertion, so ids found in hit records are always valid.
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn objects(&self) -> &[Primitive] {
        &self.objects
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

impl Hittable for Scene {
    /// Closest hit over all objects.
    ///
    /// The upper bound shrinks to the nearest hit found so far, so later
    /// objects only report hits that are strictly closer.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
