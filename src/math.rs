//! Scalar and algebra aliases shared across the crate.

pub type Real = f32;
pub type Vect = nalgebra::Vector3<Real>;
pub type Point = nalgebra::Point3<Real>;
pub type Rot = nalgebra::UnitQuaternion<Real>;
pub type Iso = nalgebra::Isometry3<Real>;

/// A pointer ray in world space, with a unit direction.
#[derive(Copy, Clone, Debug)]
pub struct PointerRay {
    pub origin: Point,
    pub dir: Vect,
}

impl PointerRay {
    /// Builds a ray, normalizing `dir`.
    pub fn new(origin: Point, dir: Vect) -> Self {
        Self {
            origin,
            dir: dir.normalize(),
        }
    }

    /// The point at distance `t` along the ray.
    pub fn point_at(&self, t: Real) -> Point {
        self.origin + self.dir * t
    }
}
