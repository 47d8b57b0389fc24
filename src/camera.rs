//! Orbit camera and pointer-ray generation.

use std::f32::consts::FRAC_PI_2;

use nalgebra::Perspective3;

use crate::math::{Iso, Point, PointerRay, Real, Vect};

/// Orbit camera parameterized by yaw/pitch angles around a center point.
#[derive(Copy, Clone, Debug)]
pub struct OrbitCamera {
    /// Yaw angle, in radians.
    pub x: Real,
    /// Pitch angle, in radians, in `(0, pi)`.
    pub y: Real,
    pub distance: Real,
    pub center: Point,
    pub rotate_sensitivity: Real,
    pub pan_sensitivity: Real,
    pub fov_y: Real,
    pub aspect: Real,
    pub znear: Real,
    pub zfar: Real,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 1.0,
            distance: 40.0,
            center: Point::origin(),
            rotate_sensitivity: 0.1,
            pan_sensitivity: 4.0,
            fov_y: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            znear: 0.2,
            zfar: 2000.0,
        }
    }
}

impl OrbitCamera {
    /// World-space eye position.
    pub fn eye(&self) -> Point {
        let yaw = self.x + FRAC_PI_2;
        let view_dir = Vect::new(
            yaw.cos() * self.y.sin(),
            self.y.cos(),
            -yaw.sin() * self.y.sin(),
        );
        self.center + view_dir * self.distance
    }

    /// Repositions the orbit so the camera sits at `eye` looking at `at`.
    pub fn look_at(&mut self, eye: Point, at: Point) {
        self.center = at;

        let view_dir = eye - at;
        self.distance = view_dir.norm();

        if self.distance > 0.0 {
            self.y = (view_dir.y / self.distance).acos();
            self.x = (-view_dir.z).atan2(view_dir.x) - FRAC_PI_2;
        }
    }

    /// Orbits the camera by pointer deltas, scaled by the rotate
    /// sensitivity. Pitch is kept away from the poles.
    pub fn rotate(&mut self, dx: Real, dy: Real) {
        self.x -= dx * self.rotate_sensitivity;
        self.y = (self.y - dy * self.rotate_sensitivity).clamp(0.01, std::f32::consts::PI - 0.01);
    }

    pub fn zoom(&mut self, amount: Real) {
        self.distance = (self.distance - amount).max(self.znear);
    }

    pub fn view(&self) -> Iso {
        Iso::look_at_rh(&self.eye(), &self.center, &Vect::y())
    }

    pub fn projection(&self) -> Perspective3<Real> {
        Perspective3::new(self.aspect, self.fov_y, self.znear, self.zfar)
    }

    /// World-space pointer ray through the given normalized device
    /// coordinates (`[-1, 1]` on both axes, y up).
    pub fn ray_from_ndc(&self, ndc: [Real; 2]) -> PointerRay {
        let ndc_to_world = self.view().inverse().to_homogeneous() * self.projection().inverse();
        let near = ndc_to_world.transform_point(&Point::new(ndc[0], ndc[1], -1.0));
        let far = ndc_to_world.transform_point(&Point::new(ndc[0], ndc[1], 1.0));
        PointerRay::new(near, far - near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::point;

    #[test]
    fn look_at_round_trips_through_eye() {
        let mut camera = OrbitCamera::default();
        let eye = point![15.0, 20.0, 20.0];
        let at = point![0.0, 7.0, 0.0];
        camera.look_at(eye, at);

        let recovered = camera.eye();
        assert_relative_eq!(recovered.x, eye.x, epsilon = 1.0e-3);
        assert_relative_eq!(recovered.y, eye.y, epsilon = 1.0e-3);
        assert_relative_eq!(recovered.z, eye.z, epsilon = 1.0e-3);
    }

    #[test]
    fn center_ray_points_at_the_orbit_center() {
        let mut camera = OrbitCamera::default();
        camera.look_at(point![-15.0, 10.0, 25.0], point![0.0, 1.0, 0.0]);

        let ray = camera.ray_from_ndc([0.0, 0.0]);
        let expected = (camera.center - camera.eye()).normalize();
        assert_relative_eq!(ray.dir.x, expected.x, epsilon = 1.0e-3);
        assert_relative_eq!(ray.dir.y, expected.y, epsilon = 1.0e-3);
        assert_relative_eq!(ray.dir.z, expected.z, epsilon = 1.0e-3);
    }

    #[test]
    fn ray_origin_sits_on_the_near_plane() {
        let camera = OrbitCamera::default();
        let ray = camera.ray_from_ndc([0.3, -0.2]);
        let to_origin = ray.origin - camera.eye();
        assert!(to_origin.norm() >= camera.znear * 0.99);
        assert!(to_origin.norm() < camera.distance);
    }
}
