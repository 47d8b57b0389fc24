//! Narrow physics-engine boundary consumed by the interaction controllers.
//!
//! The capability set is exactly what the manipulation core needs: body
//! creation/removal, stepping, transform/mass read-back, impulses and
//! activation, grab (point-to-point) constraint management, ray queries, and
//! broken-constraint notifications. Everything else the engine can do stays
//! behind the adapter.

use crate::math::{Iso, Point, PointerRay, Real, Vect};
use crate::ShapeDesc;

pub use self::rapier_world::RapierWorld;

mod rapier_world;

/// Opaque handle to an engine-owned rigid body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u32, pub u32);

/// Opaque handle to an engine-owned grab constraint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstraintHandle(pub u32, pub u32);

/// Nearest intersection returned by [`PhysicsWorld::cast_ray`].
#[derive(Copy, Clone, Debug)]
pub struct RayHit {
    pub body: BodyHandle,
    /// World-space hit point.
    pub point: Point,
    /// Distance from the ray origin to the hit point.
    pub toi: Real,
}

/// Description of a rigid body and its collision shape.
#[derive(Copy, Clone, Debug)]
pub struct BodyDesc {
    pub shape: ShapeDesc,
    /// Zero mass makes the body fixed.
    pub mass: Real,
    pub friction: Real,
    pub restitution: Real,
    pub pose: Iso,
    pub linvel: Vect,
    /// Keep the body permanently activated (never put to sleep).
    pub keep_awake: bool,
    pub ccd: bool,
}

impl BodyDesc {
    pub fn dynamic(shape: ShapeDesc, mass: Real) -> Self {
        Self {
            shape,
            mass,
            friction: 0.5,
            restitution: 0.0,
            pose: Iso::identity(),
            linvel: Vect::zeros(),
            keep_awake: false,
            ccd: false,
        }
    }

    pub fn fixed(shape: ShapeDesc) -> Self {
        Self::dynamic(shape, 0.0)
    }

    pub fn position(mut self, position: Point) -> Self {
        self.pose.translation.vector = position.coords;
        self
    }

    pub fn rotation(mut self, rotation: crate::math::Rot) -> Self {
        self.pose.rotation = rotation;
        self
    }

    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn linvel(mut self, linvel: Vect) -> Self {
        self.linvel = linvel;
        self
    }

    pub fn keep_awake(mut self) -> Self {
        self.keep_awake = true;
        self
    }

    pub fn ccd_enabled(mut self) -> Self {
        self.ccd = true;
        self
    }
}

/// Engine capability set used by the controllers and the host.
///
/// Implementations own every body and constraint; callers only hold opaque
/// handles and must tolerate handles invalidated by removal.
pub trait PhysicsWorld {
    fn insert_body(&mut self, desc: &BodyDesc) -> BodyHandle;

    fn remove_body(&mut self, body: BodyHandle);

    /// Advances the simulation by `dt` using `substeps` solver sub-steps.
    fn step(&mut self, dt: Real, substeps: usize);

    /// World pose of a body, post-step. `None` for unknown handles.
    fn body_pose(&self, body: BodyHandle) -> Option<Iso>;

    /// Mass of a body; zero for fixed bodies and unknown handles.
    fn body_mass(&self, body: BodyHandle) -> Real;

    fn linear_velocity(&self, body: BodyHandle) -> Vect;

    fn apply_central_impulse(&mut self, body: BodyHandle, impulse: Vect);

    /// Forces the body's activation state to active.
    fn wake_up(&mut self, body: BodyHandle);

    /// Creates a point-to-point grab constraint holding `local_anchor` (in
    /// the body's local frame) coincident with the world-space pivot.
    fn add_grab_constraint(
        &mut self,
        body: BodyHandle,
        local_anchor: Point,
        world_pivot: Point,
    ) -> ConstraintHandle;

    /// Moves the constraint's world pivot. The solver pulls the body toward
    /// the pivot during subsequent steps.
    fn set_grab_pivot(&mut self, constraint: ConstraintHandle, world_pivot: Point);

    /// Impulse magnitude above which the engine severs the constraint and
    /// queues a broken-constraint notification.
    fn set_breaking_impulse_threshold(&mut self, constraint: ConstraintHandle, threshold: Real);

    fn remove_constraint(&mut self, constraint: ConstraintHandle);

    /// Nearest hit of `ray` against the collidable scene, up to `max_toi`.
    fn cast_ray(&self, ray: &PointerRay, max_toi: Real) -> Option<RayHit>;

    /// Constraints the engine severed since the last call. Drained once per
    /// tick by the host.
    fn drain_broken_constraints(&mut self) -> Vec<ConstraintHandle>;
}
