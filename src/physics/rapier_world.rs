//! Rapier-backed implementation of the physics boundary.
//!
//! Grab constraints are realized the way the drag tool of a physics sandbox
//! usually does it: a dummy kinematic position-based body carries the moving
//! pivot, and a spherical joint pins the grabbed point to it. Rapier has no
//! built-in breaking-impulse threshold, so the adapter reads each grab
//! joint's accumulated linear impulse after every sub-step and severs the
//! joint itself when the threshold is exceeded.

use std::collections::HashMap;

use rapier3d::prelude::{
    CCDSolver, ColliderBuilder, ColliderSet, DefaultBroadPhase, ImpulseJointHandle,
    ImpulseJointSet, IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase,
    PhysicsPipeline, QueryFilter, QueryPipeline, Ray, RigidBodyBuilder, RigidBodyHandle,
    RigidBodySet, SphericalJointBuilder,
};

use crate::math::{Iso, Point, PointerRay, Real, Vect};
use crate::physics::{BodyDesc, BodyHandle, ConstraintHandle, PhysicsWorld, RayHit};
use crate::ShapeDesc;

/// Bookkeeping for one grab constraint.
struct GrabJoint {
    /// The kinematic body carrying the moving pivot.
    pivot_body: RigidBodyHandle,
    threshold: Real,
}

pub struct RapierWorld {
    gravity: Vect,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    grabs: HashMap<ImpulseJointHandle, GrabJoint>,
    broken: Vec<ConstraintHandle>,
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl RapierWorld {
    pub fn new() -> Self {
        Self {
            gravity: Vect::new(0.0, -9.8, 0.0),
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            grabs: HashMap::new(),
            broken: Vec::new(),
        }
    }

    fn remove_body_impl(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Severs every grab joint whose accumulated linear impulse exceeds its
    /// breaking threshold, queueing a notification for each.
    fn sever_overloaded_grabs(&mut self) {
        let mut overloaded = Vec::new();
        for (&handle, grab) in &self.grabs {
            if let Some(joint) = self.impulse_joints.get(handle) {
                let linear_impulse = joint.impulses.fixed_rows::<3>(0).norm();
                if linear_impulse > grab.threshold {
                    overloaded.push(handle);
                }
            }
        }

        for handle in overloaded {
            log::debug!("grab joint {handle:?} exceeded its breaking impulse");
            if let Some(grab) = self.grabs.remove(&handle) {
                self.impulse_joints.remove(handle, true);
                self.remove_body_impl(grab.pivot_body);
                self.broken.push(constraint_handle(handle));
            }
        }
    }
}

impl PhysicsWorld for RapierWorld {
    fn insert_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let builder = if desc.mass > 0.0 {
            RigidBodyBuilder::dynamic()
        } else {
            RigidBodyBuilder::fixed()
        };
        let body = builder
            .position(desc.pose)
            .linvel(desc.linvel)
            .can_sleep(!desc.keep_awake)
            .ccd_enabled(desc.ccd)
            .build();
        let handle = self.bodies.insert(body);

        let mut collider = match desc.shape {
            ShapeDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ShapeDesc::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            ShapeDesc::Cylinder {
                half_height,
                radius,
            } => ColliderBuilder::cylinder(half_height, radius),
        }
        .friction(desc.friction)
        .restitution(desc.restitution);
        if desc.mass > 0.0 {
            collider = collider.mass(desc.mass);
        }
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        // Keep ray queries valid for bodies inserted before the first step.
        self.query_pipeline.update(&self.colliders);

        body_handle(handle)
    }

    fn remove_body(&mut self, body: BodyHandle) {
        self.remove_body_impl(rapier_body(body));
        self.query_pipeline.update(&self.colliders);
    }

    fn step(&mut self, dt: Real, substeps: usize) {
        let substeps = substeps.max(1);
        self.integration_parameters.dt = dt / substeps as Real;

        for _ in 0..substeps {
            self.pipeline.step(
                &self.gravity,
                &self.integration_parameters,
                &mut self.islands,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                Some(&mut self.query_pipeline),
                &(),
                &(),
            );
            self.sever_overloaded_grabs();
        }
    }

    fn body_pose(&self, body: BodyHandle) -> Option<Iso> {
        self.bodies.get(rapier_body(body)).map(|b| *b.position())
    }

    fn body_mass(&self, body: BodyHandle) -> Real {
        // Rapier reports the collider-derived mass even for fixed bodies;
        // only dynamic bodies count as movable here.
        self.bodies
            .get(rapier_body(body))
            .filter(|b| b.is_dynamic())
            .map(|b| b.mass())
            .unwrap_or(0.0)
    }

    fn linear_velocity(&self, body: BodyHandle) -> Vect {
        self.bodies
            .get(rapier_body(body))
            .map(|b| *b.linvel())
            .unwrap_or_else(Vect::zeros)
    }

    fn apply_central_impulse(&mut self, body: BodyHandle, impulse: Vect) {
        if let Some(body) = self.bodies.get_mut(rapier_body(body)) {
            body.apply_impulse(impulse, true);
        }
    }

    fn wake_up(&mut self, body: BodyHandle) {
        if let Some(body) = self.bodies.get_mut(rapier_body(body)) {
            body.wake_up(true);
        }
    }

    fn add_grab_constraint(
        &mut self,
        body: BodyHandle,
        local_anchor: Point,
        world_pivot: Point,
    ) -> ConstraintHandle {
        let pivot_body = RigidBodyBuilder::kinematic_position_based()
            .translation(world_pivot.coords)
            .build();
        let pivot_handle = self.bodies.insert(pivot_body);

        let joint = SphericalJointBuilder::new()
            .local_anchor1(local_anchor)
            .local_anchor2(Point::origin());
        let handle = self
            .impulse_joints
            .insert(rapier_body(body), pivot_handle, joint, true);

        self.grabs.insert(
            handle,
            GrabJoint {
                pivot_body: pivot_handle,
                threshold: Real::MAX,
            },
        );

        constraint_handle(handle)
    }

    fn set_grab_pivot(&mut self, constraint: ConstraintHandle, world_pivot: Point) {
        if let Some(grab) = self.grabs.get(&rapier_joint(constraint)) {
            if let Some(pivot) = self.bodies.get_mut(grab.pivot_body) {
                pivot.set_next_kinematic_translation(world_pivot.coords);
            }
        }
    }

    fn set_breaking_impulse_threshold(&mut self, constraint: ConstraintHandle, threshold: Real) {
        if let Some(grab) = self.grabs.get_mut(&rapier_joint(constraint)) {
            grab.threshold = threshold;
        }
    }

    fn remove_constraint(&mut self, constraint: ConstraintHandle) {
        let handle = rapier_joint(constraint);
        if let Some(grab) = self.grabs.remove(&handle) {
            self.impulse_joints.remove(handle, true);
            self.remove_body_impl(grab.pivot_body);
        }
    }

    fn cast_ray(&self, ray: &PointerRay, max_toi: Real) -> Option<RayHit> {
        let rapier_ray = Ray::new(ray.origin, ray.dir);
        let (collider, toi) = self.query_pipeline.cast_ray(
            &self.bodies,
            &self.colliders,
            &rapier_ray,
            max_toi,
            true,
            QueryFilter::default(),
        )?;
        let body = self.colliders.get(collider)?.parent()?;
        Some(RayHit {
            body: body_handle(body),
            point: rapier_ray.point_at(toi),
            toi,
        })
    }

    fn drain_broken_constraints(&mut self) -> Vec<ConstraintHandle> {
        std::mem::take(&mut self.broken)
    }
}

fn body_handle(handle: RigidBodyHandle) -> BodyHandle {
    let (index, generation) = handle.into_raw_parts();
    BodyHandle(index, generation)
}

fn rapier_body(handle: BodyHandle) -> RigidBodyHandle {
    RigidBodyHandle::from_raw_parts(handle.0, handle.1)
}

fn constraint_handle(handle: ImpulseJointHandle) -> ConstraintHandle {
    let (index, generation) = handle.into_raw_parts();
    ConstraintHandle(index, generation)
}

fn rapier_joint(handle: ConstraintHandle) -> ImpulseJointHandle {
    ImpulseJointHandle::from_raw_parts(handle.0, handle.1)
}
