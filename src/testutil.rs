//! Scripted engine stand-ins for unit tests.
//!
//! `TestPhysics` and `TestScene` record every call the controllers make so
//! tests can assert on side effects without a real engine. Ray casts return
//! whatever `next_ray_hit` holds, regardless of the ray.

use std::collections::HashMap;

use crate::math::{Iso, Point, PointerRay, Real, Vect};
use crate::physics::{BodyDesc, BodyHandle, ConstraintHandle, PhysicsWorld, RayHit};
use crate::scene::{NodeDesc, NodeHandle, RenderScene};

pub struct TestBody {
    pub mass: Real,
    pub pose: Iso,
}

pub struct TestConstraint {
    pub body: BodyHandle,
    pub pivot: Point,
    pub threshold: Real,
}

#[derive(Default)]
pub struct TestPhysics {
    pub bodies: HashMap<BodyHandle, TestBody>,
    pub constraints: HashMap<ConstraintHandle, TestConstraint>,
    pub next_ray_hit: Option<RayHit>,
    pub impulses: Vec<(BodyHandle, Vect)>,
    pub woken: Vec<BodyHandle>,
    pub steps: Vec<(Real, usize)>,
    pub removed_constraints: Vec<ConstraintHandle>,
    pub broken_queue: Vec<ConstraintHandle>,
    next_body: u32,
    next_constraint: u32,
}

impl TestPhysics {
    pub fn add_test_body(&mut self, mass: Real, position: Point) -> BodyHandle {
        let handle = BodyHandle(self.next_body, 0);
        self.next_body += 1;
        self.bodies.insert(
            handle,
            TestBody {
                mass,
                pose: Iso::translation(position.x, position.y, position.z),
            },
        );
        handle
    }
}

impl PhysicsWorld for TestPhysics {
    fn insert_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.next_body, 0);
        self.next_body += 1;
        self.bodies.insert(
            handle,
            TestBody {
                mass: desc.mass,
                pose: desc.pose,
            },
        );
        handle
    }

    fn remove_body(&mut self, body: BodyHandle) {
        self.bodies.remove(&body);
    }

    fn step(&mut self, dt: Real, substeps: usize) {
        self.steps.push((dt, substeps));
    }

    fn body_pose(&self, body: BodyHandle) -> Option<Iso> {
        self.bodies.get(&body).map(|b| b.pose)
    }

    fn body_mass(&self, body: BodyHandle) -> Real {
        self.bodies.get(&body).map(|b| b.mass).unwrap_or(0.0)
    }

    fn linear_velocity(&self, _body: BodyHandle) -> Vect {
        Vect::zeros()
    }

    fn apply_central_impulse(&mut self, body: BodyHandle, impulse: Vect) {
        self.impulses.push((body, impulse));
    }

    fn wake_up(&mut self, body: BodyHandle) {
        self.woken.push(body);
    }

    fn add_grab_constraint(
        &mut self,
        body: BodyHandle,
        _local_anchor: Point,
        world_pivot: Point,
    ) -> ConstraintHandle {
        let handle = ConstraintHandle(self.next_constraint, 0);
        self.next_constraint += 1;
        self.constraints.insert(
            handle,
            TestConstraint {
                body,
                pivot: world_pivot,
                threshold: Real::MAX,
            },
        );
        handle
    }

    fn set_grab_pivot(&mut self, constraint: ConstraintHandle, world_pivot: Point) {
        if let Some(constraint) = self.constraints.get_mut(&constraint) {
            constraint.pivot = world_pivot;
        }
    }

    fn set_breaking_impulse_threshold(&mut self, constraint: ConstraintHandle, threshold: Real) {
        if let Some(constraint) = self.constraints.get_mut(&constraint) {
            constraint.threshold = threshold;
        }
    }

    fn remove_constraint(&mut self, constraint: ConstraintHandle) {
        self.constraints.remove(&constraint);
        self.removed_constraints.push(constraint);
    }

    fn cast_ray(&self, _ray: &PointerRay, _max_toi: Real) -> Option<RayHit> {
        self.next_ray_hit
    }

    fn drain_broken_constraints(&mut self) -> Vec<ConstraintHandle> {
        std::mem::take(&mut self.broken_queue)
    }
}

#[derive(Default)]
pub struct TestScene {
    pub nodes: HashMap<NodeHandle, Iso>,
    pub removed: Vec<NodeHandle>,
    pub controls_disabled: bool,
    next_node: u64,
}

impl TestScene {
    pub fn add_test_node(&mut self) -> NodeHandle {
        let handle = NodeHandle(self.next_node);
        self.next_node += 1;
        self.nodes.insert(handle, Iso::identity());
        handle
    }
}

impl RenderScene for TestScene {
    fn add_node(&mut self, desc: &NodeDesc) -> NodeHandle {
        let handle = NodeHandle(self.next_node);
        self.next_node += 1;
        self.nodes.insert(handle, desc.pose);
        handle
    }

    fn remove_node(&mut self, node: NodeHandle) {
        self.nodes.remove(&node);
        self.removed.push(node);
    }

    fn set_node_pose(&mut self, node: NodeHandle, pose: Iso) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            *entry = pose;
        }
    }

    fn node_pose(&self, node: NodeHandle) -> Option<Iso> {
        self.nodes.get(&node).copied()
    }

    fn set_camera_controls_enabled(&mut self, enabled: bool) {
        self.controls_disabled = !enabled;
    }

    fn camera_controls_enabled(&self) -> bool {
        !self.controls_disabled
    }

    /// A straight -z ray from a plane at z = 20, good enough for tests that
    /// never rely on perspective.
    fn pointer_ray(&self, ndc: [Real; 2]) -> PointerRay {
        PointerRay::new(
            Point::new(ndc[0] * 10.0, ndc[1] * 10.0, 20.0),
            Vect::new(0.0, 0.0, -1.0),
        )
    }
}
