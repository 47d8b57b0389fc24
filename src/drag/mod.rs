//! Pointer grab-and-drag of dynamic bodies through a breakable
//! point-to-point constraint.
//!
//! Single-pointer model: at most one session at a time. The grabbed body is
//! never positioned directly; the session only moves the constraint pivot
//! and lets the solver pull the body there, which keeps dragging stable and
//! collision-aware.

use crate::math::{PointerRay, Real, Vect};
use crate::physics::{BodyHandle, ConstraintHandle, PhysicsWorld};
use crate::scene::RenderScene;
use crate::InteractionError;

/// Impulse magnitude a grab must withstand before the engine severs it. The
/// squared value is deliberately huge so normal simulation forces never
/// break a grab.
pub const GRAB_BREAK_IMPULSE: Real = 200.0;

/// Upper bound on pick-ray length.
const MAX_PICK_DISTANCE: Real = 1.0e4;

/// State of one active grab.
#[derive(Copy, Clone, Debug)]
pub struct DragSession {
    pub body: BodyHandle,
    /// Grab point in the body's local frame.
    pub local_grab_offset: Vect,
    /// Ray-origin-to-grab-point distance at pick time; the drag target stays
    /// at this distance along the pointer ray.
    pub grab_distance: Real,
    pub constraint: ConstraintHandle,
}

#[derive(Default)]
pub struct DragConstraintController {
    session: Option<DragSession>,
}

impl DragConstraintController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Tries to grab the nearest dynamic body under `ray`.
    ///
    /// Fails with `NoHit` when the ray misses or the nearest body is
    /// immovable (zero mass), and with `AlreadyDragging` when a session is
    /// already open; the open session is left untouched.
    pub fn begin_drag<P: PhysicsWorld, S: RenderScene>(
        &mut self,
        ray: &PointerRay,
        physics: &mut P,
        scene: &mut S,
    ) -> Result<(), InteractionError> {
        if self.session.is_some() {
            return Err(InteractionError::AlreadyDragging);
        }

        let hit = physics
            .cast_ray(ray, MAX_PICK_DISTANCE)
            .ok_or(InteractionError::NoHit)?;
        if physics.body_mass(hit.body) <= 0.0 {
            return Err(InteractionError::NoHit);
        }
        let pose = physics.body_pose(hit.body).ok_or(InteractionError::NoHit)?;

        let local_anchor = pose.inverse_transform_point(&hit.point);
        let constraint = physics.add_grab_constraint(hit.body, local_anchor, hit.point);
        physics.set_breaking_impulse_threshold(constraint, GRAB_BREAK_IMPULSE * GRAB_BREAK_IMPULSE);
        physics.wake_up(hit.body);

        scene.set_camera_controls_enabled(false);

        log::debug!("grabbed body {:?} at {:?}", hit.body, hit.point);
        self.session = Some(DragSession {
            body: hit.body,
            local_grab_offset: local_anchor.coords,
            grab_distance: (hit.point - ray.origin).norm(),
            constraint,
        });
        Ok(())
    }

    /// Moves the grab pivot to the point at `grab_distance` along `ray`.
    /// No-op without an open session.
    pub fn update_drag<P: PhysicsWorld>(&mut self, ray: &PointerRay, physics: &mut P) {
        if let Some(session) = &self.session {
            let target = ray.point_at(session.grab_distance);
            physics.set_grab_pivot(session.constraint, target);
        }
    }

    /// Releases the grab: removes the constraint and hands the body back to
    /// the simulation. Safe to call without an open session.
    pub fn end_drag<P: PhysicsWorld, S: RenderScene>(&mut self, physics: &mut P, scene: &mut S) {
        if let Some(session) = self.session.take() {
            physics.remove_constraint(session.constraint);
            scene.set_camera_controls_enabled(true);
            log::debug!("released body {:?}", session.body);
        }
    }

    /// Reacts to engine-severed constraints: if the open session's
    /// constraint broke, the session ends implicitly (the engine already
    /// removed the constraint). Returns whether the session was ended.
    pub fn handle_broken_constraints<S: RenderScene>(
        &mut self,
        broken: &[ConstraintHandle],
        scene: &mut S,
    ) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        if !broken.contains(&session.constraint) {
            return false;
        }

        log::debug!("grab on body {:?} severed by the engine", session.body);
        self.session = None;
        scene.set_camera_controls_enabled(true);
        true
    }
}
