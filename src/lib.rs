//! Interactive rigid-body manipulation on top of a physics/render engine pair.
//!
//! The crate provides two cooperating state machines and a per-frame driver:
//! - [`AimLaunchController`]: hold-to-charge, release-to-fire launching of a
//!   single projectile body, with an oscillating aim indicator.
//! - [`DragConstraintController`]: grab a dynamic body with a pointer ray and
//!   move it through a breakable point-to-point constraint.
//! - [`InteractionHost`]: owns the engines, consumes input events once per
//!   tick, steps the simulation and writes body poses back to the scene.
//!
//! The engines sit behind the [`physics::PhysicsWorld`] and
//! [`scene::RenderScene`] traits; [`physics::RapierWorld`] and
//! [`scene::SceneGraph`] are the bundled implementations.

use crate::math::{Real, Vect};

pub use crate::aim::{AimConfig, AimLaunchController, AimPhase};
pub use crate::drag::{DragConstraintController, DragSession};
pub use crate::host::{InputEvent, InteractionHost, Key};

pub mod aim;
pub mod builtin_scenes;
pub mod camera;
pub mod cli;
pub mod drag;
pub mod host;
pub mod math;
pub mod physics;
pub mod scene;
pub mod styling;

#[cfg(test)]
pub(crate) mod testutil;

/// Collision/display shape shared by body and node descriptors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShapeDesc {
    Ball { radius: Real },
    Cuboid { half_extents: Vect },
    Cylinder { half_height: Real, radius: Real },
}

/// Recoverable interaction outcomes. These are expected, user-driven results
/// (clicking empty space, releasing twice); the host logs them and keeps
/// ticking.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    /// The pick ray hit nothing, or the nearest hit has no draggable
    /// (mass > 0) body.
    #[error("pick ray did not hit a draggable body")]
    NoHit,
    /// A drag session is already open; the single-pointer model rejects a
    /// second grab.
    #[error("a drag session is already active")]
    AlreadyDragging,
    /// The controller already launched its projectile; launchers are
    /// one-shot.
    #[error("projectile was already launched")]
    AlreadyLaunched,
    /// The physics engine severed the grab constraint; treated as an
    /// implicit end of drag.
    #[error("grab constraint broke during the simulation step")]
    ConstraintBroken,
}
