//! Narrow render-engine boundary consumed by the interaction controllers.

use crate::math::{Iso, PointerRay, Real};
use crate::ShapeDesc;

pub use self::graph::{SceneGraph, SceneNode};

mod graph;

/// Opaque handle to a scene-owned visual node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub u64);

/// Description of a visual node.
#[derive(Copy, Clone, Debug)]
pub struct NodeDesc {
    pub shape: ShapeDesc,
    pub color: [Real; 3],
    pub pose: Iso,
}

/// Render-side capability set: node management, pose write-back, pointer
/// rays, and camera-navigation gating.
pub trait RenderScene {
    fn add_node(&mut self, desc: &NodeDesc) -> NodeHandle;

    fn remove_node(&mut self, node: NodeHandle);

    fn set_node_pose(&mut self, node: NodeHandle, pose: Iso);

    fn node_pose(&self, node: NodeHandle) -> Option<Iso>;

    /// Enables or disables camera navigation. Disabled while a drag session
    /// is open so dragging and orbiting don't fight over the pointer.
    fn set_camera_controls_enabled(&mut self, enabled: bool);

    fn camera_controls_enabled(&self) -> bool;

    /// World-space pointer ray through the camera at the given normalized
    /// device coordinates.
    fn pointer_ray(&self, ndc: [Real; 2]) -> PointerRay;
}
