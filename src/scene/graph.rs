//! Retained scene graph: a pose store plus an orbit camera.
//!
//! There is no actual rendering here; the graph keeps whatever state a
//! drawing layer would consume (shapes, colors, poses) and answers the
//! camera queries the interaction core needs.

use std::collections::HashMap;

use crate::camera::OrbitCamera;
use crate::math::{Iso, PointerRay, Real};
use crate::scene::{NodeDesc, NodeHandle, RenderScene};
use crate::ShapeDesc;

#[derive(Copy, Clone, Debug)]
pub struct SceneNode {
    pub shape: ShapeDesc,
    pub color: [Real; 3],
    pub pose: Iso,
}

pub struct SceneGraph {
    nodes: HashMap<NodeHandle, SceneNode>,
    next_id: u64,
    camera: OrbitCamera,
    controls_enabled: bool,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new(OrbitCamera::default())
    }
}

impl SceneGraph {
    pub fn new(camera: OrbitCamera) -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 0,
            camera,
            controls_enabled: true,
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn node(&self, node: NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Orbit input from the navigation layer. Ignored while the controls
    /// are disabled by an open drag session.
    pub fn apply_orbit_input(&mut self, dx: Real, dy: Real) {
        if self.controls_enabled {
            self.camera.rotate(dx, dy);
        }
    }
}

impl RenderScene for SceneGraph {
    fn add_node(&mut self, desc: &NodeDesc) -> NodeHandle {
        let handle = NodeHandle(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            handle,
            SceneNode {
                shape: desc.shape,
                color: desc.color,
                pose: desc.pose,
            },
        );
        handle
    }

    fn remove_node(&mut self, node: NodeHandle) {
        self.nodes.remove(&node);
    }

    fn set_node_pose(&mut self, node: NodeHandle, pose: Iso) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.pose = pose;
        }
    }

    fn node_pose(&self, node: NodeHandle) -> Option<Iso> {
        self.nodes.get(&node).map(|n| n.pose)
    }

    fn set_camera_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    fn camera_controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    fn pointer_ray(&self, ndc: [Real; 2]) -> PointerRay {
        self.camera.ray_from_ndc(ndc)
    }
}
