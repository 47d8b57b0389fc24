//! Ready-made demo scenes.
//!
//! Each builder populates both the physics world and the render scene and
//! returns the handle pairs the host needs for pose write-back, plus the
//! projectile/indicator handles when the scene has a launcher.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Real;
use crate::physics::{BodyDesc, BodyHandle, PhysicsWorld};
use crate::scene::{NodeDesc, NodeHandle, RenderScene};

mod bowling;
mod jenga;

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
pub enum SceneType {
    Bowling,
    Jenga,
}

impl fmt::Display for SceneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneType::Bowling => write!(f, "bowling"),
            SceneType::Jenga => write!(f, "jenga"),
        }
    }
}

pub struct BuiltinScene {
    /// Dynamic (body, node) pairs to register with the host.
    pub dynamic_bodies: Vec<(BodyHandle, NodeHandle)>,
    /// The launchable projectile, if the scene has one.
    pub projectile: Option<BodyHandle>,
    /// The aim indicator node, if the scene has one.
    pub aim_indicator: Option<NodeHandle>,
}

pub fn build_scene<P: PhysicsWorld, S: RenderScene>(
    scene_type: SceneType,
    physics: &mut P,
    scene: &mut S,
) -> BuiltinScene {
    match scene_type {
        SceneType::Bowling => bowling::init_scene(physics, scene),
        SceneType::Jenga => jenga::init_scene(physics, scene),
    }
}

/// Inserts a body and its matching render node.
fn spawn<P: PhysicsWorld, S: RenderScene>(
    physics: &mut P,
    scene: &mut S,
    desc: BodyDesc,
    color: [Real; 3],
) -> (BodyHandle, NodeHandle) {
    let node = scene.add_node(&NodeDesc {
        shape: desc.shape,
        color,
        pose: desc.pose,
    });
    let body = physics.insert_body(&desc);
    (body, node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{TestPhysics, TestScene};

    #[test]
    fn jenga_scene_registers_every_block_for_writeback() {
        let mut physics = TestPhysics::default();
        let mut scene = TestScene::default();
        let built = build_scene(SceneType::Jenga, &mut physics, &mut scene);

        // 15 levels of 3 blocks; the floor is static and not registered.
        assert_eq!(built.dynamic_bodies.len(), 45);
        assert!(built.projectile.is_none());
        assert!(built.aim_indicator.is_none());
        // Floor + 45 blocks.
        assert_eq!(physics.bodies.len(), 46);
        assert_eq!(scene.nodes.len(), 46);
    }

    #[test]
    fn bowling_scene_exposes_the_projectile_and_indicator() {
        let mut physics = TestPhysics::default();
        let mut scene = TestScene::default();
        let built = build_scene(SceneType::Bowling, &mut physics, &mut scene);

        // 10 pins + the ball.
        assert_eq!(built.dynamic_bodies.len(), 11);
        let projectile = built.projectile.expect("bowling has a projectile");
        assert_eq!(physics.body_mass(projectile), 5.0);
        assert!(built.aim_indicator.is_some());
        // Lane + 10 pins + ball in physics; one extra indicator node in the
        // scene.
        assert_eq!(physics.bodies.len(), 12);
        assert_eq!(scene.nodes.len(), 13);
    }
}
