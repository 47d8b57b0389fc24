//! End-to-end launch flow against the real Rapier backend.

use grabkit::builtin_scenes::{build_scene, SceneType};
use grabkit::camera::OrbitCamera;
use grabkit::physics::{PhysicsWorld, RapierWorld};
use grabkit::scene::{RenderScene, SceneGraph};
use grabkit::{AimConfig, AimLaunchController, AimPhase, InputEvent, InteractionHost, Key};

use nalgebra::point;

const DT: f32 = 1.0 / 60.0;

fn bowling_host() -> (
    InteractionHost<RapierWorld, SceneGraph>,
    grabkit::physics::BodyHandle,
    grabkit::scene::NodeHandle,
    grabkit::scene::NodeHandle,
) {
    let mut physics = RapierWorld::new();
    let mut camera = OrbitCamera::default();
    camera.look_at(point![-15.0, 10.0, 25.0], point![0.0, 1.0, 0.0]);
    let mut scene = SceneGraph::new(camera);

    let built = build_scene(SceneType::Bowling, &mut physics, &mut scene);
    let ball = built.projectile.unwrap();
    let ball_node = built.dynamic_bodies.last().unwrap().1;
    let indicator = built.aim_indicator.unwrap();

    let mut host = InteractionHost::new(physics, scene);
    for (body, node) in &built.dynamic_bodies {
        host.register_body(*body, *node);
    }
    host.set_aim_controller(AimLaunchController::new(
        AimConfig::default(),
        ball,
        Some(indicator),
    ));
    (host, ball, ball_node, indicator)
}

#[test]
fn charge_and_release_sends_the_ball_down_the_lane() {
    let (mut host, ball, _, indicator) = bowling_host();

    // Aim for half a second.
    for _ in 0..30 {
        host.tick(DT, &[]);
    }
    assert_eq!(host.charge_fraction(), 0.0);

    // Hold the charge key for half a second.
    host.tick(DT, &[InputEvent::KeyDown(Key::Space)]);
    for _ in 0..29 {
        host.tick(DT, &[]);
    }
    let charged = host.charge_fraction();
    assert!(charged > 0.0 && charged <= 1.0);

    // Release: the ball gets its impulse toward the pins (-z).
    host.tick(DT, &[InputEvent::KeyUp(Key::Space)]);
    assert_eq!(host.aim_controller().unwrap().phase(), AimPhase::Launched);
    assert!(
        host.physics().linear_velocity(ball).z < -1.0,
        "ball should be moving toward the pins"
    );
    // The indicator is gone and the charge indicator reads zero again.
    assert!(host.scene().node_pose(indicator).is_none());
    assert_eq!(host.charge_fraction(), 0.0);

    // The ball keeps traveling down the lane.
    let z_before = host.physics().body_pose(ball).unwrap().translation.z;
    for _ in 0..60 {
        host.tick(DT, &[]);
    }
    let z_after = host.physics().body_pose(ball).unwrap().translation.z;
    assert!(z_after < z_before - 1.0);
}

#[test]
fn writeback_keeps_the_ball_node_in_sync() {
    let (mut host, ball, node, _) = bowling_host();

    // Launch hard so the ball clearly moves.
    host.tick(DT, &[InputEvent::KeyDown(Key::Space)]);
    for _ in 0..60 {
        host.tick(DT, &[]);
    }
    host.tick(DT, &[InputEvent::KeyUp(Key::Space)]);
    for _ in 0..30 {
        host.tick(DT, &[]);
    }

    let body_pose = host.physics().body_pose(ball).unwrap();
    let node_pose = host.scene().node_pose(node).unwrap();
    assert!((body_pose.translation.vector - node_pose.translation.vector).norm() < 1.0e-6);
}
