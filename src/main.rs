//! Headless demo: build a builtin scene and drive the interaction host with
//! a scripted gesture.
//!
//! - `--scene bowling`: charge the launcher for a while, then release it and
//!   watch the ball travel down the lane.
//! - `--scene jenga`: grab the tower near its middle, drag it sideways, then
//!   let go.

use anyhow::{ensure, Result};
use clap::Parser;
use instant::Instant;
use log::info;
use nalgebra::point;

use grabkit::builtin_scenes::{build_scene, SceneType};
use grabkit::camera::OrbitCamera;
use grabkit::cli::CliArgs;
use grabkit::physics::{PhysicsWorld, RapierWorld};
use grabkit::scene::{RenderScene, SceneGraph};
use grabkit::{AimConfig, AimLaunchController, InputEvent, InteractionHost, Key};

fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();
    ensure!(args.tick_rate > 0.0, "--tick-rate must be positive");
    ensure!(args.duration > 0.0, "--duration must be positive");

    let mut physics = RapierWorld::new();
    let mut scene = SceneGraph::new(camera_for(args.scene));
    let built = build_scene(args.scene, &mut physics, &mut scene);

    let mut host = InteractionHost::new(physics, scene);
    for (body, node) in &built.dynamic_bodies {
        host.register_body(*body, *node);
    }
    let tracked = built.dynamic_bodies.first().map(|(body, _)| *body);
    if let Some(projectile) = built.projectile {
        host.set_aim_controller(AimLaunchController::new(
            AimConfig::default(),
            projectile,
            built.aim_indicator,
        ));
    }

    let dt = args.timestep();
    let total = args.total_ticks();
    let ticks_per_log = args.tick_rate as usize;
    let start = Instant::now();

    for tick in 0..total {
        let events = if args.no_script {
            Vec::new()
        } else {
            scripted_events(args.scene, tick, total)
        };
        host.tick(dt, &events);

        if tick % ticks_per_log == 0 {
            log_progress(&host, built.projectile.or(tracked), tick, dt);
        }
    }

    info!(
        "simulated {:.1}s in {:.0}ms",
        total as f32 * dt,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

fn camera_for(scene: SceneType) -> OrbitCamera {
    let mut camera = OrbitCamera::default();
    match scene {
        SceneType::Bowling => camera.look_at(point![-15.0, 10.0, 25.0], point![0.0, 1.0, 0.0]),
        SceneType::Jenga => camera.look_at(point![15.0, 20.0, 20.0], point![0.0, 7.0, 0.0]),
    }
    camera
}

/// The input gesture a user would perform, replayed on a fixed schedule.
fn scripted_events(scene: SceneType, tick: usize, total: usize) -> Vec<InputEvent> {
    let at = |fraction: f32| (total as f32 * fraction) as usize;

    match scene {
        SceneType::Bowling => {
            // Aim for a while, charge, release.
            if tick == at(0.25) {
                vec![InputEvent::KeyDown(Key::Space)]
            } else if tick == at(0.6) {
                vec![InputEvent::KeyUp(Key::Space)]
            } else {
                Vec::new()
            }
        }
        SceneType::Jenga => {
            // Grab whatever sits under the screen center, pull it sideways,
            // let go.
            let grab = at(0.1);
            let release = at(0.7);
            if tick == grab {
                vec![InputEvent::PointerDown { ndc: [0.0, 0.0] }]
            } else if tick > grab && tick < release {
                let progress = (tick - grab) as f32 / (release - grab) as f32;
                vec![InputEvent::PointerMoved {
                    ndc: [0.4 * progress, 0.1 * progress],
                }]
            } else if tick == release {
                vec![InputEvent::PointerUp]
            } else {
                Vec::new()
            }
        }
    }
}

fn log_progress(
    host: &InteractionHost<RapierWorld, SceneGraph>,
    tracked: Option<grabkit::physics::BodyHandle>,
    tick: usize,
    dt: f32,
) {
    let pose = tracked.and_then(|body| host.physics().body_pose(body));
    info!(
        "t={:5.1}s charge={:4.2} dragging={} camera_controls={} tracked_pos={:?}",
        tick as f32 * dt,
        host.charge_fraction(),
        host.drag_active(),
        host.scene().camera_controls_enabled(),
        pose.map(|p| (p.translation.x, p.translation.y, p.translation.z)),
    );
}
