//! Bowling lane: a static lane, ten pins, and a launchable ball.

use nalgebra::{point, vector};

use crate::builtin_scenes::{spawn, BuiltinScene};
use crate::math::{Iso, Real};
use crate::physics::{BodyDesc, PhysicsWorld};
use crate::scene::{NodeDesc, RenderScene};
use crate::styling::ColorGenerator;
use crate::ShapeDesc;

const PIN_RADIUS: Real = 0.7;
const PIN_HEIGHT: Real = 3.0;
const PIN_MASS: Real = 2.0;
const BALL_RADIUS: Real = 1.2;
const BALL_MASS: Real = 5.0;

pub fn init_scene<P: PhysicsWorld, S: RenderScene>(
    physics: &mut P,
    scene: &mut S,
) -> BuiltinScene {
    let mut colors = ColorGenerator::default();
    let mut dynamic_bodies = Vec::new();

    /*
     * Lane
     */
    spawn(
        physics,
        scene,
        BodyDesc::fixed(ShapeDesc::Cuboid {
            half_extents: vector![10.0, 0.5, 30.0],
        })
        .position(point![0.0, -0.5, 0.0]),
        [0.27, 0.27, 0.27],
    );

    /*
     * Pins, in rows of 1/2/3/4.
     */
    let rows = [(1, -20.0), (2, -23.0), (3, -26.0), (4, -29.0)];
    for (count, z) in rows {
        for i in 0..count {
            let x = (i as Real - (count - 1) as Real / 2.0) * 2.0;
            let pair = spawn(
                physics,
                scene,
                BodyDesc::dynamic(
                    ShapeDesc::Cylinder {
                        half_height: PIN_HEIGHT / 2.0,
                        radius: PIN_RADIUS,
                    },
                    PIN_MASS,
                )
                .position(point![x, PIN_HEIGHT / 2.0, z]),
                colors.gen_color(),
            );
            dynamic_bodies.push(pair);
        }
    }

    /*
     * Ball
     */
    let ball_position = point![0.0, BALL_RADIUS + 0.1, 15.0];
    let (ball, ball_node) = spawn(
        physics,
        scene,
        BodyDesc::dynamic(ShapeDesc::Ball { radius: BALL_RADIUS }, BALL_MASS)
            .position(ball_position)
            .keep_awake()
            .ccd_enabled(),
        [0.0, 0.5, 1.0],
    );
    dynamic_bodies.push((ball, ball_node));

    /*
     * Aim indicator: a thin shaft ahead of the ball, render-only.
     */
    let indicator = scene.add_node(&NodeDesc {
        shape: ShapeDesc::Cylinder {
            half_height: 1.5,
            radius: 0.05,
        },
        color: [0.0, 1.0, 1.0],
        pose: Iso::translation(ball_position.x, 0.1, ball_position.z - 1.0),
    });

    BuiltinScene {
        dynamic_bodies,
        projectile: Some(ball),
        aim_indicator: Some(indicator),
    }
}
