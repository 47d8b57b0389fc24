//! Jenga tower: a static floor and 15 levels of three draggable blocks.

use std::f32::consts::FRAC_PI_2;

use nalgebra::{point, vector};

use crate::builtin_scenes::{spawn, BuiltinScene};
use crate::math::{Real, Rot, Vect};
use crate::physics::{BodyDesc, PhysicsWorld};
use crate::scene::RenderScene;
use crate::styling::ColorGenerator;
use crate::ShapeDesc;

const BLOCK_MASS: Real = 0.8;
const BLOCK_HEIGHT: Real = 0.7;
const BLOCK_WIDTH: Real = 2.0;
const BLOCK_LENGTH: Real = 6.0;
const NUM_LEVELS: usize = 15;
// High friction and low restitution keep the tower standing.
const BLOCK_FRICTION: Real = 0.95;
const BLOCK_RESTITUTION: Real = 0.05;

pub fn init_scene<P: PhysicsWorld, S: RenderScene>(
    physics: &mut P,
    scene: &mut S,
) -> BuiltinScene {
    let mut colors = ColorGenerator::default();
    let mut dynamic_bodies = Vec::new();

    /*
     * Floor
     */
    spawn(
        physics,
        scene,
        BodyDesc::fixed(ShapeDesc::Cuboid {
            half_extents: vector![15.0, 0.25, 15.0],
        })
        .position(point![0.0, -0.25, 0.0]),
        [0.93, 0.93, 0.93],
    );

    /*
     * Tower: alternate levels rotated a quarter turn around +Y.
     */
    let lateral = [-BLOCK_WIDTH * 1.05, 0.0, BLOCK_WIDTH * 1.05];
    for level in 0..NUM_LEVELS {
        let rotated = level % 2 != 0;
        let y = level as Real * BLOCK_HEIGHT + BLOCK_HEIGHT / 2.0;
        let rotation = if rotated {
            Rot::from_axis_angle(&Vect::y_axis(), FRAC_PI_2)
        } else {
            Rot::identity()
        };

        for &offset in &lateral {
            let (x, z) = if rotated { (0.0, offset) } else { (offset, 0.0) };
            let pair = spawn(
                physics,
                scene,
                BodyDesc::dynamic(
                    ShapeDesc::Cuboid {
                        half_extents: vector![
                            BLOCK_WIDTH / 2.0,
                            BLOCK_HEIGHT / 2.0,
                            BLOCK_LENGTH / 2.0
                        ],
                    },
                    BLOCK_MASS,
                )
                .position(point![x, y, z])
                .rotation(rotation)
                .friction(BLOCK_FRICTION)
                .restitution(BLOCK_RESTITUTION)
                .keep_awake(),
                colors.gen_color(),
            );
            dynamic_bodies.push(pair);
        }
    }

    BuiltinScene {
        dynamic_bodies,
        projectile: None,
        aim_indicator: None,
    }
}
