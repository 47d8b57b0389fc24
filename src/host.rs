//! Per-frame driver tying input, the controllers, the physics step, and the
//! pose write-back together.
//!
//! One `tick` is the whole cooperative frame: input events latched since the
//! previous tick are consumed first, the aim controller advances, the world
//! steps, broken constraints are drained, and finally every registered
//! dynamic body's pose is copied from the physics world to its render node.
//! The physics world is the single source of truth for dynamic object pose.

use log::debug;

use crate::aim::{AimLaunchController, AimPhase};
use crate::drag::DragConstraintController;
use crate::math::Real;
use crate::physics::{BodyHandle, PhysicsWorld};
use crate::scene::{NodeHandle, RenderScene};
use crate::InteractionError;

/// Solver sub-step count per tick.
pub const PHYSICS_SUBSTEPS: usize = 10;

/// Keys the host understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// The charge key: press to start charging, hold to charge, release to
    /// launch.
    Space,
}

/// Raw input events, captured asynchronously by the embedding application
/// and handed to [`InteractionHost::tick`] at the next tick boundary.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerDown { ndc: [Real; 2] },
    PointerMoved { ndc: [Real; 2] },
    PointerUp,
}

pub struct InteractionHost<P, S> {
    physics: P,
    scene: S,
    aim: Option<AimLaunchController>,
    drag: DragConstraintController,
    /// Dynamic (physics body, render node) pairs kept in sync every tick.
    bodies: Vec<(BodyHandle, NodeHandle)>,
    charge_held: bool,
    pointer_ndc: Option<[Real; 2]>,
}

impl<P: PhysicsWorld, S: RenderScene> InteractionHost<P, S> {
    pub fn new(physics: P, scene: S) -> Self {
        Self {
            physics,
            scene,
            aim: None,
            drag: DragConstraintController::new(),
            bodies: Vec::new(),
            charge_held: false,
            pointer_ndc: None,
        }
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn set_aim_controller(&mut self, aim: AimLaunchController) {
        self.aim = Some(aim);
    }

    pub fn aim_controller(&self) -> Option<&AimLaunchController> {
        self.aim.as_ref()
    }

    /// Registers a dynamic body for per-tick pose write-back.
    pub fn register_body(&mut self, body: BodyHandle, node: NodeHandle) {
        self.bodies.push((body, node));
    }

    /// Charge progress in `[0, 1]` for an external progress indicator.
    pub fn charge_fraction(&self) -> Real {
        self.aim.as_ref().map_or(0.0, |aim| aim.charge_fraction())
    }

    /// Whether a drag session currently gates camera navigation.
    pub fn drag_active(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Last pointer position latched from the event stream.
    pub fn pointer_ndc(&self) -> Option<[Real; 2]> {
        self.pointer_ndc
    }

    /// Runs one frame. Interaction errors are expected, user-driven
    /// outcomes; they are logged and never abort the tick or the ones after
    /// it.
    pub fn tick(&mut self, dt: Real, events: &[InputEvent]) {
        for event in events {
            self.apply_event(*event);
        }

        if let Some(aim) = &mut self.aim {
            aim.update(dt, self.charge_held, &self.physics, &mut self.scene);
        }

        self.physics.step(dt, PHYSICS_SUBSTEPS);

        let broken = self.physics.drain_broken_constraints();
        if !broken.is_empty() && self.drag.handle_broken_constraints(&broken, &mut self.scene) {
            debug!("{}", InteractionError::ConstraintBroken);
        }

        for (body, node) in &self.bodies {
            if let Some(pose) = self.physics.body_pose(*body) {
                self.scene.set_node_pose(*node, pose);
            }
        }
    }

    fn apply_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(Key::Space) => {
                self.charge_held = true;
                if let Some(aim) = &mut self.aim {
                    aim.start_charge();
                }
            }
            InputEvent::KeyUp(Key::Space) => {
                self.charge_held = false;
                // A key-up only fires the launcher if a key-down armed it
                // first; stray key-ups (focus loss, a key held before
                // startup) must not spend the one-shot controller.
                if let Some(aim) = &mut self.aim {
                    if matches!(aim.phase(), AimPhase::Charging { .. }) {
                        if let Err(err) = aim.launch(&mut self.physics, &mut self.scene) {
                            debug!("launch refused: {err}");
                        }
                    }
                }
            }
            InputEvent::PointerDown { ndc } => {
                self.pointer_ndc = Some(ndc);
                let ray = self.scene.pointer_ray(ndc);
                if let Err(err) = self.drag.begin_drag(&ray, &mut self.physics, &mut self.scene) {
                    debug!("grab refused: {err}");
                }
            }
            InputEvent::PointerMoved { ndc } => {
                self.pointer_ndc = Some(ndc);
                let ray = self.scene.pointer_ray(ndc);
                self.drag.update_drag(&ray, &mut self.physics);
            }
            InputEvent::PointerUp => {
                self.drag.end_drag(&mut self.physics, &mut self.scene);
            }
        }
    }
}
