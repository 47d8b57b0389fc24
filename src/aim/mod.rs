//! Hold-to-charge, release-to-fire launcher with an oscillating aim
//! indicator.
//!
//! The controller owns a single projectile body for its whole life: it aims,
//! charges, launches once, and is spent. Re-launching requires a fresh
//! controller (and projectile), which makes double launches structurally
//! impossible instead of flag-checked.

use nalgebra::{point, vector};
use serde::{Deserialize, Serialize};

use crate::math::{Point, Real, Rot, Vect};
use crate::physics::{BodyHandle, PhysicsWorld};
use crate::scene::{NodeHandle, RenderScene};
use crate::InteractionError;

/// Height above the ground at which the indicator is drawn.
const INDICATOR_HEIGHT: Real = 0.1;
/// Forward shift of the indicator relative to the projectile.
const INDICATOR_Z_SHIFT: Real = -1.0;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AimConfig {
    /// Lower aim bound, in radians.
    pub angle_min: Real,
    /// Upper aim bound, in radians.
    pub angle_max: Real,
    /// Oscillation speed of the aim indicator, in radians per second.
    pub angular_speed: Real,
    /// Charge gained per second while the charge input is held.
    pub charge_rate: Real,
    pub max_charge: Real,
    /// Scales charge into impulse magnitude at launch.
    pub speed_factor: Real,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            angle_min: -std::f32::consts::FRAC_PI_3,
            angle_max: std::f32::consts::FRAC_PI_3,
            angular_speed: 0.6,
            charge_rate: 24.0,
            max_charge: 60.0,
            speed_factor: 5.0,
        }
    }
}

/// Aiming state. Constructed directly in `Aiming`; `Launched` is terminal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AimPhase {
    Aiming { angle: Real, direction: Real },
    Charging { angle: Real, charge: Real },
    Launched,
}

pub struct AimLaunchController {
    config: AimConfig,
    phase: AimPhase,
    projectile: BodyHandle,
    indicator: Option<NodeHandle>,
}

impl AimLaunchController {
    pub fn new(config: AimConfig, projectile: BodyHandle, indicator: Option<NodeHandle>) -> Self {
        Self {
            config,
            phase: AimPhase::Aiming {
                angle: 0.0,
                direction: 1.0,
            },
            projectile,
            indicator,
        }
    }

    pub fn phase(&self) -> AimPhase {
        self.phase
    }

    pub fn projectile(&self) -> BodyHandle {
        self.projectile
    }

    /// Charge progress in `[0, 1]`, for a caller-owned progress indicator.
    pub fn charge_fraction(&self) -> Real {
        match self.phase {
            AimPhase::Charging { charge, .. } if self.config.max_charge > 0.0 => {
                (charge / self.config.max_charge).min(1.0)
            }
            _ => 0.0,
        }
    }

    /// Freezes the aim angle and starts charging from zero. No-op unless
    /// currently aiming.
    pub fn start_charge(&mut self) {
        if let AimPhase::Aiming { angle, .. } = self.phase {
            self.phase = AimPhase::Charging { angle, charge: 0.0 };
        }
    }

    /// Advances the controller by `dt`: triangle-wave oscillation while
    /// aiming, charge accrual while charging with the input held.
    ///
    /// The indicator only tracks the projectile while aiming; once charging
    /// starts it freezes along with the angle.
    pub fn update<P: PhysicsWorld, S: RenderScene>(
        &mut self,
        dt: Real,
        charge_held: bool,
        physics: &P,
        scene: &mut S,
    ) {
        match &mut self.phase {
            AimPhase::Aiming { angle, direction } => {
                *angle += *direction * self.config.angular_speed * dt;
                if *angle > self.config.angle_max {
                    *angle = self.config.angle_max;
                    *direction = -1.0;
                }
                if *angle < self.config.angle_min {
                    *angle = self.config.angle_min;
                    *direction = 1.0;
                }

                let angle = *angle;
                self.refresh_indicator(angle, physics, scene);
            }
            AimPhase::Charging { charge, .. } => {
                if charge_held {
                    *charge = (*charge + self.config.charge_rate * dt).min(self.config.max_charge);
                }
            }
            AimPhase::Launched => {}
        }
    }

    /// Launches the projectile with the current angle and charge, applying
    /// the impulse as wake-up + central impulse and removing the indicator.
    ///
    /// One-shot: a spent controller returns `AlreadyLaunched` and touches
    /// neither the body nor the scene.
    pub fn launch<P: PhysicsWorld, S: RenderScene>(
        &mut self,
        physics: &mut P,
        scene: &mut S,
    ) -> Result<Vect, InteractionError> {
        let (angle, charge) = match self.phase {
            AimPhase::Launched => return Err(InteractionError::AlreadyLaunched),
            AimPhase::Aiming { angle, .. } => (angle, 0.0),
            AimPhase::Charging { angle, charge } => (angle, charge),
        };

        let impulse =
            vector![-angle.sin(), 0.0, -angle.cos()] * charge * self.config.speed_factor;

        physics.wake_up(self.projectile);
        physics.apply_central_impulse(self.projectile, impulse);

        if let Some(indicator) = self.indicator.take() {
            scene.remove_node(indicator);
        }

        self.phase = AimPhase::Launched;
        log::info!("launched projectile with impulse {impulse:?}");
        Ok(impulse)
    }

    fn refresh_indicator<P: PhysicsWorld, S: RenderScene>(
        &self,
        angle: Real,
        physics: &P,
        scene: &mut S,
    ) {
        let (Some(indicator), Some(pose)) = (self.indicator, physics.body_pose(self.projectile))
        else {
            return;
        };

        let position: Point = point![
            pose.translation.x,
            INDICATOR_HEIGHT,
            pose.translation.z + INDICATOR_Z_SHIFT
        ];
        let rotation = Rot::from_axis_angle(&Vect::y_axis(), angle);
        let pose = crate::math::Iso::from_parts(position.coords.into(), rotation);
        scene.set_node_pose(indicator, pose);
    }
}
