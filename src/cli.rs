//! Command-line arguments for the demo binary.

use clap::Parser;

use crate::builtin_scenes::SceneType;
use crate::math::Real;

#[derive(Parser, Debug, Copy, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Which builtin scene to run.
    #[arg(long, value_enum, default_value_t = SceneType::Jenga)]
    pub scene: SceneType,
    /// Ticks per second.
    #[arg(long, default_value_t = 60.0)]
    pub tick_rate: Real,
    /// Simulated duration, in seconds.
    #[arg(long, default_value_t = 10.0)]
    pub duration: Real,
    /// Disable the scripted input gesture and just let the scene settle.
    #[arg(long, default_value_t = false)]
    pub no_script: bool,
}

impl CliArgs {
    pub fn timestep(&self) -> Real {
        1.0 / self.tick_rate.max(1.0)
    }

    pub fn total_ticks(&self) -> usize {
        (self.duration.max(0.0) * self.tick_rate.max(1.0)) as usize
    }
}
