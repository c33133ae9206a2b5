//! Loop configuration from environment variables.
//!
//! | Variable          | Default | Constraint |
//! |-------------------|---------|------------|
//! | `TARGET_FPS`      | 60      | > 0        |
//! | `FIXED_TIMESTEP`  | 0.02    | ≥ 1 ns (s) |
//! | `MAX_FIXED_STEPS` | 8       | ≥ 1        |
//! | `MAX_FRAMES`      | unset   | any `u64`  |

use core::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Value could not be parsed.
    #[error("{var}: cannot parse {value:?}")]
    Parse { var: &'static str, value: String },

    /// Value parsed but is out of range.
    #[error("{var}: {value} is out of range, expected {expected}")]
    OutOfRange {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Validated frame loop settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    target_fps: f32,
    fixed_timestep: f32,
    max_fixed_steps: u32,
    max_frames: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_fps: 60.0,
            fixed_timestep: 0.02,
            max_fixed_steps: 8,
            max_frames: None,
        }
    }
}

impl LoopConfig {
    /// Build a config with default step limits.
    pub fn new(target_fps: f32, fixed_timestep: f32) -> Result<Self, ConfigError> {
        let config = Self {
            target_fps: positive("TARGET_FPS", target_fps)?,
            fixed_timestep: positive("FIXED_TIMESTEP", fixed_timestep)?,
            ..Self::default()
        };
        // Sub-nanosecond steps round to zero and would stall the accumulator.
        if config.fixed_step().is_zero() {
            return Err(ConfigError::OutOfRange {
                var: "FIXED_TIMESTEP",
                value: fixed_timestep.to_string(),
                expected: "at least one nanosecond",
            });
        }
        Ok(config)
    }

    /// Read the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the config through `lookup`; missing variables take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let target_fps = parse(&lookup, "TARGET_FPS")?.unwrap_or(defaults.target_fps);
        let fixed_timestep = parse(&lookup, "FIXED_TIMESTEP")?.unwrap_or(defaults.fixed_timestep);
        let max_fixed_steps =
            parse(&lookup, "MAX_FIXED_STEPS")?.unwrap_or(defaults.max_fixed_steps);
        let max_frames = parse(&lookup, "MAX_FRAMES")?;

        Self::new(target_fps, fixed_timestep)?
            .with_max_fixed_steps(max_fixed_steps)
            .map(|config| config.with_max_frames(max_frames))
    }

    /// Cap on fixed steps run per frame.
    pub fn with_max_fixed_steps(mut self, max_fixed_steps: u32) -> Result<Self, ConfigError> {
        if max_fixed_steps == 0 {
            return Err(ConfigError::OutOfRange {
                var: "MAX_FIXED_STEPS",
                value: max_fixed_steps.to_string(),
                expected: "at least 1",
            });
        }
        self.max_fixed_steps = max_fixed_steps;
        Ok(self)
    }

    /// Stop after this many frames; `None` runs until interrupted.
    #[must_use]
    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn target_fps(&self) -> f32 {
        self.target_fps
    }

    /// Physics step in seconds, as handed to fixed-update listeners.
    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    pub fn max_fixed_steps(&self) -> u32 {
        self.max_fixed_steps
    }

    pub fn max_frames(&self) -> Option<u64> {
        self.max_frames
    }

    /// Wall-clock budget of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.target_fps)
    }

    /// Physics step as a duration, for the accumulator.
    pub fn fixed_step(&self) -> Duration {
        Duration::from_secs_f32(self.fixed_timestep)
    }
}

fn parse<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Parse { var, value })
}

fn positive(var: &'static str, value: f32) -> Result<f32, ConfigError> {
    // Upper bound keeps `Duration::from_secs_f32` in range.
    if value.is_finite() && value > 0.0 && value < 1.0e9 {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            var,
            value: value.to_string(),
            expected: "a finite number above 0",
        })
    }
}
