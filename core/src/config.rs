use std::time::Duration;

use crate::constants::{FRAMES_PER_SECOND, INSTRUCTIONS_PER_SECOND};

/// # Config
/// Runtime knobs for a machine and its scheduler.
///
/// * `instructions_per_second` the rate the CPU executes at
/// * `frames_per_second` the rate timers decrement and the screen is redrawn
/// * `seed` seeds CXKK's random number generator; entropy is used when None
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub instructions_per_second: u32,
    pub frames_per_second: u32,
    pub seed: Option<u64>,
}

impl Config {
    /// Time between two instructions.
    pub fn instruction_period(&self) -> Duration {
        period(self.instructions_per_second)
    }

    /// Time between two frame ticks.
    pub fn frame_period(&self) -> Duration {
        period(self.frames_per_second)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instructions_per_second: INSTRUCTIONS_PER_SECOND,
            frames_per_second: FRAMES_PER_SECOND,
            seed: None,
        }
    }
}

// A rate of 0 is treated as 1Hz; periods never drop below 1ns.
fn period(hz: u32) -> Duration {
    Duration::from_nanos((1_000_000_000 / u64::from(hz.max(1))).max(1))
}

#[cfg(test)]
mod test_config {
    use super::*;

    #[test]
    fn test_default_rates() {
        let config = Config::default();
        assert_eq!(config.instructions_per_second, 700);
        assert_eq!(config.frames_per_second, 60);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_periods() {
        let config = Config {
            instructions_per_second: 1000,
            frames_per_second: 50,
            seed: None,
        };
        assert_eq!(config.instruction_period(), Duration::from_millis(1));
        assert_eq!(config.frame_period(), Duration::from_millis(20));
    }

    #[test]
    fn test_zero_rate_does_not_divide_by_zero() {
        let config = Config {
            instructions_per_second: 0,
            ..Config::default()
        };
        assert_eq!(config.instruction_period(), Duration::from_secs(1));
    }

    #[test]
    fn test_rate_above_1ghz_keeps_a_nonzero_period() {
        let config = Config {
            instructions_per_second: 2_000_000_000,
            frames_per_second: u32::MAX,
            seed: None,
        };
        assert_eq!(config.instruction_period(), Duration::from_nanos(1));
        assert_eq!(config.frame_period(), Duration::from_nanos(1));
    }
}
