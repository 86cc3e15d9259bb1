use crate::constants::{DEFAULT_CLOCK_SPEED, TIMER_HZ};

/// Tunables of a Chip-8 run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instructions per second the host aims for
    pub clock_speed: u32,
    /// Deepest the call stack may get; `None` leaves it unbounded
    pub stack_limit: Option<usize>,
    /// Yield a tick when a program polls the delay timer (Fx07) in a tight loop
    pub throttle_delay_reads: bool,
}

impl Config {
    /// Instructions to run per 60Hz frame; at least one
    pub fn cycles_per_frame(&self) -> u32 {
        (self.clock_speed / TIMER_HZ).max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_speed: DEFAULT_CLOCK_SPEED,
            stack_limit: None,
            throttle_delay_reads: true,
        }
    }
}
