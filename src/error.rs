use std::io;

use thiserror::Error;

/// Failure to place a program image in memory
#[derive(Debug, Error)]
pub enum LoadError {
    /// `size` counts the bytes read before giving up, never more than `max + 1`
    #[error("program is too large (read {size} bytes), at most {max} bytes fit above 0x200")]
    TooLarge { size: usize, max: usize },

    #[error("unable to read program: {0}")]
    Io(#[from] io::Error),
}

/// # Halt
/// Every way a run can end.
///
/// A halt is an ordinary outcome of `Chip8::run`, not a crash. Only
/// `StackOverflow` indicates a misbehaving program worth a nonzero exit status;
/// running off the end of memory and returning from the outermost routine are how
/// programs normally finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Halt {
    #[error("returned with an empty call stack")]
    StackUnderflow,

    #[error("call stack exceeded {limit} frames")]
    StackOverflow { limit: usize },

    #[error("program counter {pc:#06X} is outside of memory")]
    PcOutOfBounds { pc: u16 },

    #[error("shutdown requested by host")]
    Shutdown,
}

impl Halt {
    /// Whether the host should report this halt as a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Halt::StackOverflow { .. })
    }
}
