use std::io;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::debug;

use crate::constants::TICK;
use crate::shutdown::Shutdown;

/// # Timers
/// The delay and sound timers.
///
/// Both count down toward zero at 60Hz, independent of how fast instructions run. The
/// interpreter writes them (Fx15, Fx18) and reads the delay timer (Fx07) while a periodic
/// driver decrements them, so each lives in an atomic cell and is shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct Timers {
    delay: AtomicU8,
    sound: AtomicU8,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tick {
    /// The sound timer went from 1 to 0; a full implementation stops its tone here
    pub sound_expired: bool,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(&self) -> u8 {
        self.delay.load(Ordering::SeqCst)
    }

    pub fn sound(&self) -> u8 {
        self.sound.load(Ordering::SeqCst)
    }

    pub fn set_delay(&self, value: u8) {
        self.delay.store(value, Ordering::SeqCst);
    }

    pub fn set_sound(&self, value: u8) {
        self.sound.store(value, Ordering::SeqCst);
    }

    /// A tone should be playing while the sound timer is nonzero
    pub fn sound_active(&self) -> bool {
        self.sound() > 0
    }

    /// Decrements both timers once, never below zero
    pub fn tick(&self) -> Tick {
        decrement(&self.delay);
        let sound_expired = decrement(&self.sound) == Some(1);
        if sound_expired {
            debug!("sound timer expired");
        }
        Tick { sound_expired }
    }
}

/// Returns the value before decrementing, or None if the timer was already at zero
fn decrement(timer: &AtomicU8) -> Option<u8> {
    timer
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| t.checked_sub(1))
        .ok()
}

/// # Timer driver
/// Ticks `Timers` at 60Hz on a dedicated thread until shutdown is requested.
///
/// Deadlines are absolute, so a late wakeup shortens the next sleep instead of drifting.
pub struct TimerDriver {
    handle: JoinHandle<()>,
}

impl TimerDriver {
    pub fn spawn(timers: Arc<Timers>, shutdown: Shutdown) -> io::Result<Self> {
        let handle = thread::Builder::new()
            .name("timers".into())
            .spawn(move || {
                let mut deadline = Instant::now() + TICK;
                while !shutdown.is_requested() {
                    let now = Instant::now();
                    if deadline > now {
                        thread::sleep(deadline - now);
                    }
                    if shutdown.is_requested() {
                        break;
                    }
                    timers.tick();
                    deadline += TICK;
                }
                debug!("timer driver stopped");
            })?;
        Ok(TimerDriver { handle })
    }

    /// Waits for the driver to notice shutdown and stop
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

/// # Delay pacing
/// Programs often spin on Fx07 waiting for the delay timer to run out. Reading an active
/// delay timer again within one tick of the previous read means the program is polling;
/// the interpreter then yields for a tick instead of burning through instructions.
#[derive(Debug, Default)]
pub struct DelayPacer {
    last_observed: Option<Instant>,
}

impl DelayPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a read of the delay timer and returns whether the caller should yield.
    ///
    /// Only reads of an active (nonzero) timer move the observation time.
    pub fn observe(&mut self, delay: u8, now: Instant) -> bool {
        if delay == 0 {
            return false;
        }
        let polling = self
            .last_observed
            .map_or(false, |last| now.saturating_duration_since(last) <= TICK);
        self.last_observed = Some(now);
        polling
    }

    /// How long a yielding caller sleeps
    pub fn pause(&self) -> Duration {
        TICK
    }
}
