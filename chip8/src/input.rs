use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::EventPump;

use emu8::constants::{KEY_COUNT, TICK};
use emu8::{Input, KeyWait, Shutdown};

use crate::keymap::keymap;

/// # SDL input
/// Tracks which Chip-8 keys are held from the SDL event queue.
///
/// Quitting the window or pressing escape requests shutdown; holding space lifts the clock
/// speed limit.
pub struct SdlInput {
    events: EventPump,
    held: [bool; KEY_COUNT],
    fast_forward: bool,
    shutdown: Shutdown,
}

impl SdlInput {
    pub fn new(events: EventPump, shutdown: Shutdown) -> Self {
        SdlInput {
            events,
            held: [false; KEY_COUNT],
            fast_forward: false,
            shutdown,
        }
    }

    /// Drains every pending event
    pub fn pump(&mut self) {
        while let Some(event) = self.events.poll_event() {
            self.handle(event);
        }
    }

    pub fn fast_forward(&self) -> bool {
        self.fast_forward
    }

    fn handle(&mut self, event: Event) {
        match event {
            Event::Quit { .. } => self.shutdown.request(),
            Event::KeyDown {
                keycode: Some(key), ..
            } => match (key, keymap(key)) {
                (_, Some(kc)) => self.held[kc as usize] = true,
                (Keycode::Space, _) => self.fast_forward = true,
                (Keycode::Escape, _) => self.shutdown.request(),
                _ => {}
            },
            Event::KeyUp {
                keycode: Some(key), ..
            } => match (key, keymap(key)) {
                (_, Some(kc)) => self.held[kc as usize] = false,
                (Keycode::Space, _) => self.fast_forward = false,
                _ => {}
            },
            _ => {}
        }
    }
}

impl Input for SdlInput {
    fn is_held(&self, key: u8) -> bool {
        self.held[usize::from(key & 0xF)]
    }

    /// Blocks on the event queue until some key goes from released to held.
    ///
    /// Keys already down when the wait starts must be let go and pressed again.
    fn wait_for_key_edge(&mut self, shutdown: &Shutdown) -> KeyWait {
        let mut previous = self.held;
        loop {
            if shutdown.is_requested() {
                return KeyWait::Shutdown;
            }
            if let Some(event) = self.events.wait_event_timeout(TICK.as_millis() as u32) {
                self.handle(event);
            }
            for key in 0..KEY_COUNT {
                if self.held[key] && !previous[key] {
                    return KeyWait::Pressed(key as u8);
                }
            }
            previous = self.held;
        }
    }
}
