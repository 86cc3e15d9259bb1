use crate::constants::KEY_COUNT;
use crate::shutdown::Shutdown;

/// Outcome of waiting for a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWait {
    /// A logical key went from released to held
    Pressed(u8),
    /// Nothing yet; the interpreter stays on the waiting instruction and asks again next step
    Pending,
    /// The host is shutting down
    Shutdown,
}

/// # Input
/// A hexadecimal keypad of 16 logical keys, 0x0..=0xF.
///
/// How physical keys map onto logical ones is up to the implementation.
pub trait Input {
    fn is_held(&self, key: u8) -> bool;

    /// Called once when the interpreter starts waiting for a key, before the first
    /// `wait_for_key_edge`. Presses from before this point must not satisfy the wait.
    fn begin_key_wait(&mut self) {}

    /// Waits for a logical key to go from released to held.
    ///
    /// Blocking implementations must keep host events flowing while they wait and check
    /// `shutdown` on every iteration. Non-blocking implementations return `Pending`.
    fn wait_for_key_edge(&mut self, shutdown: &Shutdown) -> KeyWait;
}

/// # Keypad
/// Key state driven by the host between steps; never blocks.
///
/// `press` marks a key as pressed when it goes from released to held. Each key is marked at
/// most once, so the pending set never outgrows the keypad. Waiting for a key consumes the
/// lowest key marked since the wait began.
#[derive(Clone, Debug, Default)]
pub struct Keypad {
    held: [bool; KEY_COUNT],
    /// Bit `k` is set when key `k` was pressed since the last wait began
    pressed: u16,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the logical key that was pressed; keys above 0xF are ignored
    pub fn press(&mut self, key: u8) {
        if let Some(held) = self.held.get_mut(key as usize) {
            if !*held {
                self.pressed |= 1 << key;
            }
            *held = true;
        }
    }

    /// Unset the pressed status of key
    pub fn release(&mut self, key: u8) {
        if let Some(held) = self.held.get_mut(key as usize) {
            *held = false;
        }
    }
}

impl Input for Keypad {
    /// Keys outside of 0x0..=0xF are never held
    fn is_held(&self, key: u8) -> bool {
        self.held.get(key as usize).copied().unwrap_or(false)
    }

    fn begin_key_wait(&mut self) {
        self.pressed = 0;
    }

    fn wait_for_key_edge(&mut self, shutdown: &Shutdown) -> KeyWait {
        if shutdown.is_requested() {
            return KeyWait::Shutdown;
        }
        if self.pressed == 0 {
            return KeyWait::Pending;
        }
        let key = self.pressed.trailing_zeros() as u8;
        self.pressed &= !(1 << key);
        KeyWait::Pressed(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.press(0xE);
        assert!(keypad.is_held(0xE));
        assert!(!keypad.is_held(0x1));
        keypad.release(0xE);
        assert!(!keypad.is_held(0xE));
    }

    #[test]
    fn test_out_of_range_keys() {
        let mut keypad = Keypad::new();
        keypad.press(0x10);
        assert!(!keypad.is_held(0x10));
        assert!(!keypad.is_held(0xFF));
    }

    #[test]
    fn test_wait_is_pending_without_edges() {
        let mut keypad = Keypad::new();
        keypad.begin_key_wait();
        assert_eq!(keypad.wait_for_key_edge(&Shutdown::new()), KeyWait::Pending);
    }

    #[test]
    fn test_wait_ignores_presses_before_it_began() {
        let mut keypad = Keypad::new();
        keypad.press(0x3);
        keypad.begin_key_wait();
        assert_eq!(keypad.wait_for_key_edge(&Shutdown::new()), KeyWait::Pending);
    }

    #[test]
    fn test_held_key_needs_release_before_new_edge() {
        let mut keypad = Keypad::new();
        keypad.press(0x3);
        keypad.begin_key_wait();
        keypad.press(0x3);
        assert_eq!(keypad.wait_for_key_edge(&Shutdown::new()), KeyWait::Pending);
        keypad.release(0x3);
        keypad.press(0x3);
        assert_eq!(
            keypad.wait_for_key_edge(&Shutdown::new()),
            KeyWait::Pressed(0x3)
        );
    }

    #[test]
    fn test_presses_without_a_wait_stay_bounded() {
        let mut keypad = Keypad::new();
        for i in 0..100_000u32 {
            let key = (i % 16) as u8;
            keypad.press(key);
            keypad.release(key);
        }
        assert!(keypad.pressed.count_ones() as usize <= KEY_COUNT);

        // repeated presses of one key during a wait count once
        keypad.begin_key_wait();
        for _ in 0..3 {
            keypad.press(0x5);
            keypad.release(0x5);
        }
        assert_eq!(
            keypad.wait_for_key_edge(&Shutdown::new()),
            KeyWait::Pressed(0x5)
        );
        assert_eq!(keypad.wait_for_key_edge(&Shutdown::new()), KeyWait::Pending);
    }

    #[test]
    fn test_wait_observes_shutdown() {
        let mut keypad = Keypad::new();
        keypad.begin_key_wait();
        keypad.press(0x1);
        let shutdown = Shutdown::new();
        shutdown.request();
        assert_eq!(keypad.wait_for_key_edge(&shutdown), KeyWait::Shutdown);
    }
}
