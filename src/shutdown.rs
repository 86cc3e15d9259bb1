use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A host-owned stop flag shared with the interpreter, its input and the timer driver
///
/// Clones observe the same flag. Once requested it stays requested.
#[derive(Clone, Debug, Default)]
pub struct Shutdown(Arc<AtomicBool>);

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
