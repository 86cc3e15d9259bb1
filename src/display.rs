use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # Surface
/// A monochrome bitmap the Chip-8 draws on.
///
/// The core keeps no copy of the display; every pixel read and write goes straight to
/// the surface. Callers wrap coordinates to `width()`/`height()` before calling in, so
/// implementations never have to clamp.
pub trait Surface {
    /// Turns every pixel off
    fn clear(&mut self);

    fn get_pixel(&self, x: usize, y: usize) -> bool;

    /// Sets a pixel and returns the value it held before
    fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool;

    fn width(&self) -> usize {
        DISPLAY_WIDTH
    }

    fn height(&self) -> usize {
        DISPLAY_HEIGHT
    }

    /// Called before the interpreter blocks, so whatever has been drawn so far is shown
    fn present(&mut self) {}
}

/// An in-memory surface, indexed as `[y * width + x]`
///
/// Usable on its own for headless runs, and as the backing store of windowed displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Bitmap {
    pub fn new() -> Self {
        Self::with_size(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }

    pub fn with_size(width: usize, height: usize) -> Self {
        Bitmap {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    /// Rows of pixels, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks(self.width)
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Number of pixels currently on
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }
}

impl Default for Bitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Bitmap {
    fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|p| *p = false);
    }

    fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y * self.width + x]
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        let index = y * self.width + x;
        std::mem::replace(&mut self.pixels[index], on)
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }
}
