use log::error;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{TextureValueError, WindowCanvas};
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

use emu8::{Bitmap, Surface};

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("sdl: {0}")]
    Sdl(String),
    #[error(transparent)]
    Window(#[from] WindowBuildError),
    #[error(transparent)]
    Canvas(#[from] IntegerOrSdlError),
    #[error(transparent)]
    Texture(#[from] TextureValueError),
}

impl From<String> for DisplayError {
    fn from(message: String) -> Self {
        DisplayError::Sdl(message)
    }
}

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
///
/// Drawing goes to an in-memory `Bitmap`; the window only gets redrawn when the machine asks
/// for a `present` and something changed since the last one.
pub struct Display {
    canvas: WindowCanvas,
    frame: Bitmap,
    dirty: bool,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, DisplayError> {
        let frame = Bitmap::new();
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "Emu-8",
                frame.width() as u32 * scale,
                frame.height() as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;

        Ok(Display {
            canvas,
            frame,
            dirty: true,
        })
    }

    /// Formats a frame for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    /// Each lit pixel becomes three 255s and each unlit one three 0s.
    fn frame_to_sdl_texture(frame: &Bitmap) -> Vec<u8> {
        frame
            .pixels()
            .iter()
            .map(|&lit| if lit { 255 } else { 0 })
            .flat_map(|a| std::iter::repeat(a).take(3))
            .collect()
    }

    /// Formats the current frame as an SDL2 RGB24 texture and renders it.
    pub fn render(&mut self) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            self.frame.width() as u32,
            self.frame.height() as u32,
        )?;

        let pixels = Display::frame_to_sdl_texture(&self.frame);
        texture.with_lock(None, |buffer: &mut [u8], _pitch: usize| {
            buffer.copy_from_slice(&pixels);
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        self.dirty = false;
        Ok(())
    }
}

impl Surface for Display {
    fn clear(&mut self) {
        self.frame.clear();
        self.dirty = true;
    }

    fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.frame.get_pixel(x, y)
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        let previous = self.frame.set_pixel(x, y, on);
        self.dirty |= previous != on;
        previous
    }

    fn present(&mut self) {
        if !self.dirty {
            return;
        }
        if let Err(e) = self.render() {
            error!("failed to render frame: {}", e);
        }
    }
}
