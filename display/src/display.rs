use log::debug;
use sdl2::pixels::PixelFormatEnum;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::{DisplaySink, FrameBuffer, RunError};

/// # Display
/// The Chip-8 display is composed of 64x32 pixels black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array of 64x32 bytes.
/// The display only gets a call to `render` on frames where the scheduler ticked the timers.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    width: usize,
    height: usize,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, RunError> {
        let video_subsystem = sdl.video().map_err(RunError::Display)?;
        let window = video_subsystem
            .window(
                "Chip-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(display_error)?;
        let canvas = window.into_canvas().build().map_err(display_error)?;
        debug!("opened {}x window", scale);

        Ok(Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Triplicating each element of that 1D array to represent the RGB values of each pixel
    /// - Multiplying each value by 255 to convert from a binary state to 0-255 intensity
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|a| a.iter())
            .flat_map(|a| std::iter::repeat(a).take(3))
            .map(|a| a * 255)
            .collect()
    }
}

impl DisplaySink for Display {
    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it,
    /// stretched over the whole window.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), RunError> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                self.width as u32,
                self.height as u32,
            )
            .map_err(display_error)?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                // rows may be padded past width * 3
                for (row, line) in pixels.chunks(self.width * 3).enumerate() {
                    buffer[row * pitch..row * pitch + line.len()].copy_from_slice(line);
                }
            })
            .map_err(RunError::Display)?;

        self.canvas
            .copy(&texture, None, None)
            .map_err(RunError::Display)?;
        self.canvas.present();
        Ok(())
    }
}

fn display_error(error: impl std::fmt::Display) -> RunError {
    RunError::Display(error.to_string())
}
