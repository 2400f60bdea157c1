use log::debug;
use sdl2::pixels::PixelFormatEnum;

use lemon_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use lemon_core::Frame;

pub use capture::{write_pbm, Capturer};

mod capture;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array.
/// The window is `scale` times larger than that in each direction.
/// The display only gets a call to `render` when the Chip-8 frame changes.
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
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let (width, height) = window_size(scale)?;
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window("Lemon", width, height)
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| e.to_string())?;
        debug!("opened {}x scale window", scale);

        Ok(Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }

    /// Formats a Chip-8 Frame for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the 2D frame into a 1D array by concatenating its rows
    /// - Triplicating each element of that 1D array to represent the RGB values of each pixel
    /// - Multiplying each value by 255 to convert from a binary state to 0-255 intensity
    ///
    /// # Arguments
    /// * `frame` a Chip-8 Frame
    fn frame_to_sdl_texture(frame: &Frame) -> Vec<u8> {
        frame
            .iter()
            .flatten()
            .flat_map(|&pixel| [pixel * 255; 3])
            .collect()
    }

    /// Formats the Chip-8 Frame as an SDL2 RGB24 texture and renders it
    /// stretched over the whole window.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 Frame
    pub fn render(&mut self, frame: &Frame) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                self.width as u32,
                self.height as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            // rows may be padded out past 3 bytes per pixel
            for (row, line) in pixels.chunks(self.width * 3).enumerate() {
                buffer[row * pitch..row * pitch + line.len()].copy_from_slice(line);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

/// The window dimensions for a `scale` times enlarged display
fn window_size(scale: u32) -> Result<(u32, u32), String> {
    let width = (DISPLAY_WIDTH as u32).checked_mul(scale);
    let height = (DISPLAY_HEIGHT as u32).checked_mul(scale);
    match (width, height) {
        (Some(width), Some(height)) if scale > 0 => Ok((width, height)),
        _ => Err(format!("display scale {} is out of range", scale)),
    }
}
