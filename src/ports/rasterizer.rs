//! Rasterizer port for drawing and encoding avatar canvases.

use std::path::Path;

use crate::color::Rgb;
use crate::error::AvatarError;
use crate::format::OutputFormat;

/// How centered text is drawn onto a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle<'a> {
    /// Font file to render with.
    pub font: &'a Path,
    /// Text size in pixels.
    pub font_size: u32,
    /// Text fill color.
    pub color: Rgb,
    /// Vertical shift from the centered position, positive is down.
    pub vertical_offset: i32,
}

/// Draws a flat square canvas with centered text and encodes it.
///
/// The avatar core only passes parameters through this trait and never
/// inspects pixels, so any 2D text-rendering library can sit behind it.
pub trait Rasterizer {
    /// In-memory surface threaded through the drawing steps.
    type Canvas;

    /// Create a `size` x `size` canvas filled with `background`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot allocate the canvas.
    fn render(&self, size: u32, background: Rgb) -> Result<Self::Canvas, AvatarError>;

    /// Draw `text` centered on the canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if the font cannot be loaded or the text cannot be drawn.
    fn draw_centered_text(
        &self,
        canvas: Self::Canvas,
        text: &str,
        style: &TextStyle<'_>,
    ) -> Result<Self::Canvas, AvatarError>;

    /// Encode the canvas into `format` at `quality` (0 to 100).
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder fails.
    fn encode(
        &self,
        canvas: Self::Canvas,
        format: OutputFormat,
        quality: u8,
    ) -> Result<Vec<u8>, AvatarError>;
}
