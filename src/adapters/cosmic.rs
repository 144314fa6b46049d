//! Rasterizer backed by `cosmic-text` for glyphs and `image` for pixels.

use std::path::Path;

use cosmic_text::fontdb;
use cosmic_text::{Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use log::debug;

use crate::color::Rgb;
use crate::error::AvatarError;
use crate::format::OutputFormat;
use crate::ports::rasterizer::{Rasterizer, TextStyle};

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.2;

/// Production rasterizer.
///
/// Holds no state: each text draw loads the requested font file into a
/// private font database, so output depends only on that file and never on
/// fonts installed on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosmicRasterizer;

impl CosmicRasterizer {
    /// Create a new rasterizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for CosmicRasterizer {
    type Canvas = RgbaImage;

    fn render(&self, size: u32, background: Rgb) -> Result<RgbaImage, AvatarError> {
        if size == 0 {
            return Err(AvatarError::Render("canvas size must be positive".into()));
        }
        Ok(RgbaImage::from_pixel(size, size, Rgba([background.r, background.g, background.b, 0xFF])))
    }

    fn draw_centered_text(
        &self,
        mut canvas: RgbaImage,
        text: &str,
        style: &TextStyle<'_>,
    ) -> Result<RgbaImage, AvatarError> {
        if style.font_size == 0 {
            return Err(AvatarError::Render("font size must be positive".into()));
        }

        let coverage = rasterize_text(text, style)?;
        let Some(ink) = InkBox::of(&coverage) else {
            debug!("No visible glyphs for {text:?}; leaving canvas blank");
            return Ok(canvas);
        };

        let (dx, dy) = ink.centering_offset(canvas.width(), canvas.height());
        let dy = dy + i64::from(style.vertical_offset);
        debug!("Drawing {text:?} with ink box {ink:?} shifted by ({dx}, {dy})");

        for &(x, y, alpha) in &coverage {
            let (Ok(px), Ok(py)) = (u32::try_from(i64::from(x) + dx), u32::try_from(i64::from(y) + dy))
            else {
                continue;
            };
            if px < canvas.width() && py < canvas.height() {
                blend(canvas.get_pixel_mut(px, py), style.color, alpha);
            }
        }
        Ok(canvas)
    }

    fn encode(
        &self,
        canvas: RgbaImage,
        format: OutputFormat,
        quality: u8,
    ) -> Result<Vec<u8>, AvatarError> {
        let rgb = DynamicImage::ImageRgba8(canvas).into_rgb8();
        let (width, height) = rgb.dimensions();
        let mut out = Vec::new();

        let result = match format {
            OutputFormat::Png => {
                PngEncoder::new_with_quality(&mut out, png_compression(quality), FilterType::Adaptive)
                    .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
            }
            OutputFormat::Jpeg => JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
                .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8),
            OutputFormat::WebP => WebPEncoder::new_lossless(&mut out).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            ),
        };
        result.map_err(|e| AvatarError::Encode(format!("Failed to encode {format}: {e}")))?;
        Ok(out)
    }
}

/// Map a 0-100 quality onto PNG compression effort.
fn png_compression(quality: u8) -> CompressionType {
    match quality {
        0..=30 => CompressionType::Fast,
        31..=69 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Load a single font file into an isolated font system.
///
/// Returns the system and the family name of the first face in the file.
fn load_font(path: &Path) -> Result<(FontSystem, String), AvatarError> {
    let unavailable = |reason: String| AvatarError::FontUnavailable { path: path.to_path_buf(), reason };

    let data = std::fs::read(path).map_err(|e| unavailable(e.to_string()))?;
    let mut db = fontdb::Database::new();
    db.load_font_data(data);

    let family = db
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| unavailable("no font faces found".into()))?;
    debug!("Loaded font family {family:?} from {}", path.display());

    Ok((FontSystem::new_with_locale_and_db("en-US".into(), db), family))
}

/// Shape and rasterize `text`, returning per-pixel coverage in layout space.
fn rasterize_text(text: &str, style: &TextStyle<'_>) -> Result<Vec<(i32, i32, u8)>, AvatarError> {
    let (mut font_system, family) = load_font(style.font)?;
    let mut cache = SwashCache::new();

    #[allow(clippy::cast_precision_loss)]
    let font_size = style.font_size as f32;
    let mut buffer = Buffer::new(&mut font_system, Metrics::new(font_size, font_size * LINE_HEIGHT));
    buffer.set_size(&mut font_system, None, None);
    buffer.set_text(&mut font_system, text, Attrs::new().family(Family::Name(&family)), Shaping::Advanced);
    buffer.shape_until_scroll(&mut font_system, false);

    let color = Color::rgb(style.color.r, style.color.g, style.color.b);
    let mut coverage = Vec::new();
    buffer.draw(&mut font_system, &mut cache, color, |x, y, w, h, c| {
        if c.a() == 0 {
            return;
        }
        for oy in 0..h {
            for ox in 0..w {
                let (Ok(ox), Ok(oy)) = (i32::try_from(ox), i32::try_from(oy)) else {
                    continue;
                };
                coverage.push((x + ox, y + oy, c.a()));
            }
        }
    });
    Ok(coverage)
}

/// Bounding box of the pixels glyphs actually cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InkBox {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl InkBox {
    fn of(coverage: &[(i32, i32, u8)]) -> Option<Self> {
        let (&(x0, y0, _), rest) = coverage.split_first()?;
        let init = Self { min_x: x0, min_y: y0, max_x: x0, max_y: y0 };
        Some(rest.iter().fold(init, |b, &(x, y, _)| Self {
            min_x: b.min_x.min(x),
            min_y: b.min_y.min(y),
            max_x: b.max_x.max(x),
            max_y: b.max_y.max(y),
        }))
    }

    /// Translation that centers this box on a `width` x `height` canvas.
    fn centering_offset(self, width: u32, height: u32) -> (i64, i64) {
        let ink_w = i64::from(self.max_x) - i64::from(self.min_x) + 1;
        let ink_h = i64::from(self.max_y) - i64::from(self.min_y) + 1;
        (
            (i64::from(width) - ink_w).div_euclid(2) - i64::from(self.min_x),
            (i64::from(height) - ink_h).div_euclid(2) - i64::from(self.min_y),
        )
    }
}

/// Source-over blend of an opaque color at `alpha` coverage.
fn blend(dst: &mut Rgba<u8>, color: Rgb, alpha: u8) {
    let a = u16::from(alpha);
    for (d, s) in dst.0.iter_mut().zip([color.r, color.g, color.b]) {
        let mixed = (u16::from(s) * a + u16::from(*d) * (255 - a) + 127) / 255;
        *d = u8::try_from(mixed).unwrap_or(u8::MAX);
    }
}
