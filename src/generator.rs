//! The avatar pipeline: normalize, derive initials, rasterize, encode.

use log::debug;
use rand::Rng;

use crate::adapters::CosmicRasterizer;
use crate::error::AvatarError;
use crate::initials;
use crate::options::{AvatarConfig, Options};
use crate::ports::rasterizer::{Rasterizer, TextStyle};

/// Generates avatars through an injected [`Rasterizer`].
#[derive(Debug, Clone, Default)]
pub struct AvatarGenerator<R> {
    rasterizer: R,
}

impl<R: Rasterizer> AvatarGenerator<R> {
    /// Create a generator that draws with `rasterizer`.
    pub fn new(rasterizer: R) -> Self {
        Self { rasterizer }
    }

    /// Generate an encoded avatar for `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the options name an unsupported format, the font
    /// cannot be loaded, or the rasterizer fails.
    pub fn generate(&self, text: &str, options: &Options) -> Result<Vec<u8>, AvatarError> {
        self.generate_with_rng(text, options, &mut rand::thread_rng())
    }

    /// Like [`AvatarGenerator::generate`], drawing the default background
    /// from `rng` so callers can make the output reproducible.
    ///
    /// # Errors
    ///
    /// Returns an error if the options name an unsupported format, the font
    /// cannot be loaded, or the rasterizer fails.
    pub fn generate_with_rng<G: Rng + ?Sized>(
        &self,
        text: &str,
        options: &Options,
        rng: &mut G,
    ) -> Result<Vec<u8>, AvatarError> {
        let config = AvatarConfig::from_options_with_rng(options, rng)?;
        self.generate_with_config(text, &config)
    }

    /// Render `text` with an already normalized configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the rasterizer fails.
    pub fn generate_with_config(
        &self,
        text: &str,
        config: &AvatarConfig,
    ) -> Result<Vec<u8>, AvatarError> {
        let initials = initials::extract(text, config.separator.as_deref(), config.upcase);
        debug!("Initials for {text:?}: {initials:?}");

        let mut canvas = self.rasterizer.render(config.size, config.background_color)?;
        if !initials.is_empty() {
            let style = TextStyle {
                font: &config.font,
                font_size: config.font_size,
                color: config.font_color,
                vertical_offset: config.vertical_offset,
            };
            canvas = self.rasterizer.draw_centered_text(canvas, &initials, &style)?;
        }
        self.rasterizer.encode(canvas, config.format, config.quality)
    }
}

/// Initials that [`generate_avatar`] would draw for `text`.
///
/// Only the `separator` and `upcase` options are consulted.
#[must_use]
pub fn initials_for(text: &str, options: &Options) -> String {
    initials::extract(text, options.separator().as_deref(), options.upcase())
}

/// Generate an encoded avatar for `text` with the bundled rasterizer.
///
/// # Errors
///
/// Returns an error if the options name an unsupported format, the font
/// cannot be loaded, or encoding fails.
pub fn generate_avatar(text: &str, options: &Options) -> Result<Vec<u8>, AvatarError> {
    AvatarGenerator::new(CosmicRasterizer::new()).generate(text, options)
}
