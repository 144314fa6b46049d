//! Caller-supplied avatar options and their normalization.
//!
//! Options arrive as a loosely typed map ([`Options`]) so they can come from
//! code, a TOML config file, or CLI flags alike. [`AvatarConfig::from_options`]
//! merges them over the defaults and applies these rules:
//!
//! - numbers may be given as integers, floats (truncated) or numeric strings;
//!   anything else is invalid and falls back to the option's default;
//! - `size` must be within `1..=4096`, `quality` is clamped into `0..=100`,
//!   and a `font_size` that is missing or outside `1..=min(2 * size, 4096)`
//!   becomes `size / 2`;
//! - colors are `#RGB` or `#RRGGBB`; invalid colors fall back to the default;
//! - a `font` path that is not an existing file falls back to the bundled font;
//! - unknown keys are ignored.
//!
//! Every fallback is logged at `warn` level. The only option that can fail
//! normalization is `format`, since an unknown container cannot be encoded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{random_background, Rgb};
use crate::error::AvatarError;
use crate::format::OutputFormat;

/// Recognized option names.
pub mod keys {
    /// Canvas fill color.
    pub const BACKGROUND_COLOR: &str = "background_color";
    /// Text fill color.
    pub const FONT_COLOR: &str = "font_color";
    /// Canvas width and height in pixels.
    pub const SIZE: &str = "size";
    /// Path to a font file.
    pub const FONT: &str = "font";
    /// Text size in pixels.
    pub const FONT_SIZE: &str = "font_size";
    /// Vertical shift of the text in pixels, positive is down.
    pub const VERTICAL_OFFSET: &str = "vertical_offset";
    /// Whether to uppercase the initials.
    pub const UPCASE: &str = "upcase";
    /// Encoder quality, 0 to 100.
    pub const QUALITY: &str = "quality";
    /// Output container format.
    pub const FORMAT: &str = "format";
    /// Separator used to split text into segments.
    pub const SEPARATOR: &str = "separator";

    /// All recognized option names.
    pub const ALL: [&str; 10] = [
        BACKGROUND_COLOR,
        FONT_COLOR,
        SIZE,
        FONT,
        FONT_SIZE,
        VERTICAL_OFFSET,
        UPCASE,
        QUALITY,
        FORMAT,
        SEPARATOR,
    ];
}

/// Default canvas size.
pub const DEFAULT_SIZE: u32 = 32;
/// Largest accepted canvas size.
pub const MAX_SIZE: u32 = 4096;
/// Largest accepted `font_size` as a multiple of `size`.
pub const MAX_FONT_SCALE: u32 = 2;
/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 90;

/// Path of the font shipped with the crate.
#[must_use]
pub fn default_font_path() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/DejaVuSans.ttf"))
}

/// A single loosely typed option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// A boolean flag.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Text(String),
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u32> for OptionValue {
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u8> for OptionValue {
    fn from(v: u8) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&Path> for OptionValue {
    fn from(v: &Path) -> Self {
        Self::Text(v.to_string_lossy().into_owned())
    }
}

/// Caller-supplied options keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    values: BTreeMap<String, OptionValue>,
}

impl Options {
    /// Empty option set; every option takes its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Options::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set an option, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// Overlay `other` on top of `self`; values in `other` win.
    pub fn merge(&mut self, other: &Options) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Whether no options are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether text should be uppercased, defaulting to `true`.
    #[must_use]
    pub fn upcase(&self) -> bool {
        match self.get(keys::UPCASE) {
            None => true,
            Some(value) => as_bool(value).unwrap_or_else(|| {
                warn!("Ignoring invalid {}: {value:?}; using true", keys::UPCASE);
                true
            }),
        }
    }

    /// The explicitly configured separator, if any.
    #[must_use]
    pub fn separator(&self) -> Option<String> {
        match self.get(keys::SEPARATOR)? {
            OptionValue::Text(s) if !s.is_empty() => Some(s.clone()),
            OptionValue::Text(_) => None,
            other => {
                warn!("Ignoring non-string {}: {other:?}", keys::SEPARATOR);
                None
            }
        }
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (k, v) in iter {
            options.set(k, v);
        }
        options
    }
}

/// Fully normalized, strongly typed avatar configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarConfig {
    /// Canvas fill color.
    pub background_color: Rgb,
    /// Text fill color.
    pub font_color: Rgb,
    /// Canvas width and height in pixels.
    pub size: u32,
    /// Font file used for the text; always exists at normalization time.
    pub font: PathBuf,
    /// Text size in pixels, at least 1.
    pub font_size: u32,
    /// Vertical shift of the text relative to center, positive is down.
    pub vertical_offset: i32,
    /// Whether initials are uppercased.
    pub upcase: bool,
    /// Encoder quality, 0 to 100.
    pub quality: u8,
    /// Output container.
    pub format: OutputFormat,
    /// Explicit separator for initials extraction.
    pub separator: Option<String>,
}

impl AvatarConfig {
    /// Normalize options, drawing a random palette background when needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is unsupported or the bundled font is
    /// missing.
    pub fn from_options(options: &Options) -> Result<Self, AvatarError> {
        Self::from_options_with_rng(options, &mut rand::thread_rng())
    }

    /// Normalize options using the given random source for the palette pick.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is unsupported or the bundled font is
    /// missing.
    pub fn from_options_with_rng<R: Rng + ?Sized>(
        options: &Options,
        rng: &mut R,
    ) -> Result<Self, AvatarError> {
        for (key, _) in options.iter() {
            if !keys::ALL.contains(&key) {
                debug!("Ignoring unknown option '{key}'");
            }
        }

        let format = match options.get(keys::FORMAT) {
            None => OutputFormat::default(),
            Some(OptionValue::Text(s)) => s.parse()?,
            Some(other) => return Err(AvatarError::UnsupportedFormat(format!("{other:?}"))),
        };

        let size = integer(options, keys::SIZE)
            .and_then(|v| {
                let size = u32::try_from(v).ok().filter(|s| (1..=MAX_SIZE).contains(s));
                if size.is_none() {
                    warn!("{} {v} is outside 1..={MAX_SIZE}; using {DEFAULT_SIZE}", keys::SIZE);
                }
                size
            })
            .unwrap_or(DEFAULT_SIZE);

        let max_font_size = size.saturating_mul(MAX_FONT_SCALE).min(MAX_SIZE);
        let font_size = integer(options, keys::FONT_SIZE)
            .and_then(|v| {
                let font_size = u32::try_from(v).ok().filter(|s| (1..=max_font_size).contains(s));
                if font_size.is_none() {
                    warn!("{} {v} is outside 1..={max_font_size}; using {}", keys::FONT_SIZE, size / 2);
                }
                font_size
            })
            .unwrap_or_else(|| (size / 2).max(1));

        let vertical_offset = integer(options, keys::VERTICAL_OFFSET)
            .map_or(0, |v| i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX }));

        let quality = integer(options, keys::QUALITY).map_or(DEFAULT_QUALITY, |v| {
            u8::try_from(v.clamp(0, 100)).unwrap_or(DEFAULT_QUALITY)
        });

        let background_color =
            color(options, keys::BACKGROUND_COLOR).unwrap_or_else(|| random_background(rng));
        let font_color = color(options, keys::FONT_COLOR).unwrap_or(Rgb::WHITE);

        let config = Self {
            background_color,
            font_color,
            size,
            font: resolve_font(options.get(keys::FONT))?,
            font_size,
            vertical_offset,
            upcase: options.upcase(),
            quality,
            format,
            separator: options.separator(),
        };
        debug!("Normalized avatar config: {config:?}");
        Ok(config)
    }
}

/// Coerce an option to an integer, logging when the value is unusable.
fn integer(options: &Options, key: &str) -> Option<i64> {
    let value = options.get(key)?;
    let parsed = match value {
        OptionValue::Int(v) => Some(*v),
        #[allow(clippy::cast_possible_truncation)]
        OptionValue::Float(v) if v.is_finite() => Some(v.trunc() as i64),
        OptionValue::Text(s) => s.trim().parse().ok(),
        OptionValue::Float(_) | OptionValue::Bool(_) => None,
    };
    if parsed.is_none() {
        warn!("Ignoring non-numeric {key}: {value:?}");
    }
    parsed
}

fn as_bool(value: &OptionValue) -> Option<bool> {
    match value {
        OptionValue::Bool(b) => Some(*b),
        OptionValue::Int(v) => Some(*v != 0),
        OptionValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        OptionValue::Float(_) => None,
    }
}

fn color(options: &Options, key: &str) -> Option<Rgb> {
    match options.get(key)? {
        OptionValue::Text(s) => match Rgb::parse_hex(s) {
            Ok(rgb) => Some(rgb),
            Err(e) => {
                warn!("Ignoring {key}: {e}");
                None
            }
        },
        other => {
            warn!("Ignoring non-string {key}: {other:?}");
            None
        }
    }
}

/// Use the requested font if it exists, otherwise the bundled one.
fn resolve_font(requested: Option<&OptionValue>) -> Result<PathBuf, AvatarError> {
    match requested {
        Some(OptionValue::Text(path)) if Path::new(path).is_file() => {
            return Ok(PathBuf::from(path));
        }
        Some(OptionValue::Text(path)) => {
            warn!("Font {path} is not a file; using the bundled font");
        }
        Some(other) => warn!("Ignoring non-string {}: {other:?}", keys::FONT),
        None => {}
    }

    let fallback = default_font_path();
    if fallback.is_file() {
        Ok(fallback)
    } else {
        Err(AvatarError::FontUnavailable { path: fallback, reason: "bundled font is missing".into() })
    }
}
