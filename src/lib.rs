//! Monogram - initials avatars rendered over a flat background.
//!
//! ```no_run
//! use monogram::{generate_avatar, keys, Options};
//!
//! let options = Options::new().with(keys::SIZE, 64).with(keys::FORMAT, "png");
//! let png = generate_avatar("Ada Lovelace", &options)?;
//! std::fs::write("ada.png", png)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adapters;
pub mod color;
pub mod error;
pub mod format;
pub mod generator;
pub mod initials;
pub mod options;
pub mod ports;

pub use adapters::CosmicRasterizer;
pub use color::Rgb;
pub use error::AvatarError;
pub use format::OutputFormat;
pub use generator::{generate_avatar, initials_for, AvatarGenerator};
pub use options::{keys, AvatarConfig, OptionValue, Options};
pub use ports::{Rasterizer, TextStyle};
