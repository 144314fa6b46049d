//! Adapter implementations for port traits.
//!
//! - `cosmic` — text shaping with `cosmic-text`, canvas and encoders from `image`

pub mod cosmic;

pub use cosmic::CosmicRasterizer;
