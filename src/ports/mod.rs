//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the avatar core and an external
//! library. Implementations live in `src/adapters/`.

pub mod rasterizer;

pub use rasterizer::{Rasterizer, TextStyle};
