//! Grayscale raster module
//!
//! This module holds the 8-bit raster type and the builders that turn sample
//! matrices into waterfall images.

mod sonogram;
pub mod types;

pub use sonogram::{build_sonogram, to_raster};
pub use types::{Raster, WHITE};
