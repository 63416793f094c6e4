//! TIFF writing module
//!
//! This module encodes rasters as 8-bit grayscale TIFF files with various
//! compression options.

mod standard_tiff_writer;
pub mod types;
mod writer;

pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{ConversionConfig, ConversionConfigBuilder, TiffCompression};
pub use writer::TiffWriter;
