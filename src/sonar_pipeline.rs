//! Side-scan sonar processing pipeline
//!
//! This module provides a structured approach to turning XTF captures into
//! images, with separate modules for record parsing, bottom tracking, slant
//! range correction, enhancement, TIFF writing, and conversion orchestration.

pub mod bottom_track;
pub mod common;
pub mod conversions;
pub mod enhance;
pub mod raster;
pub mod session;
pub mod slant_range;
pub mod tiff;
pub mod timing;
pub mod xtf;

pub use common::{ErrorKind, Result, SonarError};

pub use xtf::{
    PingMetadata,
    SampleMatrix,
    SonarData,
    SonarReader,
    XtfReader,
    parse,
};

pub use raster::{Raster, build_sonogram, to_raster};

pub use bottom_track::{BottomTrack, BottomTracker, TrackerConfig};

pub use slant_range::correct_slant_range;

pub use enhance::Enhancement;

pub use tiff::{
    ConversionConfig,
    ConversionConfigBuilder,
    StandardTiffWriter,
    TiffCompression,
    TiffWriter,
};

pub use conversions::XtfToTiffPipeline;

pub use session::{SonarSession, ViewMode};

pub use timing::PipelineTimings;
