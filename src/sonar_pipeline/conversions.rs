//! Pipeline conversions module
//!
//! This module contains orchestration logic for turning captures into images.

mod xtf_to_tiff;


pub use xtf_to_tiff::XtfToTiffPipeline;
