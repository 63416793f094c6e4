//! XTF capture reading module
//!
//! This module decodes chained-record side-scan captures into per-channel
//! sample matrices and per-ping metadata.

mod layout;
mod reader;
mod xtf_reader;
pub mod types;

use std::path::Path;

use tracing::instrument;

use crate::sonar_pipeline::common::error::{Result, SonarError};

pub use layout::{CHANNEL_PADDING_BLOCK, MAX_STORED_CHANNELS, XTF_FILE_FORMAT, XTF_MAGIC};
pub use reader::SonarReader;
pub use types::{ChannelInfo, FileInfo, PingMetadata, SampleMatrix, SonarData};
pub use xtf_reader::{XtfReader, scale_sample};

/// Reads and decodes an XTF capture from disk.
///
/// The whole file is read once; nothing is kept open after this returns.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn parse<P: AsRef<Path>>(path: P) -> Result<SonarData> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .map_err(|e| SonarError::InputRead(format!("{}: {}", path.display(), e)))?;
    XtfReader.read_xtf(&data)
}
