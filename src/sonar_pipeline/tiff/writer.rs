use std::io::Write;

use crate::sonar_pipeline::common::error::Result;
use crate::sonar_pipeline::raster::Raster;
use crate::sonar_pipeline::tiff::types::ConversionConfig;

pub trait TiffWriter {
    fn write_tiff(&self, image: &Raster, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}
