use std::io::Write;

use ::tiff::encoder::compression::DeflateLevel;
use ::tiff::encoder::{Compression, TiffEncoder, colortype};
use ::tiff::tags::Predictor;
use tracing::debug;

use crate::sonar_pipeline::common::error::{Result, SonarError};
use crate::sonar_pipeline::raster::Raster;
use crate::sonar_pipeline::tiff::types::{ConversionConfig, TiffCompression};
use crate::sonar_pipeline::tiff::writer::TiffWriter;

pub struct StandardTiffWriter;

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(&self, image: &Raster, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width(), image.height());

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| SonarError::Encode(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => Predictor::Horizontal,
                _ => Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        encoder
            .write_image::<colortype::Gray8>(image.width() as u32, image.height() as u32, image.pixels())
            .map_err(|e| SonarError::Encode(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!(bytes = buffer.len(), "TIFF encoding complete");
        Ok(())
    }
}
