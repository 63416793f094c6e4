use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::sonar_pipeline::{
    bottom_track::{BottomTracker, TrackerConfig},
    common::error::{Result, SonarError},
    enhance,
    raster::{Raster, build_sonogram},
    slant_range::correct_with_track,
    tiff::{ConversionConfig, StandardTiffWriter, TiffWriter},
    timing::PipelineTimings,
    xtf::{SonarData, SonarReader, XtfReader},
};

pub struct XtfToTiffPipeline<R: SonarReader, W: TiffWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
    tracker: BottomTracker,
}

impl XtfToTiffPipeline<XtfReader, StandardTiffWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self::with_custom(XtfReader, StandardTiffWriter, config)
    }
}

impl<R: SonarReader, W: TiffWriter> XtfToTiffPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
            tracker: BottomTracker::default(),
        }
    }

    pub fn with_tracker(mut self, config: TrackerConfig) -> Self {
        self.tracker = BottomTracker::new(config);
        self
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(SonarError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(SonarError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Produces the output image for already decoded data.
    ///
    /// Slant correction always merges both channels, so `combine_channels`
    /// only affects the uncorrected waterfall.
    pub fn render(&self, data: &SonarData, timings: &mut PipelineTimings) -> Result<Raster> {
        if data.is_empty() {
            return Err(SonarError::Empty("capture contains no sonar pings".to_string()));
        }

        let raster = if self.config.slant_correct {
            let track = timings.measure("bottom_track", || {
                self.tracker.track(&data.port, &data.starboard)
            })?;
            timings.measure("slant_range", || {
                correct_with_track(&data.port, &data.starboard, &track)
            })?
        } else {
            timings.measure("sonogram", || {
                build_sonogram(&data.port, &data.starboard, self.config.combine_channels)
            })
        };

        match self.config.gamma {
            Some(g) => timings.measure("gamma", || enhance::gamma(&raster, g)),
            None => Ok(raster),
        }
    }

    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        self.convert_with_timings(input_data, output).map(|_| ())
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        info!("Starting XTF to TIFF conversion");

        let data = timings.measure("decode_xtf", || self.reader.read_xtf(input_data))?;
        let raster = self.render(&data, &mut timings)?;

        timings.measure("validate_dimensions", || {
            self.validate_dimensions(raster.width(), raster.height())
        })?;

        timings.measure("encode_tiff", || {
            self.writer.write_tiff(&raster, output, &self.config)
        })?;

        info!(
            width = raster.width(),
            height = raster.height(),
            pings = data.pings.len(),
            "Conversion complete"
        );
        Ok(timings)
    }

    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        self.convert_file_with_timings(input_path, output_path)
            .map(|_| ())
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = timings.measure("read_input_file", || {
            std::fs::read(input_path).map_err(|e| {
                SonarError::InputRead(format!("{}: {}", input_path.display(), e))
            })
        })?;

        // Encode into memory first so a failed conversion leaves no partial file.
        let mut encoded = Vec::new();
        timings.extend(self.convert_with_timings(&input_data, &mut encoded)?);

        timings.measure("write_output_file", || {
            std::fs::write(output_path, &encoded).map_err(|e| {
                SonarError::OutputWrite(format!("{}: {}", output_path.display(), e))
            })
        })?;

        Ok(timings)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
