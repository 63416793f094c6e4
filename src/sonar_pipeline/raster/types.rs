//! Raster types

use rayon::prelude::*;

use crate::sonar_pipeline::common::error::{Result, SonarError};

/// Fill value for pixels no channel wrote to.
pub const WHITE: u8 = 255;

/// Row-major 8-bit grayscale image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Creates a `width` x `height` raster with every pixel set to `fill`.
    pub fn new(width: usize, height: usize, fill: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(SonarError::Data(format!(
                "{} pixels do not fill a {}x{} raster",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.pixels[start..start + self.width])
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    /// Copies `src` into this raster with its top-left corner at `(x, y)`,
    /// clipping whatever falls outside.
    pub(crate) fn blit(&mut self, src: &Raster, x: usize, y: usize) {
        if x >= self.width {
            return;
        }
        let copy_width = src.width.min(self.width - x);
        for row in 0..src.height.min(self.height.saturating_sub(y)) {
            let src_row = &src.pixels[row * src.width..row * src.width + copy_width];
            let dst_start = (y + row) * self.width + x;
            self.pixels[dst_start..dst_start + copy_width].copy_from_slice(src_row);
        }
    }

    /// Smallest and largest pixel value, `None` for an empty raster.
    pub fn min_max(&self) -> Option<(u8, u8)> {
        let min = *self.pixels.iter().min()?;
        let max = *self.pixels.iter().max()?;
        Some((min, max))
    }

    pub fn histogram(&self) -> [usize; 256] {
        let mut hist = [0usize; 256];
        for &v in &self.pixels {
            hist[v as usize] += 1;
        }
        hist
    }

    /// Returns a new raster with every pixel passed through `lut`.
    pub fn map_lut(&self, lut: &[u8; 256]) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            pixels: self.pixels.par_iter().map(|&v| lut[v as usize]).collect(),
        }
    }
}
