use tracing::debug;

use crate::sonar_pipeline::raster::types::{Raster, WHITE};
use crate::sonar_pipeline::xtf::types::SampleMatrix;

/// Converts one channel to a raster, one image row per ping.
///
/// Intensities are inverted so strong returns render dark. The width comes
/// from the first ping; shorter rows leave white at the end, longer rows are
/// cut.
pub fn to_raster(matrix: &SampleMatrix) -> Raster {
    let width = matrix.width();
    let height = matrix.ping_count();
    let mut raster = Raster::new(width, height, WHITE);

    for (y, samples) in matrix.rows().iter().enumerate() {
        for (dst, &sample) in raster.row_mut(y).iter_mut().zip(samples) {
            *dst = 255 - sample;
        }
    }

    raster
}

/// Builds the waterfall image for a capture.
///
/// With `combine` unset only the port image is returned. Otherwise both
/// channels are laid side by side on a white canvas `2 * max(width)` wide and
/// `max(height)` tall, starboard starting at the canvas midpoint.
pub fn build_sonogram(port: &SampleMatrix, starboard: &SampleMatrix, combine: bool) -> Raster {
    let port_img = to_raster(port);
    if !combine {
        return port_img;
    }

    let star_img = to_raster(starboard);
    if port_img.is_empty() && star_img.is_empty() {
        return Raster::default();
    }

    let width = port_img.width().max(star_img.width());
    let height = port_img.height().max(star_img.height());
    debug!(width = width * 2, height, "Building combined sonogram");

    let mut combined = Raster::new(width * 2, height, WHITE);
    combined.blit(&port_img, 0, 0);
    combined.blit(&star_img, width, 0);
    combined
}
