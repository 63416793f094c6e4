//! Slant-range correction
//!
//! Removes the water column from each ping and stretches what remains across
//! the full channel width, giving an approximate ground-range image.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::sonar_pipeline::bottom_track::BottomTrack;
use crate::sonar_pipeline::common::error::{Result, SonarError};
use crate::sonar_pipeline::raster::{Raster, WHITE};
use crate::sonar_pipeline::xtf::types::SampleMatrix;

/// Linearly resamples `src` to `len` values with pixel centres aligned.
///
/// Equal lengths give back `src` unchanged.
pub fn resample(src: &[u8], len: usize) -> Vec<u8> {
    match src.len() {
        0 => return vec![WHITE; len],
        1 => return vec![src[0]; len],
        _ => {}
    }

    let last = (src.len() - 1) as f64;
    let scale = src.len() as f64 / len as f64;
    (0..len)
        .map(|x| {
            let pos = ((x as f64 + 0.5) * scale - 0.5).clamp(0.0, last);
            let i0 = pos.floor() as usize;
            let i1 = (i0 + 1).min(src.len() - 1);
            let t = pos - i0 as f64;
            let v = src[i0] as f64 * (1.0 - t) + src[i1] as f64 * t;
            v.round().clamp(0.0, 255.0) as u8
        })
        .collect()
}

fn inverted(samples: &[u8]) -> Vec<u8> {
    samples.iter().map(|&v| 255 - v).collect()
}

fn check_series(matrix: &SampleMatrix, bottom: &[usize], side: &str) -> Result<()> {
    if matrix.is_empty() {
        return Err(SonarError::Data(format!("{side} channel has no pings")));
    }
    if bottom.len() != matrix.ping_count() {
        return Err(SonarError::Data(format!(
            "{side} bottom track has {} entries for {} pings",
            bottom.len(),
            matrix.ping_count()
        )));
    }
    Ok(())
}

/// Builds the ground-range image from both channels and their bottom tracks.
///
/// The output is `port width + starboard width` wide (first ping of each
/// channel) and one row per ping. For each ping the port samples up to and
/// including the bottom index and the starboard samples from the bottom index
/// on are inverted and resampled to their channel width. Pings whose bottom
/// index falls outside either row stay white.
#[instrument(skip_all, fields(pings = port.ping_count()))]
pub fn correct_slant_range(
    port: &SampleMatrix,
    starboard: &SampleMatrix,
    port_bottom: &[usize],
    starboard_bottom: &[usize],
) -> Result<Raster> {
    check_series(port, port_bottom, "port")?;
    check_series(starboard, starboard_bottom, "starboard")?;
    if port.ping_count() != starboard.ping_count() {
        return Err(SonarError::Data(format!(
            "port has {} pings, starboard has {}",
            port.ping_count(),
            starboard.ping_count()
        )));
    }

    let port_width = port.width();
    let star_width = starboard.width();
    let width = port_width + star_width;
    let mut raster = Raster::new(width, port.ping_count(), WHITE);
    if width == 0 {
        return Ok(raster);
    }

    raster
        .pixels_mut()
        .par_chunks_mut(width)
        .zip(port.rows().par_iter().zip(starboard.rows()))
        .zip(port_bottom.par_iter().zip(starboard_bottom))
        .for_each(|((out, (port_row, star_row)), (&pb, &sb))| {
            if pb >= port_row.len() || sb >= star_row.len() {
                return;
            }
            let (left, right) = out.split_at_mut(port_width);
            left.copy_from_slice(&resample(&inverted(&port_row[..=pb]), port_width));
            right.copy_from_slice(&resample(&inverted(&star_row[sb..]), star_width));
        });

    debug!(width, height = raster.height(), "Slant-range correction complete");
    Ok(raster)
}

/// Convenience wrapper taking both lines from a [`BottomTrack`].
pub fn correct_with_track(
    port: &SampleMatrix,
    starboard: &SampleMatrix,
    track: &BottomTrack,
) -> Result<Raster> {
    correct_slant_range(port, starboard, &track.port, &track.starboard)
}
