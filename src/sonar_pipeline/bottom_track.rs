//! Bottom tracking module
//!
//! Estimates, for every ping, the sample index where the seafloor return
//! starts. Port and starboard use opposite conventions: the port search walks
//! outward from 70% of the row looking for the dark water column, the
//! starboard search walks from the start of the row looking for the first
//! sustained return.

mod port;
mod smoothing;
mod starboard;
pub mod types;

use rayon::prelude::*;
use tracing::{info, instrument};

use crate::sonar_pipeline::common::error::{Result, SonarError};
use crate::sonar_pipeline::xtf::types::SampleMatrix;

pub use port::{PortTracker, adjust_start};
pub use smoothing::smooth_line;
pub use starboard::track_starboard_ping;
pub use types::{BottomTrack, TrackerConfig, TrackerConfigBuilder};

pub struct BottomTracker {
    config: TrackerConfig,
}

impl Default for BottomTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl BottomTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn ensure_pings(matrix: &SampleMatrix, side: &str) -> Result<()> {
        if matrix.is_empty() {
            return Err(SonarError::Data(format!("{side} channel has no pings")));
        }
        Ok(())
    }

    /// Unsmoothed port indices. Pings are processed strictly in order since
    /// each jump check depends on the previous accepted index.
    pub fn track_port_raw(&self, port: &SampleMatrix) -> Result<Vec<usize>> {
        Self::ensure_pings(port, "port")?;
        let mut tracker = PortTracker::new();
        Ok(port.rows().iter().map(|row| tracker.next(row)).collect())
    }

    /// Unsmoothed starboard indices.
    pub fn track_starboard_raw(&self, starboard: &SampleMatrix) -> Result<Vec<usize>> {
        Self::ensure_pings(starboard, "starboard")?;
        let rows = starboard.rows();
        let line = if self.config.parallel {
            rows.par_iter().map(|row| track_starboard_ping(row)).collect()
        } else {
            rows.iter().map(|row| track_starboard_ping(row)).collect()
        };
        Ok(line)
    }

    pub fn track_port(&self, port: &SampleMatrix) -> Result<Vec<usize>> {
        let raw = self.track_port_raw(port)?;
        Ok(smooth_line(&raw, self.config.smoothing_window))
    }

    pub fn track_starboard(&self, starboard: &SampleMatrix) -> Result<Vec<usize>> {
        let raw = self.track_starboard_raw(starboard)?;
        Ok(smooth_line(&raw, self.config.smoothing_window))
    }

    /// Tracks both channels and smooths each line.
    #[instrument(skip_all, fields(port_pings = port.ping_count(), starboard_pings = starboard.ping_count()))]
    pub fn track(&self, port: &SampleMatrix, starboard: &SampleMatrix) -> Result<BottomTrack> {
        let (port_line, starboard_line) = if self.config.parallel {
            rayon::join(|| self.track_port(port), || self.track_starboard(starboard))
        } else {
            (self.track_port(port), self.track_starboard(starboard))
        };

        let track = BottomTrack {
            port: port_line?,
            starboard: starboard_line?,
        };
        info!(
            port_pings = track.port.len(),
            starboard_pings = track.starboard.len(),
            "Bottom track complete"
        );
        Ok(track)
    }
}
