//! Per-file processing session
//!
//! A session owns one decoded capture and the images derived from it. Derived
//! values are computed on first use and kept until the next load; they depend
//! only on the capture and the tracker configuration, so caching never changes
//! what a caller sees.

use std::path::Path;

use tracing::{info, instrument};

use crate::sonar_pipeline::bottom_track::{BottomTrack, BottomTracker, TrackerConfig};
use crate::sonar_pipeline::common::error::{Result, SonarError};
use crate::sonar_pipeline::enhance::{self, Enhancement};
use crate::sonar_pipeline::raster::{Raster, build_sonogram};
use crate::sonar_pipeline::slant_range::correct_with_track;
use crate::sonar_pipeline::xtf::{self, SonarData};

/// Which image enhancements start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Combined waterfall as recorded
    #[default]
    Original,
    /// Ground-range image after bottom tracking
    SlantCorrected,
}

fn no_data() -> SonarError {
    SonarError::Empty("no capture loaded".to_string())
}

#[derive(Default)]
pub struct SonarSession {
    tracker: BottomTracker,
    data: Option<SonarData>,
    sonogram: Option<Raster>,
    track: Option<BottomTrack>,
    corrected: Option<Raster>,
    view: ViewMode,
    current: Option<Raster>,
}

impl SonarSession {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            tracker: BottomTracker::new(config),
            ..Self::default()
        }
    }

    /// Parses `path` and replaces the loaded capture.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let data = xtf::parse(path)?;
        self.load_data(data)
    }

    /// Replaces the loaded capture and drops everything derived from the old one.
    pub fn load_data(&mut self, data: SonarData) -> Result<()> {
        if data.is_empty() {
            return Err(SonarError::Empty("capture contains no sonar pings".to_string()));
        }
        info!(
            port_pings = data.port.ping_count(),
            starboard_pings = data.starboard.ping_count(),
            "Capture loaded"
        );

        self.data = Some(data);
        self.sonogram = None;
        self.track = None;
        self.corrected = None;
        self.view = ViewMode::Original;
        self.current = None;
        Ok(())
    }

    pub fn data(&self) -> Option<&SonarData> {
        self.data.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    /// Combined port/starboard waterfall.
    pub fn sonogram(&mut self) -> Result<&Raster> {
        let data = self.data.as_ref().ok_or_else(no_data)?;
        Ok(self
            .sonogram
            .get_or_insert_with(|| build_sonogram(&data.port, &data.starboard, true)))
    }

    pub fn bottom_track(&mut self) -> Result<&BottomTrack> {
        let track = match self.track.take() {
            Some(track) => track,
            None => {
                let data = self.data.as_ref().ok_or_else(no_data)?;
                self.tracker.track(&data.port, &data.starboard)?
            }
        };
        Ok(self.track.insert(track))
    }

    /// Ground-range image built from the bottom track.
    pub fn corrected(&mut self) -> Result<&Raster> {
        let raster = match self.corrected.take() {
            Some(raster) => raster,
            None => {
                let track = self.bottom_track()?.clone();
                let data = self.data.as_ref().ok_or_else(no_data)?;
                correct_with_track(&data.port, &data.starboard, &track)?
            }
        };
        Ok(self.corrected.insert(raster))
    }

    /// Unenhanced image of the current view.
    fn base(&mut self) -> Result<Raster> {
        match self.view {
            ViewMode::Original => self.sonogram().cloned(),
            ViewMode::SlantCorrected => self.corrected().cloned(),
        }
    }

    /// Switches between the waterfall and the ground-range view. Enhancements
    /// applied so far are discarded.
    pub fn toggle_slant_correction(&mut self) -> Result<ViewMode> {
        self.view = match self.view {
            ViewMode::Original => {
                self.corrected()?;
                ViewMode::SlantCorrected
            }
            ViewMode::SlantCorrected => ViewMode::Original,
        };
        self.current = None;
        Ok(self.view)
    }

    /// Image as it should currently be displayed.
    pub fn current(&mut self) -> Result<&Raster> {
        let raster = match self.current.take() {
            Some(raster) => raster,
            None => self.base()?,
        };
        Ok(self.current.insert(raster))
    }

    /// Applies `enhancement` on top of whatever is displayed.
    pub fn apply(&mut self, enhancement: Enhancement) -> Result<&Raster> {
        let next = enhancement.apply(self.current()?)?;
        Ok(self.current.insert(next))
    }

    /// Gamma applied to the unenhanced view, so repeated previews never compound.
    pub fn gamma_preview(&mut self, g: f64) -> Result<&Raster> {
        let next = enhance::gamma(&self.base()?, g)?;
        Ok(self.current.insert(next))
    }

    /// Drops all enhancements of the current view.
    pub fn restore(&mut self) -> Result<&Raster> {
        let base = self.base()?;
        Ok(self.current.insert(base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sonar_pipeline::xtf::{PingMetadata, SampleMatrix};

    fn capture(value: u8) -> SonarData {
        let port_row: Vec<u8> = (0..60).map(|i| if i < 45 { value } else { 0 }).collect();
        let star_row: Vec<u8> = (0..60).map(|i| if i < 10 { 0 } else { value }).collect();
        SonarData {
            port: SampleMatrix::new(vec![port_row; 6]),
            starboard: SampleMatrix::new(vec![star_row; 6]),
            pings: vec![PingMetadata::default(); 6],
            ..SonarData::default()
        }
    }

    fn loaded(value: u8) -> SonarSession {
        let mut session = SonarSession::default();
        session.load_data(capture(value)).unwrap();
        session
    }

    #[test]
    fn test_empty_session_reports_no_data() {
        let mut session = SonarSession::default();
        assert!(matches!(session.current(), Err(SonarError::Empty(_))));
        assert!(matches!(
            session.load_data(SonarData::default()),
            Err(SonarError::Empty(_))
        ));
    }

    #[test]
    fn test_current_starts_as_sonogram() {
        let mut session = loaded(30);
        let sonogram = session.sonogram().unwrap().clone();
        assert_eq!(session.current().unwrap(), &sonogram);
        assert_eq!(sonogram.width(), 120);
    }

    #[test]
    fn test_toggle_switches_base_image() {
        let mut session = loaded(30);
        assert_eq!(session.toggle_slant_correction().unwrap(), ViewMode::SlantCorrected);
        let corrected = session.corrected().unwrap().clone();
        assert_eq!(session.current().unwrap(), &corrected);

        assert_eq!(session.toggle_slant_correction().unwrap(), ViewMode::Original);
        let sonogram = session.sonogram().unwrap().clone();
        assert_eq!(session.current().unwrap(), &sonogram);
    }

    #[test]
    fn test_gamma_preview_does_not_compound() {
        let mut session = loaded(30);
        let once = session.gamma_preview(2.0).unwrap().clone();
        let twice = session.gamma_preview(2.0).unwrap().clone();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_enhancements_stack_until_restore() {
        let mut session = loaded(30);
        let base = session.current().unwrap().clone();
        session.apply(Enhancement::Negative).unwrap();
        let double = session.apply(Enhancement::Negative).unwrap().clone();
        assert_eq!(double, base);

        session.apply(Enhancement::Normalize).unwrap();
        assert_eq!(session.restore().unwrap(), &base);
    }

    #[test]
    fn test_load_invalidates_cached_images() {
        let mut session = loaded(30);
        session.toggle_slant_correction().unwrap();
        let first = session.current().unwrap().clone();

        session.load_data(capture(90)).unwrap();
        assert_eq!(session.view_mode(), ViewMode::Original);
        session.toggle_slant_correction().unwrap();
        assert_ne!(session.current().unwrap(), &first);
    }
}
