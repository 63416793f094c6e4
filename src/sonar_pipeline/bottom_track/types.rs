//! Bottom tracking configuration and result types

/// Default half-width of the moving average applied to each line.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 100;

/// Configuration for bottom tracking
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Half-width of the centered moving average, in pings
    pub smoothing_window: usize,
    /// Track starboard on the rayon pool while port runs
    pub parallel: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            parallel: true,
        }
    }
}

impl TrackerConfig {
    pub fn builder() -> TrackerConfigBuilder {
        TrackerConfigBuilder::default()
    }
}

/// Builder for TrackerConfig
#[derive(Default)]
pub struct TrackerConfigBuilder {
    smoothing_window: Option<usize>,
    parallel: Option<bool>,
}

impl TrackerConfigBuilder {
    pub fn smoothing_window(mut self, half_window: usize) -> Self {
        self.smoothing_window = Some(half_window);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn build(self) -> TrackerConfig {
        let default = TrackerConfig::default();
        TrackerConfig {
            smoothing_window: self.smoothing_window.unwrap_or(default.smoothing_window),
            parallel: self.parallel.unwrap_or(default.parallel),
        }
    }
}

/// Smoothed bottom indices for both channels, one per ping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BottomTrack {
    pub port: Vec<usize>,
    pub starboard: Vec<usize>,
}

impl BottomTrack {
    /// Polyline vertices `(x, ping)` for drawing the waterline over a combined
    /// sonogram whose starboard half starts at `port_width`.
    pub fn overlay_points(&self, port_width: usize) -> (Vec<(usize, usize)>, Vec<(usize, usize)>) {
        let port = self
            .port
            .iter()
            .enumerate()
            .map(|(ping, &x)| (x, ping))
            .collect();
        let starboard = self
            .starboard
            .iter()
            .enumerate()
            .map(|(ping, &x)| (port_width + x, ping))
            .collect();
        (port, starboard)
    }
}
