//! Decoded sonar data types

/// Per-channel intensity samples, one row per ping in ping order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleMatrix {
    rows: Vec<Vec<u8>>,
}

impl SampleMatrix {
    pub fn new(rows: Vec<Vec<u8>>) -> Self {
        Self { rows }
    }

    pub fn push_row(&mut self, row: Vec<u8>) {
        self.rows.push(row);
    }

    /// Number of pings (rows).
    pub fn ping_count(&self) -> usize {
        self.rows.len()
    }

    /// Row width used for image layout: the first ping's sample count.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, ping: usize) -> Option<&[u8]> {
        self.rows.get(ping).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }
}

impl From<Vec<Vec<u8>>> for SampleMatrix {
    fn from(rows: Vec<Vec<u8>>) -> Self {
        Self::new(rows)
    }
}

/// Metadata derived for a single ping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PingMetadata {
    /// Sequence number reported by the sonar
    pub ping_number: u32,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub hundredths: u8,
    /// Samples in the port channel of this ping
    pub sample_count: usize,
    /// Listening time of the port channel, in seconds
    pub time_duration: f64,
    /// Seconds per sample, 0 when the ping carries no samples
    pub sample_interval: f64,
    /// Sound velocity in m/s; reported values above 1000 are two-way and get halved
    pub sound_velocity: f64,
    /// Slant range in metres
    pub slant_range: f64,
    pub ship_x: f64,
    pub ship_y: f64,
    pub altitude: f64,
    pub heading: f64,
}

impl PingMetadata {
    /// Fills in the derived timing fields from the raw header values.
    pub fn with_timing(
        mut self,
        sample_count: usize,
        time_duration: f64,
        reported_velocity: f64,
        header_slant_range: f64,
    ) -> Self {
        let sample_interval = if sample_count == 0 {
            0.0
        } else {
            time_duration / sample_count as f64
        };
        let sound_velocity = if reported_velocity > 1000.0 {
            reported_velocity / 2.0
        } else {
            reported_velocity
        };
        let slant_range = if header_slant_range > 0.0 {
            header_slant_range
        } else {
            ((sample_count as f64 - 1.0) * sound_velocity * sample_interval).round()
        };

        self.sample_count = sample_count;
        self.time_duration = time_duration;
        self.sample_interval = sample_interval;
        self.sound_velocity = sound_velocity;
        self.slant_range = slant_range;
        self
    }
}

/// Per-channel configuration from the file header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelInfo {
    pub type_of_channel: u8,
    pub sub_channel_number: u8,
    pub bytes_per_sample: u16,
    pub name: String,
}

/// File-level description of the capture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInfo {
    pub sonar_name: String,
    pub recording_program: String,
    pub channel_count: u16,
    pub channels: Vec<ChannelInfo>,
}

/// Everything decoded from one capture
#[derive(Debug, Clone, Default)]
pub struct SonarData {
    pub info: FileInfo,
    pub port: SampleMatrix,
    pub starboard: SampleMatrix,
    pub pings: Vec<PingMetadata>,
}

impl SonarData {
    pub fn is_empty(&self) -> bool {
        self.port.is_empty() && self.starboard.is_empty()
    }

    pub fn into_parts(self) -> (SampleMatrix, SampleMatrix, Vec<PingMetadata>) {
        (self.port, self.starboard, self.pings)
    }
}
