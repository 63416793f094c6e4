//! Byte layout of the XTF structures the reader consumes.
//!
//! All structures are packed and little-endian. Only the fields the pipeline
//! uses are decoded; offsets are relative to the start of each structure.

use crate::sonar_pipeline::xtf::types::ChannelInfo;

/// `FileFormat` value every XTF file starts with.
pub const XTF_FILE_FORMAT: u8 = 0x7B;

/// Magic number opening every chained record.
pub const XTF_MAGIC: u16 = 0xFACE;

/// Channel descriptors stored inline in the file header.
pub const MAX_STORED_CHANNELS: usize = 6;

/// Size of one extension block holding up to eight extra channel descriptors.
pub const CHANNEL_PADDING_BLOCK: usize = 1024;

pub(crate) const FILE_HEADER_SIZE: usize = 1024;
pub(crate) const RECORD_HEADER_SIZE: usize = 14;
pub(crate) const PING_HEADER_SIZE: usize = 256;
pub(crate) const PING_CHANNEL_HEADER_SIZE: usize = 64;

pub(crate) const HEADER_TYPE_SONAR: u8 = 0;

const CHAN_INFO_OFFSET: usize = 256;
const CHAN_INFO_SIZE: usize = 128;

/// Little-endian field access over a fixed-size structure.
struct Fields<'a>(&'a [u8]);

impl Fields<'_> {
    fn u8(&self, at: usize) -> u8 {
        self.0[at]
    }

    fn u16(&self, at: usize) -> u16 {
        u16::from_le_bytes([self.0[at], self.0[at + 1]])
    }

    fn u32(&self, at: usize) -> u32 {
        u32::from_le_bytes([self.0[at], self.0[at + 1], self.0[at + 2], self.0[at + 3]])
    }

    fn f32(&self, at: usize) -> f32 {
        f32::from_bits(self.u32(at))
    }

    fn f64(&self, at: usize) -> f64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.0[at..at + 8]);
        f64::from_le_bytes(bytes)
    }

    /// NUL-terminated fixed-width text field.
    fn text(&self, at: usize, len: usize) -> String {
        let raw = &self.0[at..at + len];
        let end = raw.iter().position(|&b| b == 0).unwrap_or(len);
        String::from_utf8_lossy(&raw[..end]).trim().to_string()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FileHeader {
    pub file_format: u8,
    pub recording_program: String,
    pub sonar_name: String,
    pub channel_count: u16,
    pub channels: Vec<ChannelInfo>,
}

impl FileHeader {
    /// Decodes the fixed file header. `bytes` must hold `FILE_HEADER_SIZE` bytes.
    pub fn decode(bytes: &[u8]) -> Self {
        let f = Fields(bytes);
        let channels = (0..MAX_STORED_CHANNELS)
            .map(|i| {
                let base = CHAN_INFO_OFFSET + i * CHAN_INFO_SIZE;
                ChannelInfo {
                    type_of_channel: f.u8(base),
                    sub_channel_number: f.u8(base + 1),
                    bytes_per_sample: f.u16(base + 6),
                    name: f.text(base + 12, 16),
                }
            })
            .collect();

        Self {
            file_format: f.u8(0),
            recording_program: f.text(2, 8),
            sonar_name: f.text(18, 16),
            channel_count: f.u16(166),
            channels,
        }
    }

    /// Bytes of extra channel descriptors following the header.
    pub fn padding_len(&self) -> usize {
        let channels = self.channel_count as usize;
        if channels <= MAX_STORED_CHANNELS {
            return 0;
        }
        (channels - MAX_STORED_CHANNELS).div_ceil(8) * CHANNEL_PADDING_BLOCK
    }

    /// Channels whose pings are stored in each sonar record.
    pub fn stored_channels(&self) -> usize {
        (self.channel_count as usize).min(MAX_STORED_CHANNELS)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RecordHeader {
    pub magic: u16,
    pub header_type: u8,
    pub num_bytes: u32,
}

impl RecordHeader {
    pub fn decode(bytes: &[u8]) -> Self {
        let f = Fields(bytes);
        Self {
            magic: f.u16(0),
            header_type: f.u8(2),
            num_bytes: f.u32(10),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PingHeader {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub hundredths: u8,
    pub ping_number: u32,
    pub sound_velocity: f32,
    pub ship_y: f64,
    pub ship_x: f64,
    pub altitude: f32,
    pub heading: f32,
}

impl PingHeader {
    pub fn decode(bytes: &[u8]) -> Self {
        let f = Fields(bytes);
        Self {
            year: f.u16(14),
            month: f.u8(16),
            day: f.u8(17),
            hour: f.u8(18),
            minute: f.u8(19),
            second: f.u8(20),
            hundredths: f.u8(21),
            ping_number: f.u32(28),
            sound_velocity: f.f32(32),
            ship_y: f.f64(128),
            ship_x: f.f64(136),
            altitude: f.f32(196),
            heading: f.f32(212),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PingChannelHeader {
    pub channel_number: u16,
    pub slant_range: f32,
    pub time_duration: f32,
    pub num_samples: u32,
}

impl PingChannelHeader {
    pub fn decode(bytes: &[u8]) -> Self {
        let f = Fields(bytes);
        Self {
            channel_number: f.u16(0),
            slant_range: f.f32(4),
            time_duration: f.f32(16),
            num_samples: f.u32(42),
        }
    }
}
