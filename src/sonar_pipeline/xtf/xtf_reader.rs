//! XTF reader implementation.
//!
//! Walks the chained records of a capture held in memory. A structurally bad
//! file header is an error; anything malformed after it ends the walk and the
//! pings decoded so far are returned, so partially written captures still load.

use tracing::{debug, info};

use crate::sonar_pipeline::common::error::{Result, SonarError};
use crate::sonar_pipeline::xtf::layout::{
    FILE_HEADER_SIZE, FileHeader, HEADER_TYPE_SONAR, PING_CHANNEL_HEADER_SIZE, PING_HEADER_SIZE,
    PingChannelHeader, PingHeader, RECORD_HEADER_SIZE, RecordHeader, XTF_FILE_FORMAT, XTF_MAGIC,
};
use crate::sonar_pipeline::xtf::reader::SonarReader;
use crate::sonar_pipeline::xtf::types::{FileInfo, PingMetadata, SampleMatrix, SonarData};

/// Reader for Triton XTF side-scan captures.
///
/// Only channel 0 (port) and channel 1 (starboard) are kept; the remaining
/// stored channels are decoded and dropped so the stream stays aligned.
pub struct XtfReader;

/// Converts a signed 16-bit sample to an 8-bit intensity.
///
/// Uses truncating integer division and keeps the low byte of the result, so
/// negative samples wrap (e.g. `-32768` maps to `1`).
pub fn scale_sample(sample: i16) -> u8 {
    (255 * sample as i32 / 32768) as u8
}

/// One decoded sonar record
struct PingRecord {
    metadata: PingMetadata,
    port: Option<Vec<u8>>,
    starboard: Option<Vec<u8>>,
    end: usize,
}

impl XtfReader {
    /// Decodes the sonar record starting at `start`. Returns `None` when the
    /// record is cut short.
    fn read_ping(&self, data: &[u8], start: usize, header: &FileHeader) -> Option<PingRecord> {
        let ping_header = PingHeader::decode(data.get(start..start.checked_add(PING_HEADER_SIZE)?)?);
        let mut cursor = start + PING_HEADER_SIZE;

        let mut port = None;
        let mut starboard = None;
        let mut port_header = None;

        for channel in 0..header.stored_channels() {
            let chan_end = cursor.checked_add(PING_CHANNEL_HEADER_SIZE)?;
            let chan_header = PingChannelHeader::decode(data.get(cursor..chan_end)?);
            cursor = chan_end;

            let samples = chan_header.num_samples as usize;
            let row: Vec<u8> = if header.channels[channel].bytes_per_sample == 1 {
                let end = cursor.checked_add(samples)?;
                let payload = data.get(cursor..end)?;
                cursor = end;
                payload.to_vec()
            } else {
                let end = cursor.checked_add(samples.checked_mul(2)?)?;
                let payload = data.get(cursor..end)?;
                cursor = end;
                payload
                    .chunks_exact(2)
                    .map(|b| scale_sample(i16::from_le_bytes([b[0], b[1]])))
                    .collect()
            };

            debug!(
                channel,
                channel_number = chan_header.channel_number,
                samples,
                "Decoded ping channel"
            );

            match channel {
                0 => {
                    port = Some(row);
                    port_header = Some(chan_header);
                }
                1 => starboard = Some(row),
                _ => {}
            }
        }

        let base = PingMetadata {
            ping_number: ping_header.ping_number,
            year: ping_header.year,
            month: ping_header.month,
            day: ping_header.day,
            hour: ping_header.hour,
            minute: ping_header.minute,
            second: ping_header.second,
            hundredths: ping_header.hundredths,
            ship_x: ping_header.ship_x,
            ship_y: ping_header.ship_y,
            altitude: ping_header.altitude as f64,
            heading: ping_header.heading as f64,
            ..PingMetadata::default()
        };
        let velocity = ping_header.sound_velocity as f64;
        let metadata = match port_header {
            Some(ch) => base.with_timing(
                ch.num_samples as usize,
                ch.time_duration as f64,
                velocity,
                ch.slant_range as f64,
            ),
            None => base.with_timing(0, 0.0, velocity, 0.0),
        };

        Some(PingRecord {
            metadata,
            port,
            starboard,
            end: cursor,
        })
    }
}

impl SonarReader for XtfReader {
    /// Decodes an XTF capture from a byte array.
    ///
    /// # Returns
    ///
    /// * `Ok(SonarData)` - Port/starboard matrices and per-ping metadata
    /// * `Err(SonarError::Format)` - The file header is missing or has the wrong format tag
    fn read_xtf(&self, data: &[u8]) -> Result<SonarData> {
        debug!("Decoding XTF capture, {} bytes", data.len());

        let header_bytes = data.get(..FILE_HEADER_SIZE).ok_or_else(|| {
            SonarError::Format(format!(
                "{} bytes is shorter than the {}-byte file header",
                data.len(),
                FILE_HEADER_SIZE
            ))
        })?;
        let header = FileHeader::decode(header_bytes);

        if header.file_format != XTF_FILE_FORMAT {
            return Err(SonarError::Format(format!(
                "file format tag 0x{:02X}, expected 0x{:02X}",
                header.file_format, XTF_FILE_FORMAT
            )));
        }

        debug!(
            channels = header.channel_count,
            sonar = %header.sonar_name,
            "Read file header"
        );

        let mut port = SampleMatrix::default();
        let mut starboard = SampleMatrix::default();
        let mut pings = Vec::new();
        let mut skipped = 0usize;

        let mut pos = FILE_HEADER_SIZE + header.padding_len();

        loop {
            let Some(record_bytes) = pos
                .checked_add(RECORD_HEADER_SIZE)
                .and_then(|end| data.get(pos..end))
            else {
                break;
            };
            let record = RecordHeader::decode(record_bytes);
            if record.magic != XTF_MAGIC {
                debug!(offset = pos, magic = record.magic, "Bad record magic, stopping");
                break;
            }

            let declared_end = pos.saturating_add(record.num_bytes as usize);

            if record.header_type == HEADER_TYPE_SONAR {
                let Some(ping) = self.read_ping(data, pos, &header) else {
                    debug!(offset = pos, "Truncated sonar record, stopping");
                    break;
                };
                if let Some(row) = ping.port {
                    port.push_row(row);
                }
                if let Some(row) = ping.starboard {
                    starboard.push_row(row);
                }
                pings.push(ping.metadata);
                pos = ping.end.max(declared_end);
            } else {
                skipped += 1;
                // NumBytesThisRecord counts from the start of the record header
                pos = declared_end.max(pos + RECORD_HEADER_SIZE);
            }
        }

        info!(
            pings = pings.len(),
            skipped_records = skipped,
            "Decoded XTF capture"
        );

        Ok(SonarData {
            info: FileInfo {
                sonar_name: header.sonar_name.clone(),
                recording_program: header.recording_program.clone(),
                channel_count: header.channel_count,
                channels: header.channels[..header.stored_channels()].to_vec(),
            },
            port,
            starboard,
            pings,
        })
    }
}
