//! Synthetic XTF capture builder shared by the integration tests.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub const FILE_HEADER_SIZE: usize = 1024;
pub const PING_HEADER_SIZE: usize = 256;
pub const PING_CHANNEL_HEADER_SIZE: usize = 64;

pub enum Payload<'a> {
    Bytes(&'a [u8]),
    Words(&'a [i16]),
}

pub struct XtfBuilder {
    channels: u16,
    bytes_per_sample: [u16; 6],
    format: u8,
    velocity: f32,
    time_duration: f32,
    body: Vec<u8>,
    pings: u32,
}

impl XtfBuilder {
    pub fn new(channels: u16) -> Self {
        Self {
            channels,
            bytes_per_sample: [1; 6],
            format: 0x7B,
            velocity: 1500.0,
            time_duration: 0.1,
            body: Vec::new(),
            pings: 0,
        }
    }

    pub fn format(mut self, format: u8) -> Self {
        self.format = format;
        self
    }

    pub fn bytes_per_sample(mut self, channel: usize, bytes: u16) -> Self {
        self.bytes_per_sample[channel] = bytes;
        self
    }

    pub fn velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    /// Appends a sonar record with one payload per stored channel.
    pub fn ping(mut self, payloads: &[Payload]) -> Self {
        let mut record = vec![0u8; PING_HEADER_SIZE];
        record[0..2].copy_from_slice(&0xFACEu16.to_le_bytes());
        record[2] = 0;
        record[4..6].copy_from_slice(&(payloads.len() as u16).to_le_bytes());
        record[14..16].copy_from_slice(&2024u16.to_le_bytes());
        record[28..32].copy_from_slice(&self.pings.to_le_bytes());
        record[32..36].copy_from_slice(&self.velocity.to_le_bytes());

        for (channel, payload) in payloads.iter().enumerate() {
            let mut chan = vec![0u8; PING_CHANNEL_HEADER_SIZE];
            chan[0..2].copy_from_slice(&(channel as u16).to_le_bytes());
            chan[16..20].copy_from_slice(&self.time_duration.to_le_bytes());
            let samples = match payload {
                Payload::Bytes(b) => b.len(),
                Payload::Words(w) => w.len(),
            };
            chan[42..46].copy_from_slice(&(samples as u32).to_le_bytes());
            record.extend(chan);
            match payload {
                Payload::Bytes(b) => record.extend_from_slice(b),
                Payload::Words(w) => w.iter().for_each(|s| record.extend(s.to_le_bytes())),
            }
        }

        let len = record.len() as u32;
        record[10..14].copy_from_slice(&len.to_le_bytes());
        self.body.extend(record);
        self.pings += 1;
        self
    }

    /// Appends a non-sonar record with `body_len` bytes after its header.
    pub fn other_record(mut self, header_type: u8, body_len: usize) -> Self {
        let mut record = vec![0xAAu8; 14 + body_len];
        record[0..2].copy_from_slice(&0xFACEu16.to_le_bytes());
        record[2] = header_type;
        record[10..14].copy_from_slice(&((14 + body_len) as u32).to_le_bytes());
        self.body.extend(record);
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = vec![0u8; FILE_HEADER_SIZE];
        out[0] = self.format;
        out[18..24].copy_from_slice(b"TestSS");
        out[166..168].copy_from_slice(&self.channels.to_le_bytes());
        for (i, bps) in self.bytes_per_sample.iter().enumerate() {
            let base = 256 + i * 128;
            out[base + 6..base + 8].copy_from_slice(&bps.to_le_bytes());
        }
        if self.channels > 6 {
            let pad = (self.channels as usize - 6).div_ceil(8) * 1024;
            out.extend(vec![0u8; pad]);
        }
        out.extend(self.body);
        out
    }

    pub fn write(self) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&self.build()).unwrap();
        file.flush().unwrap();
        file
    }
}
