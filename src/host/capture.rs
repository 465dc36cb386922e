//! Sniff capture files and switch-usage profiles.
//!
//! A capture is a `;`-separated text file:
//!
//! ```text
//! Timestamp; Decimal; TriState; State
//! 2026-03-01 18:42:07.120553; 5393; 0FFF0FFFFFFF; true
//! ```
//!
//! [`Profile`] reads a capture back and groups the events by device and
//! day, giving an overview of when each switch was used.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use chrono::{NaiveDate, NaiveDateTime};

use crate::codes::{DeviceAddress, TriState};
use crate::error::{Error, Result};

/// First line of every capture file.
pub const CAPTURE_HEADER: &str = "Timestamp; Decimal; TriState; State";

/// Timestamp layout used in capture rows.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One received code, stamped with the time it was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRecord {
    pub timestamp: NaiveDateTime,
    pub value: u32,
    pub code: TriState,
}

impl CaptureRecord {
    pub fn new(timestamp: NaiveDateTime, value: u32) -> Self {
        Self {
            timestamp,
            value,
            code: TriState::from_value(value),
        }
    }

    pub fn is_on(&self) -> bool {
        self.code.is_on()
    }

    /// The row written to a capture file (without line ending).
    pub fn to_row(&self) -> String {
        format!(
            "{}; {}; {}; {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.value,
            self.code,
            self.is_on()
        )
    }

    /// Human-readable one-line description.
    pub fn describe(&self) -> String {
        let device = self
            .code
            .device()
            .map_or_else(|| String::from("?"), |d| d.to_string());
        format!(
            "{}: Switch {} ({}, {}) was turned {}.",
            self.timestamp.format(TIMESTAMP_FORMAT),
            device,
            self.code,
            self.value,
            if self.is_on() { "ON" } else { "OFF" }
        )
    }
}

/// Appends capture rows to any writer.
pub struct CaptureWriter<W> {
    out: W,
}

impl<W: Write> CaptureWriter<W> {
    /// Wrap `out`, writing the header first when starting a new file.
    pub fn new(mut out: W, write_header: bool) -> io::Result<Self> {
        if write_header {
            writeln!(out, "{CAPTURE_HEADER}")?;
        }
        Ok(Self { out })
    }

    pub fn append(&mut self, record: &CaptureRecord) -> io::Result<()> {
        writeln!(self.out, "{}", record.to_row())?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// ───────────────────────────────────────────────────────────────
// Profile
// ───────────────────────────────────────────────────────────────

/// One switch event inside a profile: `HH:MM` and on/off.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProfileEntry {
    pub time: String,
    pub on: bool,
}

/// Capture events grouped by device, then by day.
#[derive(Debug, Default)]
pub struct Profile {
    devices: BTreeMap<DeviceAddress, BTreeMap<NaiveDate, Vec<ProfileEntry>>>,
}

impl Profile {
    /// Parse a capture file.
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut profile = Self::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            if line_no == 1 {
                if line.trim() != CAPTURE_HEADER {
                    return Err(Error::InvalidCapture {
                        line: line_no,
                        reason: "missing capture header",
                    });
                }
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            let record = parse_row(&line).map_err(|reason| Error::InvalidCapture {
                line: line_no,
                reason,
            })?;
            profile.insert(&record);
        }

        for days in profile.devices.values_mut() {
            for entries in days.values_mut() {
                entries.sort();
            }
        }
        Ok(profile)
    }

    fn insert(&mut self, record: &CaptureRecord) {
        let Some(device) = record.code.device() else {
            return;
        };
        self.devices
            .entry(device)
            .or_default()
            .entry(record.timestamp.date())
            .or_default()
            .push(ProfileEntry {
                time: record.timestamp.format("%H:%M").to_string(),
                on: record.is_on(),
            });
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn devices(&self) -> impl Iterator<Item = &DeviceAddress> {
        self.devices.keys()
    }

    /// Events for one device on one day, sorted by time.
    pub fn entries(&self, device: &DeviceAddress, day: NaiveDate) -> &[ProfileEntry] {
        self.devices
            .get(device)
            .and_then(|days| days.get(&day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Render the per-device, per-day overview.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (device, days) in &self.devices {
            let _ = writeln!(out, "Device {device}:");
            for (day, entries) in days {
                let _ = writeln!(out, "\t{day}:");
                for entry in entries {
                    let _ = writeln!(
                        out,
                        "\t\tAt {} the device was turned {}.",
                        entry.time,
                        if entry.on { "ON" } else { "OFF" }
                    );
                }
            }
        }
        out
    }
}

fn parse_row(line: &str) -> core::result::Result<CaptureRecord, &'static str> {
    let mut fields = line.split(';').map(str::trim);
    let timestamp = fields.next().ok_or("missing timestamp")?;
    let value = fields.next().ok_or("missing value")?;

    let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_PARSE_FORMAT)
        .map_err(|_| "malformed timestamp")?;
    let value = value.parse::<u32>().map_err(|_| "malformed value")?;
    Ok(CaptureRecord::new(timestamp, value))
}
