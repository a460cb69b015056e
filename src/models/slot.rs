//! Time slot model.
//!
//! A slot is one named teaching period, identical on every day of the week.
//! Slots are identified by their label (`"HH:MM-HH:MM"`), and the order in
//! which they were supplied is the canonical column order of the grid.
//!
//! # Adjacency
//! Two slots are adjacent when they are neighbours in the slot list, not
//! when their clock times touch. `09:00-10:00` followed by `11:00-12:00`
//! still forms a contiguous block of two.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const TIME_FORMAT: &str = "%H:%M";

/// Why a slot label was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotParseError {
    /// Label is not of the form `HH:MM-HH:MM`.
    #[error("slot '{0}' is not of the form HH:MM-HH:MM")]
    Format(String),
    /// One of the two times is not a valid clock time.
    #[error("slot '{label}' has an invalid time '{time}'")]
    Time { label: String, time: String },
    /// Start is not strictly earlier than end.
    #[error("slot '{0}' must start before it ends")]
    Order(String),
}

/// A teaching period `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    label: String,
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    /// Parses a slot label such as `"09:30-10:20"`.
    ///
    /// Surrounding whitespace is ignored; the trimmed text becomes the label.
    pub fn parse(label: &str) -> Result<Self, SlotParseError> {
        let label = label.trim();
        let (start, end) = label
            .split_once('-')
            .ok_or_else(|| SlotParseError::Format(label.to_string()))?;

        let start = parse_time(label, start)?;
        let end = parse_time(label, end)?;
        if start >= end {
            return Err(SlotParseError::Order(label.to_string()));
        }

        Ok(Self {
            label: label.to_string(),
            start,
            end,
        })
    }

    /// The slot label as supplied.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Start time (inclusive).
    #[inline]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// End time (exclusive).
    #[inline]
    pub fn end(&self) -> NaiveTime {
        self.end
    }
}

fn parse_time(label: &str, text: &str) -> Result<NaiveTime, SlotParseError> {
    let text = text.trim();
    let invalid = || SlotParseError::Time {
        label: label.to_string(),
        time: text.to_string(),
    };
    // chrono's %H also takes a single digit; labels must be zero-padded
    if !is_zero_padded(text) {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(text, TIME_FORMAT).map_err(|_| invalid())
}

/// Exactly `DD:DD`.
fn is_zero_padded(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit())
}

impl TryFrom<String> for TimeSlot {
    type Error = SlotParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.label
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
