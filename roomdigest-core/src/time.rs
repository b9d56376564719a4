use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};
use log::warn;

use crate::error::{DigestError, Result};

pub const DEFAULT_TIME_PATTERN: &str = "%H:%M";
const UNRENDERABLE_TIME: &str = "--:--";

pub trait TimeFormatter: Send + Sync {
    fn format_ts(&self, epoch_ms: i64, pattern: &str) -> String;
}

impl<F> TimeFormatter for F
where
    F: Fn(i64, &str) -> String + Send + Sync,
{
    fn format_ts(&self, epoch_ms: i64, pattern: &str) -> String {
        self(epoch_ms, pattern)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl TimeFormatter for LocalClock {
    fn format_ts(&self, epoch_ms: i64, pattern: &str) -> String {
        format_in_zone(epoch_ms, pattern, &Local)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedOffsetClock {
    offset: FixedOffset,
}

impl FixedOffsetClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn parse(input: &str) -> Result<Self> {
        parse_utc_offset(input).map(Self::new)
    }
}

impl TimeFormatter for FixedOffsetClock {
    fn format_ts(&self, epoch_ms: i64, pattern: &str) -> String {
        format_in_zone(epoch_ms, pattern, &self.offset)
    }
}

pub fn validate_time_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        return Err(DigestError::InvalidTimePattern(
            "pattern must not be empty".to_string(),
        ));
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(DigestError::InvalidTimePattern(pattern.to_string()));
    }
    Ok(())
}

// Accepts `Z`, `UTC`, `+HH`, `+HHMM` and `+HH:MM` (and the `-` forms).
pub fn parse_utc_offset(input: &str) -> Result<FixedOffset> {
    let invalid = || DigestError::InvalidUtcOffset(input.to_string());
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };
    if !rest.is_ascii() {
        return Err(invalid());
    }
    let (hours, minutes) = match rest.len() {
        2 => (rest, "00"),
        4 => rest.split_at(2),
        5 if rest.as_bytes()[2] == b':' => (&rest[..2], &rest[3..]),
        _ => return Err(invalid()),
    };
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

fn format_in_zone<Tz>(epoch_ms: i64, pattern: &str, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Some(utc) = DateTime::from_timestamp_millis(epoch_ms) else {
        warn!("timestamp {epoch_ms} is outside the representable range");
        return UNRENDERABLE_TIME.to_string();
    };

    let mut output = String::new();
    if write!(output, "{}", utc.with_timezone(zone).format(pattern)).is_err() {
        warn!("time pattern {pattern:?} could not be applied");
        return UNRENDERABLE_TIME.to_string();
    }
    output
}
