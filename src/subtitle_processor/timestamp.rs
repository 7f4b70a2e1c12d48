/*!
 * Timestamp codec shared by the SRT, WebVTT and ASS engines.
 *
 * All formats are normalised to millisecond precision. ASS centiseconds are
 * scaled up on parse (`.05` becomes 50 ms) and truncated back down on output.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::SubtitleError;
use super::SubtitleFormat;

/// A point in time split into its clock components
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp {
    pub h: u32,
    pub m: u32,
    pub s: u32,
    pub ms: u32,
}

impl Timestamp {
    /// Create a timestamp from its components
    pub fn new(h: u32, m: u32, s: u32, ms: u32) -> Self {
        Self { h, m, s, ms }
    }

    /// Parse `H:MM:SS.fff`, `HH:MM:SS,fff` or `MM:SS.fff`.
    ///
    /// The fraction may use either separator and 1 to 3 digits; shorter
    /// fractions are right-padded (`05` reads as `050`), longer ones are cut to
    /// milliseconds. Non-numeric fields are an error rather than a sentinel.
    pub fn parse(text: &str) -> Result<Self, SubtitleError> {
        let trimmed = text.trim();
        let invalid = || SubtitleError::InvalidTimestamp(trimmed.to_string());

        let (clock, fraction) = match trimmed.rfind([',', '.']) {
            Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
            None => (trimmed, ""),
        };

        let fields: Vec<&str> = clock.split(':').collect();
        let (h, m, s) = match fields.as_slice() {
            [h, m, s] => (parse_field(h), parse_field(m), parse_field(s)),
            [m, s] => (Some(0), parse_field(m), parse_field(s)),
            _ => return Err(invalid()),
        };

        let ms = if fraction.is_empty() {
            Some(0)
        } else {
            let digits: String = fraction.chars().take(3).collect();
            parse_field(&format!("{:0<3}", digits))
        };

        match (h, m, s, ms) {
            (Some(h), Some(m), Some(s), Some(ms)) => Ok(Self { h, m, s, ms }),
            _ => Err(invalid()),
        }
    }

    /// Total milliseconds since zero
    pub fn to_millis(&self) -> u64 {
        (self.h as u64 * 3600 + self.m as u64 * 60 + self.s as u64) * 1000 + self.ms as u64
    }

    /// Split a millisecond count back into clock components
    pub fn from_millis(total: u64) -> Self {
        Self {
            h: (total / 3_600_000) as u32,
            m: ((total % 3_600_000) / 60_000) as u32,
            s: ((total % 60_000) / 1_000) as u32,
            ms: (total % 1_000) as u32,
        }
    }

    /// Render the timestamp the way the given format writes it
    pub fn format(&self, format: SubtitleFormat) -> String {
        match format {
            SubtitleFormat::Srt => format!("{:02}:{:02}:{:02},{:03}", self.h, self.m, self.s, self.ms),
            SubtitleFormat::Vtt => format!("{:02}:{:02}:{:02}.{:03}", self.h, self.m, self.s, self.ms),
            SubtitleFormat::Ass => format!("{}:{:02}:{:02}.{:02}", self.h, self.m, self.s, self.ms / 10),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.format(SubtitleFormat::Srt))
    }
}

fn parse_field(field: &str) -> Option<u32> {
    let field = field.trim();
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
