/*!
 * Subtitle parsing and reconstruction.
 *
 * Raw SRT, WebVTT and ASS/SSA documents are normalised into a list of
 * [`Subtitle`] cues plus a [`ParsedSubtitle`] envelope. The envelope is handed
 * back to [`merge_subtitle`] after the cues have been edited so the document
 * can be rebuilt in its original format; for ASS it carries the side document
 * that keeps script info, styles and comments intact.
 *
 * - `timestamp`: timestamp codec shared by all formats
 * - `detect`: format sniffing
 * - `srt`, `vtt`, `ass`: format engines
 */

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::SubtitleError;

pub mod ass;
pub mod detect;
pub mod srt;
pub mod timestamp;
pub mod vtt;

pub use self::ass::{AssDocument, AssEvent, AssEventKind};
pub use self::detect::{detect_format, is_srt};
pub use self::timestamp::Timestamp;

/// Subtitle interchange formats understood by the engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    Srt,
    Ass,
    Vtt,
}

impl SubtitleFormat {
    /// Canonical file extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Ass => "ass",
            Self::Vtt => "vtt",
        }
    }

    /// Map a file extension (case-insensitive, `ssa` included) to a format
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim_start_matches('.').to_lowercase().as_str() {
            "srt" => Some(Self::Srt),
            "ass" | "ssa" => Some(Self::Ass),
            "vtt" => Some(Self::Vtt),
            _ => None,
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for SubtitleFormat {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or(SubtitleError::UnknownFormat)
    }
}

/// Start and end of a cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CueTiming {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// One subtitle cue.
///
/// `start <= end` is not enforced; malformed timing is passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Subtitle {
    /// 1-based position assigned by the parser
    pub index: usize,
    pub timestamp: CueTiming,
    /// Speaker name; always empty for SRT and WebVTT
    #[serde(default)]
    pub actor: String,
    pub content: String,
}

impl Subtitle {
    pub fn new(index: usize, start: Timestamp, end: Timestamp, content: impl Into<String>) -> Self {
        Self {
            index,
            timestamp: CueTiming { start, end },
            actor: String::new(),
            content: content.into(),
        }
    }

    pub fn start(&self) -> Timestamp {
        self.timestamp.start
    }

    pub fn end(&self) -> Timestamp {
        self.timestamp.end
    }
}

/// Parse receipt that must be passed back to [`merge_subtitle`].
///
/// Serialises as `{"type": "...", "data": ...}` so callers can persist it;
/// `data` is only present for ASS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParsedEnvelope", into = "ParsedEnvelope")]
pub enum ParsedSubtitle {
    Srt,
    Vtt,
    Ass(AssDocument),
}

impl ParsedSubtitle {
    pub fn format(&self) -> SubtitleFormat {
        match self {
            Self::Srt => SubtitleFormat::Srt,
            Self::Vtt => SubtitleFormat::Vtt,
            Self::Ass(_) => SubtitleFormat::Ass,
        }
    }

    /// The ASS side document, or `InvalidSubtitleType` for other formats
    pub fn ass_document(&self) -> Result<&AssDocument, SubtitleError> {
        match self {
            Self::Ass(document) => Ok(document),
            other => Err(SubtitleError::InvalidSubtitleType {
                expected: SubtitleFormat::Ass.to_string(),
                found: other.format().to_string(),
            }),
        }
    }
}

/// Wire shape of [`ParsedSubtitle`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedEnvelope {
    #[serde(rename = "type")]
    pub format: SubtitleFormat,
    #[serde(default)]
    pub data: Option<AssDocument>,
}

impl TryFrom<ParsedEnvelope> for ParsedSubtitle {
    type Error = SubtitleError;

    fn try_from(envelope: ParsedEnvelope) -> Result<Self, Self::Error> {
        match (envelope.format, envelope.data) {
            (SubtitleFormat::Ass, Some(document)) => Ok(Self::Ass(document)),
            (SubtitleFormat::Srt, None) => Ok(Self::Srt),
            (SubtitleFormat::Vtt, None) => Ok(Self::Vtt),
            (SubtitleFormat::Ass, None) => Err(SubtitleError::InvalidSubtitleType {
                expected: "ass with document data".to_string(),
                found: "ass without data".to_string(),
            }),
            (format, Some(_)) => Err(SubtitleError::InvalidSubtitleType {
                expected: format!("{} without document data", format),
                found: "ass document data".to_string(),
            }),
        }
    }
}

impl From<ParsedSubtitle> for ParsedEnvelope {
    fn from(parsed: ParsedSubtitle) -> Self {
        match parsed {
            ParsedSubtitle::Srt => Self { format: SubtitleFormat::Srt, data: None },
            ParsedSubtitle::Vtt => Self { format: SubtitleFormat::Vtt, data: None },
            ParsedSubtitle::Ass(document) => Self { format: SubtitleFormat::Ass, data: Some(document) },
        }
    }
}

/// Result of [`parse_subtitle`]
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub subtitles: Vec<Subtitle>,
    pub parsed: ParsedSubtitle,
}

/// Parse subtitle text, sniffing the format when none is declared
pub fn parse_subtitle(content: &str, format: Option<SubtitleFormat>) -> Result<ParseOutput, SubtitleError> {
    let format = match format {
        Some(format) => format,
        None => detect_format(content).ok_or(SubtitleError::UnknownFormat)?,
    };
    debug!("Parsing subtitle content as {}", format);

    let output = match format {
        SubtitleFormat::Srt => ParseOutput {
            subtitles: srt::parse(content)?,
            parsed: ParsedSubtitle::Srt,
        },
        SubtitleFormat::Vtt => ParseOutput {
            subtitles: vtt::parse(content)?,
            parsed: ParsedSubtitle::Vtt,
        },
        SubtitleFormat::Ass => {
            let document = AssDocument::parse(content)?;
            ParseOutput {
                subtitles: document.subtitles.clone(),
                parsed: ParsedSubtitle::Ass(document),
            }
        }
    };

    Ok(output)
}

/// Rebuild a document in the format recorded by `parsed`.
///
/// SRT and WebVTT are regenerated purely from the cues; ASS splices cue text
/// back into the original event list.
pub fn merge_subtitle(subtitles: &[Subtitle], parsed: &ParsedSubtitle) -> String {
    match parsed {
        ParsedSubtitle::Srt => srt::generate(subtitles),
        ParsedSubtitle::Vtt => vtt::generate(subtitles),
        ParsedSubtitle::Ass(document) => document.merge(subtitles),
    }
}

/// ASS-only merge; fails with `InvalidSubtitleType` for other envelopes
pub fn merge_ass(subtitles: &[Subtitle], parsed: &ParsedSubtitle) -> Result<String, SubtitleError> {
    Ok(parsed.ass_document()?.merge(subtitles))
}

/// Parse as `from` and write out as `to`.
///
/// Leaving ASS turns `\N` hard breaks into real newlines. Entering ASS from
/// another format wraps the cues in a default script.
pub fn convert_subtitle(content: &str, from: SubtitleFormat, to: SubtitleFormat) -> Result<String, SubtitleError> {
    let ParseOutput { mut subtitles, parsed } = parse_subtitle(content, Some(from))?;

    if from == SubtitleFormat::Ass && to != SubtitleFormat::Ass {
        for subtitle in &mut subtitles {
            subtitle.content = subtitle.content.replace("\\N", "\n");
        }
    }

    if to == from {
        return Ok(merge_subtitle(&subtitles, &parsed));
    }

    Ok(render_subtitles(&subtitles, to))
}

/// Write cues out as a fresh document; ASS gets the default script header
pub fn render_subtitles(subtitles: &[Subtitle], format: SubtitleFormat) -> String {
    match format {
        SubtitleFormat::Srt => srt::generate(subtitles),
        SubtitleFormat::Vtt => vtt::generate(subtitles),
        SubtitleFormat::Ass => AssDocument::from_subtitles(subtitles).merge(subtitles),
    }
}

/// Join cue body lines, dropping blank lines at either end but keeping
/// interior ones.
pub(crate) fn join_content(lines: &[&str]) -> String {
    let start = lines.iter().position(|line| !line.trim().is_empty());
    let end = lines.iter().rposition(|line| !line.trim().is_empty());

    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// Lines made only of ASCII digits; used to recognise SRT/VTT cue numbers
pub(crate) fn is_index_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

/// Split an arrow line into its two timestamps. Anything after the end
/// timestamp (WebVTT cue settings) is ignored.
pub(crate) fn parse_arrow_line(line: &str) -> Result<CueTiming, SubtitleError> {
    let (left, right) = line
        .split_once("-->")
        .ok_or_else(|| SubtitleError::InvalidTimestamp(line.trim().to_string()))?;
    let end = right.split_whitespace().next().unwrap_or("");

    Ok(CueTiming {
        start: Timestamp::parse(left)?,
        end: Timestamp::parse(end)?,
    })
}
