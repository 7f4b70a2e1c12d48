/*!
 * Parsing of model transcripts into cues.
 *
 * A transcript renders each cue as an `mm:ss:ms --> mm:ss:ms` line followed
 * by its text. Unlike translation replies, transcripts are never repaired:
 * a malformed time or a missing timing line fails the whole transcript so
 * cues cannot silently drift out of alignment.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;
use crate::subtitle_processor::{is_srt, srt, Subtitle, SubtitleFormat, Timestamp};

// @const: Transcript time, minutes and seconds two digits each
static TRANSCRIPT_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{1,3})$").unwrap()
});

/// Convert a model transcript into cues via an intermediate SRT document
pub fn parse_transcription(response: &str) -> Result<Vec<Subtitle>, SubtitleError> {
    let srt_text = transcript_to_srt(response)?;

    if !is_srt(&srt_text) {
        return Err(SubtitleError::InvalidTranscriptFormat(
            "transcript must start with an `mm:ss:ms --> mm:ss:ms` line".to_string(),
        ));
    }

    let subtitles = srt::parse(&srt_text)?;
    debug!("Parsed {} cues from transcript", subtitles.len());
    Ok(subtitles)
}

/// Rewrite transcript timing lines as numbered SRT arrow lines. Text lines
/// pass through untouched.
pub fn transcript_to_srt(response: &str) -> Result<String, SubtitleError> {
    let lines: Vec<&str> = response.trim().lines().collect();

    let start = lines.iter().position(|line| !is_marker_line(line)).unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|line| !is_marker_line(line))
        .map_or(start, |last| last + 1);

    let mut output = String::new();
    let mut index = 0;

    for line in lines[start..end].iter().copied() {
        match line.matches("-->").count() {
            0 => {
                output.push_str(line);
                output.push('\n');
            }
            1 => {
                let (left, right) = line.split_once("-->").unwrap_or((line, ""));
                let cue_start = parse_transcript_time(left)?;
                let cue_end = parse_transcript_time(right)?;
                index += 1;
                output.push_str(&format!(
                    "{}\n{} --> {}\n",
                    index,
                    cue_start.format(SubtitleFormat::Srt),
                    cue_end.format(SubtitleFormat::Srt)
                ));
            }
            _ => {
                return Err(SubtitleError::InvalidTranscriptFormat(format!(
                    "more than one arrow in line: {}",
                    line.trim()
                )));
            }
        }
    }

    Ok(output)
}

/// Blank lines, code fences and `[section]` markers around the transcript
fn is_marker_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with("```") || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

fn parse_transcript_time(text: &str) -> Result<Timestamp, SubtitleError> {
    let text = text.trim();
    let invalid = || SubtitleError::InvalidTranscriptFormat(format!("expected mm:ss:ms, found `{}`", text));

    let caps = TRANSCRIPT_TIME_REGEX.captures(text).ok_or_else(invalid)?;
    let field = |group: usize| -> Result<u64, SubtitleError> {
        caps.get(group)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .ok_or_else(invalid)
    };

    let total = field(1)? * 60_000 + field(2)? * 1_000 + field(3)?;
    Ok(Timestamp::from_millis(total))
}
