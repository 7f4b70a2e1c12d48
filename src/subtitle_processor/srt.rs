/*!
 * SubRip (SRT) parsing and generation.
 *
 * Cue boundaries are found by looking ahead for the next arrow line rather
 * than by blank lines, so documents with missing separators still parse.
 */

use log::warn;

use crate::errors::SubtitleError;
use super::{is_index_line, join_content, parse_arrow_line, Subtitle, SubtitleFormat};
use super::detect::strip_bom;

/// Parse SRT text into cues. Source index numbers are ignored and cues are
/// renumbered from 1.
pub fn parse(content: &str) -> Result<Vec<Subtitle>, SubtitleError> {
    let lines: Vec<&str> = strip_bom(content).trim().lines().collect();
    let mut subtitles = Vec::new();

    // Anything before the first arrow (stray blanks, the first index) is skipped
    let mut cursor = lines.iter().position(|line| line.contains("-->")).unwrap_or(lines.len());

    while cursor < lines.len() {
        let timing = parse_arrow_line(lines[cursor])?;
        cursor += 1;

        let body_start = cursor;
        while cursor < lines.len() && !lines[cursor].contains("-->") {
            cursor += 1;
        }

        let mut body = &lines[body_start..cursor];
        // The index of the next cue was swallowed by the lookahead; give it back
        if cursor < lines.len() {
            if let Some((last, rest)) = body.split_last() {
                if is_index_line(last) {
                    body = rest;
                }
            }
        }

        let content = join_content(body);
        if content.is_empty() {
            warn!("SRT cue {} has no text", subtitles.len() + 1);
        }

        subtitles.push(Subtitle {
            index: subtitles.len() + 1,
            timestamp: timing,
            actor: String::new(),
            content,
        });
    }

    Ok(subtitles)
}

/// Render cues as SRT, numbering them by position
pub fn generate(subtitles: &[Subtitle]) -> String {
    let mut output = String::new();

    for (position, subtitle) in subtitles.iter().enumerate() {
        output.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            position + 1,
            subtitle.start().format(SubtitleFormat::Srt),
            subtitle.end().format(SubtitleFormat::Srt),
            subtitle.content
        ));
    }

    output.trim_end().to_string()
}
