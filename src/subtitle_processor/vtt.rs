/*!
 * WebVTT parsing and generation.
 *
 * The `WEBVTT` preamble, header metadata, NOTE/STYLE blocks and cue
 * identifiers are all skipped by scanning forward to the next arrow line.
 */

use crate::errors::SubtitleError;
use super::{is_index_line, join_content, parse_arrow_line, Subtitle, SubtitleFormat};
use super::detect::strip_bom;

/// Parse WebVTT text into cues numbered from 1
pub fn parse(content: &str) -> Result<Vec<Subtitle>, SubtitleError> {
    let lines: Vec<&str> = strip_bom(content).trim().lines().collect();
    let mut subtitles = Vec::new();
    let mut cursor = 0;

    loop {
        // Identifier lines, metadata and comment blocks all sit before an arrow
        while cursor < lines.len() && !lines[cursor].contains("-->") {
            cursor += 1;
        }
        if cursor >= lines.len() {
            break;
        }

        let timing = parse_arrow_line(lines[cursor])?;
        cursor += 1;

        let body_start = cursor;
        while cursor < lines.len() && !lines[cursor].trim().is_empty() && !lines[cursor].contains("-->") {
            cursor += 1;
        }

        let mut body = &lines[body_start..cursor];
        if cursor < lines.len() && lines[cursor].contains("-->") {
            if let Some((last, rest)) = body.split_last() {
                if is_index_line(last) {
                    body = rest;
                }
            }
        }

        subtitles.push(Subtitle {
            index: subtitles.len() + 1,
            timestamp: timing,
            actor: String::new(),
            content: join_content(body),
        });
    }

    Ok(subtitles)
}

/// Render cues as WebVTT
pub fn generate(subtitles: &[Subtitle]) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for (position, subtitle) in subtitles.iter().enumerate() {
        output.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            position + 1,
            subtitle.start().format(SubtitleFormat::Vtt),
            subtitle.end().format(SubtitleFormat::Vtt),
            cue_payload(&subtitle.content)
        ));
    }

    output.trim_end().to_string()
}

/// A blank line ends a WebVTT cue, so interior blanks are dropped
fn cue_payload(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
