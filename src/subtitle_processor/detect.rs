/*!
 * Format sniffing from cheap structural signatures.
 */

use log::debug;

use super::SubtitleFormat;

/// Classify raw subtitle text. Checks run ASS, SRT, VTT; first match wins.
pub fn detect_format(content: &str) -> Option<SubtitleFormat> {
    let trimmed = strip_bom(content).trim();

    let detected = if trimmed.starts_with("[Script Info]") {
        Some(SubtitleFormat::Ass)
    } else if is_srt(trimmed) {
        Some(SubtitleFormat::Srt)
    } else if trimmed.to_lowercase().starts_with("webvtt") {
        Some(SubtitleFormat::Vtt)
    } else {
        None
    };

    debug!("Sniffed subtitle format: {:?}", detected);
    detected
}

/// SRT signature: a purely numeric first line followed by an arrow line
pub fn is_srt(content: &str) -> bool {
    let mut lines = strip_bom(content).trim().lines();

    let first_is_index = lines
        .next()
        .map(|line| {
            let line = line.trim();
            !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
        })
        .unwrap_or(false);

    first_is_index && lines.next().is_some_and(|line| line.contains("-->"))
}

pub(crate) fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}
