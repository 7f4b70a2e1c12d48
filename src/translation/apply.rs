/*!
 * Applying translation deltas back onto parsed cues.
 */

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::subtitle_processor::{merge_subtitle, ParsedSubtitle, Subtitle};
use super::response::TranslatedCueDelta;

/// A cue together with its translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedSubtitle {
    #[serde(flatten)]
    pub subtitle: Subtitle,
    #[serde(default)]
    pub translated: String,
}

impl TranslatedSubtitle {
    /// Text to write out: the translation (or the original when there is
    /// none), or original above translation in bilingual mode
    pub fn output_content(&self, bilingual: bool) -> String {
        if self.translated.trim().is_empty() {
            return self.subtitle.content.clone();
        }
        if bilingual {
            format!("{}\n{}", self.subtitle.content, self.translated)
        } else {
            self.translated.clone()
        }
    }
}

/// Pair deltas with cues by index. Cues without a delta get an empty
/// translation; deltas naming unknown indices are ignored.
pub fn apply_translations(subtitles: &[Subtitle], deltas: &[TranslatedCueDelta]) -> Vec<TranslatedSubtitle> {
    let by_index: HashMap<usize, &str> = deltas
        .iter()
        .map(|delta| (delta.index, delta.translated.as_str()))
        .collect();

    let unknown = deltas
        .iter()
        .filter(|delta| !subtitles.iter().any(|s| s.index == delta.index))
        .count();
    if unknown > 0 {
        warn!("{} translations refer to cue indices that do not exist", unknown);
    }

    subtitles
        .iter()
        .map(|subtitle| TranslatedSubtitle {
            subtitle: subtitle.clone(),
            translated: by_index.get(&subtitle.index).copied().unwrap_or_default().to_string(),
        })
        .collect()
}

/// Rebuild the original document with translated text in place
pub fn merge_translated(translated: &[TranslatedSubtitle], parsed: &ParsedSubtitle, bilingual: bool) -> String {
    let subtitles: Vec<Subtitle> = translated
        .iter()
        .map(|entry| Subtitle {
            content: entry.output_content(bilingual),
            ..entry.subtitle.clone()
        })
        .collect();

    merge_subtitle(&subtitles, parsed)
}
