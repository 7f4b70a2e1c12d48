/*!
 * Extraction of translated cues from model replies.
 *
 * Two entry points share the same schema, `[{index, translated}, ...]` either
 * bare or under a `subtitles` key:
 * - [`parse_translation_json`] repairs the reply first and tolerates elements
 *   it cannot use; only a final JSON parse failure is an error.
 * - [`parse_translation_array_strict`] only unwraps fences and reasoning,
 *   then deserialises with the typed schema so any problem propagates.
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::TranslationError;
use super::repair::{clean_response, repair_json};

/// Translation for one cue, keyed by the cue's index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedCueDelta {
    pub index: usize,
    #[serde(default)]
    pub translated: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranslationPayload {
    List(Vec<TranslatedCueDelta>),
    Envelope { subtitles: Vec<TranslatedCueDelta> },
}

/// Repair a possibly truncated or decorated reply and read its cues
pub fn parse_translation_json(response: &str) -> Result<Vec<TranslatedCueDelta>, TranslationError> {
    let repaired = repair_json(response);
    let value: Value = serde_json::from_str(&repaired)?;

    let items = match &value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("subtitles") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => {
                warn!("Translation reply has no subtitles array");
                &[]
            }
        },
        _ => &[],
    };

    let deltas: Vec<TranslatedCueDelta> = items.iter().filter_map(read_delta).collect();
    if deltas.len() != items.len() {
        debug!("Skipped {} reply elements without a usable index", items.len() - deltas.len());
    }

    Ok(deltas)
}

/// Read a reply that is expected to be well-formed; errors propagate
pub fn parse_translation_array_strict(response: &str) -> Result<Vec<TranslatedCueDelta>, TranslationError> {
    let cleaned = clean_response(response);
    let payload: TranslationPayload = serde_json::from_str(&cleaned)?;

    Ok(match payload {
        TranslationPayload::List(deltas) => deltas,
        TranslationPayload::Envelope { subtitles } => subtitles,
    })
}

fn read_delta(item: &Value) -> Option<TranslatedCueDelta> {
    let index = match item.get("index")? {
        Value::Number(number) => usize::try_from(number.as_u64()?).ok()?,
        Value::String(text) => text.trim().parse().ok()?,
        _ => return None,
    };
    let translated = item
        .get("translated")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(TranslatedCueDelta { index, translated })
}
