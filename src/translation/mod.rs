/*!
 * Handling of model translation replies.
 *
 * - `repair`: best-effort JSON recovery for streamed or decorated replies
 * - `response`: schema extraction into per-cue translation deltas
 * - `apply`: pairing deltas with cues and writing translated documents
 */

// Re-export main types for easier usage
pub use self::apply::{apply_translations, merge_translated, TranslatedSubtitle};
pub use self::repair::{repair_json, EMPTY_ENVELOPE};
pub use self::response::{parse_translation_array_strict, parse_translation_json, TranslatedCueDelta};

// Submodules
pub mod apply;
pub mod repair;
pub mod response;
