/*!
 * # subforge - subtitle parsing, conversion and model reply repair
 *
 * A Rust library for moving subtitle documents through a translation or
 * transcription workflow without losing anything the cues do not carry.
 *
 * ## Features
 *
 * - Parse SRT, WebVTT and ASS/SSA into a common cue list
 * - Rebuild documents in their original format after editing cues,
 *   keeping ASS styles, comments and trailing sections intact
 * - Convert between formats
 * - Repair truncated or decorated JSON returned by language models
 * - Apply translated cues back onto a document, optionally bilingual
 * - Turn `mm:ss:ms` model transcripts into subtitle files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Subtitle parsing, format engines and reassembly:
 *   - `subtitle_processor::timestamp`: Timestamp codec
 *   - `subtitle_processor::detect`: Format sniffing
 *   - `subtitle_processor::srt`, `vtt`, `ass`: Format engines
 * - `translation`: Model translation replies:
 *   - `translation::repair`: JSON repair
 *   - `translation::response`: Reply schema extraction
 *   - `translation::apply`: Writing translations back onto cues
 * - `transcription`: Model transcript parsing
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
// Test names follow the test_subject_condition_shouldOutcome convention
#![cfg_attr(test, allow(non_snake_case))]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitle_processor;
pub mod translation;
pub mod transcription;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use subtitle_processor::{
    convert_subtitle, merge_ass, merge_subtitle, parse_subtitle, render_subtitles, ParseOutput, ParsedSubtitle, Subtitle,
    SubtitleFormat, Timestamp,
};
pub use translation::{parse_translation_array_strict, parse_translation_json, repair_json, TranslatedCueDelta};
pub use transcription::parse_transcription;
pub use errors::{AppError, SubtitleError, TranslationError};
