/*!
 * Common test utilities for the subforge test suite
 */

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

pub const SAMPLE_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains
multiple lines.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.";

pub const SAMPLE_VTT: &str = "WEBVTT

1
00:00:01.000 --> 00:00:04.000
This is a test subtitle.

2
00:00:05.000 --> 00:00:09.000 align:start
It contains
multiple lines.

3
00:00:10.000 --> 00:00:14.000
For testing purposes.";

/// Five events, three of them Dialogue, plus a trailing `[Fonts]` section
pub const SAMPLE_ASS: &str = "[Script Info]
Title: Sample
ScriptType: v4.00+

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,2,2,10,10,10,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Comment: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,Opening note
Dialogue: 0,0:00:01.00,0:00:04.00,Default,Alice,0,0,0,,Hello, world!
Dialogue: 0,0:00:05.00,0:00:09.50,Default,Bob,0,0,0,,First line\\NSecond line
Comment: 0,0:00:09.00,0:00:10.00,Default,,0,0,0,,Timing note
Dialogue: 0,0:00:10.00,0:00:14.00,Default,Alice,0,0,0,,{\\i1}Goodbye{\\i0}

[Fonts]
fontname: custom.ttf";

/// Initialise a test logger once; repeated calls are ignored
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = if filename.ends_with(".ass") {
        SAMPLE_ASS
    } else if filename.ends_with(".vtt") {
        SAMPLE_VTT
    } else {
        SAMPLE_SRT
    };
    create_test_file(dir, filename, content)
}
