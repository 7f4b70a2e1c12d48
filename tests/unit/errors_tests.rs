/*!
 * Tests for error types and conversions
 */

use subforge::errors::{AppError, SubtitleError, TranslationError};

/// Test display of a subtitle type mismatch
#[test]
fn test_subtitleError_invalidSubtitleType_shouldDisplayBothFormats() {
    let error = SubtitleError::InvalidSubtitleType {
        expected: "ass".to_string(),
        found: "srt".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("expected ass"));
    assert!(display.contains("found srt"));
}

/// Test display of an invalid timestamp error
#[test]
fn test_subtitleError_invalidTimestamp_shouldDisplayInput() {
    let error = SubtitleError::InvalidTimestamp("00:xx:01,000".to_string());
    assert_eq!(format!("{}", error), "Invalid timestamp: 00:xx:01,000");
}

/// Test conversion of serde_json errors
#[test]
fn test_translationError_fromSerdeJson_shouldWrapJsonError() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: TranslationError = json_error.into();

    assert!(matches!(error, TranslationError::Json(_)));
    assert!(format!("{}", error).contains("Failed to parse translation response"));
}

/// Test wrapping subtitle errors in the application error
#[test]
fn test_appError_fromSubtitleError_shouldWrap() {
    let error: AppError = SubtitleError::UnknownFormat.into();
    assert!(matches!(error, AppError::Subtitle(SubtitleError::UnknownFormat)));
    assert_eq!(format!("{}", error), "Subtitle error: Unknown subtitle format");
}

/// Test conversion of IO errors
#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.srt");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(_)));
    assert!(format!("{}", error).contains("missing.srt"));
}

/// Test conversion of anyhow errors
#[test]
fn test_appError_fromAnyhow_shouldBeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(ref message) if message == "something odd"));
}
