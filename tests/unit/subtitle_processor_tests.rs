/*!
 * Tests for subtitle parsing, reconstruction and conversion
 */

use subforge::subtitle_processor::{
    convert_subtitle, detect_format, merge_ass, merge_subtitle, parse_subtitle, render_subtitles, srt, vtt,
    AssDocument, ParsedSubtitle, Subtitle, SubtitleFormat, Timestamp,
};
use subforge::SubtitleError;
use crate::common;

/// Test format sniffing on each sample document
#[test]
fn test_detect_format_withEachSample_shouldClassify() {
    assert_eq!(detect_format(common::SAMPLE_SRT), Some(SubtitleFormat::Srt));
    assert_eq!(detect_format(common::SAMPLE_VTT), Some(SubtitleFormat::Vtt));
    assert_eq!(detect_format(common::SAMPLE_ASS), Some(SubtitleFormat::Ass));
    assert_eq!(detect_format("WebVTT\n\n00:00:01.000 --> 00:00:02.000\nhi"), Some(SubtitleFormat::Vtt));
    assert_eq!(detect_format("hello\n00:00:01,000 --> 00:00:02,000"), None);
}

/// Test SRT parsing
#[test]
fn test_parseSubtitle_srt_shouldReadContentAndTiming() {
    let output = parse_subtitle(common::SAMPLE_SRT, None).unwrap();

    assert_eq!(output.parsed, ParsedSubtitle::Srt);
    assert_eq!(output.subtitles.len(), 3);
    assert_eq!(output.subtitles[1].content, "It contains\nmultiple lines.");
    assert_eq!(output.subtitles[1].start(), Timestamp::new(0, 0, 5, 0));
    assert_eq!(output.subtitles[2].index, 3);
    assert!(output.subtitles.iter().all(|s| s.actor.is_empty()));
}

/// Test SRT parse and merge round trip
#[test]
fn test_mergeSubtitle_srt_shouldRoundTrip() {
    let output = parse_subtitle(common::SAMPLE_SRT, Some(SubtitleFormat::Srt)).unwrap();
    let merged = merge_subtitle(&output.subtitles, &output.parsed);
    assert_eq!(merged, common::SAMPLE_SRT);
}

/// Test SRT cues packed without blank lines
#[test]
fn test_srtParse_withoutBlankSeparators_shouldMatchCanonical() {
    let compact = "1\n00:00:01,000 --> 00:00:04,000\nThis is a test subtitle.\n2\n00:00:05,000 --> 00:00:09,000\nIt contains\nmultiple lines.\n3\n00:00:10,000 --> 00:00:14,000\nFor testing purposes.";
    assert_eq!(srt::parse(compact).unwrap(), srt::parse(common::SAMPLE_SRT).unwrap());
}

/// Test renumbering of duplicate SRT indices
#[test]
fn test_srtParse_withDuplicateIndices_shouldRenumber() {
    let text = "7\n00:00:01,000 --> 00:00:02,000\na\n\n7\n00:00:03,000 --> 00:00:04,000\nb\n\n2\n00:00:05,000 --> 00:00:06,000\nc";
    let indices: Vec<usize> = srt::parse(text).unwrap().iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
}

/// Test that inverted cue timing is kept as-is
#[test]
fn test_srtParse_withEndBeforeStart_shouldPassThrough() {
    let subs = srt::parse("1\n00:00:05,000 --> 00:00:01,000\nbackwards").unwrap();
    assert!(subs[0].start() > subs[0].end());
}

/// Test parsing an empty SRT document
#[test]
fn test_srtParse_withEmptyInput_shouldReturnNoCues() {
    assert!(srt::parse("").unwrap().is_empty());
    assert!(srt::parse("\n\n  \n").unwrap().is_empty());
}

/// Test WebVTT parsing with notes and cue settings
#[test]
fn test_vttParse_withNotesAndSettings_shouldSkipThem() {
    let text = "WEBVTT - title\nKind: captions\n\nNOTE a comment\n\nintro\n00:00:01.000 --> 00:00:02.000 line:0\nFirst\n\n00:00:03.500 --> 00:00:04.000\nSecond";
    let subs = vtt::parse(text).unwrap();

    assert_eq!(subs.len(), 2);
    assert_eq!(subs[0].content, "First");
    assert_eq!(subs[1].start(), Timestamp::new(0, 0, 3, 500));
}

/// Test WebVTT generation
#[test]
fn test_vttGenerate_shouldUsePeriodSeparators() {
    let subs = vec![Subtitle::new(1, Timestamp::new(0, 1, 2, 3), Timestamp::new(1, 0, 0, 0), "hi")];
    assert_eq!(vtt::generate(&subs), "WEBVTT\n\n1\n00:01:02.003 --> 01:00:00.000\nhi");
}

/// Test that ASS parsing yields cues for Dialogue events only
#[test]
fn test_assParse_shouldProjectDialogueOnly() {
    let output = parse_subtitle(common::SAMPLE_ASS, None).unwrap();
    let document = output.parsed.ass_document().unwrap();

    assert_eq!(document.events.len(), 5);
    assert_eq!(output.subtitles.len(), 3);
    assert_eq!(output.subtitles[0].content, "Hello, world!");
    assert_eq!(output.subtitles[0].actor, "Alice");
    assert_eq!(output.subtitles[1].end(), Timestamp::new(0, 0, 9, 500));
    assert_eq!(output.subtitles[2].index, 3);
    assert!(document.header.ends_with("Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text"));
    assert_eq!(document.footer, "[Fonts]\nfontname: custom.ttf");
}

/// Test lossless ASS merge with unedited cues
#[test]
fn test_mergeSubtitle_assUnchanged_shouldBeByteIdentical() {
    let output = parse_subtitle(common::SAMPLE_ASS, None).unwrap();
    assert_eq!(merge_subtitle(&output.subtitles, &output.parsed), common::SAMPLE_ASS);
}

/// Test ASS merge after editing one cue
#[test]
fn test_mergeAss_withEditedCue_shouldOnlyChangeItsText() {
    let output = parse_subtitle(common::SAMPLE_ASS, None).unwrap();
    let mut subtitles = output.subtitles.clone();
    subtitles[0].content = "Bonjour, le monde !".to_string();

    let merged = merge_ass(&subtitles, &output.parsed).unwrap();
    let changed: Vec<(&str, &str)> = common::SAMPLE_ASS
        .lines()
        .zip(merged.lines())
        .filter(|(before, after)| before != after)
        .collect();

    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].1, "Dialogue: 0,0:00:01.00,0:00:04.00,Default,Alice,0,0,0,,Bonjour, le monde !");
}

/// Test ASS merge with fewer cues than Dialogue events
#[test]
fn test_mergeAss_withFewerCues_shouldKeepOriginalTextOfSurplusEvents() {
    // Documented quirk: counts are zipped positionally, the shorter side wins
    let output = parse_subtitle(common::SAMPLE_ASS, None).unwrap();
    let subtitles = vec![Subtitle { content: "Salut".to_string(), ..output.subtitles[0].clone() }];

    let merged = merge_ass(&subtitles, &output.parsed).unwrap();

    assert!(merged.contains(",,Salut\n"));
    assert!(merged.contains("First line\\NSecond line"));
    assert!(merged.contains("{\\i1}Goodbye{\\i0}"));
}

/// Test ASS merge against a non-ASS parse result
#[test]
fn test_mergeAss_withNonAssEnvelope_shouldFail() {
    let err = merge_ass(&[], &ParsedSubtitle::Vtt).unwrap_err();
    assert!(matches!(err, SubtitleError::InvalidSubtitleType { ref expected, ref found } if expected == "ass" && found == "vtt"));
}

/// Test serialising the parse envelope
#[test]
fn test_parsedEnvelope_serdeRoundTrip_shouldKeepAssDocument() {
    let output = parse_subtitle(common::SAMPLE_ASS, None).unwrap();
    let json = serde_json::to_string(&output.parsed).unwrap();
    assert!(json.starts_with(r#"{"type":"ass","data":{"#));

    let restored: ParsedSubtitle = serde_json::from_str(&json).unwrap();
    assert_eq!(merge_subtitle(&output.subtitles, &restored), common::SAMPLE_ASS);
}

/// Test an SRT envelope that carries ASS data
#[test]
fn test_parsedEnvelope_withDataOnSrt_shouldBeRejected() {
    let document = AssDocument::from_subtitles(&[]);
    let json = serde_json::json!({ "type": "srt", "data": document }).to_string();
    assert!(serde_json::from_str::<ParsedSubtitle>(&json).is_err());
}

/// Test ASS to SRT conversion
#[test]
fn test_convertSubtitle_assToSrt_shouldExpandHardBreaks() {
    let converted = convert_subtitle(common::SAMPLE_ASS, SubtitleFormat::Ass, SubtitleFormat::Srt).unwrap();
    let subs = srt::parse(&converted).unwrap();

    assert_eq!(subs.len(), 3);
    assert_eq!(subs[1].content, "First line\nSecond line");
    assert!(converted.contains("00:00:05,000 --> 00:00:09,500"));
}

/// Test SRT to ASS conversion
#[test]
fn test_convertSubtitle_srtToAss_shouldBuildDefaultScript() {
    let converted = convert_subtitle(common::SAMPLE_SRT, SubtitleFormat::Srt, SubtitleFormat::Ass).unwrap();
    let reparsed = parse_subtitle(&converted, None).unwrap();

    assert_eq!(reparsed.parsed.format(), SubtitleFormat::Ass);
    assert!(converted.contains("[V4+ Styles]"));
    assert!(converted.contains("Dialogue: 0,0:00:05.00,0:00:09.00,Default,,0,0,0,,It contains\\Nmultiple lines."));
    assert_eq!(reparsed.subtitles.len(), 3);
}

/// Test SRT to WebVTT conversion
#[test]
fn test_convertSubtitle_srtToVtt_shouldKeepCues() {
    let converted = convert_subtitle(common::SAMPLE_SRT, SubtitleFormat::Srt, SubtitleFormat::Vtt).unwrap();
    let from_vtt = vtt::parse(&converted).unwrap();

    assert!(converted.starts_with("WEBVTT\n\n1\n00:00:01.000"));
    assert_eq!(from_vtt, srt::parse(common::SAMPLE_SRT).unwrap());
}

/// Test rendering an empty cue list
#[test]
fn test_renderSubtitles_withNoCues_shouldEmitEmptyDocuments() {
    assert_eq!(render_subtitles(&[], SubtitleFormat::Srt), "");
    assert_eq!(render_subtitles(&[], SubtitleFormat::Vtt), "WEBVTT");
    assert!(render_subtitles(&[], SubtitleFormat::Ass).starts_with("[Script Info]"));
}

/// Test ASS centisecond timestamps
#[test]
fn test_timestamp_assCentiseconds_shouldScaleAndTruncate() {
    let ts = Timestamp::parse("0:00:16.05").unwrap();
    assert_eq!(ts.ms, 50);
    assert_eq!(ts.format(SubtitleFormat::Ass), "0:00:16.05");

    let ts = Timestamp::parse("00:00:16,059").unwrap();
    assert_eq!(ts.format(SubtitleFormat::Ass), "0:00:16.05");
}

/// Test timestamp parsing with a non-numeric field
#[test]
fn test_timestamp_withNonNumericField_shouldFail() {
    assert!(matches!(Timestamp::parse("00:a0:01,000"), Err(SubtitleError::InvalidTimestamp(_))));
    assert!(parse_subtitle("1\n00:00:01,000 --> nope\ntext", Some(SubtitleFormat::Srt)).is_err());
}
