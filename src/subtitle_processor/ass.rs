/*!
 * ASS/SSA parsing and lossless reconstruction.
 *
 * A document is split into three parts:
 * - `header`: everything up to and including the `[Events]` `Format:` line
 * - `events`: every `Dialogue:`/`Comment:` line, one column per field
 * - `footer`: whatever follows the event block (fonts, stray sections)
 *
 * Cues are a projection of the Dialogue events only. Merging edited cues
 * builds a fresh event list by position and leaves header and footer
 * untouched, so styles and script info survive byte for byte.
 */

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::SubtitleError;
use super::{Subtitle, SubtitleFormat, Timestamp};

const DEFAULT_HEADER: &str = "[Script Info]
; Script generated by subforge
ScriptType: v4.00+
WrapStyle: 0
ScaledBorderAndShadow: yes
PlayResX: 1920
PlayResY: 1080

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,72,&H00FFFFFF,&H000000FF,&H00000000,&H64000000,0,0,0,0,100,100,0,0,1,3,1,2,30,30,40,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// Kind of `[Events]` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssEventKind {
    Dialogue,
    Comment,
}

impl AssEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dialogue => "Dialogue",
            Self::Comment => "Comment",
        }
    }
}

impl fmt::Display for AssEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column named by the events `Format:` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssColumn {
    Layer,
    Start,
    End,
    Style,
    Name,
    MarginL,
    MarginR,
    MarginV,
    Effect,
    Text,
    /// Any column we do not model; its value lives in `AssEvent::extra`
    Other(String),
}

impl AssColumn {
    fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            // SSA v4 calls the first column `Marked`
            "layer" | "marked" => Self::Layer,
            "start" => Self::Start,
            "end" => Self::End,
            "style" => Self::Style,
            "name" | "actor" => Self::Name,
            "marginl" => Self::MarginL,
            "marginr" => Self::MarginR,
            "marginv" => Self::MarginV,
            "effect" => Self::Effect,
            "text" => Self::Text,
            _ => Self::Other(name.trim().to_string()),
        }
    }
}

fn default_columns() -> Vec<AssColumn> {
    vec![
        AssColumn::Layer,
        AssColumn::Start,
        AssColumn::End,
        AssColumn::Style,
        AssColumn::Name,
        AssColumn::MarginL,
        AssColumn::MarginR,
        AssColumn::MarginV,
        AssColumn::Effect,
        AssColumn::Text,
    ]
}

/// One `Dialogue:`/`Comment:` line with every column kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssEvent {
    pub format: AssEventKind,
    pub layer: String,
    pub start: String,
    pub end: String,
    pub style: String,
    pub name: String,
    pub margin_l: String,
    pub margin_r: String,
    pub margin_v: String,
    pub effect: String,
    /// Dialogue text, override tags (`{\...}`) included
    pub text: String,
    /// Values of unmodelled columns, in column order
    #[serde(default)]
    pub extra: Vec<String>,
}

impl AssEvent {
    fn empty(format: AssEventKind) -> Self {
        Self {
            format,
            layer: String::new(),
            start: String::new(),
            end: String::new(),
            style: String::new(),
            name: String::new(),
            margin_l: String::new(),
            margin_r: String::new(),
            margin_v: String::new(),
            effect: String::new(),
            text: String::new(),
            extra: Vec::new(),
        }
    }

    /// Split the part after `Dialogue:` into columns. Only the first
    /// `columns.len() - 1` commas separate fields; the remainder, commas and
    /// all, belongs to the last column. Missing trailing fields stay empty.
    fn from_fields(format: AssEventKind, fields: &str, columns: &[AssColumn]) -> Self {
        let mut event = Self::empty(format);
        let mut values = fields.splitn(columns.len().max(1), ',');

        for column in columns {
            let value = values.next().unwrap_or("").to_string();
            match column {
                AssColumn::Layer => event.layer = value,
                AssColumn::Start => event.start = value,
                AssColumn::End => event.end = value,
                AssColumn::Style => event.style = value,
                AssColumn::Name => event.name = value,
                AssColumn::MarginL => event.margin_l = value,
                AssColumn::MarginR => event.margin_r = value,
                AssColumn::MarginV => event.margin_v = value,
                AssColumn::Effect => event.effect = value,
                AssColumn::Text => event.text = value,
                AssColumn::Other(_) => event.extra.push(value),
            }
        }

        event
    }

    fn render(&self, columns: &[AssColumn]) -> String {
        let mut extra = self.extra.iter();
        let values: Vec<&str> = columns
            .iter()
            .map(|column| match column {
                AssColumn::Layer => self.layer.as_str(),
                AssColumn::Start => self.start.as_str(),
                AssColumn::End => self.end.as_str(),
                AssColumn::Style => self.style.as_str(),
                AssColumn::Name => self.name.as_str(),
                AssColumn::MarginL => self.margin_l.as_str(),
                AssColumn::MarginR => self.margin_r.as_str(),
                AssColumn::MarginV => self.margin_v.as_str(),
                AssColumn::Effect => self.effect.as_str(),
                AssColumn::Text => self.text.as_str(),
                AssColumn::Other(_) => extra.next().map(String::as_str).unwrap_or(""),
            })
            .collect();

        format!("{}: {}", self.format, values.join(","))
    }

    pub fn is_dialogue(&self) -> bool {
        self.format == AssEventKind::Dialogue
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Header,
    Events,
    Footer,
}

/// Parsed ASS document: derived cues plus everything needed to rebuild it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssDocument {
    pub subtitles: Vec<Subtitle>,
    pub header: String,
    pub events: Vec<AssEvent>,
    pub footer: String,
    #[serde(default = "default_columns")]
    pub columns: Vec<AssColumn>,
}

impl AssDocument {
    pub fn parse(content: &str) -> Result<Self, SubtitleError> {
        let mut section = Section::Header;
        let mut in_events_section = false;
        let mut columns = default_columns();
        let mut header_lines: Vec<&str> = Vec::new();
        let mut footer_lines: Vec<&str> = Vec::new();
        let mut events = Vec::new();

        for line in content.lines() {
            let trimmed = line.trim();
            match section {
                Section::Header => {
                    header_lines.push(line);
                    if trimmed.starts_with('[') {
                        in_events_section = trimmed.eq_ignore_ascii_case("[Events]");
                    } else if in_events_section {
                        if let Some(names) = trimmed.strip_prefix("Format:") {
                            columns = names.split(',').map(AssColumn::from_name).collect();
                            section = Section::Events;
                        }
                    }
                }
                Section::Events => {
                    if trimmed.is_empty() {
                        continue;
                    }
                    match split_event_line(line) {
                        Some((kind, fields)) => events.push(AssEvent::from_fields(kind, fields, &columns)),
                        None => {
                            section = Section::Footer;
                            footer_lines.push(line);
                        }
                    }
                }
                Section::Footer => footer_lines.push(line),
            }
        }

        if section == Section::Header {
            warn!("ASS document has no [Events] format line; no cues extracted");
        }

        let subtitles = project_cues(&events)?;
        debug!(
            "Parsed ASS document: {} events, {} dialogue cues, {} footer lines",
            events.len(),
            subtitles.len(),
            footer_lines.len()
        );

        Ok(Self {
            subtitles,
            header: header_lines.join("\n"),
            events,
            footer: footer_lines.join("\n"),
            columns,
        })
    }

    /// Wrap cues from another format in a default script
    pub fn from_subtitles(subtitles: &[Subtitle]) -> Self {
        let events = subtitles
            .iter()
            .map(|subtitle| AssEvent {
                format: AssEventKind::Dialogue,
                layer: "0".to_string(),
                start: subtitle.start().format(SubtitleFormat::Ass),
                end: subtitle.end().format(SubtitleFormat::Ass),
                style: "Default".to_string(),
                name: subtitle.actor.clone(),
                margin_l: "0".to_string(),
                margin_r: "0".to_string(),
                margin_v: "0".to_string(),
                effect: String::new(),
                text: encode_line_breaks(&subtitle.content),
                extra: Vec::new(),
            })
            .collect();

        Self {
            subtitles: subtitles.to_vec(),
            header: DEFAULT_HEADER.to_string(),
            events,
            footer: String::new(),
            columns: default_columns(),
        }
    }

    /// Rebuild the document with cue text spliced into the Dialogue events.
    ///
    /// The Nth Dialogue event takes the Nth cue's content. When the counts
    /// differ the shorter side wins: surplus events keep their original text
    /// and surplus cues are dropped.
    pub fn merge(&self, subtitles: &[Subtitle]) -> String {
        let dialogue_count = self.events.iter().filter(|event| event.is_dialogue()).count();
        if dialogue_count != subtitles.len() {
            warn!(
                "ASS merge: {} dialogue events but {} cues supplied; unmatched entries keep their original text",
                dialogue_count,
                subtitles.len()
            );
        }

        let mut cues = subtitles.iter();
        let mut output = String::with_capacity(self.header.len() + self.footer.len() + self.events.len() * 64);
        output.push_str(&self.header);
        output.push('\n');

        for event in &self.events {
            let mut event = event.clone();
            if event.is_dialogue() {
                if let Some(cue) = cues.next() {
                    event.text = encode_line_breaks(&cue.content);
                }
            }
            output.push_str(&event.render(&self.columns));
            output.push('\n');
        }

        output.push('\n');
        output.push_str(&self.footer);
        output.trim().to_string()
    }
}

fn split_event_line(line: &str) -> Option<(AssEventKind, &str)> {
    let line = line.trim_start();
    if let Some(rest) = line.strip_prefix("Dialogue:") {
        Some((AssEventKind::Dialogue, rest.trim_start()))
    } else {
        line.strip_prefix("Comment:")
            .map(|rest| (AssEventKind::Comment, rest.trim_start()))
    }
}

fn project_cues(events: &[AssEvent]) -> Result<Vec<Subtitle>, SubtitleError> {
    events
        .iter()
        .filter(|event| event.is_dialogue())
        .enumerate()
        .map(|(position, event)| -> Result<Subtitle, SubtitleError> {
            let mut subtitle = Subtitle::new(
                position + 1,
                Timestamp::parse(&event.start)?,
                Timestamp::parse(&event.end)?,
                event.text.clone(),
            );
            subtitle.actor = event.name.clone();
            Ok(subtitle)
        })
        .collect()
}

/// Literal newlines are not legal inside an event line
fn encode_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\\N")
}
