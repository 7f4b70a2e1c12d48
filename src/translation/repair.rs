/*!
 * Best-effort recovery of JSON from model output.
 *
 * Replies arrive wrapped in code fences, prefixed with reasoning blocks or
 * commentary, containing unescaped quotes, or cut off mid-stream. The repair
 * passes run in order:
 *
 * 1. clean-up: drop `<think>` blocks, unwrap code fences, skip leading prose
 * 2. quote repair: escape quotes that cannot be closing a string value
 * 3. bracket balance: cut back to the last closed `{}`/`[]` and close the rest
 * 4. final cleanup: drop `//` line comments and trailing commas
 *
 * None of the passes fail; when nothing usable is left the result is the
 * empty envelope `{"subtitles":[]}`.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical reply with no cues
pub const EMPTY_ENVELOPE: &str = r#"{"subtitles":[]}"#;

static THINK_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*<think>.*?</think>").unwrap()
});

/// Run every repair pass over a raw model reply
pub fn repair_json(response: &str) -> String {
    let cleaned = clean_response(response);
    if cleaned == EMPTY_ENVELOPE {
        return cleaned;
    }

    let escaped = escape_embedded_quotes(&cleaned);
    match balance_brackets(&escaped) {
        Some(balanced) => strip_comments_and_trailing_commas(&balanced),
        None => {
            debug!("No balanced JSON structure in reply; using empty envelope");
            EMPTY_ENVELOPE.to_string()
        }
    }
}

/// Strip reasoning and fences and return the JSON-looking payload
pub fn clean_response(response: &str) -> String {
    let trimmed = response.trim();

    let without_think = if let Some(found) = THINK_BLOCK_REGEX.find(trimmed) {
        &trimmed[found.end()..]
    } else if trimmed.starts_with("<think>") {
        // Still reasoning when the stream was cut; nothing to parse yet
        ""
    } else {
        trimmed
    };

    let unfenced = extract_fenced(without_think);
    if unfenced.is_empty() {
        return EMPTY_ENVELOPE.to_string();
    }

    // Commentary such as "Here is the translation:" before the payload
    match unfenced.find(['{', '[']) {
        Some(start) => unfenced[start..].to_string(),
        None => unfenced,
    }
}

fn extract_fenced(text: &str) -> String {
    if let Some(start) = text.find("```json") {
        let body = &text[start + "```json".len()..];
        let body = match body.find("```") {
            Some(end) => &body[..end],
            None => body,
        };
        return body.trim().to_string();
    }

    if let Some(first) = text.find("```") {
        let after_open = first + 3;
        if let Some(close) = text[after_open..].rfind("```") {
            return text[after_open..after_open + close].trim().to_string();
        }
    }

    text.replace("```", "").trim().to_string()
}

/// Escape `"` characters inside string values that are not followed by `,`,
/// `}`, `]` or the end of input, and escape raw control characters.
///
/// Keys are never repaired: inside an object, a string that starts before
/// the colon is a key and its next quote always closes it.
pub fn escape_embedded_quotes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut output = String::with_capacity(text.len() + 16);

    let mut containers: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut string_is_key = false;
    let mut escape_pending = false;
    let mut after_colon = false;

    for (position, &c) in chars.iter().enumerate() {
        if in_string {
            if escape_pending {
                escape_pending = false;
                output.push(c);
                continue;
            }
            match c {
                '\\' => {
                    escape_pending = true;
                    output.push(c);
                }
                '"' if string_is_key || closes_value(&chars[position + 1..]) => {
                    in_string = false;
                    output.push(c);
                }
                '"' => output.push_str("\\\""),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                _ => output.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                string_is_key = containers.last() == Some(&'{') && !after_colon;
            }
            '{' | '[' => {
                containers.push(c);
                after_colon = false;
            }
            '}' | ']' => {
                containers.pop();
                after_colon = false;
            }
            ',' => after_colon = false,
            ':' => after_colon = true,
            _ => {}
        }
        output.push(c);
    }

    output
}

fn closes_value(rest: &[char]) -> bool {
    match rest.iter().find(|c| !c.is_whitespace()) {
        Some(next) => matches!(next, ',' | '}' | ']'),
        None => true,
    }
}

/// Truncate to the last point where a `{}` or `[]` pair closed, then close
/// whatever was still open there. `None` if no pair ever closed.
pub fn balance_brackets(text: &str) -> Option<String> {
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escape_pending = false;
    let mut last_balanced: Option<(usize, Vec<char>)> = None;

    for (position, c) in text.char_indices() {
        if in_string {
            if escape_pending {
                escape_pending = false;
            } else if c == '\\' {
                escape_pending = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' | '[' => stack.push(c),
            '}' | ']' => {
                let opener = if c == '}' { '{' } else { '[' };
                if stack.last() == Some(&opener) {
                    stack.pop();
                    last_balanced = Some((position + c.len_utf8(), stack.clone()));
                }
            }
            _ => {}
        }
    }

    let (end, still_open) = last_balanced?;
    let mut repaired = text[..end].to_string();
    for opener in still_open.iter().rev() {
        repaired.push(if *opener == '{' { '}' } else { ']' });
    }

    if repaired.len() != text.len() {
        debug!("Repaired truncated JSON: kept {} of {} bytes", end, text.len());
    }
    Some(repaired)
}

/// Remove `//` comments and commas that directly precede `}` or `]`,
/// leaving string contents alone.
pub fn strip_comments_and_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut without_comments = Vec::with_capacity(chars.len());
    let mut in_string = false;
    let mut escape_pending = false;
    let mut cursor = 0;

    while cursor < chars.len() {
        let c = chars[cursor];
        if in_string {
            if escape_pending {
                escape_pending = false;
            } else if c == '\\' {
                escape_pending = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == '/' && chars.get(cursor + 1) == Some(&'/') {
            while cursor < chars.len() && chars[cursor] != '\n' {
                cursor += 1;
            }
            continue;
        }
        without_comments.push(c);
        cursor += 1;
    }

    let mut output = String::with_capacity(without_comments.len());
    in_string = false;
    escape_pending = false;

    for (position, &c) in without_comments.iter().enumerate() {
        if in_string {
            if escape_pending {
                escape_pending = false;
            } else if c == '\\' {
                escape_pending = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = without_comments[position + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        output.push(c);
    }

    output
}
