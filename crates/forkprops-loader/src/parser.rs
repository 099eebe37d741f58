//! Parser for the `.properties` text format.
//!
//! Supported syntax:
//!
//! - `#` or `!` as the first non-blank character starts a comment line
//! - the key ends at the first unescaped `=`, `:` or blank; blanks around a
//!   single `=`/`:` separator are skipped
//! - a line ending in an odd number of backslashes continues on the next
//!   line, whose leading blanks are dropped
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes; any other escaped character
//!   stands for itself
//!
//! Blanks are space, tab and form feed.

use forkprops_store::{KeyValueSource, PropertyStore};

use crate::error::{LoaderError, Result};

/// Entries of a parsed properties file, in file order.
///
/// Duplicate keys are kept here as they appear; copying into a store applies
/// the store's rule (first position, last value).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedProperties {
    entries: Vec<(String, String)>,
}

impl ParsedProperties {
    /// The `(key, value)` pairs in file order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(String, String)> {
        self.entries
    }
}

impl KeyValueSource for ParsedProperties {
    fn copy_to(&self, target: &PropertyStore) {
        self.entries.as_slice().copy_to(target);
    }
}

/// Parse properties text.
pub fn parse_properties(text: &str) -> Result<ParsedProperties> {
    let entries = logical_lines(text)
        .iter()
        .map(parse_line)
        .collect::<Result<Vec<_>>>()?;
    Ok(ParsedProperties { entries })
}

struct LogicalLine {
    /// 1-based number of the natural line the logical line starts on.
    number: usize,
    text: String,
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn logical_lines(text: &str) -> Vec<LogicalLine> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (index, natural) in normalized.split('\n').enumerate() {
        let piece = natural.trim_start_matches(is_blank);
        let mut line = match pending.take() {
            Some(mut line) => {
                line.text.push_str(piece);
                line
            }
            None => {
                if piece.is_empty() || piece.starts_with(['#', '!']) {
                    continue;
                }
                LogicalLine {
                    number: index + 1,
                    text: piece.to_string(),
                }
            }
        };

        let trailing = piece.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            line.text.pop();
            pending = Some(line);
        } else {
            lines.push(line);
        }
    }

    lines.extend(pending);
    lines
}

fn parse_line(line: &LogicalLine) -> Result<(String, String)> {
    let chars: Vec<char> = line.text.chars().collect();

    let mut pos = 0;
    let mut escaped = false;
    while pos < chars.len() {
        let c = chars[pos];
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            break;
        }
        pos += 1;
    }
    let key_end = pos;

    while pos < chars.len() && is_blank(chars[pos]) {
        pos += 1;
    }
    if pos < chars.len() && matches!(chars[pos], '=' | ':') {
        pos += 1;
    }
    while pos < chars.len() && is_blank(chars[pos]) {
        pos += 1;
    }

    let key = unescape(&chars[..key_end], line.number)?;
    let value = unescape(&chars[pos..], line.number)?;
    Ok((key, value))
}

fn unescape(chars: &[char], line: usize) -> Result<String> {
    let mut units: Vec<u16> = Vec::with_capacity(chars.len());
    let mut buf = [0u16; 2];
    let mut iter = chars.iter().copied();

    while let Some(c) = iter.next() {
        let decoded = if c == '\\' {
            match iter.next() {
                // A lone trailing backslash is dropped.
                None => break,
                Some('t') => '\t',
                Some('n') => '\n',
                Some('r') => '\r',
                Some('f') => '\x0c',
                Some('u') => {
                    let mut code: u16 = 0;
                    for _ in 0..4 {
                        let digit = iter
                            .next()
                            .and_then(|d| d.to_digit(16))
                            .ok_or(LoaderError::MalformedEscape { line })?;
                        code = (code << 4) | digit as u16;
                    }
                    units.push(code);
                    continue;
                }
                Some(other) => other,
            }
        } else {
            c
        };
        units.extend_from_slice(decoded.encode_utf16(&mut buf));
    }

    String::from_utf16(&units).map_err(|_| LoaderError::MalformedEscape { line })
}
