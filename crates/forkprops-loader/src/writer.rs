//! Writing a store as a properties file.
//!
//! Output is ASCII-only and deterministic: an optional `#` comment header,
//! then one `key=value` line per entry in insertion order, `\n` line endings,
//! no timestamp.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use forkprops_store::PropertyStore;
use tracing::debug;

use crate::error::Result;

/// Write `store` to `writer` in insertion order.
pub fn store_properties<W: Write>(
    store: &PropertyStore,
    writer: W,
    comment: Option<&str>,
) -> Result<()> {
    let mut out = BufWriter::new(writer);
    if let Some(comment) = comment {
        // Every line break the parser recognizes starts a new `#` line.
        for line in comment.replace("\r\n", "\n").split(['\r', '\n']) {
            writeln!(out, "#{}", escape_comment(line))?;
        }
    }
    for (key, value) in store.entries() {
        writeln!(out, "{}={}", escape(&key, true), escape(&value, false))?;
    }
    out.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `store` into it.
pub fn write_properties_file(
    store: &PropertyStore,
    path: &Path,
    comment: Option<&str>,
) -> Result<()> {
    let file = File::create(path)?;
    store_properties(store, file, comment)?;
    debug!(path = %path.display(), count = store.len(), "wrote properties file");
    Ok(())
}

/// Escape comment text to printable ASCII. Tabs pass through.
fn escape_comment(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut buf = [0u16; 2];
    for c in line.chars() {
        match c {
            '\t' | ' '..='~' => out.push(c),
            _ => {
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{unit:04X}"));
                }
            }
        }
    }
    out
}

/// Escape text for a key (every space escaped) or a value (leading space only).
fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut buf = [0u16; 2];
    for (index, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || index == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => {
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{unit:04X}"));
                }
            }
        }
    }
    out
}
