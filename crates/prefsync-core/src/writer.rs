//! Pretty-printer — renders a [`Value`] tree as tab-indented JSON text.
//!
//! Layout rules:
//!
//! - **Objects**: `{}` when empty, otherwise one `"key": value` entry per line,
//!   indented one tab deeper than the object, entries separated by `,`
//! - **Arrays**: `[]` when empty, otherwise one element per line indented by
//!   twice the array's depth in tabs, with no separating commas
//! - **Strings**: `"`, `\` and control characters are backslash-escaped
//! - **Numbers**: shortest decimal text that reads back to the same `f64`;
//!   NaN and infinities are written as `null`
//!
//! Array elements are separated by newlines alone. The [`crate::parser`]
//! treats newlines and commas alike, so the output always reads back.
//!
//! # Example
//! ```
//! use prefsync_core::{writer, Value};
//! let doc = Value::Array(vec![Value::from(1.0), Value::from("two")]);
//! assert_eq!(writer::to_string(&doc), "[\n1\n\"two\"\n]");
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PrefError, Result};
use crate::value::{Map, Value};

/// Render `value` as though it sat `depth` levels deep in a document.
pub fn write(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::String(s) => write_string(s, out),
        Value::Number(n) => write_number(*n, out),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Array(items) => write_array(items, depth, out),
        Value::Object(map) => write_object(map, depth, out),
    }
}

/// Render a whole document starting at depth 0.
pub fn to_string(value: &Value) -> String {
    let mut out = String::new();
    write(value, 0, &mut out);
    out
}

/// Render `value` into the file at `path`, creating or truncating it.
pub fn write_to_file(value: &Value, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_string(value)).map_err(|source| PrefError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "wrote JSON document");
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_string(self))
    }
}

fn write_object(map: &Map, depth: usize, out: &mut String) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    let mut first = true;
    for (key, value) in map {
        if !first {
            out.push_str(",\n");
        }
        first = false;
        indent(depth + 1, out);
        write_string(key, out);
        out.push_str(": ");
        write(value, depth + 1, out);
    }
    out.push('\n');
    indent(depth, out);
    out.push('}');
}

fn write_array(items: &[Value], depth: usize, out: &mut String) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    for item in items {
        out.push('\n');
        indent(depth * 2, out);
        write(item, depth + 1, out);
    }
    out.push('\n');
    indent(depth, out);
    out.push(']');
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

fn write_number(n: f64, out: &mut String) {
    if n.is_finite() {
        out.push_str(&n.to_string());
    } else {
        out.push_str("null");
    }
}

fn indent(tabs: usize, out: &mut String) {
    for _ in 0..tabs {
        out.push('\t');
    }
}
