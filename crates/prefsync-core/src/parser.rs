//! Lenient recursive-descent JSON reader.
//!
//! The parser accepts everything the [`crate::writer`] produces and a fair
//! amount of hand-edited input besides:
//!
//! - Commas are skipped like whitespace, so stray or missing separators are
//!   tolerated (`{"a": 1,, "b": 2}` and `[1 2 3]` both parse)
//! - An object or array stops at its closing bracket, at end of input, or at
//!   the first character that cannot start its next member; that character is
//!   left unconsumed
//! - An empty or whitespace-only document is `null`
//!
//! Strict errors remain for misspelled literals, a missing `:` after an
//! object key, unterminated strings, and characters that cannot start any
//! value at all.
//!
//! # Key design decisions
//!
//! - **A comma ends a number.** The scanner accumulates digits, `.`, `e`/`E`,
//!   `+` and `-`. Treating `,` as part of a number would swallow the next
//!   element of a scalar array.
//! - **Escapes are symmetric with the writer.** `\"`, `\\`, `\n`, `\r`, `\t`
//!   and `\/` are decoded; any other escaped character is kept as-is.
//! - **Nesting is capped at [`MAX_DEPTH`] containers.** Unterminated brackets
//!   are accepted, so without a cap a run of `[` would exhaust the stack.

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{PrefError, Result};
use crate::value::{Map, Value};

/// Parse a JSON document from text.
///
/// ```
/// use prefsync_core::{parse, Value};
/// let doc = parse(r#"{"a": 1,, "b": [true false]}"#).unwrap();
/// assert_eq!(doc.get("a"), Some(&Value::Number(1.0)));
/// assert_eq!(parse("   ").unwrap(), Value::Null);
/// ```
pub fn parse(text: &str) -> Result<Value> {
    Parser::new(text).document()
}

/// Read `reader` to its end and parse the result. Invalid UTF-8 is replaced
/// with U+FFFD rather than rejected.
pub fn parse_reader(mut reader: impl Read) -> Result<Value> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(PrefError::Stream)?;
    parse(&String::from_utf8_lossy(&bytes))
}

/// Parse the file at `path`.
///
/// A file that cannot be opened yields `Null`, the same as an empty one:
/// callers treat both as "nothing to load".
pub fn parse_file(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "cannot open JSON file, treating as empty");
            return Ok(Value::Null);
        }
    };
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|source| PrefError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text: Cow<'_, str> = String::from_utf8_lossy(&bytes);
    parse(&text)
}

/// Deepest container nesting the parser accepts, matching serde_json.
pub const MAX_DEPTH: usize = 128;

/// Cursor over the source text. `pos` is a byte offset and always sits on a
/// char boundary. `depth` counts the containers currently open.
struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    /// Run `body` one container level deeper.
    fn nested(&mut self, body: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth == MAX_DEPTH {
            return Err(PrefError::DepthLimit { offset: self.pos });
        }
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Whitespace and commas are interchangeable between tokens.
    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if matches!(c, ' ' | '\t' | '\n' | '\r' | ',') {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Top level: end of input is a `null` document, not an error.
    fn document(&mut self) -> Result<Value> {
        self.skip_separators();
        if self.peek().is_none() {
            return Ok(Value::Null);
        }
        self.value()
    }

    fn value(&mut self) -> Result<Value> {
        self.skip_separators();
        let offset = self.pos;
        match self.peek() {
            None => Err(PrefError::UnexpectedEnd { context: "value" }),
            Some('"') => {
                self.bump();
                self.string().map(Value::String)
            }
            Some('t') => self.literal("true", Value::Bool(true)),
            Some('f') => self.literal("false", Value::Bool(false)),
            Some('n') => self.literal("null", Value::Null),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number(),
            Some('{') => {
                self.bump();
                self.nested(Self::object)
            }
            Some('[') => {
                self.bump();
                self.nested(Self::array)
            }
            Some(found) => Err(PrefError::UnexpectedToken { found, offset }),
        }
    }

    fn literal(&mut self, word: &'static str, value: Value) -> Result<Value> {
        let offset = self.pos;
        for expected in word.chars() {
            if self.bump() != Some(expected) {
                return Err(PrefError::MalformedLiteral {
                    expected: word,
                    offset,
                });
            }
        }
        Ok(value)
    }

    /// Called with the opening quote already consumed.
    fn string(&mut self) -> Result<String> {
        let mut collected = String::new();
        loop {
            match self.bump() {
                None => return Err(PrefError::UnexpectedEnd { context: "string" }),
                Some('"') => return Ok(collected),
                Some('\\') => match self.bump() {
                    None => return Err(PrefError::UnexpectedEnd { context: "string" }),
                    Some('n') => collected.push('\n'),
                    Some('r') => collected.push('\r'),
                    Some('t') => collected.push('\t'),
                    // `"`, `\`, `/` and anything unrecognised stand for themselves
                    Some(other) => collected.push(other),
                },
                Some(c) => collected.push(c),
            }
        }
    }

    fn number(&mut self) -> Result<Value> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+') {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = &self.src[start..self.pos];
        text.parse::<f64>()
            .map(Value::Number)
            .map_err(|_| PrefError::MalformedNumber {
                text: text.to_string(),
                offset: start,
            })
    }

    /// Called with `{` already consumed.
    fn object(&mut self) -> Result<Value> {
        let mut map = Map::new();
        loop {
            self.skip_separators();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    break;
                }
                Some('"') => {
                    self.bump();
                    let key = self.string()?;
                    self.skip_separators();
                    let offset = self.pos;
                    match self.bump() {
                        Some(':') => {}
                        Some(found) => return Err(PrefError::UnexpectedToken { found, offset }),
                        None => return Err(PrefError::UnexpectedEnd { context: "object" }),
                    }
                    let value = self.value()?;
                    map.insert(key, value);
                }
                _ => break,
            }
        }
        Ok(Value::Object(map))
    }

    /// Called with `[` already consumed.
    fn array(&mut self) -> Result<Value> {
        let mut items = Vec::new();
        loop {
            self.skip_separators();
            match self.peek() {
                Some(']') => {
                    self.bump();
                    break;
                }
                Some(c) if starts_value(c) => items.push(self.value()?),
                _ => break,
            }
        }
        Ok(Value::Array(items))
    }
}

fn starts_value(c: char) -> bool {
    matches!(c, '"' | '{' | '[' | 't' | 'f' | 'n' | '-') || c.is_ascii_digit()
}
