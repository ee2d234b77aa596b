//! # prefsync-core
//!
//! Declare a record's persistent fields **once** and use that single
//! declaration both to load the record from JSON and to save it back.
//!
//! A record implements [`Record::fields`], listing `(name, field)` pairs. The
//! same list runs in whichever direction the caller asks for, so there is no
//! separate "load" and "save" code to keep in step.
//!
//! ## Quick start
//!
//! ```rust
//! use prefsync_core::{Fields, Record, Result};
//!
//! #[derive(Default)]
//! struct Chapter {
//!     contents: String,
//!     author: String,
//! }
//!
//! impl Record for Chapter {
//!     fn fields(&mut self, fields: &mut Fields<'_>) -> Result<()> {
//!         fields.field("contents", &mut self.contents)?;
//!         fields.field("author", &mut self.author)?;
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Preferences {
//!     last_open: u32,
//!     info: Chapter,
//!     chapters: Vec<Chapter>,
//!     draft: Option<Box<Chapter>>,
//! }
//!
//! impl Record for Preferences {
//!     fn fields(&mut self, fields: &mut Fields<'_>) -> Result<()> {
//!         fields.field("last_open", &mut self.last_open)?;
//!         fields.record("info", &mut self.info)?;
//!         fields.field("chapters", &mut self.chapters)?;
//!         fields.field("draft", &mut self.draft)?;
//!         Ok(())
//!     }
//! }
//!
//! let mut prefs = Preferences::default();
//! prefs.deserialize(r#"{"last_open": 3, "chapters": [{"author": "Dugi"}], "draft": null}"#).unwrap();
//! assert_eq!(prefs.last_open, 3);
//! assert_eq!(prefs.chapters[0].author, "Dugi");
//! assert!(prefs.draft.is_none());
//! ```
//!
//! ## Modules
//!
//! - [`value`] — in-memory JSON model (`Value`, `Kind`, `Map`)
//! - [`parser`] — lenient text → `Value` reader
//! - [`writer`] — `Value` → tab-indented text
//! - [`field`] — conversions for each supported field kind
//! - [`record`] — the `Record` trait and its traversal context
//! - [`visit`] — hook for external editors
//! - [`error`] — error type

pub mod error;
pub mod field;
pub mod parser;
pub mod record;
pub mod value;
pub mod visit;
pub mod writer;

pub use error::{PrefError, Result};
pub use field::Field;
pub use parser::{parse, parse_file, parse_reader};
pub use record::{Fields, Mode, Record};
pub use value::{Kind, Map, Value};
pub use visit::{visit, Placement, Visitor};
pub use writer::write_to_file;
