//! Records and the traversal context that drives them.
//!
//! A [`Record`] lists its persistent fields once, in [`Record::fields`]. The
//! same list runs for every traversal; what each entry does depends on the
//! [`Fields`] context it is handed:
//!
//! - **Saving**: each field writes a node into the current object
//! - **Loading**: each field looks itself up in the current object and, if
//!   present, overwrites the native value
//! - **Visiting**: each field is handed to an external [`Visitor`], which
//!   also walks into child records
//!
//! The context is an explicit argument rather than state stored on the record,
//! so descending into a child record just builds a new context around the
//! child's object. Two traversals of the same record cannot overlap: both
//! would need `&mut` access.
//!
//! # Example
//! ```
//! use prefsync_core::{Fields, Record, Result};
//!
//! #[derive(Default)]
//! struct Window {
//!     title: String,
//!     width: u32,
//!     maximized: bool,
//! }
//!
//! impl Record for Window {
//!     fn fields(&mut self, fields: &mut Fields<'_>) -> Result<()> {
//!         fields.field("title", &mut self.title)?;
//!         fields.field("width", &mut self.width)?;
//!         fields.field("maximized", &mut self.maximized)?;
//!         Ok(())
//!     }
//! }
//!
//! let mut window = Window { title: "main".into(), width: 800, maximized: false };
//! let text = window.serialize().unwrap();
//!
//! let mut restored = Window::default();
//! restored.deserialize(&text).unwrap();
//! assert_eq!(restored.width, 800);
//! ```

use std::path::Path;

use tracing::{debug, trace};

use crate::error::Result;
use crate::field::{Field, Nested};
use crate::parser;
use crate::value::{Map, Value};
use crate::visit::{Placement, Visitor};
use crate::writer;

/// A user type whose fields take part in saving and loading.
pub trait Record {
    /// Declare every persistent field, in order, by calling
    /// [`Fields::field`] or [`Fields::record`] once per field.
    ///
    /// Propagate errors with `?`; a failed field aborts the traversal.
    fn fields(&mut self, fields: &mut Fields<'_>) -> Result<()>;

    /// Build the JSON object for this record.
    fn to_value(&mut self) -> Result<Value> {
        Ok(Value::Object(save_record(self)?))
    }

    /// Overwrite declared fields from `value`.
    ///
    /// `Null` is "nothing to load" and leaves the record untouched. Any other
    /// non-object root fails with a type mismatch.
    fn load_value(&mut self, value: &Value) -> Result<()> {
        if value.is_null() {
            return Ok(());
        }
        load_record(self, value.as_object()?)
    }

    /// Render this record as JSON text.
    fn serialize(&mut self) -> Result<String> {
        Ok(writer::to_string(&self.to_value()?))
    }

    /// Write this record to the file at `path`.
    fn save(&mut self, path: impl AsRef<Path>) -> Result<()>
    where
        Self: Sized,
    {
        writer::write_to_file(&self.to_value()?, path)
    }

    /// Load declared fields from JSON text. Blank text is a no-op.
    fn deserialize(&mut self, text: &str) -> Result<()> {
        let doc = parser::parse(text)?;
        self.load_value(&doc)
    }

    /// Load declared fields from the file at `path`. A missing or empty file
    /// is a no-op.
    fn load(&mut self, path: impl AsRef<Path>) -> Result<()>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let doc = parser::parse_file(path)?;
        if doc.is_null() {
            debug!(path = %path.display(), "nothing to load");
            return Ok(());
        }
        self.load_value(&doc)
    }
}

/// Owning handles delegate to the record they hold, which is what makes
/// `Option<Box<R>>` and `Vec<Box<R>>` valid fields.
impl<R: Record + ?Sized> Record for Box<R> {
    fn fields(&mut self, fields: &mut Fields<'_>) -> Result<()> {
        (**self).fields(fields)
    }
}

/// Which traversal a [`Fields`] context is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Saving,
    Loading,
    Visiting,
}

/// The traversal context handed to [`Record::fields`].
pub struct Fields<'a> {
    cursor: Cursor<'a>,
}

enum Cursor<'a> {
    Saving(&'a mut Map),
    Loading(&'a Map),
    Visiting {
        visitor: &'a mut dyn Visitor,
        placement: Placement,
    },
}

impl<'a> Fields<'a> {
    /// A context that writes fields into `target`.
    pub fn saving(target: &'a mut Map) -> Self {
        Self {
            cursor: Cursor::Saving(target),
        }
    }

    /// A context that reads fields from `source`.
    pub fn loading(source: &'a Map) -> Self {
        Self {
            cursor: Cursor::Loading(source),
        }
    }

    /// A context that hands each field to `visitor`.
    pub fn visiting(visitor: &'a mut dyn Visitor, placement: Placement) -> Self {
        Self {
            cursor: Cursor::Visiting { visitor, placement },
        }
    }

    /// The traversal in progress. Useful for work that should only happen in
    /// one direction, such as recomputing derived values after a load.
    pub fn mode(&self) -> Mode {
        match self.cursor {
            Cursor::Saving(_) => Mode::Saving,
            Cursor::Loading(_) => Mode::Loading,
            Cursor::Visiting { .. } => Mode::Visiting,
        }
    }

    /// Save, load, or visit one field under `name`.
    ///
    /// Returns the presence flag: `true` when the field was written, found,
    /// or reported present by the visitor; `false` when loading and `name`
    /// is absent.
    pub fn field<F: Field>(&mut self, name: &str, field: &mut F) -> Result<bool> {
        match &mut self.cursor {
            Cursor::Saving(target) => {
                let node = field.save()?;
                target.insert(name.to_owned(), node);
                Ok(true)
            }
            Cursor::Loading(source) => field.load(source.get(name)),
            Cursor::Visiting { visitor, placement } => {
                field.accept(name, &mut **visitor, *placement)
            }
        }
    }

    /// Declare a child record held by value. Its fields are nested under
    /// `name` as an object.
    pub fn record<R: Record + ?Sized>(&mut self, name: &str, record: &mut R) -> Result<bool> {
        trace!(field = name, mode = ?self.mode(), "descending into nested record");
        self.field(name, &mut Nested(record))
    }
}

pub(crate) fn save_record<R: Record + ?Sized>(record: &mut R) -> Result<Map> {
    let mut map = Map::new();
    record.fields(&mut Fields::saving(&mut map))?;
    Ok(map)
}

pub(crate) fn load_record<R: Record + ?Sized>(record: &mut R, source: &Map) -> Result<()> {
    record.fields(&mut Fields::loading(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        seen: Vec<Mode>,
    }

    impl Record for Probe {
        fn fields(&mut self, fields: &mut Fields<'_>) -> Result<()> {
            self.seen.push(fields.mode());
            Ok(())
        }
    }

    #[test]
    fn mode_reflects_context() {
        let mut probe = Probe { seen: Vec::new() };
        probe.to_value().unwrap();
        probe.load_value(&Value::object()).unwrap();
        assert_eq!(probe.seen, vec![Mode::Saving, Mode::Loading]);
    }

    #[test]
    fn null_document_skips_traversal() {
        let mut probe = Probe { seen: Vec::new() };
        probe.load_value(&Value::Null).unwrap();
        probe.deserialize("").unwrap();
        assert!(probe.seen.is_empty());
    }
}
