//! Seam for an external editor that walks a record's fields.
//!
//! An editor (a settings dialog, a TUI form, ...) implements [`Visitor`]. The
//! record's ordinary field declaration drives it, so the editor sees exactly
//! the names and values that saving and loading see. It reads the current
//! value with [`Field::save`] and writes an edited one back with
//! [`Field::load`], using the same conversion rules as a file load.
//!
//! Rendering is entirely the visitor's business. The engine only reports
//! whether the record is being shown on its own ([`Placement::Inline`]) or as
//! one row of a table of records ([`Placement::TableRow`]).
//!
//! Child records are walked too. Before a nested record, a present optional,
//! or a sequence, the visitor's [`Visitor::enter`] is called; if it agrees,
//! the child's own fields follow and [`Visitor::leave`] closes the group.
//! Nested records and optionals are shown inline. Each element of a sequence
//! is entered under its index and shown as a table row. A visitor that
//! declines to enter gets the whole child as one opaque field instead.

use crate::error::Result;
use crate::field::Field;
use crate::record::{Fields, Record};

/// Where the visited record is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// One labelled entry per field.
    Inline,
    /// One cell per field in a row of a table.
    TableRow,
}

/// Receives each declared field of a record in declaration order.
pub trait Visitor {
    /// Called once per leaf field. The return value becomes the presence flag
    /// of the corresponding [`Fields::field`] call.
    fn visit(&mut self, name: &str, field: &mut dyn Field, placement: Placement) -> Result<bool>;

    /// Called before the fields of the child `name`. Return `false` to receive
    /// the child through [`Visitor::visit`] as a single field instead.
    fn enter(&mut self, _name: &str, _placement: Placement) -> Result<bool> {
        Ok(true)
    }

    /// Called after the last field of a child that was entered.
    fn leave(&mut self, _name: &str, _placement: Placement) -> Result<()> {
        Ok(())
    }
}

/// Run `record`'s field declaration against `visitor`.
pub fn visit<R: Record + ?Sized>(
    record: &mut R,
    visitor: &mut dyn Visitor,
    placement: Placement,
) -> Result<()> {
    record.fields(&mut Fields::visiting(visitor, placement))
}

/// Walk a child record's fields between `enter` and `leave`. Returns `false`
/// without touching the record if the visitor declined.
pub(crate) fn descend<R: Record + ?Sized>(
    visitor: &mut dyn Visitor,
    name: &str,
    record: &mut R,
    placement: Placement,
) -> Result<bool> {
    if !visitor.enter(name, placement)? {
        return Ok(false);
    }
    record.fields(&mut Fields::visiting(&mut *visitor, placement))?;
    visitor.leave(name, placement)?;
    Ok(true)
}
