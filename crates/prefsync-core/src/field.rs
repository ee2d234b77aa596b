//! Per-kind conversions between native field values and JSON nodes.
//!
//! Every field kind a record can declare implements [`Field`]: text, the
//! arithmetic types, `bool`, nullable owned records (`Option<R>`, including
//! `Option<Box<R>>`), and sequences of records (`Vec<R>`, including
//! `Vec<Box<R>>`). Nested records held by value go through
//! [`Fields::record`](crate::Fields::record) instead.
//!
//! Loading never fails on an absent key. The field is left as it was, except
//! for `Option<R>`, which becomes `None`, and `false` is returned.

use tracing::trace;

use crate::error::Result;
use crate::record::{load_record, save_record, Record};
use crate::value::Value;
use crate::visit::{descend, Placement, Visitor};

/// A value that can be written to and read from a single JSON node.
///
/// `save` takes `&mut self` because nested records produce their node by
/// running the same field declaration that loading uses.
pub trait Field {
    /// Convert the current value into a JSON node.
    fn save(&mut self) -> Result<Value>;

    /// Assign from `found`, or handle absence when it is `None`.
    ///
    /// Returns `true` if a node was found. A node of the wrong kind fails with
    /// [`PrefError::TypeMismatch`](crate::PrefError::TypeMismatch).
    fn load(&mut self, found: Option<&Value>) -> Result<bool>;

    /// Present this field to `visitor` under `name`. Leaves go straight to
    /// [`Visitor::visit`]; record-holding kinds walk their children.
    fn accept(
        &mut self,
        name: &str,
        visitor: &mut dyn Visitor,
        placement: Placement,
    ) -> Result<bool>
    where
        Self: Sized,
    {
        visitor.visit(name, self, placement)
    }
}

impl Field for String {
    fn save(&mut self) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }

    fn load(&mut self, found: Option<&Value>) -> Result<bool> {
        let Some(node) = found else {
            return Ok(false);
        };
        node.as_str()?.clone_into(self);
        Ok(true)
    }
}

impl Field for bool {
    fn save(&mut self) -> Result<Value> {
        Ok(Value::Bool(*self))
    }

    fn load(&mut self, found: Option<&Value>) -> Result<bool> {
        let Some(node) = found else {
            return Ok(false);
        };
        *self = node.as_bool()?;
        Ok(true)
    }
}

/// Arithmetic fields travel as `f64`. Loading casts back with `as`, so
/// fractions truncate and out-of-range values saturate.
macro_rules! numeric_field {
    ($($t:ty),* $(,)?) => {
        $(
            impl Field for $t {
                fn save(&mut self) -> Result<Value> {
                    Ok(Value::Number(*self as f64))
                }

                fn load(&mut self, found: Option<&Value>) -> Result<bool> {
                    let Some(node) = found else {
                        return Ok(false);
                    };
                    *self = node.as_f64()? as $t;
                    Ok(true)
                }
            }
        )*
    };
}

numeric_field!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// A nullable owned child record.
///
/// `None` saves as `null`. Loading a non-null node always builds a fresh
/// `R::default()` and replaces whatever was held before.
impl<R: Record + Default> Field for Option<R> {
    fn save(&mut self) -> Result<Value> {
        match self {
            Some(record) => Ok(Value::Object(save_record(record)?)),
            None => Ok(Value::Null),
        }
    }

    fn load(&mut self, found: Option<&Value>) -> Result<bool> {
        match found {
            None => {
                *self = None;
                Ok(false)
            }
            Some(Value::Null) => {
                *self = None;
                Ok(true)
            }
            Some(node) => {
                let map = node.as_object()?;
                let mut record = R::default();
                load_record(&mut record, map)?;
                *self = Some(record);
                Ok(true)
            }
        }
    }

    fn accept(
        &mut self,
        name: &str,
        visitor: &mut dyn Visitor,
        placement: Placement,
    ) -> Result<bool> {
        if let Some(record) = self.as_mut() {
            if descend(visitor, name, record, Placement::Inline)? {
                return Ok(true);
            }
        }
        visitor.visit(name, self, placement)
    }
}

/// A sequence of records. Loading replaces the contents rather than merging:
/// after the node is confirmed to be an array the vector is cleared and one
/// default-constructed element is loaded per array entry.
impl<R: Record + Default> Field for Vec<R> {
    fn save(&mut self) -> Result<Value> {
        let items = self
            .iter_mut()
            .map(|record| save_record(record).map(Value::Object))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Array(items))
    }

    fn load(&mut self, found: Option<&Value>) -> Result<bool> {
        let Some(node) = found else {
            return Ok(false);
        };
        let items = node.as_array()?;
        trace!(count = items.len(), "loading record sequence");
        self.clear();
        self.reserve(items.len());
        for item in items {
            let mut record = R::default();
            load_record(&mut record, item.as_object()?)?;
            self.push(record);
        }
        Ok(true)
    }

    /// The sequence is entered as a group, then each element as a table row
    /// named by its index.
    fn accept(
        &mut self,
        name: &str,
        visitor: &mut dyn Visitor,
        placement: Placement,
    ) -> Result<bool> {
        if !visitor.enter(name, placement)? {
            return visitor.visit(name, self, placement);
        }
        for (index, record) in self.iter_mut().enumerate() {
            descend(visitor, &index.to_string(), record, Placement::TableRow)?;
        }
        visitor.leave(name, placement)?;
        Ok(true)
    }
}

/// Adapter that lets a by-value child record be dispatched like any other
/// field.
pub(crate) struct Nested<'r, R: ?Sized>(pub(crate) &'r mut R);

impl<R: Record + ?Sized> Field for Nested<'_, R> {
    fn save(&mut self) -> Result<Value> {
        Ok(Value::Object(save_record(self.0)?))
    }

    fn load(&mut self, found: Option<&Value>) -> Result<bool> {
        let Some(node) = found else {
            return Ok(false);
        };
        load_record(self.0, node.as_object()?)?;
        Ok(true)
    }

    fn accept(
        &mut self,
        name: &str,
        visitor: &mut dyn Visitor,
        placement: Placement,
    ) -> Result<bool> {
        if descend(visitor, name, &mut *self.0, Placement::Inline)? {
            return Ok(true);
        }
        visitor.visit(name, self, placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrefError;
    use crate::value::Kind;

    #[test]
    fn integer_load_truncates() {
        let mut n: i32 = 0;
        assert!(n.load(Some(&Value::Number(7.9))).unwrap());
        assert_eq!(n, 7);
    }

    #[test]
    fn unsigned_load_saturates_negative() {
        let mut n: u8 = 5;
        n.load(Some(&Value::Number(-3.0))).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn absent_text_is_untouched() {
        let mut s = String::from("keep");
        assert!(!s.load(None).unwrap());
        assert_eq!(s, "keep");
    }

    #[test]
    fn bool_rejects_number() {
        let mut b = false;
        let err = b.load(Some(&Value::Number(1.0))).unwrap_err();
        assert!(matches!(
            err,
            PrefError::TypeMismatch {
                expected: Kind::Bool,
                found: Kind::Number
            }
        ));
    }
}
