//! # Copy-on-Write Mutation
//!
//! Values held in a store are never modified in place. To change one attribute
//! we duplicate the value (shallow, via `Clone`), set the attribute on the
//! duplicate, and hand the duplicate back. The caller is responsible for
//! publishing it to the store.
//!
//! Read-only attributes are written through their backing setter. If the
//! table registered none, the write fails with `BackingSlotNotFound`.

use crate::attributes::{AttributeDef, Binding, Shape};
use crate::error::{ModelError, Result};
use crate::value::AttrValue;

/// Produce a copy of `value` with the attribute described by `def` set to `raw`.
///
/// `value` itself is left untouched whether or not the write succeeds.
pub fn write<T: Shape>(value: &T, def: &AttributeDef<T>, raw: AttrValue) -> Result<T> {
    let mut next = value.clone();

    let applied = match def.binding() {
        Binding::Property(set) => set(&mut next, raw),
        Binding::ReadOnly {
            backing: Some(set),
        } => set(&mut next, raw),
        Binding::ReadOnly { backing: None } => {
            return Err(ModelError::BackingSlotNotFound {
                type_name: T::type_name(),
                name: def.name().to_string(),
            });
        }
        Binding::Field(set) => set(&mut next, raw),
    };

    applied.map_err(|found| ModelError::TypeMismatch {
        type_name: T::type_name(),
        name: def.name().to_string(),
        expected: def.attr_type(),
        found,
    })?;

    Ok(next)
}
