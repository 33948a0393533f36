//! # Dynamic Dispatch
//!
//! [`DynamicObject`] lets code with no static knowledge of a value type treat
//! a [`Model`] like a plain instance and read or write members by name. Every
//! [`Shape`] gets it. [`DynamicInvoke`] adds the three identity methods for
//! value types that implement `Display`, `PartialEq` and `Hash`.
//!
//! ## Member Access
//!
//! The `try_*` primitives mirror an "unresolved member" hook: a name that
//! the value type does not declare is reported as `Ok(None)` / `Ok(false)`,
//! never as `AttributeNotFound`. The provided `get_member`, `set_member` and
//! `DynamicInvoke::invoke_member` turn that into `ModelError::MemberNotFound`, which is how a
//! host surfaces "no such member". The static API on `Model` keeps reporting
//! `AttributeNotFound` for the same condition.
//!
//! ## Invocations
//!
//! | Name | Args | Result |
//! |------|------|--------|
//! | `to_string` | 0 | `Display` of the current value |
//! | `eq` | 1 | current value equals the argument (false if it is not a `T`) |
//! | `hash` | 0 | `Hash` of the current value |
//!
//! All three act on the current stored value, not on the proxy. Only
//! attribute names of the value type are reachable; the proxy's id and store
//! are not.

use crate::attributes::Shape;
use crate::error::{ModelError, Result};
use crate::model::Model;
use crate::store::Repository;
use crate::value::AttrValue;
use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

pub const TO_STRING: &str = "to_string";
pub const EQ: &str = "eq";
pub const HASH: &str = "hash";

/// Outcome of a resolved invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeResult {
    Text(String),
    Bool(bool),
    Hash(u64),
}

/// Member access by name. Available for every [`Shape`].
pub trait DynamicObject {
    /// Read a member. `Ok(None)` when the name is not a member.
    fn try_get_member(&self, name: &str) -> Result<Option<AttrValue>>;

    /// Write a member. `Ok(false)` when the name is not a member.
    fn try_set_member(&self, name: &str, value: AttrValue) -> Result<bool>;

    fn get_member(&self, name: &str) -> Result<AttrValue> {
        self.try_get_member(name)?
            .ok_or_else(|| ModelError::MemberNotFound(name.to_string()))
    }

    fn set_member(&self, name: &str, value: AttrValue) -> Result<()> {
        if self.try_set_member(name, value)? {
            Ok(())
        } else {
            Err(ModelError::MemberNotFound(name.to_string()))
        }
    }
}

/// The identity invocations. Only value types that can display, compare and
/// hash themselves answer to them.
pub trait DynamicInvoke {
    /// Call a method. `Ok(None)` when no method matches name and arity.
    fn try_invoke_member(&self, name: &str, args: &[&dyn Any]) -> Result<Option<InvokeResult>>;

    fn invoke_member(&self, name: &str, args: &[&dyn Any]) -> Result<InvokeResult> {
        self.try_invoke_member(name, args)?
            .ok_or_else(|| ModelError::MemberNotFound(name.to_string()))
    }
}

/// Hash a value with the std hasher, as `hash` invocations do.
pub fn hash_value<V: Hash + ?Sized>(value: &V) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

impl<T: Shape, R: Repository<T>> DynamicObject for Model<T, R> {
    fn try_get_member(&self, name: &str) -> Result<Option<AttrValue>> {
        if !self.has_attribute(name) {
            return Ok(None);
        }
        self.get_attribute(name).map(Some)
    }

    fn try_set_member(&self, name: &str, value: AttrValue) -> Result<bool> {
        if !self.has_attribute(name) {
            return Ok(false);
        }
        self.set_attribute(name, value)?;
        Ok(true)
    }
}

impl<T, R> DynamicInvoke for Model<T, R>
where
    T: Shape + fmt::Display + PartialEq + Hash,
    R: Repository<T>,
{
    fn try_invoke_member(&self, name: &str, args: &[&dyn Any]) -> Result<Option<InvokeResult>> {
        let result = match (name, args) {
            (TO_STRING, []) => InvokeResult::Text(self.get_value()?.to_string()),
            (EQ, [other]) => {
                let current = self.get_value()?;
                let equal = other
                    .downcast_ref::<T>()
                    .is_some_and(|other| *other == current);
                InvokeResult::Bool(equal)
            }
            (HASH, []) => InvokeResult::Hash(hash_value(&self.get_value()?)),
            _ => return Ok(None),
        };
        Ok(Some(result))
    }
}
