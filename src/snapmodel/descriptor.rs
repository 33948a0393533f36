//! # Property Descriptors
//!
//! Generic "property sheet" consumers want a uniform list of named, typed,
//! gettable/settable members for any object. [`Component`] is that
//! type-agnostic, object-safe surface, and [`PropertyDescriptor`] is one entry
//! of the list.
//!
//! A descriptor holds no reference to a particular instance. Its
//! `get_value` / `set_value` call back into whichever component they are
//! handed, so one descriptor list serves every proxy of the same value type.
//! Descriptors come out in the type's declaration order, unfiltered.

use crate::attributes::{AttributeDef, Shape};
use crate::error::Result;
use crate::model::Model;
use crate::store::Repository;
use crate::value::{AttrType, AttrValue};

/// An object a descriptor consumer can enumerate and edit.
pub trait Component {
    fn component_type(&self) -> &'static str;

    fn get_attribute(&self, name: &str) -> Result<AttrValue>;

    fn set_attribute(&self, name: &str, value: AttrValue) -> Result<()>;

    fn properties(&self) -> Vec<PropertyDescriptor>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    name: &'static str,
    attr_type: AttrType,
    writable: bool,
    component_type: &'static str,
}

impl PropertyDescriptor {
    fn from_def<T: Shape>(def: &AttributeDef<T>) -> Self {
        Self {
            name: def.name(),
            attr_type: def.attr_type(),
            writable: def.is_writable(),
            component_type: T::type_name(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn attr_type(&self) -> AttrType {
        self.attr_type
    }

    pub fn is_read_only(&self) -> bool {
        !self.writable
    }

    pub fn component_type(&self) -> &'static str {
        self.component_type
    }

    pub fn get_value(&self, component: &dyn Component) -> Result<AttrValue> {
        component.get_attribute(self.name)
    }

    pub fn set_value(&self, component: &dyn Component, value: AttrValue) -> Result<()> {
        component.set_attribute(self.name, value)
    }
}

/// Descriptors for every resolvable attribute of `T`, in declaration order.
pub fn describe<T: Shape>() -> Vec<PropertyDescriptor> {
    T::attributes()
        .resolved()
        .map(PropertyDescriptor::from_def)
        .collect()
}

impl<T: Shape, R: Repository<T>> Component for Model<T, R> {
    fn component_type(&self) -> &'static str {
        T::type_name()
    }

    fn get_attribute(&self, name: &str) -> Result<AttrValue> {
        Model::get_attribute(self, name)
    }

    fn set_attribute(&self, name: &str, value: AttrValue) -> Result<()> {
        Model::set_attribute(self, name, value)
    }

    fn properties(&self) -> Vec<PropertyDescriptor> {
        describe::<T>()
    }
}
