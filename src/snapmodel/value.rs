//! Attribute value types.
//!
//! Attributes are read and written through a single dynamic representation,
//! [`AttrValue`], so callers can address any attribute by name without knowing
//! its Rust type. Each attribute also declares an [`AttrType`], which is what a
//! descriptor consumer sees and what incoming raw values are checked against.
//!
//! The [`AttrConvert`] trait bridges typed struct fields and the dynamic
//! representation. It is implemented for the scalar types value types usually
//! carry, plus `Option<V>` (mapped to and from [`AttrValue::Null`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Declared type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttrType {
    Bool,
    Int,
    Float,
    Text,
    Timestamp,
    Id,
    List,
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttrType::Bool => "bool",
            AttrType::Int => "int",
            AttrType::Float => "float",
            AttrType::Text => "text",
            AttrType::Timestamp => "timestamp",
            AttrType::Id => "id",
            AttrType::List => "list",
        };
        f.write_str(name)
    }
}

/// Runtime representation of an attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    /// Absent value of an optional attribute
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Id(Uuid),
    List(Vec<String>),
}

impl AttrValue {
    /// The declared type this value belongs to, or `None` for `Null`.
    pub fn attr_type(&self) -> Option<AttrType> {
        match self {
            AttrValue::Null => None,
            AttrValue::Bool(_) => Some(AttrType::Bool),
            AttrValue::Int(_) => Some(AttrType::Int),
            AttrValue::Float(_) => Some(AttrType::Float),
            AttrValue::Text(_) => Some(AttrType::Text),
            AttrValue::Timestamp(_) => Some(AttrType::Timestamp),
            AttrValue::Id(_) => Some(AttrType::Id),
            AttrValue::List(_) => Some(AttrType::List),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::List(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => f.write_str("null"),
            AttrValue::Bool(v) => write!(f, "{}", v),
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Float(v) => write!(f, "{}", v),
            AttrValue::Text(v) => f.write_str(v),
            AttrValue::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            AttrValue::Id(v) => write!(f, "{}", v),
            AttrValue::List(v) => write!(f, "[{}]", v.join(", ")),
        }
    }
}

/// Conversion between a typed field and [`AttrValue`].
///
/// `from_attr` hands the rejected value back on mismatch so the caller can
/// report what it actually received.
pub trait AttrConvert: Sized {
    const TYPE: AttrType;

    fn into_attr(self) -> AttrValue;

    fn from_attr(value: AttrValue) -> Result<Self, AttrValue>;
}

macro_rules! direct_convert {
    ($ty:ty, $variant:ident, $attr_type:ident) => {
        impl AttrConvert for $ty {
            const TYPE: AttrType = AttrType::$attr_type;

            fn into_attr(self) -> AttrValue {
                AttrValue::$variant(self)
            }

            fn from_attr(value: AttrValue) -> Result<Self, AttrValue> {
                match value {
                    AttrValue::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }
        }
    };
}

direct_convert!(bool, Bool, Bool);
direct_convert!(i64, Int, Int);
direct_convert!(f64, Float, Float);
direct_convert!(String, Text, Text);
direct_convert!(DateTime<Utc>, Timestamp, Timestamp);
direct_convert!(Uuid, Id, Id);
direct_convert!(Vec<String>, List, List);

macro_rules! narrow_int_convert {
    ($ty:ty) => {
        impl AttrConvert for $ty {
            const TYPE: AttrType = AttrType::Int;

            fn into_attr(self) -> AttrValue {
                AttrValue::Int(i64::from(self))
            }

            fn from_attr(value: AttrValue) -> Result<Self, AttrValue> {
                match value {
                    AttrValue::Int(v) => <$ty>::try_from(v).map_err(|_| AttrValue::Int(v)),
                    other => Err(other),
                }
            }
        }
    };
}

narrow_int_convert!(i32);
narrow_int_convert!(u32);

impl<V: AttrConvert> AttrConvert for Option<V> {
    const TYPE: AttrType = V::TYPE;

    fn into_attr(self) -> AttrValue {
        match self {
            Some(v) => v.into_attr(),
            None => AttrValue::Null,
        }
    }

    fn from_attr(value: AttrValue) -> Result<Self, AttrValue> {
        match value {
            AttrValue::Null => Ok(None),
            other => V::from_attr(other).map(Some),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(i64::from(v))
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl From<Uuid> for AttrValue {
    fn from(v: Uuid) -> Self {
        AttrValue::Id(v)
    }
}
