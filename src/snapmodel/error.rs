use crate::value::{AttrType, AttrValue};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Attribute not found: {type_name}.{name}")]
    AttributeNotFound {
        type_name: &'static str,
        name: String,
    },

    #[error("No backing slot for read-only attribute: {type_name}.{name}")]
    BackingSlotNotFound {
        type_name: &'static str,
        name: String,
    },

    #[error("Value not found: {0}")]
    NotFound(Uuid),

    #[error("Type mismatch for {type_name}.{name}: expected {expected}, found {found:?}")]
    TypeMismatch {
        type_name: &'static str,
        name: String,
        expected: AttrType,
        found: AttrValue,
    },

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
