//! # Attribute System
//!
//! Value types do not get introspected at runtime. Instead each one publishes
//! an explicit capability table, built once, that maps attribute names to
//! typed get/set thunks. Everything that works "by name" (the model proxy,
//! dynamic dispatch, descriptors) goes through that table.
//!
//! ## Attribute Kinds
//!
//! | Kind | Read | Write during copy-on-write |
//! |------|------|----------------------------|
//! | `Property` | public getter | public setter |
//! | `ReadOnly` | public getter | internal backing setter, if registered |
//! | `Field` | direct | direct |
//!
//! Resolution tries the kinds in that order and the first exact match wins.
//!
//! ## Declaring a Shape
//!
//! ```ignore
//! #[derive(Debug, Clone)]
//! pub struct Point { x: i64, y: i64 }
//!
//! snapmodel::shape! {
//!     Point {
//!         property "X" => x: i64,
//!         field "Y" => y: i64,
//!     }
//! }
//! ```
//!
//! Tables needing computed members can implement [`Shape`] by hand using
//! [`AttributeTable::builder`] and a `once_cell::sync::Lazy` static.

mod resolve;
mod table;

pub use resolve::{attribute_names, has_attribute, resolve};
pub use table::{
    AttributeDef, AttributeKind, AttributeTable, AttributeTableBuilder, Binding, Getter, Setter,
    RESOLUTION_ORDER,
};

/// A value type addressable by attribute name.
///
/// `Clone` is the duplication capability used by copy-on-write. It must be a
/// shallow field-for-field copy, which is what `#[derive(Clone)]` gives.
pub trait Shape: Clone + Send + Sync + 'static {
    /// The type's attribute table, built once.
    fn attributes() -> &'static AttributeTable<Self>;

    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Implement [`Shape`] for a struct from a list of attribute declarations.
///
/// Each line is `kind "Name" => field: Type` where `kind` is `property`,
/// `read_only` or `field`. For `read_only`, the struct field doubles as the
/// backing slot.
#[macro_export]
macro_rules! shape {
    ($ty:ident { $($kind:ident $name:literal => $field:ident : $fty:ty),* $(,)? }) => {
        impl $crate::attributes::Shape for $ty {
            fn attributes() -> &'static $crate::attributes::AttributeTable<Self> {
                static TABLE: $crate::once_cell::sync::Lazy<$crate::attributes::AttributeTable<$ty>> =
                    $crate::once_cell::sync::Lazy::new(|| {
                        $crate::attributes::AttributeTable::builder()
                            $(
                                .$kind(
                                    $name,
                                    |value: &$ty| -> $fty { value.$field.clone() },
                                    |value: &mut $ty, raw: $fty| value.$field = raw,
                                )
                            )*
                            .build()
                    });
                &TABLE
            }

            fn type_name() -> &'static str {
                stringify!($ty)
            }
        }
    };
}
