//! Name resolution against a value type's declared shape.

use super::{AttributeDef, Shape};
use crate::error::{ModelError, Result};

/// Resolve `name` on `T`, failing with `AttributeNotFound`.
pub fn resolve<T: Shape>(name: &str) -> Result<&'static AttributeDef<T>> {
    T::attributes()
        .lookup(name)
        .ok_or_else(|| ModelError::AttributeNotFound {
            type_name: T::type_name(),
            name: name.to_string(),
        })
}

/// Side-effect-free existence check using the same order as [`resolve`].
pub fn has_attribute<T: Shape>(name: &str) -> bool {
    T::attributes().contains(name)
}

/// All resolvable attribute names of `T`, in declaration order.
pub fn attribute_names<T: Shape>() -> Vec<&'static str> {
    T::attributes().names()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeKind;

    #[derive(Debug, Clone)]
    struct Gauge {
        level: i64,
    }

    crate::shape! {
        Gauge {
            property "Level" => level: i64,
        }
    }

    #[test]
    fn resolves_declared_name() {
        let def = resolve::<Gauge>("Level").unwrap();
        assert_eq!(def.name(), "Level");
        assert_eq!(def.kind(), AttributeKind::Property);
        assert_eq!(def.get(&Gauge { level: 4 }).as_int(), Some(4));
    }

    #[test]
    fn unknown_name_is_attribute_not_found() {
        let err = resolve::<Gauge>("Pressure").unwrap_err();
        match err {
            ModelError::AttributeNotFound { type_name, name } => {
                assert_eq!(type_name, "Gauge");
                assert_eq!(name, "Pressure");
            }
            other => panic!("Expected AttributeNotFound, got {other:?}"),
        }
    }

    #[test]
    fn has_attribute_agrees_with_resolve() {
        for name in ["Level", "level", "Pressure", ""] {
            assert_eq!(has_attribute::<Gauge>(name), resolve::<Gauge>(name).is_ok());
        }
        assert_eq!(attribute_names::<Gauge>(), vec!["Level"]);
    }
}
