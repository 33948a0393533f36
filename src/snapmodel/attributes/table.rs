//! Attribute definitions and the per-type capability table.
//!
//! A value type publishes its attributes as an [`AttributeTable`]: an ordered
//! list of [`AttributeDef`]s, each carrying a name, a declared type, and the
//! thunks that read or write it on an instance. The table is built once and
//! looked up by name afterwards.

use crate::value::{AttrConvert, AttrType, AttrValue};
use std::fmt;

pub type Getter<T> = Box<dyn Fn(&T) -> AttrValue + Send + Sync>;

/// Writes a raw value onto an instance; hands the value back if it does not
/// convert to the attribute's declared type.
pub type Setter<T> = Box<dyn Fn(&mut T, AttrValue) -> Result<(), AttrValue> + Send + Sync>;

/// How an attribute is exposed on the value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Public member with both read and write access
    Property,

    /// Readable at the public surface only.
    ///
    /// Copy-on-write still needs to set these, which goes through an
    /// internal backing setter if one was registered.
    ReadOnly,

    /// Plain data member
    Field,
}

/// Lookup order used by the resolver. First match wins.
pub const RESOLUTION_ORDER: [AttributeKind; 3] = [
    AttributeKind::Property,
    AttributeKind::ReadOnly,
    AttributeKind::Field,
];

/// How to write an attribute on a duplicate.
pub enum Binding<T> {
    Property(Setter<T>),
    ReadOnly { backing: Option<Setter<T>> },
    Field(Setter<T>),
}

impl<T> Binding<T> {
    pub fn kind(&self) -> AttributeKind {
        match self {
            Binding::Property(_) => AttributeKind::Property,
            Binding::ReadOnly { .. } => AttributeKind::ReadOnly,
            Binding::Field(_) => AttributeKind::Field,
        }
    }
}

/// A resolved attribute of value type `T`.
pub struct AttributeDef<T> {
    name: &'static str,
    attr_type: AttrType,
    getter: Getter<T>,
    binding: Binding<T>,
}

impl<T> AttributeDef<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn attr_type(&self) -> AttrType {
        self.attr_type
    }

    pub fn kind(&self) -> AttributeKind {
        self.binding.kind()
    }

    pub fn binding(&self) -> &Binding<T> {
        &self.binding
    }

    /// Whether the attribute can be written through the public surface.
    pub fn is_writable(&self) -> bool {
        !matches!(self.binding, Binding::ReadOnly { .. })
    }

    /// Read this attribute off an instance.
    pub fn get(&self, value: &T) -> AttrValue {
        (self.getter)(value)
    }
}

impl<T> fmt::Debug for AttributeDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeDef")
            .field("name", &self.name)
            .field("attr_type", &self.attr_type)
            .field("kind", &self.kind())
            .finish()
    }
}

/// Ordered attribute registry for one value type.
pub struct AttributeTable<T> {
    defs: Vec<AttributeDef<T>>,
}

impl<T: 'static> AttributeTable<T> {
    pub fn builder() -> AttributeTableBuilder<T> {
        AttributeTableBuilder { defs: Vec::new() }
    }
}

impl<T> AttributeTable<T> {
    /// Find the attribute named exactly `name`.
    ///
    /// Read/write properties are tried first, then read-only members, then
    /// plain fields. Matching is case-sensitive.
    pub fn lookup(&self, name: &str) -> Option<&AttributeDef<T>> {
        RESOLUTION_ORDER.iter().find_map(|kind| {
            self.defs
                .iter()
                .find(|def| def.kind() == *kind && def.name == name)
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Every resolvable name once, in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::with_capacity(self.defs.len());
        for def in &self.defs {
            if !names.contains(&def.name) {
                names.push(def.name);
            }
        }
        names
    }

    /// The resolved definition for each name, in declaration order.
    pub fn resolved(&self) -> impl Iterator<Item = &AttributeDef<T>> {
        self.names()
            .into_iter()
            .filter_map(move |name| self.lookup(name))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl<T> fmt::Debug for AttributeTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.defs).finish()
    }
}

pub struct AttributeTableBuilder<T> {
    defs: Vec<AttributeDef<T>>,
}

impl<T: 'static> AttributeTableBuilder<T> {
    /// Register a read/write member.
    pub fn property<V, G, S>(self, name: &'static str, get: G, set: S) -> Self
    where
        V: AttrConvert + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.push::<V>(name, getter(get), Binding::Property(setter(set)))
    }

    /// Register a member that is read-only publicly but has an internal
    /// backing setter used by copy-on-write.
    pub fn read_only<V, G, S>(self, name: &'static str, get: G, backing: S) -> Self
    where
        V: AttrConvert + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let binding = Binding::ReadOnly {
            backing: Some(setter(backing)),
        };
        self.push::<V>(name, getter(get), binding)
    }

    /// Register a read-only member with no backing slot. Writing it fails.
    pub fn computed<V, G>(self, name: &'static str, get: G) -> Self
    where
        V: AttrConvert + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.push::<V>(name, getter(get), Binding::ReadOnly { backing: None })
    }

    /// Register a plain data member.
    pub fn field<V, G, S>(self, name: &'static str, get: G, set: S) -> Self
    where
        V: AttrConvert + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.push::<V>(name, getter(get), Binding::Field(setter(set)))
    }

    pub fn build(self) -> AttributeTable<T> {
        AttributeTable { defs: self.defs }
    }

    fn push<V: AttrConvert>(
        mut self,
        name: &'static str,
        getter: Getter<T>,
        binding: Binding<T>,
    ) -> Self {
        self.defs.push(AttributeDef {
            name,
            attr_type: V::TYPE,
            getter,
            binding,
        });
        self
    }
}

fn getter<T, V, G>(get: G) -> Getter<T>
where
    T: 'static,
    V: AttrConvert + 'static,
    G: Fn(&T) -> V + Send + Sync + 'static,
{
    Box::new(move |value: &T| get(value).into_attr())
}

fn setter<T, V, S>(set: S) -> Setter<T>
where
    T: 'static,
    V: AttrConvert + 'static,
    S: Fn(&mut T, V) + Send + Sync + 'static,
{
    Box::new(move |value: &mut T, raw: AttrValue| {
        let typed = V::from_attr(raw)?;
        set(value, typed);
        Ok(())
    })
}
