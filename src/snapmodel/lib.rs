//! # Snapmodel Architecture
//!
//! Snapmodel gives a **dynamic, mutable view** over an immutable value held in
//! an external keyed store. Callers read and write attributes by string name,
//! and every write publishes a brand new snapshot instead of mutating the old
//! one.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Surfaces (dynamic.rs, descriptor.rs)                       │
//! │  - DynamicObject: member get/set by name                    │
//! │  - DynamicInvoke: to_string / eq / hash by name             │
//! │  - Component + PropertyDescriptor: property-sheet view      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model Proxy (model.rs)                                     │
//! │  - Binds an id to a shared store; never caches the value    │
//! │  - get/set attributes, subscribers, manual notification     │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                         │
//!                    ▼                         ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Attributes (attributes/)     │ │  Copy-on-Write (mutator)  │
//! │  - Per-type capability table  │ │  - clone, set, return     │
//! │  - Name resolution            │ │                           │
//! └───────────────────────────────┘ └───────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Boundary (store/)                                  │
//! │  - Repository trait: get(id), update(id, transform)         │
//! │  - InMemoryStore                                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! Nothing here blocks or schedules. Writes are blind overwrites through
//! `Repository::update`, so two read-modify-write sequences on the same id
//! race and the last committed write wins in full. The store is responsible
//! for making each single `update` call atomic.
//!
//! ## Module Overview
//!
//! - [`attributes`]: `Shape` trait, attribute tables, resolver, `shape!` macro
//! - [`mutator`]: copy-on-write attribute writes
//! - [`model`]: the `Model` proxy
//! - [`dynamic`]: dynamic dispatch surface
//! - [`descriptor`]: descriptor surface for property-sheet consumers
//! - [`store`]: storage boundary and in-memory implementation
//! - [`value`]: dynamic attribute values and declared types
//! - [`config`]: per-proxy configuration
//! - [`error`]: error types

pub mod attributes;
pub mod config;
pub mod descriptor;
pub mod dynamic;
pub mod error;
pub mod model;
pub mod mutator;
pub mod store;
pub mod value;

#[doc(hidden)]
pub use once_cell;

pub use attributes::Shape;
pub use config::ModelConfig;
pub use descriptor::{describe, Component, PropertyDescriptor};
pub use dynamic::{DynamicInvoke, DynamicObject, InvokeResult};
pub use error::{ModelError, Result};
pub use model::{ChangeEvent, Model, SubscriptionId};
pub use store::memory::InMemoryStore;
pub use store::Repository;
pub use value::{AttrConvert, AttrType, AttrValue};
