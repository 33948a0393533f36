//! # Storage Boundary
//!
//! The keyed store is an external collaborator. A [`Repository`] holds
//! immutable snapshots of a value type addressed by [`Uuid`], and exposes two
//! operations the model proxy relies on:
//!
//! - `get(id)`: an owned snapshot of the currently stored value
//! - `update(id, transform)`: apply `transform` to whatever is currently
//!   stored and commit its result, atomically with respect to other calls
//!   on the same id
//!
//! Both fail with `ModelError::NotFound` when the id is unknown.
//!
//! The proxy always calls `update` with a transform that ignores its input,
//! so concurrent writers race and the last committed write wins.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: lock-guarded map, for tests and embedding

use crate::error::Result;
use uuid::Uuid;

pub mod memory;

/// Abstract interface for the keyed value store.
///
/// Methods take `&self` so one store can be shared (typically behind an
/// `Arc`) by many model proxies.
pub trait Repository<T> {
    /// Get the value stored under `id`
    fn get(&self, id: &Uuid) -> Result<T>;

    /// Replace the value under `id` with `transform(current)`
    fn update<F>(&self, id: &Uuid, transform: F) -> Result<()>
    where
        F: FnOnce(T) -> T;

    /// Store `value` under `id`, replacing any previous value
    fn insert(&self, id: Uuid, value: T) -> Result<()>;
}
