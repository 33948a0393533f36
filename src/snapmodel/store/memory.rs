use super::Repository;
use crate::error::{ModelError, Result};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

/// In-memory storage for testing and embedding.
/// Does NOT persist data.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    values: RwLock<HashMap<Uuid, T>>,
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values. A poisoned lock still reports what it holds.
    pub fn len(&self) -> usize {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn remove(&self, id: &Uuid) -> Result<T> {
        self.values
            .write()
            .map_err(poisoned)?
            .remove(id)
            .ok_or(ModelError::NotFound(*id))
    }
}

fn poisoned<G>(_: PoisonError<G>) -> ModelError {
    ModelError::Store("store lock poisoned".to_string())
}

impl<T: Clone> Repository<T> for InMemoryStore<T> {
    fn get(&self, id: &Uuid) -> Result<T> {
        self.values
            .read()
            .map_err(poisoned)?
            .get(id)
            .cloned()
            .ok_or(ModelError::NotFound(*id))
    }

    fn update<F>(&self, id: &Uuid, transform: F) -> Result<()>
    where
        F: FnOnce(T) -> T,
    {
        let mut values = self.values.write().map_err(poisoned)?;
        let slot = values.get_mut(id).ok_or(ModelError::NotFound(*id))?;
        *slot = transform(slot.clone());
        Ok(())
    }

    fn insert(&self, id: Uuid, value: T) -> Result<()> {
        self.values.write().map_err(poisoned)?.insert(id, value);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use std::sync::Arc;

    pub struct StoreFixture<T> {
        pub store: Arc<InMemoryStore<T>>,
        pub ids: Vec<Uuid>,
    }

    impl<T: Clone> Default for StoreFixture<T> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<T: Clone> StoreFixture<T> {
        pub fn new() -> Self {
            Self {
                store: Arc::new(InMemoryStore::new()),
                ids: Vec::new(),
            }
        }

        /// Seed a value under a fresh id.
        pub fn with_value(mut self, value: T) -> Self {
            let id = Uuid::new_v4();
            self.store.insert(id, value).unwrap();
            self.ids.push(id);
            self
        }

        pub fn first_id(&self) -> Uuid {
            self.ids[0]
        }
    }
}
