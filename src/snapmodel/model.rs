//! # Model Proxy
//!
//! A [`Model`] is a lens onto one value in a [`Repository`]: it binds an id to
//! a shared store and lets callers read and write the value's attributes by
//! name. It never caches the value. Every read fetches a fresh snapshot, and
//! every write publishes a whole new snapshot.
//!
//! ## Write Protocol
//!
//! `set_attribute(name, raw)`:
//! 1. read the current value from the store
//! 2. resolve `name` against `T`'s attribute table
//! 3. duplicate it and set the attribute on the duplicate (see [`crate::mutator`])
//! 4. blind-overwrite the stored value with the duplicate
//!
//! Step 4 is not a compare-and-swap. Two proxies racing on the same id each
//! overwrite the whole value, and whichever commits last wins in full.
//!
//! ## Change Notification
//!
//! Subscribers are invoked synchronously, in subscription order, only when
//! [`Model::notify_changed`] is called. Writes do not notify on their own.
//! [`Model::dispose`] drops all subscribers but leaves the proxy usable.

use crate::attributes::{self, Shape};
use crate::config::ModelConfig;
use crate::error::{ModelError, Result};
use crate::mutator;
use crate::store::Repository;
use crate::value::{AttrConvert, AttrValue};
use log::{debug, trace};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

/// The coarse "something changed" signal handed to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Subscriber = Box<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Attribute-level view over the value stored under `id`.
pub struct Model<T, R> {
    id: Uuid,
    repository: Arc<R>,
    config: ModelConfig,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    _value: PhantomData<fn() -> T>,
}

impl<T: Shape, R: Repository<T>> Model<T, R> {
    pub fn new(id: Uuid, repository: Arc<R>) -> Self {
        Self::with_config(id, repository, ModelConfig::default())
    }

    pub fn with_config(id: Uuid, repository: Arc<R>, config: ModelConfig) -> Self {
        Self {
            id,
            repository,
            config,
            subscribers: Vec::new(),
            next_subscription: 0,
            _value: PhantomData,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Fetch the current value from the store.
    pub fn get_value(&self) -> Result<T> {
        self.repository.get(&self.id)
    }

    /// Replace the stored value, ignoring whatever is there now.
    pub fn set_value(&self, value: T) -> Result<()> {
        self.repository.update(&self.id, move |_previous| value)?;
        debug!(
            "event=value_replaced type={} id={}",
            T::type_name(),
            self.id
        );
        Ok(())
    }

    /// Duplicate of the current value. Mutating it never affects the store.
    ///
    /// The store already hands out an owned copy, so this is the fetch.
    pub fn clone_current_value(&self) -> Result<T> {
        self.get_value()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        attributes::has_attribute::<T>(name)
    }

    pub fn attribute_names(&self) -> Vec<&'static str> {
        attributes::attribute_names::<T>()
    }

    /// Read an attribute off the current value. The value is fetched before
    /// the name is resolved, so store failures win over unknown names.
    pub fn get_attribute(&self, name: &str) -> Result<AttrValue> {
        let current = self.get_value()?;
        let def = self.resolve(name)?;
        let value = def.get(&current);
        if self.config.trace_access {
            trace!(
                "event=attribute_read type={} id={} name={}",
                T::type_name(),
                self.id,
                name
            );
        }
        Ok(value)
    }

    pub fn set_attribute(&self, name: &str, value: AttrValue) -> Result<()> {
        let current = self.get_value()?;
        let def = self.resolve(name)?;
        let next = mutator::write(&current, def, value)?;
        self.set_value(next)?;
        debug!(
            "event=attribute_written type={} id={} name={} kind={:?}",
            T::type_name(),
            self.id,
            name,
            def.kind()
        );
        Ok(())
    }

    /// Typed read, converting through [`AttrConvert`].
    pub fn get<V: AttrConvert>(&self, name: &str) -> Result<V> {
        let raw = self.get_attribute(name)?;
        V::from_attr(raw).map_err(|found| ModelError::TypeMismatch {
            type_name: T::type_name(),
            name: name.to_string(),
            expected: V::TYPE,
            found,
        })
    }

    /// Typed write, converting through [`AttrConvert`].
    pub fn set<V: AttrConvert>(&self, name: &str, value: V) -> Result<()> {
        self.set_attribute(name, value.into_attr())
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(id, _)| *id != subscription);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Invoke every subscriber, in subscription order.
    pub fn notify_changed(&self) {
        debug!(
            "event=change_notified type={} id={} subscribers={}",
            T::type_name(),
            self.id,
            self.subscribers.len()
        );
        let event = ChangeEvent { id: self.id };
        for (_, subscriber) in &self.subscribers {
            subscriber(&event);
        }
    }

    /// Drop all subscribers. Reads and writes keep working afterwards.
    pub fn dispose(&mut self) {
        if !self.subscribers.is_empty() {
            debug!(
                "event=model_disposed type={} id={} subscribers={}",
                T::type_name(),
                self.id,
                self.subscribers.len()
            );
        }
        self.subscribers.clear();
    }

    fn resolve(&self, name: &str) -> Result<&'static attributes::AttributeDef<T>> {
        attributes::resolve::<T>(name).inspect_err(|_| {
            if self.config.trace_access {
                trace!(
                    "event=attribute_unresolved type={} id={} name={}",
                    T::type_name(),
                    self.id,
                    name
                );
            }
        })
    }
}

impl<T: Shape, R> fmt::Debug for Model<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("type", &T::type_name())
            .field("id", &self.id)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    crate::shape! {
        Point {
            property "X" => x: i64,
            property "Y" => y: i64,
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Ticket {
        title: String,
        number: u32,
        assignee: Option<Uuid>,
        labels: Vec<String>,
    }

    crate::shape! {
        Ticket {
            property "Title" => title: String,
            read_only "Number" => number: u32,
            field "Assignee" => assignee: Option<Uuid>,
            field "Labels" => labels: Vec<String>,
        }
    }

    fn point_model(x: i64, y: i64) -> Model<Point, InMemoryStore<Point>> {
        let fixture = StoreFixture::new().with_value(Point { x, y });
        Model::new(fixture.first_id(), fixture.store)
    }

    fn ticket_model() -> Model<Ticket, InMemoryStore<Ticket>> {
        let fixture = StoreFixture::new().with_value(Ticket {
            title: "Broken build".into(),
            number: 41,
            assignee: None,
            labels: vec![],
        });
        Model::new(fixture.first_id(), fixture.store)
    }

    #[test]
    fn set_attribute_then_get_value() {
        let model = point_model(1, 2);

        model.set_attribute("X", AttrValue::Int(5)).unwrap();

        assert_eq!(model.get_value().unwrap(), Point { x: 5, y: 2 });
        assert_eq!(model.get_attribute("Y").unwrap(), AttrValue::Int(2));
    }

    #[test]
    fn unknown_attribute_fails_both_ways() {
        let model = point_model(1, 2);

        assert!(!model.has_attribute("Z"));
        assert!(matches!(
            model.get_attribute("Z"),
            Err(ModelError::AttributeNotFound { .. })
        ));
        assert!(matches!(
            model.set_attribute("Z", AttrValue::Int(9)),
            Err(ModelError::AttributeNotFound { .. })
        ));
        assert_eq!(model.get_value().unwrap(), Point { x: 1, y: 2 });
    }

    #[test]
    fn write_does_not_touch_previously_read_value() {
        let model = point_model(1, 2);
        let old = model.get_value().unwrap();

        model.set_attribute("Y", AttrValue::Int(7)).unwrap();

        assert_eq!(old, Point { x: 1, y: 2 });
        assert_eq!(model.get_value().unwrap().y, 7);
    }

    #[test]
    fn clone_current_value_is_detached() {
        let model = point_model(1, 2);

        let mut clone = model.clone_current_value().unwrap();
        clone.x = 100;

        assert_eq!(model.get_value().unwrap(), Point { x: 1, y: 2 });
    }

    #[test]
    fn set_value_overwrites_whole_value() {
        let model = point_model(1, 2);
        model.set_value(Point { x: 8, y: 9 }).unwrap();
        assert_eq!(model.get_value().unwrap(), Point { x: 8, y: 9 });
    }

    #[test]
    fn read_only_attribute_written_through_backing_slot() {
        let model = ticket_model();

        model.set("Number", 42u32).unwrap();

        assert_eq!(model.get::<u32>("Number").unwrap(), 42);
    }

    #[test]
    fn typed_helpers_round_trip() {
        let model = ticket_model();
        let assignee = Uuid::new_v4();

        model.set("Title", "Flaky test".to_string()).unwrap();
        model.set("Assignee", Some(assignee)).unwrap();
        model
            .set("Labels", vec!["ci".to_string(), "urgent".to_string()])
            .unwrap();

        assert_eq!(model.get::<String>("Title").unwrap(), "Flaky test");
        assert_eq!(model.get::<Option<Uuid>>("Assignee").unwrap(), Some(assignee));
        assert_eq!(model.get::<Vec<String>>("Labels").unwrap().len(), 2);

        model.set_attribute("Assignee", AttrValue::Null).unwrap();
        assert_eq!(model.get::<Option<Uuid>>("Assignee").unwrap(), None);
    }

    #[test]
    fn typed_get_with_wrong_type_is_mismatch() {
        let model = ticket_model();
        let err = model.get::<bool>("Title").unwrap_err();
        assert!(matches!(err, ModelError::TypeMismatch { .. }));
    }

    #[test]
    fn mismatched_write_leaves_store_untouched() {
        let model = ticket_model();
        let before = model.get_value().unwrap();

        let err = model
            .set_attribute("Number", AttrValue::Text("forty".into()))
            .unwrap_err();

        assert!(matches!(err, ModelError::TypeMismatch { .. }));
        assert_eq!(model.get_value().unwrap(), before);
    }

    #[test]
    fn unknown_id_propagates_store_not_found() {
        let store = Arc::new(InMemoryStore::<Point>::new());
        let id = Uuid::new_v4();
        let model: Model<Point, _> = Model::new(id, store);

        assert!(matches!(model.get_value(), Err(ModelError::NotFound(missing)) if missing == id));
        assert!(matches!(
            model.set_attribute("X", AttrValue::Int(1)),
            Err(ModelError::NotFound(_))
        ));
        assert!(matches!(
            model.set_value(Point { x: 0, y: 0 }),
            Err(ModelError::NotFound(_))
        ));
    }

    #[test]
    fn store_lookup_runs_before_name_resolution() {
        let store = Arc::new(InMemoryStore::<Point>::new());
        let missing_id = Uuid::new_v4();
        let orphan: Model<Point, _> = Model::new(missing_id, store);

        assert!(matches!(
            orphan.get_attribute("Z"),
            Err(ModelError::NotFound(id)) if id == missing_id
        ));
        assert!(matches!(
            orphan.set_attribute("Z", AttrValue::Int(1)),
            Err(ModelError::NotFound(id)) if id == missing_id
        ));

        let model = point_model(1, 2);
        assert!(matches!(
            model.get_attribute("Z"),
            Err(ModelError::AttributeNotFound { .. })
        ));
    }

    #[test]
    fn attribute_names_in_declaration_order() {
        let model = ticket_model();
        assert_eq!(
            model.attribute_names(),
            vec!["Title", "Number", "Assignee", "Labels"]
        );
    }

    #[test]
    fn notify_invokes_subscribers_in_order() {
        let mut model = point_model(1, 2);
        let calls = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let calls = Arc::clone(&calls);
            model.subscribe(move |event: &ChangeEvent| {
                calls.lock().unwrap().push((tag, event.id));
            });
        }

        model.notify_changed();

        let calls = calls.lock().unwrap();
        let tags: Vec<_> = calls.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(tags, vec!["first", "second", "third"]);
        assert!(calls.iter().all(|(_, id)| *id == model.id()));
    }

    #[test]
    fn writes_do_not_notify() {
        let mut model = point_model(1, 2);
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        model.subscribe(move |_| *counter.lock().unwrap() += 1);

        model.set_attribute("X", AttrValue::Int(3)).unwrap();

        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn unsubscribe_removes_only_that_subscriber() {
        let mut model = point_model(1, 2);
        let calls = Arc::new(Mutex::new(Vec::new()));
        let a = Arc::clone(&calls);
        let b = Arc::clone(&calls);
        let first = model.subscribe(move |_| a.lock().unwrap().push("a"));
        model.subscribe(move |_| b.lock().unwrap().push("b"));

        assert!(model.unsubscribe(first));
        assert!(!model.unsubscribe(first));
        model.notify_changed();

        assert_eq!(*calls.lock().unwrap(), vec!["b"]);
    }

    #[test]
    fn dispose_silences_notifications_but_keeps_proxy_usable() {
        let mut model = point_model(1, 2);
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        model.subscribe(move |_| *counter.lock().unwrap() += 1);

        model.dispose();
        model.dispose();
        model.notify_changed();

        assert_eq!(*calls.lock().unwrap(), 0);
        assert_eq!(model.subscriber_count(), 0);

        model.set_attribute("X", AttrValue::Int(4)).unwrap();
        assert_eq!(model.get_attribute("X").unwrap(), AttrValue::Int(4));
    }

    #[test]
    fn trace_access_config_is_kept() {
        let fixture = StoreFixture::new().with_value(Point { x: 0, y: 0 });
        let model: Model<Point, _> = Model::with_config(
            fixture.first_id(),
            fixture.store,
            ModelConfig::default().with_trace_access(true),
        );

        assert!(model.config().trace_access);
        assert!(model.get_attribute("Missing").is_err());
        assert_eq!(model.get_attribute("X").unwrap(), AttrValue::Int(0));
    }
}
