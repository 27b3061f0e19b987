//! Application state store.
//!
//! A slice-based state container: the overall state is a mapping from slice
//! name to slice state, each slice owned by a pure reducer declared at
//! construction. Mutation goes through [`Store::dispatch`] and nowhere else;
//! reads go through snapshots and selectors. The store is built once at
//! startup and passed to consumers through the router context, never held
//! as a global.

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// State of a single named slice.
pub type SliceState = Value;

/// Snapshot of the whole store: slice name to slice state.
///
/// The shape of this map is exactly the union of registered slices.
pub type StoreState = BTreeMap<String, SliceState>;

/// Pure transition function for one slice.
///
/// Receives the slice's current state and the dispatched action, returns the
/// next state. Reducers for other slices never see this slice's state.
pub type Reducer = fn(&SliceState, &Action) -> SliceState;

/// Change listener invoked after every dispatch with the new snapshot.
type Listener = Box<dyn FnMut(&StoreState)>;

/// Errors from store construction and typed reads.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The same slice name was registered twice.
    #[error("duplicate slice: {name}")]
    DuplicateSlice { name: String },

    /// Typed read of a slice that is not registered.
    #[error("no such slice: {name}")]
    SliceNotFound { name: String },

    /// Slice state did not deserialize into the requested type.
    #[error("slice {name} has unexpected shape")]
    Deserialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Payload carried by an [`Action`].
pub enum Payload {
    Empty,
    /// Serializable data; always passes the serializability check.
    Json(Value),
    /// Arbitrary in-process data. Dispatching this logs a warning unless
    /// the action kind is in the store's ignore list.
    Opaque(Box<dyn Any + Send>),
}

/// A dispatched event: a kind string plus an optional payload.
pub struct Action {
    kind: String,
    payload: Payload,
}

impl Action {
    /// Action with no payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Payload::Empty,
        }
    }

    /// Action carrying a serializable payload.
    pub fn json(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload: Payload::Json(payload),
        }
    }

    /// Action carrying opaque in-process data.
    pub fn opaque(kind: impl Into<String>, payload: Box<dyn Any + Send>) -> Self {
        Self {
            kind: kind.into(),
            payload: Payload::Opaque(payload),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Construction-time configuration for a [`Store`].
#[derive(Default)]
pub struct StoreBuilder {
    slices: Vec<(String, SliceState, Reducer)>,
    ignored_kinds: BTreeSet<String>,
}

impl StoreBuilder {
    /// Register a named slice with its initial state and reducer.
    pub fn slice(mut self, name: impl Into<String>, initial: SliceState, reducer: Reducer) -> Self {
        self.slices.push((name.into(), initial, reducer));
        self
    }

    /// Skip the serializability check for the given action kinds.
    ///
    /// Used for persistence-handshake actions whose payloads are never
    /// meant to be serialized.
    pub fn ignore_serializability<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_kinds.extend(kinds.into_iter().map(Into::into));
        self
    }

    /// Build the store. Fails if a slice name was registered twice.
    pub fn build(self) -> Result<Store, StoreError> {
        let mut state = StoreState::new();
        let mut reducers = Vec::with_capacity(self.slices.len());
        for (name, initial, reducer) in self.slices {
            if state.contains_key(&name) {
                return Err(StoreError::DuplicateSlice { name });
            }
            state.insert(name.clone(), initial);
            reducers.push((name, reducer));
        }
        Ok(Store {
            state,
            reducers,
            ignored_kinds: self.ignored_kinds,
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }
}

/// Centralized application state container.
pub struct Store {
    state: StoreState,
    reducers: Vec<(String, Reducer)>,
    ignored_kinds: BTreeSet<String>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("ignored_kinds", &self.ignored_kinds)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Current state snapshot. Empty when no slices are registered.
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// State of one slice, if registered.
    pub fn select(&self, name: &str) -> Option<&SliceState> {
        self.state.get(name)
    }

    /// Typed read of one slice.
    pub fn select_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, StoreError> {
        let value = self.select(name).ok_or_else(|| StoreError::SliceNotFound {
            name: name.to_string(),
        })?;
        serde_json::from_value(value.clone()).map_err(|source| StoreError::Deserialize {
            name: name.to_string(),
            source,
        })
    }

    /// Apply `action` to every slice and notify subscribers.
    ///
    /// Synchronous: by the time this returns, the snapshot is updated and
    /// every current subscriber has been called, in registration order.
    /// With no slices registered the state shape is unchanged.
    #[allow(clippy::needless_pass_by_value)]
    pub fn dispatch(&mut self, action: Action) {
        self.check_serializable(&action);
        for (name, reduce) in &self.reducers {
            if let Some(slot) = self.state.get_mut(name) {
                let next = reduce(slot, &action);
                *slot = next;
            }
        }
        tracing::trace!(kind = action.kind(), "dispatched");
        let snapshot = self.state.clone();
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }

    /// Register a change listener. Listeners run after every dispatch, in
    /// registration order.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn check_serializable(&self, action: &Action) {
        if matches!(action.payload, Payload::Opaque(_)) && !self.ignored_kinds.contains(action.kind())
        {
            tracing::warn!(
                kind = action.kind(),
                "action carries a non-serializable payload outside the ignore list"
            );
        }
    }
}
