//! Studio Shell - scaffold core.
//!
//! The framework-level pieces the application shell composes at startup: a
//! dependency-injected state [`store`], an enum-keyed path [`router`], and a
//! data-fetching [`query`] cache. Nothing in this crate touches a window or
//! the process environment; everything is an explicit value handed to its
//! consumers.

pub mod query;
pub mod router;
pub mod store;

pub use query::{CachePolicy, EntrySnapshot, QueryCache, QueryError, QueryKey};
pub use router::{ResolvedRoute, RouteId, RouteTable, Router, RouterContext, RouterError};
pub use store::{
    Action, Payload, Reducer, Store, StoreBuilder, StoreError, StoreState, SubscriptionId,
};
