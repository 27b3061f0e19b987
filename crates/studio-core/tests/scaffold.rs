//! End-to-end composition of the scaffold pieces in application startup
//! order: query cache, then store, then the router with both as its context.

use serde_json::json;
use studio_core::{
    Action, CachePolicy, QueryCache, QueryKey, RouteId, Router, RouterContext, RouterError,
    StoreBuilder,
};

fn compose() -> Router {
    let queries = QueryCache::new(CachePolicy::default());
    let store = StoreBuilder::default()
        .ignore_serializability(["persist/PERSIST", "persist/REHYDRATE"])
        .build()
        .expect("empty store builds");
    Router::new(RouterContext::new(store, queries)).expect("route table compiles")
}

#[test]
fn startup_composition_resolves_the_root_path() {
    let router = compose();

    let resolved = router.resolve("/").expect("root path registered");
    assert_eq!(resolved.id, RouteId::Home);
    assert!(resolved.params.is_empty());

    assert!(router.context().store.borrow().state().is_empty());
    assert!(router.context().queries.borrow().is_empty());
}

#[test]
fn any_other_path_is_a_defined_not_found() {
    let router = compose();
    let err = router.resolve("/settings").unwrap_err();
    assert!(matches!(err, RouterError::NotFound { path } if path == "/settings"));
}

#[test]
fn context_clones_share_the_same_store() {
    let router = compose();
    let context = router.context().clone();

    context.store.borrow_mut().dispatch(Action::new("noop"));

    // Same instance behind both handles, and the shape is still empty
    // because no slice is registered.
    assert!(router.context().store.borrow().state().is_empty());
    assert!(std::rc::Rc::ptr_eq(&context.store, &router.context().store));
}

#[test]
fn context_clones_share_the_same_cache() {
    let router = compose();
    let context = router.context().clone();

    context
        .queries
        .borrow_mut()
        .get_or_fetch(QueryKey::new(["greeting"]), || Ok(json!("hello")))
        .expect("fetch succeeds");

    assert_eq!(router.context().queries.borrow().len(), 1);
}
