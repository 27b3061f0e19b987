//! Path router.
//!
//! Routes are an enum-keyed table compiled and validated when the router is
//! built, not a generated file: adding a screen means adding a [`RouteId`]
//! variant and its pattern. Resolution is purely a function of the path.
//! The [`RouterContext`] bundle (store plus query cache) is constructed once
//! and handed to every consumer unchanged.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;

use crate::query::QueryCache;
use crate::store::Store;

/// Every registered route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteId {
    /// The welcome screen at `/`.
    Home,
}

impl RouteId {
    /// All registered routes, in declaration order.
    pub const ALL: &'static [RouteId] = &[RouteId::Home];

    /// Path pattern for this route: literal segments plus `:name`
    /// parameter segments.
    pub fn pattern(self) -> &'static str {
        match self {
            RouteId::Home => "/",
        }
    }
}

/// Errors from route-table construction and resolution.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The path does not match any registered route.
    #[error("no route matches {path}")]
    NotFound { path: String },

    /// A pattern failed to compile.
    #[error("invalid route pattern {pattern}: {reason}")]
    InvalidPattern {
        pattern: &'static str,
        reason: &'static str,
    },

    /// Two routes would match the same paths.
    #[error("duplicate route pattern {pattern}")]
    DuplicatePattern { pattern: &'static str },
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug)]
struct CompiledRoute {
    id: RouteId,
    pattern: &'static str,
    segments: Vec<Segment>,
}

/// A successfully resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub id: RouteId,
    /// Captured `:name` segments, keyed by parameter name.
    pub params: BTreeMap<String, String>,
}

/// The compiled route tree. Valid by construction: every pattern parsed and
/// no two patterns overlap.
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Compile the table from [`RouteId::ALL`].
    pub fn new() -> Result<Self, RouterError> {
        let mut routes: Vec<CompiledRoute> = Vec::with_capacity(RouteId::ALL.len());
        for &id in RouteId::ALL {
            let pattern = id.pattern();
            let segments = parse_pattern(pattern)?;
            if routes.iter().any(|r| conflicts(&r.segments, &segments)) {
                return Err(RouterError::DuplicatePattern { pattern });
            }
            routes.push(CompiledRoute {
                id,
                pattern,
                segments,
            });
        }
        Ok(Self { routes })
    }

    /// Resolve a concrete path to exactly one route.
    ///
    /// A trailing slash is ignored. When several routes match, the most
    /// specific wins: most literal segments first, fewest parameters second.
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute, RouterError> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let mut best: Option<(usize, ResolvedRoute)> = None;
        for route in &self.routes {
            if route.segments.len() != parts.len() {
                continue;
            }
            let mut params = BTreeMap::new();
            let mut literals = 0usize;
            let mut matched = true;
            for (segment, part) in route.segments.iter().zip(&parts) {
                match segment {
                    Segment::Literal(lit) => {
                        if lit == part {
                            literals += 1;
                        } else {
                            matched = false;
                            break;
                        }
                    }
                    Segment::Param(name) => {
                        params.insert(name.clone(), (*part).to_string());
                    }
                }
            }
            if !matched {
                continue;
            }
            let resolved = ResolvedRoute {
                id: route.id,
                params,
            };
            match &best {
                Some((best_literals, _)) if *best_literals >= literals => {}
                _ => best = Some((literals, resolved)),
            }
        }

        best.map(|(_, resolved)| resolved)
            .ok_or_else(|| RouterError::NotFound {
                path: path.to_string(),
            })
    }

    /// Registered patterns, for diagnostics.
    pub fn patterns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.iter().map(|r| r.pattern)
    }
}

fn parse_pattern(pattern: &'static str) -> Result<Vec<Segment>, RouterError> {
    let Some(rest) = pattern.strip_prefix('/') else {
        return Err(RouterError::InvalidPattern {
            pattern,
            reason: "must start with '/'",
        });
    };
    if rest.is_empty() {
        return Ok(Vec::new());
    }
    let mut segments = Vec::new();
    for raw in rest.split('/') {
        if raw.is_empty() {
            return Err(RouterError::InvalidPattern {
                pattern,
                reason: "empty segment",
            });
        }
        if let Some(name) = raw.strip_prefix(':') {
            if name.is_empty() {
                return Err(RouterError::InvalidPattern {
                    pattern,
                    reason: "parameter needs a name",
                });
            }
            segments.push(Segment::Param(name.to_string()));
        } else {
            segments.push(Segment::Literal(raw.to_string()));
        }
    }
    Ok(segments)
}

/// Two patterns conflict when they match the same set of concrete paths.
/// Parameter names are irrelevant for this comparison.
fn conflicts(a: &[Segment], b: &[Segment]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| match (x, y) {
            (Segment::Literal(p), Segment::Literal(q)) => p == q,
            (Segment::Param(_), Segment::Param(_)) => true,
            _ => false,
        })
}

/// Shared, read-only bundle injected into every route: the store and the
/// query cache, both constructed once at startup. Cloning shares the same
/// instances; the bundle's identity never changes for the process lifetime.
#[derive(Clone)]
pub struct RouterContext {
    pub store: Rc<RefCell<Store>>,
    pub queries: Rc<RefCell<QueryCache>>,
}

impl RouterContext {
    pub fn new(store: Store, queries: QueryCache) -> Self {
        Self {
            store: Rc::new(RefCell::new(store)),
            queries: Rc::new(RefCell::new(queries)),
        }
    }
}

/// The router: a compiled table plus the context handed to views.
pub struct Router {
    table: RouteTable,
    context: RouterContext,
}

impl Router {
    /// Compile the route table and attach the context. Built once at
    /// startup; pattern errors surface here, not at resolution time.
    pub fn new(context: RouterContext) -> Result<Self, RouterError> {
        Ok(Self {
            table: RouteTable::new()?,
            context,
        })
    }

    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute, RouterError> {
        self.table.resolve(path)
    }

    pub fn context(&self) -> &RouterContext {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use proptest::{prop_assert, proptest};

    use super::{CompiledRoute, RouteId, RouteTable, RouterError, parse_pattern};

    /// Table with extra fabricated entries, for exercising matching rules
    /// beyond the single registered route.
    fn table_with(patterns: &[&'static str]) -> RouteTable {
        let mut table = RouteTable::new().unwrap();
        for &pattern in patterns {
            table.routes.push(CompiledRoute {
                id: RouteId::Home,
                pattern,
                segments: parse_pattern(pattern).unwrap(),
            });
        }
        table
    }

    #[test]
    fn root_resolves_to_home() {
        let table = RouteTable::new().unwrap();
        let resolved = table.resolve("/").unwrap();
        assert_eq!(resolved.id, RouteId::Home);
        assert!(resolved.params.is_empty());
        assert_eq!(table.patterns().collect::<Vec<_>>(), vec!["/"]);
    }

    #[test]
    fn unknown_path_is_not_found_and_carries_the_path() {
        let table = RouteTable::new().unwrap();
        let err = table.resolve("/missing/page").unwrap_err();
        assert!(matches!(err, RouterError::NotFound { path } if path == "/missing/page"));
    }

    #[test]
    fn params_are_captured_by_name() {
        let table = table_with(&["/studies/:id"]);
        let resolved = table.resolve("/studies/42").unwrap();
        assert_eq!(resolved.params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn literal_route_beats_parameterized_route() {
        let table = table_with(&["/studies/:id", "/studies/new"]);
        let resolved = table.resolve("/studies/new").unwrap();
        assert!(resolved.params.is_empty());

        let resolved = table.resolve("/studies/77").unwrap();
        assert_eq!(resolved.params.get("id").map(String::as_str), Some("77"));
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let table = table_with(&["/studies/:id"]);
        assert!(table.resolve("/studies/42/").is_ok());
    }

    #[test]
    fn bad_patterns_are_construction_errors() {
        assert!(matches!(
            parse_pattern("studies"),
            Err(RouterError::InvalidPattern { .. })
        ));
        assert!(matches!(
            parse_pattern("/studies//x"),
            Err(RouterError::InvalidPattern { .. })
        ));
        assert!(matches!(
            parse_pattern("/studies/:"),
            Err(RouterError::InvalidPattern { .. })
        ));
    }

    proptest! {
        #[test]
        fn arbitrary_nonroot_paths_are_not_found(
            segments in proptest::collection::vec("[a-z]{1,8}", 1..4)
        ) {
            let table = RouteTable::new().unwrap();
            let path = format!("/{}", segments.join("/"));
            prop_assert!(
                matches!(table.resolve(&path), Err(RouterError::NotFound { .. })),
                "expected NotFound for {path}"
            );
        }
    }
}
