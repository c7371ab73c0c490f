//! Request routing table.
//!
//! Routing is an ordered table of (predicate, policy) rows evaluated
//! top-down; the first matching row wins. The table is plain data so tests
//! can build their own and so the default app table stays inspectable.

use jarama_net::Request;
use url::{Origin, Url};

/// What to do with a cached copy freshly fetched from the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillCondition {
    /// Store whatever the network returned.
    Always,
    /// Store only plain successful responses (status 200).
    PlainOk,
}

/// Response-producing policy for a matched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePolicy {
    /// Do not intercept; the browser handles the request natively.
    Passthrough,
    /// Serve from a store if present, otherwise fetch and opportunistically
    /// fill the runtime store.
    CacheFirst { fill: FillCondition },
    /// Always attempt the network; fall back to a stored copy only on
    /// network failure.
    NetworkFirst,
}

/// Predicate over an outgoing request.
#[derive(Debug, Clone)]
pub enum RoutePredicate {
    /// Method is not a read (not GET/HEAD).
    NonRead,
    /// Request targets a different origin than the app.
    CrossOrigin,
    /// Request path starts with one of these prefixes.
    PathPrefixIn(Vec<String>),
    /// Matches everything.
    Any,
}

/// One row of the routing table.
#[derive(Debug, Clone)]
pub struct Route {
    pub predicate: RoutePredicate,
    pub policy: RoutePolicy,
}

/// Ordered routing table for one app origin.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    app_origin: Origin,
    routes: Vec<Route>,
}

impl RoutingTable {
    /// Create an empty table.
    pub fn new(app_url: &Url) -> Self {
        Self {
            app_origin: app_url.origin(),
            routes: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push(&mut self, predicate: RoutePredicate, policy: RoutePolicy) {
        self.routes.push(Route { predicate, policy });
    }

    /// The default table for the music app.
    ///
    /// Order matters: side-effecting requests bypass everything, third-party
    /// assets are treated as immutable, dynamic data is never served stale
    /// while the network is up, and remaining same-origin statics are
    /// cache-first with a conservative fill.
    pub fn for_app(app_url: &Url, dynamic_prefixes: &[String]) -> Self {
        let mut table = Self::new(app_url);
        table.push(RoutePredicate::NonRead, RoutePolicy::Passthrough);
        table.push(
            RoutePredicate::CrossOrigin,
            RoutePolicy::CacheFirst {
                fill: FillCondition::Always,
            },
        );
        table.push(
            RoutePredicate::PathPrefixIn(dynamic_prefixes.to_vec()),
            RoutePolicy::NetworkFirst,
        );
        table.push(
            RoutePredicate::Any,
            RoutePolicy::CacheFirst {
                fill: FillCondition::PlainOk,
            },
        );
        table
    }

    /// Resolve the policy for a request. First match wins; a request no row
    /// matches is passed through untouched.
    pub fn route_for(&self, request: &Request) -> RoutePolicy {
        for route in &self.routes {
            if self.matches(&route.predicate, request) {
                return route.policy;
            }
        }
        RoutePolicy::Passthrough
    }

    fn matches(&self, predicate: &RoutePredicate, request: &Request) -> bool {
        match predicate {
            RoutePredicate::NonRead => !request.is_read(),
            RoutePredicate::CrossOrigin => request.url.origin() != self.app_origin,
            RoutePredicate::PathPrefixIn(prefixes) => {
                let path = request.url.path();
                prefixes.iter().any(|p| path.starts_with(p.as_str()))
            }
            RoutePredicate::Any => true,
        }
    }
}
