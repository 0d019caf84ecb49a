//! # MVC Router
//!
//! A pattern router for MVC dispatchers. Routes map a compact pattern DSL to a
//! `Controller->method(defaults)` target:
//! - Literal segments (`/about`)
//! - Named tokens constrained by regex fragments (`/user/:id` with `:id = [0-9]+`)
//! - Optional suffix groups (`/post/:id(/:slug)`)
//! - Default arguments from the target (`Post->show(slug=none)`) or inline in
//!   the pattern (`:slug=none`)
//!
//! ## Matching Model
//!
//! - Routes are tried in registration order; the first match wins
//! - Each route is compiled into an anchored regex on every match attempt,
//!   against the tokens registered at that moment
//! - Captured values take precedence over defaults
//!
//! The router does not dispatch. It returns a [`RouteDescriptor`] and the
//! caller decides how to invoke the controller, or how to answer a miss.
//!
//! ## Configuration Phase
//!
//! Mutation takes `&mut Router` and matching takes `&Router`, so tables cannot
//! change under a running match. Populate the router first, then share it.
//! Hosts that must change routes while serving wrap the router in a lock.
//!
//! Token constraints are user-supplied regex fragments. The `regex` engine
//! matches in linear time, and each compiled rule is bounded by
//! [`route::compiler::RULE_SIZE_LIMIT`].
//!
//! ## Example
//!
//! ```
//! use mvc_router::Router;
//!
//! let router = Router::new()
//!     .with_token(":id", "[0-9]+")
//!     .with_token(":slug", "[a-z0-9-]+")
//!     .with_route("/about", "Pages->about")
//!     .with_route("/post/:id(/:slug)", "Post->show(slug=none)");
//!
//! let route = router.match_routes("/post/5").unwrap().unwrap();
//! assert_eq!(route.class(), Some("Post"));
//! assert_eq!(route.method(), Some("show"));
//! assert_eq!(route.arg("id"), Some("5"));
//! assert_eq!(route.arg("slug"), Some("none"));
//!
//! assert!(router.match_routes("/post/abc").unwrap().is_none());
//! ```

use std::path::Path;

use tracing::debug;

// ============================================================================
// Module Declarations
// ============================================================================

mod config;
mod descriptor;
mod error;
mod table;
mod token;

pub mod extract;
pub mod matcher;
pub mod route;

pub use config::RouterConfig;
pub use descriptor::RouteDescriptor;
pub use error::{PatternError, Result, RouterError};
pub use route::{CompiledRule, PatternNode, RoutePattern, TargetTemplate};
pub use table::OrderedMap;
pub use token::TokenRegistry;

// ============================================================================
// Router
// ============================================================================

/// Route and token tables plus the matching entry point
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: OrderedMap<String>,
    tokens: TokenRegistry,
}

impl Router {
    /// Creates an empty router
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a router from a configuration value
    ///
    /// Every route is compiled once to check it, so a pattern with an
    /// undeclared token or a malformed constraint is rejected here.
    pub fn from_config(config: RouterConfig) -> Result<Self> {
        let mut router = Self::new();
        router.set_routes(config)?;
        Ok(router)
    }

    /// Loads a TOML route file and builds a router from it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(RouterConfig::load(path)?)
    }

    /// Replaces both the route and token tables
    ///
    /// The new tables are validated first; on error the router keeps its
    /// previous tables.
    ///
    /// # Examples
    ///
    /// ```
    /// use mvc_router::{Router, RouterConfig};
    ///
    /// let mut router = Router::new().with_route("/old", "Old->index");
    ///
    /// let broken = RouterConfig::new().with_route("/user/:id", "User->show");
    /// assert!(router.set_routes(broken).is_err());
    /// assert!(router.has_route("/old"));
    ///
    /// let fixed = RouterConfig::new()
    ///     .with_token(":id", "[0-9]+")
    ///     .with_route("/user/:id", "User->show");
    /// router.set_routes(fixed).unwrap();
    /// assert!(!router.has_route("/old"));
    /// ```
    pub fn set_routes(&mut self, config: RouterConfig) -> Result<()> {
        let candidate = Self {
            routes: config.routes,
            tokens: config.tokens.into(),
        };
        candidate.validate()?;

        debug!(
            routes = candidate.routes.len(),
            tokens = candidate.tokens.len(),
            "route table replaced"
        );
        *self = candidate;
        Ok(())
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Adds a route (builder)
    pub fn with_route(mut self, pattern: impl Into<String>, target: impl Into<String>) -> Self {
        self.add_route(pattern, target);
        self
    }

    /// Adds a token (builder)
    pub fn with_token(mut self, name: impl Into<String>, constraint: impl Into<String>) -> Self {
        self.add_token(name, constraint);
        self
    }

    // ========================================================================
    // Route Table
    // ========================================================================

    /// Adds a route or replaces the target of an existing pattern
    ///
    /// A replaced route keeps its original position in the matching order.
    /// The pattern is not checked here; see [`Router::validate`].
    pub fn add_route(&mut self, pattern: impl Into<String>, target: impl Into<String>) {
        self.routes.insert(pattern, target.into());
    }

    /// Returns the target template registered for `pattern`
    pub fn route(&self, pattern: &str) -> Result<&str> {
        self.routes
            .get(pattern)
            .map(String::as_str)
            .ok_or_else(|| RouterError::RouteNotFound(pattern.to_string()))
    }

    pub fn has_route(&self, pattern: &str) -> bool {
        self.routes.contains_key(pattern)
    }

    pub fn routes(&self) -> &OrderedMap<String> {
        &self.routes
    }

    // ========================================================================
    // Token Registry
    // ========================================================================

    pub fn add_token(&mut self, name: impl Into<String>, constraint: impl Into<String>) {
        self.tokens.add(name, constraint);
    }

    /// Returns the constraint registered for token `name` (e.g. `":id"`)
    pub fn token(&self, name: &str) -> Result<&str> {
        self.tokens.get(name)
    }

    pub fn has_token(&self, name: &str) -> bool {
        self.tokens.contains(name)
    }

    pub fn tokens(&self) -> &OrderedMap<String> {
        self.tokens.as_map()
    }

    pub fn token_registry(&self) -> &TokenRegistry {
        &self.tokens
    }

    // ========================================================================
    // Compilation and Matching
    // ========================================================================

    /// Compiles the rule for one pattern against the current tokens
    ///
    /// The pattern does not need to be registered.
    pub fn compile(&self, pattern: &str) -> Result<CompiledRule> {
        route::compile(pattern, &self.tokens)
    }

    /// Compiles every route and returns pattern → regex source
    ///
    /// # Examples
    ///
    /// ```
    /// use mvc_router::Router;
    ///
    /// let router = Router::new()
    ///     .with_token(":id", "[0-9]+")
    ///     .with_route("/user/:id", "User->show");
    ///
    /// let regexes = router.regexes().unwrap();
    /// assert_eq!(regexes["/user/:id"], "^/user/(?P<id>[0-9]+)$");
    /// ```
    pub fn regexes(&self) -> Result<OrderedMap<String>> {
        self.routes
            .keys()
            .map(|pattern| Ok::<_, RouterError>((pattern, self.compile(pattern)?.source().to_string())))
            .collect()
    }

    /// Checks that every route compiles, reporting the first that does not
    pub fn validate(&self) -> Result<()> {
        self.routes
            .keys()
            .try_for_each(|pattern| self.compile(pattern).map(drop))
    }

    /// Resolves `path` to a route descriptor
    ///
    /// Returns `Ok(None)` when no route matches. Errors come only from
    /// routes that cannot be compiled, and only if they are scanned before a
    /// matching route.
    pub fn match_routes(&self, path: &str) -> Result<Option<RouteDescriptor>> {
        let Some(hit) = matcher::find_route(&self.routes, &self.tokens, path)? else {
            debug!(path, "no route matched");
            return Ok(None);
        };

        debug!(path, pattern = hit.pattern, route_target = hit.target, "route matched");
        let target = TargetTemplate::parse(hit.target);
        Ok(Some(extract::extract(&target, &hit.rule, path)))
    }
}

impl TryFrom<RouterConfig> for Router {
    type Error = RouterError;

    fn try_from(config: RouterConfig) -> Result<Self> {
        Self::from_config(config)
    }
}

impl From<&Router> for RouterConfig {
    fn from(router: &Router) -> Self {
        RouterConfig {
            routes: router.routes.clone(),
            tokens: router.tokens.as_map().clone(),
        }
    }
}
