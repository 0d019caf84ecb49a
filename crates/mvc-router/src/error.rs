/// Error types for route configuration, compilation and lookup
///
/// A path that matches no route is not an error: `Router::match_routes`
/// returns `Ok(None)` for it. Errors here are either lookups of keys that were
/// never registered or configuration that cannot be turned into a rule.

use thiserror::Error;

/// Problems found while parsing or rendering a single route pattern
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `)` with no open group, or a `(` that is never closed
    #[error("unbalanced optional group at byte {position}")]
    UnbalancedGroup { position: usize },

    /// The pattern references a token that is not in the registry
    #[error("token `{0}` is not declared")]
    UndeclaredToken(String),

    /// The same token appears twice in one pattern
    #[error("token `{0}` is referenced more than once")]
    DuplicateToken(String),
}

/// Errors returned by the router
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("route `{0}` is not defined")]
    RouteNotFound(String),

    #[error("token `{0}` is not defined")]
    TokenNotFound(String),

    #[error("invalid route pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: PatternError,
    },

    /// The rendered rule was rejected by the regex engine, usually because of
    /// a malformed token constraint
    #[error("route pattern `{pattern}` does not compile: {source}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read route file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse route file: {0}")]
    Config(#[from] toml::de::Error),
}

impl RouterError {
    pub(crate) fn pattern(pattern: &str, source: PatternError) -> Self {
        RouterError::Pattern {
            pattern: pattern.to_string(),
            source,
        }
    }
}

pub type Result<T, E = RouterError> = std::result::Result<T, E>;
