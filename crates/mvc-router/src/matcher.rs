/// First-match route lookup
///
/// Routes are scanned in registration order and the first rule that matches
/// wins. There is no specificity ranking: a broad pattern registered early
/// shadows narrower ones registered after it.

use tracing::trace;

use crate::error::Result;
use crate::route::compiler::{compile, CompiledRule};
use crate::table::OrderedMap;
use crate::token::TokenRegistry;

/// A route whose rule matched a path
#[derive(Debug, Clone)]
pub struct RouteHit<'a> {
    /// Route pattern (the route table key)
    pub pattern: &'a str,
    /// Target template registered for the pattern
    pub target: &'a str,
    /// The rule that matched
    pub rule: CompiledRule,
}

/// Returns the first route whose rule matches `path`
///
/// Every scanned route is compiled against the current tokens. A route that
/// fails to compile aborts the scan with its error rather than being skipped.
///
/// # Examples
///
/// ```
/// use mvc_router::matcher::find_route;
/// use mvc_router::{OrderedMap, TokenRegistry};
///
/// let mut routes = OrderedMap::new();
/// routes.insert("/about", "Pages->about".to_string());
/// routes.insert("/:page", "Pages->show".to_string());
///
/// let mut tokens = TokenRegistry::new();
/// tokens.add(":page", "[a-z]+");
///
/// let hit = find_route(&routes, &tokens, "/about").unwrap().unwrap();
/// assert_eq!(hit.pattern, "/about");
/// ```
pub fn find_route<'a>(
    routes: &'a OrderedMap<String>,
    tokens: &TokenRegistry,
    path: &str,
) -> Result<Option<RouteHit<'a>>> {
    for (pattern, target) in routes.iter() {
        let rule = compile(pattern, tokens)?;
        if rule.is_match(path) {
            return Ok(Some(RouteHit {
                pattern,
                target: target.as_str(),
                rule,
            }));
        }
        trace!(pattern, path, "route rule did not match");
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;

    fn tokens() -> TokenRegistry {
        let mut tokens = TokenRegistry::new();
        tokens.add(":id", "[0-9]+");
        tokens.add(":name", "[a-z]+");
        tokens
    }

    #[test]
    fn test_first_registered_wins() {
        let mut routes = OrderedMap::new();
        routes.insert("/user/:id", "User->byId".to_string());
        routes.insert("/user/:name", "User->byName".to_string());
        routes.insert("/user/42", "User->answer".to_string());

        let hit = find_route(&routes, &tokens(), "/user/42").unwrap().unwrap();
        assert_eq!(hit.pattern, "/user/:id");
        assert_eq!(hit.target, "User->byId");

        let hit = find_route(&routes, &tokens(), "/user/bob").unwrap().unwrap();
        assert_eq!(hit.pattern, "/user/:name");
    }

    #[test]
    fn test_no_match() {
        let mut routes = OrderedMap::new();
        routes.insert("/user/:id", "User->show".to_string());
        assert!(find_route(&routes, &tokens(), "/users/1").unwrap().is_none());
    }

    #[test]
    fn test_empty_table() {
        let routes = OrderedMap::new();
        assert!(find_route(&routes, &tokens(), "/").unwrap().is_none());
    }

    #[test]
    fn test_broken_route_before_match_is_error() {
        let mut routes = OrderedMap::new();
        routes.insert("/x/:missing", "X->y".to_string());
        routes.insert("/user/:id", "User->show".to_string());
        assert!(matches!(
            find_route(&routes, &tokens(), "/user/1"),
            Err(RouterError::Pattern { .. })
        ));
    }

    #[test]
    fn test_broken_route_after_match_is_not_reached() {
        let mut routes = OrderedMap::new();
        routes.insert("/user/:id", "User->show".to_string());
        routes.insert("/x/:missing", "X->y".to_string());
        assert!(find_route(&routes, &tokens(), "/user/1").unwrap().is_some());
    }
}
