/// Rule compilation: parsed pattern + token registry → anchored regex
///
/// Rendering is deterministic: literals are escaped, groups become optional
/// non-capturing groups, tokens become named captures around their constraint
/// fragment. Rules are not cached; the router compiles them on every match.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use tracing::trace;

use super::pattern::{PatternNode, RoutePattern};
use crate::error::{PatternError, Result, RouterError};
use crate::table::OrderedMap;
use crate::token::TokenRegistry;

/// Upper bound on the compiled program size of a single rule
///
/// Constraint fragments are user supplied. A fragment that blows past this
/// limit fails with [`RouterError::InvalidRule`] instead of allocating without
/// bound. The regex engine matches in linear time, so there is no backtracking
/// blow-up to guard against at match time.
pub const RULE_SIZE_LIMIT: usize = 1 << 20;

/// A route pattern compiled against the current token registry
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pattern: String,
    source: String,
    regex: Regex,
    inline_defaults: OrderedMap<String>,
}

impl CompiledRule {
    /// The route pattern this rule was compiled from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The rendered regex source
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn inline_defaults(&self) -> &OrderedMap<String> {
        &self.inline_defaults
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Named captures for `path`, or `None` if the rule does not match
    ///
    /// Unnamed groups (from constraint fragments) are ignored. Optional groups
    /// that did not take part in the match leave their tokens absent, so the
    /// caller can fill them from defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use mvc_router::route::compiler::compile;
    /// use mvc_router::TokenRegistry;
    ///
    /// let mut tokens = TokenRegistry::new();
    /// tokens.add(":id", "[0-9]+");
    /// tokens.add(":slug", "[a-z-]+");
    ///
    /// let rule = compile("/post/:id(/:slug)", &tokens).unwrap();
    /// let args = rule.captures("/post/5").unwrap();
    /// assert_eq!(args["id"], "5");
    /// assert!(!args.contains_key("slug"));
    /// ```
    pub fn captures(&self, path: &str) -> Option<OrderedMap<String>> {
        let caps = self.regex.captures(path)?;
        Some(
            self.regex
                .capture_names()
                .flatten()
                .filter_map(|name| caps.name(name).map(|m| (name, m.as_str().to_string())))
                .collect(),
        )
    }
}

/// Renders a parsed pattern into regex source (pure function)
///
/// # Errors
///
/// - [`PatternError::UndeclaredToken`] if a referenced token is not registered
/// - [`PatternError::DuplicateToken`] if a token is referenced twice
///
/// # Examples
///
/// ```
/// use mvc_router::route::compiler::render;
/// use mvc_router::route::pattern::RoutePattern;
/// use mvc_router::TokenRegistry;
///
/// let mut tokens = TokenRegistry::new();
/// tokens.add(":id", "[0-9]+");
///
/// let pattern = RoutePattern::parse("/user/:id").unwrap();
/// assert_eq!(render(&pattern, &tokens).unwrap(), "^/user/(?P<id>[0-9]+)$");
/// ```
pub fn render(pattern: &RoutePattern, tokens: &TokenRegistry) -> Result<String, PatternError> {
    let mut body = String::new();
    let mut seen = HashSet::new();
    render_nodes(pattern.nodes(), tokens, &mut seen, &mut body)?;
    Ok(format!("^{body}$"))
}

fn render_nodes<'a>(
    nodes: &'a [PatternNode],
    tokens: &TokenRegistry,
    seen: &mut HashSet<&'a str>,
    out: &mut String,
) -> Result<(), PatternError> {
    for node in nodes {
        match node {
            PatternNode::Literal(text) => out.push_str(&regex::escape(text)),
            PatternNode::Token { name, .. } => {
                let constraint = tokens
                    .constraint_for(name)
                    .ok_or_else(|| PatternError::UndeclaredToken(format!(":{name}")))?;
                if !seen.insert(name.as_str()) {
                    return Err(PatternError::DuplicateToken(format!(":{name}")));
                }
                out.push_str(&format!("(?P<{name}>{constraint})"));
            }
            PatternNode::Group(inner) => {
                out.push_str("(?:");
                render_nodes(inner, tokens, seen, out)?;
                out.push_str(")?");
            }
        }
    }
    Ok(())
}

/// Parses, renders and builds the rule for one route pattern
pub fn compile(pattern: &str, tokens: &TokenRegistry) -> Result<CompiledRule> {
    let parsed = RoutePattern::parse(pattern).map_err(|e| RouterError::pattern(pattern, e))?;
    let source = render(&parsed, tokens).map_err(|e| RouterError::pattern(pattern, e))?;

    let regex = RegexBuilder::new(&source)
        .size_limit(RULE_SIZE_LIMIT)
        .build()
        .map_err(|source| RouterError::InvalidRule {
            pattern: pattern.to_string(),
            source,
        })?;

    trace!(pattern, rule = %source, "compiled route rule");

    Ok(CompiledRule {
        pattern: pattern.to_string(),
        inline_defaults: parsed.inline_defaults(),
        source,
        regex,
    })
}
