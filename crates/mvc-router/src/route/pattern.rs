/// Pattern parsing for the route DSL
///
/// Pure parsing of a route pattern into typed nodes. No token registry is
/// consulted here; resolving token constraints is the compiler's job.
///
/// # Syntax
///
/// | Text | Node |
/// |------|------|
/// | `/user/` | `Literal("/user/")` |
/// | `:id` | `Token { name: "id", default: None }` |
/// | `:slug=none` | `Token { name: "slug", default: Some("none") }` |
/// | `(/:slug)` | `Group([Literal("/"), Token { .. }])` |
///
/// Parentheses always delimit optional groups and must balance. The DSL has
/// no way to express a literal parenthesis.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::PatternError;
use crate::table::OrderedMap;

/// One element of a parsed route pattern
///
/// # Examples
///
/// ```
/// use mvc_router::route::pattern::{parse_pattern, PatternNode};
///
/// let nodes = parse_pattern("/post/:id(/:slug)").unwrap();
/// assert_eq!(nodes[0], PatternNode::Literal("/post/".to_string()));
/// assert!(matches!(nodes[1], PatternNode::Token { .. }));
/// assert!(matches!(nodes[2], PatternNode::Group(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternNode {
    /// Text matched verbatim
    Literal(String),
    /// Token reference `:name`, optionally with an inline default `:name=value`
    Token {
        name: String,
        default: Option<String>,
    },
    /// Optional group `( ... )`
    Group(Vec<PatternNode>),
}

/// A route pattern together with its parsed nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    nodes: Vec<PatternNode>,
}

impl RoutePattern {
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        Ok(Self {
            source: source.to_string(),
            nodes: parse_pattern(source)?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[PatternNode] {
        &self.nodes
    }

    /// Token names in the order they appear, groups included
    ///
    /// ```
    /// use mvc_router::route::pattern::RoutePattern;
    ///
    /// let pattern = RoutePattern::parse("/:lang/post/:id(/:slug)").unwrap();
    /// assert_eq!(pattern.token_names(), vec!["lang", "id", "slug"]);
    /// ```
    pub fn token_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        collect_tokens(&self.nodes, &mut |name, _| names.push(name));
        names
    }

    /// Inline defaults declared in the pattern (`:slug=none`)
    pub fn inline_defaults(&self) -> OrderedMap<String> {
        let mut defaults = OrderedMap::new();
        collect_tokens(&self.nodes, &mut |name, default| {
            if let Some(value) = default {
                defaults.insert(name, value.to_string());
            }
        });
        defaults
    }
}

fn collect_tokens<'a>(nodes: &'a [PatternNode], visit: &mut impl FnMut(&'a str, Option<&'a str>)) {
    for node in nodes {
        match node {
            PatternNode::Token { name, default } => visit(name.as_str(), default.as_deref()),
            PatternNode::Group(inner) => collect_tokens(inner, visit),
            PatternNode::Literal(_) => {}
        }
    }
}

/// Characters that may open a token name
///
/// Matches the first character of a regex capture-group name, so `10:30`
/// stays literal text.
pub fn is_token_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Identifier characters allowed in a token name
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Characters that end an inline default value
fn ends_default(c: char) -> bool {
    matches!(c, '/' | '(' | ')' | ':')
}

/// Parses a route pattern into nodes (pure function)
///
/// Token names are read greedily, so `:identity` is one token and never a
/// reference to `:id` followed by literal text. A `:` that is not followed by
/// a letter or `_` is kept as literal text.
///
/// # Errors
///
/// [`PatternError::UnbalancedGroup`] for a stray `)` or an unclosed `(`.
///
/// # Examples
///
/// ```
/// use mvc_router::route::pattern::{parse_pattern, PatternNode};
///
/// let nodes = parse_pattern("/about").unwrap();
/// assert_eq!(nodes, vec![PatternNode::Literal("/about".to_string())]);
///
/// assert!(parse_pattern("/about)").is_err());
/// ```
pub fn parse_pattern(pattern: &str) -> Result<Vec<PatternNode>, PatternError> {
    let mut open_groups: Vec<(usize, Vec<PatternNode>)> = Vec::new();
    let mut current: Vec<PatternNode> = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '(' => {
                flush_literal(&mut literal, &mut current);
                open_groups.push((position, std::mem::take(&mut current)));
            }
            ')' => {
                flush_literal(&mut literal, &mut current);
                let (_, parent) = open_groups
                    .pop()
                    .ok_or(PatternError::UnbalancedGroup { position })?;
                let group = std::mem::replace(&mut current, parent);
                current.push(PatternNode::Group(group));
            }
            ':' if chars.peek().is_some_and(|&(_, next)| is_token_start(next)) => {
                flush_literal(&mut literal, &mut current);
                let name = take_while(&mut chars, is_token_char);
                let default = match chars.peek() {
                    Some(&(_, '=')) => {
                        chars.next();
                        Some(take_while(&mut chars, |c| !ends_default(c)))
                    }
                    _ => None,
                };
                current.push(PatternNode::Token { name, default });
            }
            _ => literal.push(c),
        }
    }

    if let Some(&(position, _)) = open_groups.last() {
        return Err(PatternError::UnbalancedGroup { position });
    }

    flush_literal(&mut literal, &mut current);
    Ok(current)
}

fn flush_literal(literal: &mut String, nodes: &mut Vec<PatternNode>) {
    if !literal.is_empty() {
        nodes.push(PatternNode::Literal(std::mem::take(literal)));
    }
}

fn take_while(chars: &mut Peekable<CharIndices<'_>>, keep: impl Fn(char) -> bool) -> String {
    let mut taken = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !keep(c) {
            break;
        }
        taken.push(c);
        chars.next();
    }
    taken
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lit(text: &str) -> PatternNode {
        PatternNode::Literal(text.to_string())
    }

    fn token(name: &str) -> PatternNode {
        PatternNode::Token {
            name: name.to_string(),
            default: None,
        }
    }

    #[test]
    fn test_parse_literal_only() {
        assert_eq!(parse_pattern("/pages/about").unwrap(), vec![lit("/pages/about")]);
    }

    #[test]
    fn test_parse_empty_pattern() {
        assert_eq!(parse_pattern("").unwrap(), Vec::<PatternNode>::new());
    }

    #[test]
    fn test_parse_tokens_between_literals() {
        assert_eq!(
            parse_pattern("/user/:id/edit").unwrap(),
            vec![lit("/user/"), token("id"), lit("/edit")]
        );
    }

    #[test]
    fn test_parse_token_name_is_greedy() {
        assert_eq!(
            parse_pattern("/:identity/:id").unwrap(),
            vec![lit("/"), token("identity"), lit("/"), token("id")]
        );
    }

    #[test]
    fn test_parse_token_stops_at_dot() {
        assert_eq!(
            parse_pattern("/file/:name.json").unwrap(),
            vec![lit("/file/"), token("name"), lit(".json")]
        );
    }

    #[test]
    fn test_parse_bare_colon_is_literal() {
        assert_eq!(parse_pattern("/a:/b").unwrap(), vec![lit("/a:/b")]);
    }

    #[test]
    fn test_parse_colon_before_digit_is_literal() {
        assert_eq!(parse_pattern("/time/10:30").unwrap(), vec![lit("/time/10:30")]);
        assert_eq!(parse_pattern("/v:1/:id").unwrap(), vec![lit("/v:1/"), token("id")]);
    }

    #[test]
    fn test_parse_token_may_start_with_underscore() {
        assert_eq!(parse_pattern("/:_id2").unwrap(), vec![lit("/"), token("_id2")]);
    }

    #[test]
    fn test_parse_inline_default() {
        assert_eq!(
            parse_pattern("/post/:id(/:slug=none)").unwrap(),
            vec![
                lit("/post/"),
                token("id"),
                PatternNode::Group(vec![
                    lit("/"),
                    PatternNode::Token {
                        name: "slug".to_string(),
                        default: Some("none".to_string()),
                    },
                ]),
            ]
        );
    }

    #[test]
    fn test_parse_nested_groups() {
        assert_eq!(
            parse_pattern("/archive(/:year(/:month))").unwrap(),
            vec![
                lit("/archive"),
                PatternNode::Group(vec![
                    lit("/"),
                    token("year"),
                    PatternNode::Group(vec![lit("/"), token("month")]),
                ]),
            ]
        );
    }

    #[test]
    fn test_parse_stray_close_paren() {
        assert_eq!(
            parse_pattern("/a)b"),
            Err(PatternError::UnbalancedGroup { position: 2 })
        );
    }

    #[test]
    fn test_parse_unclosed_group() {
        assert_eq!(
            parse_pattern("/a(/b"),
            Err(PatternError::UnbalancedGroup { position: 2 })
        );
    }

    #[test]
    fn test_token_names_and_inline_defaults() {
        let pattern = RoutePattern::parse("/:lang(/:page=1(/:size=20))").unwrap();
        assert_eq!(pattern.token_names(), vec!["lang", "page", "size"]);

        let defaults = pattern.inline_defaults();
        let entries: Vec<_> = defaults.iter().collect();
        assert_eq!(
            entries,
            vec![("page", &"1".to_string()), ("size", &"20".to_string())]
        );
    }
}
