/// Argument extraction and default merging
///
/// Builds the [`RouteDescriptor`] for a matched route. Captured values always
/// win. Defaults fill only the names that did not capture, first those from
/// the target template, then inline defaults from the pattern.

use tracing::debug;

use crate::descriptor::RouteDescriptor;
use crate::route::compiler::CompiledRule;
use crate::route::target::TargetTemplate;
use crate::table::OrderedMap;

/// Resolves `path` against a matched rule and its target template
///
/// # Examples
///
/// ```
/// use mvc_router::extract::extract;
/// use mvc_router::route::{compile, TargetTemplate};
/// use mvc_router::TokenRegistry;
///
/// let mut tokens = TokenRegistry::new();
/// tokens.add(":id", "[0-9]+");
/// tokens.add(":slug", "[a-z-]+");
///
/// let rule = compile("/post/:id(/:slug)", &tokens).unwrap();
/// let target = TargetTemplate::parse("Post->show(slug=none)");
///
/// let route = extract(&target, &rule, "/post/5");
/// assert_eq!(route.class(), Some("Post"));
/// assert_eq!(route.arg("id"), Some("5"));
/// assert_eq!(route.arg("slug"), Some("none"));
/// ```
pub fn extract(target: &TargetTemplate, rule: &CompiledRule, path: &str) -> RouteDescriptor {
    let mut args = rule.captures(path).unwrap_or_default();
    let captured = args.len();

    merge_defaults(&mut args, target.defaults());
    merge_defaults(&mut args, rule.inline_defaults());

    debug!(
        pattern = rule.pattern(),
        captured,
        defaulted = args.len() - captured,
        "extracted route arguments"
    );

    RouteDescriptor::new(
        target.controller().map(str::to_string),
        target.method().map(str::to_string),
        args,
    )
}

fn merge_defaults(args: &mut OrderedMap<String>, defaults: &OrderedMap<String>) {
    for (name, value) in defaults.iter() {
        if !args.contains_key(name) {
            args.insert(name, value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::compiler::compile;
    use crate::token::TokenRegistry;
    use pretty_assertions::assert_eq;

    fn tokens() -> TokenRegistry {
        let mut tokens = TokenRegistry::new();
        tokens.add(":id", "[0-9]+");
        tokens.add(":slug", "[a-z0-9-]+");
        tokens.add(":format", "json|xml");
        tokens
    }

    fn args_of(route: &RouteDescriptor) -> Vec<(&str, &str)> {
        route.args().iter().map(|(k, v)| (k, v.as_str())).collect()
    }

    #[test]
    fn test_captured_value_beats_default() {
        let rule = compile("/post/:id(/:slug)", &tokens()).unwrap();
        let target = TargetTemplate::parse("Post->show(slug=none)");
        let route = extract(&target, &rule, "/post/5/hello");
        assert_eq!(args_of(&route), vec![("id", "5"), ("slug", "hello")]);
    }

    #[test]
    fn test_default_injected_for_missing_capture() {
        let rule = compile("/post/:id(/:slug)", &tokens()).unwrap();
        let target = TargetTemplate::parse("Post->show(slug=none)");
        let route = extract(&target, &rule, "/post/5");
        assert_eq!(args_of(&route), vec![("id", "5"), ("slug", "none")]);
    }

    #[test]
    fn test_defaults_without_tokens_are_passed_through() {
        let rule = compile("/feed", &tokens()).unwrap();
        let target = TargetTemplate::parse("Feed->index(format=rss, limit=10)");
        let route = extract(&target, &rule, "/feed");
        assert_eq!(args_of(&route), vec![("format", "rss"), ("limit", "10")]);
    }

    #[test]
    fn test_inline_default_used_when_target_has_none() {
        let rule = compile("/post/:id(.:format=json)", &tokens()).unwrap();
        let target = TargetTemplate::parse("Post->show");
        let route = extract(&target, &rule, "/post/5");
        assert_eq!(args_of(&route), vec![("id", "5"), ("format", "json")]);

        let route = extract(&target, &rule, "/post/5.xml");
        assert_eq!(args_of(&route), vec![("id", "5"), ("format", "xml")]);
    }

    #[test]
    fn test_target_default_beats_inline_default() {
        let rule = compile("/post/:id(/:slug=inline)", &tokens()).unwrap();
        let target = TargetTemplate::parse("Post->show(slug=target)");
        let route = extract(&target, &rule, "/post/5");
        assert_eq!(route.arg("slug"), Some("target"));
    }

    #[test]
    fn test_degenerate_target() {
        let rule = compile("/x", &tokens()).unwrap();
        let route = extract(&TargetTemplate::parse("JustAController"), &rule, "/x");
        assert_eq!(route.class(), Some("JustAController"));
        assert!(!route.has_method());
    }
}
