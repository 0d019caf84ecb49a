/// Resolved route: what a dispatcher needs to invoke a handler
///
/// Produced by [`Router::match_routes`](crate::Router::match_routes). The
/// dispatcher instantiates `class`, calls `method` and passes `args`.
/// Setters exist so a dispatcher can rewrite the target (e.g. redirect to an
/// error controller) before invoking it.

use serde::Serialize;

use crate::table::OrderedMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    #[serde(rename = "controller")]
    class: Option<String>,
    method: Option<String>,
    args: OrderedMap<String>,
}

impl RouteDescriptor {
    pub fn new(class: Option<String>, method: Option<String>, args: OrderedMap<String>) -> Self {
        Self {
            class,
            method,
            args,
        }
    }

    /// Controller name
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn set_class(&mut self, class: impl Into<String>) {
        self.class = Some(class.into());
    }

    pub fn has_class(&self) -> bool {
        self.class.is_some()
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn set_method(&mut self, method: impl Into<String>) {
        self.method = Some(method.into());
    }

    pub fn has_method(&self) -> bool {
        self.method.is_some()
    }

    /// Arguments in insertion order: captures first, then injected defaults
    pub fn args(&self) -> &OrderedMap<String> {
        &self.args
    }

    pub fn set_args(&mut self, args: OrderedMap<String>) {
        self.args = args;
    }

    /// True when at least one argument is present
    ///
    /// A matched route whose pattern has no tokens and whose target declares
    /// no defaults has an empty map, so this is `false` for it. Dispatchers
    /// that only need to know the map exists can use [`RouteDescriptor::args`]
    /// directly.
    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }

    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args.get(name).map(String::as_str)
    }

    /// Inserts or overwrites a single argument
    ///
    /// ```
    /// use mvc_router::RouteDescriptor;
    ///
    /// let mut route = RouteDescriptor::default();
    /// route.add_arg("page", "1");
    /// route.add_arg("page", "2");
    /// assert_eq!(route.arg("page"), Some("2"));
    /// assert_eq!(route.args().len(), 1);
    /// ```
    pub fn add_arg(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.args.insert(name, value.into());
    }

    /// Splits the descriptor into its parts
    pub fn into_parts(self) -> (Option<String>, Option<String>, OrderedMap<String>) {
        (self.class, self.method, self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unset() {
        let route = RouteDescriptor::default();
        assert!(!route.has_class());
        assert!(!route.has_method());
        assert!(!route.has_args());
        assert_eq!(route.class(), None);
    }

    #[test]
    fn test_setters() {
        let mut route = RouteDescriptor::default();
        route.set_class("Errors");
        route.set_method("notFound");
        route.set_args([("path", "/missing".to_string())].into_iter().collect());

        assert_eq!(route.class(), Some("Errors"));
        assert_eq!(route.method(), Some("notFound"));
        assert_eq!(route.arg("path"), Some("/missing"));
        assert!(route.has_args());
    }

    #[test]
    fn test_add_arg_appends_new_names() {
        let mut route = RouteDescriptor::new(
            Some("Post".to_string()),
            Some("show".to_string()),
            [("id", "5".to_string())].into_iter().collect(),
        );
        route.add_arg("format", "json");

        let keys: Vec<&str> = route.args().keys().collect();
        assert_eq!(keys, vec!["id", "format"]);
    }

    #[test]
    fn test_serializes_controller_field() {
        let route = RouteDescriptor::new(
            Some("Pages".to_string()),
            Some("about".to_string()),
            OrderedMap::new(),
        );
        assert_eq!(
            serde_json::to_string(&route).unwrap(),
            r#"{"controller":"Pages","method":"about","args":{}}"#
        );
    }
}
