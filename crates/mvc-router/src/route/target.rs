/// Target-template parsing: `Controller->method(name=default,...)`
///
/// Templates are never rejected. A template missing `->` or its method still
/// parses; the missing parts are simply unset and the dispatcher decides what
/// to do with a descriptor that has no controller or method.

use tracing::warn;

use crate::table::OrderedMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetTemplate {
    controller: Option<String>,
    method: Option<String>,
    defaults: OrderedMap<String>,
}

impl TargetTemplate {
    /// Parses a target template
    ///
    /// Whitespace is removed, then the text is split on `->`, `(` and `)`.
    /// Fields are positional: controller, method, default list. An empty
    /// field counts as unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use mvc_router::route::target::TargetTemplate;
    ///
    /// let target = TargetTemplate::parse("Post -> show(slug=none, page=1)");
    /// assert_eq!(target.controller(), Some("Post"));
    /// assert_eq!(target.method(), Some("show"));
    /// assert_eq!(target.defaults()["page"], "1");
    ///
    /// let degenerate = TargetTemplate::parse("->about");
    /// assert_eq!(degenerate.controller(), None);
    /// assert_eq!(degenerate.method(), Some("about"));
    /// ```
    pub fn parse(target: &str) -> Self {
        let compact: String = target.chars().filter(|c| !c.is_whitespace()).collect();
        let fields = split_fields(&compact);
        let field = |index: usize| {
            fields
                .get(index)
                .filter(|f| !f.is_empty())
                .map(|f| f.to_string())
        };

        let controller = field(0);
        let method = field(1);
        let defaults = field(2)
            .map(|list| parse_defaults(target, &list))
            .unwrap_or_default();

        if controller.is_none() || method.is_none() {
            warn!(route_target = target, "route target is missing a controller or method");
        }

        Self {
            controller,
            method,
            defaults,
        }
    }

    pub fn controller(&self) -> Option<&str> {
        self.controller.as_deref()
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn defaults(&self) -> &OrderedMap<String> {
        &self.defaults
    }
}

// Delimiters are ASCII, so every slice boundary is a char boundary.
fn split_fields(compact: &str) -> Vec<&str> {
    let bytes = compact.as_bytes();
    let mut fields = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let width = match bytes[i] {
            b'(' | b')' => 1,
            b'-' if bytes.get(i + 1) == Some(&b'>') => 2,
            _ => 0,
        };
        if width == 0 {
            i += 1;
            continue;
        }
        fields.push(&compact[start..i]);
        i += width;
        start = i;
    }

    fields.push(&compact[start..]);
    fields
}

/// `name=default` entries, split at the first `=`
fn parse_defaults(target: &str, list: &str) -> OrderedMap<String> {
    let mut defaults = OrderedMap::new();
    for entry in list.split(',').filter(|e| !e.is_empty()) {
        match entry.split_once('=') {
            Some((name, value)) if !name.is_empty() => {
                defaults.insert(name, value.to_string());
            }
            _ => warn!(route_target = target, entry, "ignoring malformed default argument"),
        }
    }
    defaults
}
