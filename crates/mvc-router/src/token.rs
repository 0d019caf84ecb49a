/// Token registry: named placeholders and their constraint fragments
///
/// A token such as `:id` is declared once with a regex fragment (`[0-9]+`) and
/// can then be referenced from any route pattern. Names are stored exactly as
/// registered; pattern references `:name` resolve against the key `":name"`.

use crate::error::{Result, RouterError};
use crate::table::OrderedMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenRegistry {
    tokens: OrderedMap<String>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a token or replaces its constraint
    ///
    /// The constraint is not checked here. A malformed fragment is reported
    /// when a route that uses it is compiled.
    pub fn add(&mut self, name: impl Into<String>, constraint: impl Into<String>) {
        self.tokens.insert(name, constraint.into());
    }

    /// Returns the constraint for `name`
    ///
    /// # Examples
    ///
    /// ```
    /// use mvc_router::TokenRegistry;
    ///
    /// let mut tokens = TokenRegistry::new();
    /// tokens.add(":id", "[0-9]+");
    /// assert_eq!(tokens.get(":id").unwrap(), "[0-9]+");
    /// assert!(tokens.get(":slug").is_err());
    /// ```
    pub fn get(&self, name: &str) -> Result<&str> {
        self.lookup(name)
            .ok_or_else(|| RouterError::TokenNotFound(name.to_string()))
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tokens.contains_key(name)
    }

    /// Resolves a reference written as `:ident` inside a pattern
    pub(crate) fn constraint_for(&self, ident: &str) -> Option<&str> {
        self.lookup(&format!(":{ident}"))
    }

    pub fn as_map(&self) -> &OrderedMap<String> {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<OrderedMap<String>> for TokenRegistry {
    fn from(tokens: OrderedMap<String>) -> Self {
        Self { tokens }
    }
}
