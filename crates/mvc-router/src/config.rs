// File: src/config.rs
// Purpose: Route table configuration, loadable from a TOML route file

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::table::OrderedMap;

/// Routes and tokens for one router
///
/// ```toml
/// [tokens]
/// ":id" = "[0-9]+"
///
/// [routes]
/// "/user/:id" = "User->show"
/// "/post/:id(/:slug)" = "Post->show(slug=none)"
/// ```
///
/// Routes keep the order they appear in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Pattern → target template, in registration order
    #[serde(default)]
    pub routes: OrderedMap<String>,

    /// Token name → constraint fragment
    #[serde(default)]
    pub tokens: OrderedMap<String>,
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, pattern: impl Into<String>, target: impl Into<String>) -> Self {
        self.routes.insert(pattern, target.into());
        self
    }

    pub fn with_token(mut self, name: impl Into<String>, constraint: impl Into<String>) -> Self {
        self.tokens.insert(name, constraint.into());
        self
    }

    /// Parses a TOML route file's contents
    ///
    /// An empty document is an empty configuration.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML route file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;

        debug!(
            path = %path.display(),
            routes = config.routes.len(),
            tokens = config.tokens.len(),
            "loaded route file"
        );

        Ok(config)
    }
}
