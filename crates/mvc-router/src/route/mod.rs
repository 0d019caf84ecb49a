/// Route module: pattern DSL and target templates
///
/// - `pattern` parses the DSL into nodes
/// - `compiler` renders nodes into an anchored regex against a token registry
/// - `target` parses `Controller->method(defaults)` templates
///
/// All functions here are pure; the router owns the tables they read.

pub mod compiler;
pub mod pattern;
pub mod target;

// Re-export commonly used types
pub use compiler::{compile, render, CompiledRule};
pub use pattern::{parse_pattern, PatternNode, RoutePattern};
pub use target::TargetTemplate;
