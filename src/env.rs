//! Environment variable sources.

use std::collections::HashMap;

/// Source of environment variables.
///
/// Used by [`Container::register_env`](crate::Container::register_env) and
/// [`ContainerOptions::from_source`](crate::ContainerOptions::from_source),
/// so bootstrap code can be exercised without touching the process
/// environment.
pub trait EnvSource: Send + Sync {
    /// Returns the value of `key`, or `None` if it is unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment.
///
/// # Examples
///
/// ```rust
/// use named_di::{EnvSource, MapEnv};
///
/// let env = MapEnv::new().with("DB_URI", "postgres://localhost");
/// assert_eq!(env.var("DB_URI").as_deref(), Some("postgres://localhost"));
/// assert_eq!(env.var("HOME"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
