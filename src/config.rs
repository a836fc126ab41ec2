//! Container configuration.
//!
//! Options can be built in code, read from the environment, or (with the
//! `config` feature) deserialized from JSON.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::env::{EnvSource, ProcessEnv};

/// Environment variable holding [`ContainerOptions::max_depth`].
pub const MAX_DEPTH_VAR: &str = "NAMED_DI_MAX_DEPTH";

/// Environment variable holding [`ContainerOptions::log_resolutions`].
pub const LOG_VAR: &str = "NAMED_DI_LOG";

/// Options for a [`Container`](crate::Container).
///
/// # Examples
///
/// ```rust
/// use named_di::{ContainerOptions, MapEnv};
///
/// let defaults = ContainerOptions::default();
/// assert_eq!(defaults.max_depth, 128);
/// assert!(!defaults.log_resolutions);
///
/// let env = MapEnv::new()
///     .with("NAMED_DI_MAX_DEPTH", "16")
///     .with("NAMED_DI_LOG", "true");
/// let options = ContainerOptions::from_source(&env);
/// assert_eq!(options.max_depth, 16);
/// assert!(options.log_resolutions);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerOptions {
    /// Maximum number of nested factory/template constructions per resolution.
    ///
    /// Every nesting level runs on the resolving thread's stack. An unoptimized
    /// build spends a few kilobytes per level, so a limit much above a few
    /// hundred can overflow a 2 MiB thread stack before the limit is reached.
    /// Raise it only for threads spawned with a larger stack.
    pub max_depth: usize,
    /// Install a [`LoggingObserver`](crate::LoggingObserver) on construction
    pub log_resolutions: bool,
}

impl ContainerOptions {
    /// Default nesting limit, sized to fit a default 2 MiB thread stack in debug builds.
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    /// Sets the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enables or disables the built-in logging observer.
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log_resolutions = enabled;
        self
    }

    /// Reads options from the process environment.
    pub fn from_env() -> Self {
        Self::from_source(&ProcessEnv)
    }

    /// Reads options from `source`, keeping defaults for unset or unparsable values.
    pub fn from_source(source: &dyn EnvSource) -> Self {
        let mut options = Self::default();

        if let Some(raw) = source.var(MAX_DEPTH_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => options.max_depth = depth,
                _ => tracing::warn!(var = MAX_DEPTH_VAR, value = %raw, "ignoring invalid max depth"),
            }
        }

        if let Some(raw) = source.var(LOG_VAR) {
            match parse_flag(&raw) {
                Some(enabled) => options.log_resolutions = enabled,
                None => tracing::warn!(var = LOG_VAR, value = %raw, "ignoring invalid flag"),
            }
        }

        options
    }

    /// Parses options from JSON. Missing keys keep their defaults, as does a zero `max_depth`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "config")]
    /// # {
    /// use named_di::ContainerOptions;
    ///
    /// let options = ContainerOptions::from_json(r#"{ "max_depth": 32 }"#).unwrap();
    /// assert_eq!(options.max_depth, 32);
    /// assert!(!options.log_resolutions);
    /// # }
    /// ```
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut options: Self = serde_json::from_str(json)?;
        if options.max_depth == 0 {
            tracing::warn!("ignoring zero max depth");
            options.max_depth = Self::DEFAULT_MAX_DEPTH;
        }
        Ok(options)
    }
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            log_resolutions: false,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
