//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section is optional; an empty file yields the defaults.

use serde::{Deserialize, Serialize};

/// Root configuration for a router instance.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RouterConfig {
    /// Pattern compiler options.
    pub matching: MatchingConfig,

    /// Dispatch behaviour.
    pub dispatch: DispatchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Options applied when compiling route patterns.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct MatchingConfig {
    /// Match case-sensitively.
    pub sensitive: bool,

    /// Disallow an optional trailing slash.
    pub strict: bool,

    /// Anchor the match at the end of the path. When false a pattern
    /// matches any path it is a segment-aligned prefix of.
    pub end: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            sensitive: false,
            strict: false,
            end: true,
        }
    }
}

/// How captured values are paired with declared parameter names.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParamMismatch {
    /// Pair by position; names without a captured value are left out.
    #[default]
    Align,
    /// Fail the dispatch if the capture count differs from the name count.
    Reject,
}

/// Dispatch behaviour.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DispatchConfig {
    /// Policy for matchers that capture more or fewer values than they declare.
    pub param_mismatch: ParamMismatch,

    /// Fail with `ContinuationReused` when a handler invokes its
    /// continuation more than once.
    pub guard_reentry: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
