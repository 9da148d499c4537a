//! Configuration error definitions.
//!
//! Every failure this engine can produce is unrecoverable at this layer: none
//! are retried and none are silently defaulted. Callers receive a typed value
//! rather than a process abort so the engine stays embeddable and testable;
//! the expected reaction is to report the message and refuse to start the run.

use thiserror::Error;

use crate::config::ThreatModel;

/// Fatal configuration conditions, surfaced before any simulation begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The selected CPU model class has no reorder buffer, so neither data
    /// dependency tracing nor a defense experiment can be configured on it.
    /// Carries the name of the offending model class.
    #[error(
        "{0} does not support data dependency tracing or defense experiments; \
         use an out-of-order ROB-based CPU model"
    )]
    UnsupportedModel(String),

    /// A required option was absent (`needsTSO` unset) or empty
    /// (`threatModel`). Reported once for the whole run, before any CPU
    /// instance is touched.
    #[error("required option '{0}' was not provided")]
    MissingRequiredOption(&'static str),

    /// The `Unsafe` hardware configuration was paired with a threat model it
    /// is vulnerable to. The experiment premise does not hold, so the setup
    /// is impossible rather than merely misconfigured.
    #[error("hardware '{hw_name}' is vulnerable to {threat_model}; the experiment premise does not hold")]
    ImpossibleExperiment {
        /// The threat model the run was supposed to defend against.
        threat_model: ThreatModel,
        /// The supplied hardware name tag.
        hw_name: String,
    },

    /// The `threatModel` tag matched no known threat model. There is no
    /// default; the tag must be one of `Unsafe`, `Spectre` or `Futuristic`.
    #[error("unknown threat model: {0}")]
    UnknownThreatModel(String),

    /// The Counter replay-detection scheme was selected but the counter-cache
    /// geometry has a zero dimension, leaving the cache without capacity.
    #[error("counter cache geometry {assoc} way(s) x {sets} set(s) has no capacity")]
    InvalidCounterCache {
        /// Supplied associativity (ways).
        assoc: u32,
        /// Supplied set count.
        sets: u32,
    },
}
