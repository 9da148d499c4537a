//! Defense-experiment configuration engine for an out-of-order CPU model.
//!
//! This crate validates and derives the full parameter set for speculative-execution
//! defense experiments before a simulation run begins. It provides:
//! 1. **Model:** CPU model classes, the ROB eligibility gate, and per-core instances.
//! 2. **Options:** The typed experiment option bundle and its external JSON contract.
//! 3. **Trace:** Elastic-trace capture configuration (file names, dependency window, buffer widening).
//! 4. **Defense:** Threat-model validation and the finalized defense parameter set.
//!
//! The engine produces pure, validated data. Applying the result to a live
//! simulator instance is the caller's job; nothing here executes instructions.

/// Common types shared across the engine (error taxonomy).
pub mod common;
/// Experiment options, derived value types, and capture defaults.
pub mod config;
/// Defense experiment derivation and validation.
pub mod defense;
/// CPU model classes, eligibility gate, and per-core instances.
pub mod model;
/// Elastic-trace capture configuration.
pub mod trace;

/// Error taxonomy; every fallible operation in this crate returns it.
pub use crate::common::error::ConfigError;
/// The flat option bundle supplied once per run; deserialize from JSON or build in code.
pub use crate::config::{ExperimentOptions, SequenceBound, ThreatModel};
/// Defense builder; `resolve_defense` is the pure per-run derivation.
pub use crate::defense::{DefenseConfig, configure_defense, resolve_defense};
/// Model descriptor and the mutable per-core instance handed to the builders.
pub use crate::model::{CpuInstance, CpuModelClass};
/// Trace builder; attaches listeners and widens capture buffers in place.
pub use crate::trace::{ElasticTraceConfig, configure_elastic_trace};
