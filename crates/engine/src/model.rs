//! CPU model classes and per-core instances.
//!
//! This module describes the simulated hardware the builders configure:
//! 1. **Model classes:** The kinds of CPU model a run can select, and the
//!    eligibility gate that restricts the builders to ROB-based ones.
//! 2. **Instances:** One mutable descriptor per simulated core, carrying the
//!    buffer sizes the trace builder rewrites and the slots the builders
//!    attach their output to.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::common::error::ConfigError;
use crate::defense::DefenseConfig;
use crate::trace::ElasticTraceConfig;

/// The class of CPU model selected for a run.
///
/// Only out-of-order, reorder-buffer-based classes (`O3` and its `DefenseO3`
/// specialization) can record elastic traces or host a defense experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CpuModelClass {
    /// Functional model; executes one instruction per call, no timing.
    AtomicSimple,
    /// In-order timing model with memory-system interaction.
    TimingSimple,
    /// In-order pipelined model.
    Minor,
    /// Out-of-order, reorder-buffer-based model.
    O3,
    /// `O3` specialization with the defense hooks compiled in.
    DefenseO3,
}

impl CpuModelClass {
    /// The class name used in diagnostics and at the CLI boundary.
    pub fn name(self) -> &'static str {
        match self {
            CpuModelClass::AtomicSimple => "AtomicSimple",
            CpuModelClass::TimingSimple => "TimingSimple",
            CpuModelClass::Minor => "Minor",
            CpuModelClass::O3 => "O3",
            CpuModelClass::DefenseO3 => "DefenseO3",
        }
    }

    /// Whether this class models an out-of-order core with a reorder buffer.
    pub fn is_rob_based(self) -> bool {
        matches!(self, CpuModelClass::O3 | CpuModelClass::DefenseO3)
    }

    /// Eligibility gate: succeeds silently iff the class is ROB-based.
    ///
    /// Failure is fatal for the whole run. Proceeding would silently
    /// simulate an unsupported configuration, so callers must not retry.
    pub fn ensure_rob_based(self) -> Result<(), ConfigError> {
        if self.is_rob_based() {
            Ok(())
        } else {
            Err(ConfigError::UnsupportedModel(self.name().to_string()))
        }
    }
}

impl FromStr for CpuModelClass {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AtomicSimple" => Ok(CpuModelClass::AtomicSimple),
            "TimingSimple" => Ok(CpuModelClass::TimingSimple),
            "Minor" => Ok(CpuModelClass::Minor),
            "O3" => Ok(CpuModelClass::O3),
            "DefenseO3" => Ok(CpuModelClass::DefenseO3),
            other => Err(ConfigError::UnsupportedModel(other.to_string())),
        }
    }
}

impl fmt::Display for CpuModelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One simulated core, as seen by the configuration builders.
///
/// Owned by the caller's simulation layer; the builders only mutate the
/// fields below in place. A fresh instance has neither a trace listener nor
/// a defense parameter set attached.
#[derive(Debug, Clone, Serialize)]
pub struct CpuInstance {
    /// Reorder buffer entry count.
    pub num_rob_entries: u32,
    /// Load queue entry count.
    pub lq_entries: u32,
    /// Store queue entry count.
    pub sq_entries: u32,
    /// Elastic-trace listener slot; set by the trace builder.
    pub trace_listener: Option<ElasticTraceConfig>,
    /// Defense parameter slot; set by the defense builder.
    pub defense: Option<DefenseConfig>,
}

impl CpuInstance {
    /// Creates an instance with the given buffer sizes and empty slots.
    pub fn new(num_rob_entries: u32, lq_entries: u32, sq_entries: u32) -> Self {
        Self {
            num_rob_entries,
            lq_entries,
            sq_entries,
            trace_listener: None,
            defense: None,
        }
    }
}
