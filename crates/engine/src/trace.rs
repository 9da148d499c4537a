//! Elastic-trace capture configuration.
//!
//! Prepares a CPU group for recording an instruction-fetch and
//! data-dependency trace: attaches a listener descriptor to every core and
//! widens the capture-time buffers so resource-limited stalls cannot appear
//! in the recording.

use serde::Serialize;

use crate::common::error::ConfigError;
use crate::config::{ExperimentOptions, defaults};
use crate::model::{CpuInstance, CpuModelClass};

/// Elastic-trace listener parameters for one core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElasticTraceConfig {
    /// Instruction-fetch trace output path.
    pub inst_fetch_trace_file: String,
    /// Data-dependency trace output path.
    pub data_dep_trace_file: String,
    /// Dependency tracking window, in in-flight instructions.
    pub dep_window_size: u64,
}

/// Configures elastic-trace recording for every core in the group.
///
/// Each core gets a listener with the two trace file paths from `options`
/// and a dependency window sized from its own ROB, then has its ROB, LQ and
/// SQ widened to the capture constants. The same file names are assigned to
/// every core: distinct per-core trace files are not supported for
/// multi-core runs yet.
///
/// Fails only at the eligibility gate; once the model class is accepted the
/// operation is unconditional for the whole group.
pub fn configure_elastic_trace(
    class: CpuModelClass,
    cpus: &mut [CpuInstance],
    options: &ExperimentOptions,
) -> Result<(), ConfigError> {
    class.ensure_rob_based()?;

    for cpu in cpus.iter_mut() {
        // The window tracks the ROB size the replayed experiment will use,
        // so it must be derived before the widening below overwrites it.
        let dep_window_size = defaults::DEP_WINDOW_FACTOR * u64::from(cpu.num_rob_entries);

        cpu.trace_listener = Some(ElasticTraceConfig {
            inst_fetch_trace_file: options.inst_trace_file.clone(),
            data_dep_trace_file: options.data_trace_file.clone(),
            dep_window_size,
        });

        // Widen the ROB, LQ and SQ so that capture never stalls on a full
        // buffer; such stalls would land in the trace as compute delay.
        // Replay models the real sizes in the trace CPU.
        cpu.num_rob_entries = defaults::TRACE_ROB_ENTRIES;
        cpu.lq_entries = defaults::TRACE_LQ_ENTRIES;
        cpu.sq_entries = defaults::TRACE_SQ_ENTRIES;

        tracing::debug!(dep_window_size, "attached elastic trace listener");
    }

    Ok(())
}
