//! Defense experiment derivation and validation.
//!
//! Turns the raw option bundle into the finalized, internally consistent
//! parameter set a defense experiment runs with. This is where the engine's
//! policy lives:
//! 1. **Required options:** `needsTSO` and `threatModel` must be supplied.
//! 2. **Threat resolution:** exhaustive match over the threat model, with the
//!    `Unsafe` hardware-name forcing and vulnerable-pairing rejection.
//! 3. **Counter cache:** enabled iff the `Counter` scheme is selected, and
//!    its geometry must have capacity when it is.
//! 4. **Sequence bounds:** the 0-sentinel raw values become explicit
//!    [`SequenceBound`] pairs.

use serde::Serialize;

use crate::common::error::ConfigError;
use crate::config::{ExperimentOptions, SequenceBound, ThreatModel, defaults};
use crate::model::{CpuInstance, CpuModelClass};

/// The validated, fully derived defense parameter set for one core.
///
/// Created once per run, attached to every core in the group, and consumed
/// by the external applier. Everything in here is already checked; the
/// applier can copy fields without re-validating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefenseConfig {
    /// Enforce total store order in the memory model.
    pub needs_tso: bool,
    /// Instruction budget for the run (0 = run to completion).
    pub max_insts: u64,
    /// Hardware defense configuration name; forced to `Unsafe` under the
    /// `Unsafe` threat model regardless of what was supplied.
    pub hw_name: String,
    /// The resolved threat model.
    pub threat_model: ThreatModel,
    /// Defend against Spectre-style attacks (true for `Spectre` and `Futuristic`).
    pub is_spectre: bool,
    /// Defend against all speculative channels (true only for `Futuristic`).
    pub is_futuristic: bool,
    /// Replay-detection scheme tag, copied through.
    pub replay_det_scheme: String,
    /// Store-buffer hardware structure tag, copied through.
    pub sb_hw_struct: String,
    /// Replay-detection threat tag, copied through.
    pub replay_det_threat: String,
    /// Maximum replay count tracked per instruction.
    pub max_replays: u64,
    /// Counter cache enabled; true iff the `Counter` scheme is selected.
    pub cc_enable: bool,
    /// Counter cache associativity (ways).
    pub cc_assoc: u32,
    /// Counter cache set count.
    pub cc_sets: u32,
    /// Counter cache miss latency in cycles.
    pub cc_miss_latency: u64,
    /// Model the counter cache as ideal (never misses).
    pub cc_ideal: bool,
    /// Maximum store buffer size.
    pub max_sb_size: u32,
    /// Lift speculative restrictions when the store buffer clears.
    pub lift_on_clear: bool,
    /// Projected element count for the replay detector's structures.
    pub projected_elem_cnt: u32,
    /// Epoch information output path.
    pub epoch_info_path: String,
    /// Retirement epoch size.
    pub epoch_size: u64,
    /// Delete epoch records when their instructions retire.
    pub delete_on_retire: bool,
    /// Number of simultaneously active epoch records.
    pub active_records: u32,
    /// Check every record rather than only the active window.
    pub check_all_records: bool,
    /// Replay counter width.
    pub counter_size: u32,
    /// Lower replay bound.
    pub lower_bound: SequenceBound,
    /// Upper replay bound.
    pub upper_bound: SequenceBound,
}

/// Derives the finalized defense parameter set from the option bundle.
///
/// Pure with respect to the CPU group: the result depends only on `options`,
/// so it is computed once per run and copied to each core. All four fatal
/// conditions of the error taxonomy can surface here.
pub fn resolve_defense(options: &ExperimentOptions) -> Result<DefenseConfig, ConfigError> {
    let needs_tso = options
        .needs_tso
        .ok_or(ConfigError::MissingRequiredOption("needsTSO"))?;
    if options.threat_model.is_empty() {
        return Err(ConfigError::MissingRequiredOption("threatModel"));
    }
    let threat_model: ThreatModel = options.threat_model.parse()?;

    // The scheme tag is the single source of truth for the counter cache;
    // cc_enable is never set independently of it.
    let cc_enable = options.replay_det_scheme == defaults::COUNTER_SCHEME;
    if cc_enable && (options.cc_assoc == 0 || options.cc_sets == 0) {
        return Err(ConfigError::InvalidCounterCache {
            assoc: options.cc_assoc,
            sets: options.cc_sets,
        });
    }

    let mut hw_name = options.hw_name.clone();
    match threat_model {
        ThreatModel::Unsafe => {
            // The Unsafe threat model always runs on the baseline
            // unprotected hardware, whatever HWName was supplied.
            if hw_name != defaults::UNSAFE_HW_NAME {
                tracing::warn!(
                    supplied = %hw_name,
                    "threat model is Unsafe; forcing hardware name to Unsafe"
                );
            }
            hw_name = defaults::UNSAFE_HW_NAME.to_string();
        }
        ThreatModel::Spectre | ThreatModel::Futuristic => {
            // Unprotected hardware cannot defend against the attack it is
            // vulnerable to; such a run would measure nothing.
            if hw_name == defaults::UNSAFE_HW_NAME {
                return Err(ConfigError::ImpossibleExperiment {
                    threat_model,
                    hw_name,
                });
            }
        }
    }

    Ok(DefenseConfig {
        needs_tso,
        max_insts: options.maxinsts,
        hw_name,
        threat_model,
        is_spectre: threat_model.is_spectre(),
        is_futuristic: threat_model.is_futuristic(),
        replay_det_scheme: options.replay_det_scheme.clone(),
        sb_hw_struct: options.sb_hw_struct.clone(),
        replay_det_threat: options.replay_det_threat.clone(),
        max_replays: options.max_replays,
        cc_enable,
        cc_assoc: options.cc_assoc,
        cc_sets: options.cc_sets,
        cc_miss_latency: options.cc_miss_latency,
        cc_ideal: options.cc_ideal,
        max_sb_size: options.max_sb_size,
        lift_on_clear: options.lift_on_clear,
        projected_elem_cnt: options.projected_elem_cnt,
        epoch_info_path: options.epoch_path.clone(),
        epoch_size: options.epoch_size,
        delete_on_retire: options.delete_on_retire,
        active_records: options.active_records,
        check_all_records: options.check_all_records,
        counter_size: options.counter_size,
        lower_bound: SequenceBound::from_raw(options.dstate_start),
        upper_bound: SequenceBound::from_raw(options.dstate_end),
    })
}

/// Attaches the defense parameter set to every core in the group.
///
/// Runs the eligibility gate, resolves the parameter set once, then copies
/// it onto each instance. Validation happens before any instance is touched,
/// so a failing run leaves the whole group unconfigured: the experiment is
/// only meaningful when the configuration is uniform across the group.
pub fn configure_defense(
    class: CpuModelClass,
    cpus: &mut [CpuInstance],
    options: &ExperimentOptions,
) -> Result<(), ConfigError> {
    class.ensure_rob_based()?;
    let config = resolve_defense(options)?;

    tracing::debug!(
        threat_model = %config.threat_model,
        hw_name = %config.hw_name,
        cpus = cpus.len(),
        "applying defense configuration to CPU group"
    );

    for cpu in cpus.iter_mut() {
        cpu.defense = Some(config.clone());
    }

    Ok(())
}
