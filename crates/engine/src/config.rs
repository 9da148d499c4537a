//! Experiment options and derived value types.
//!
//! This module defines the user-facing knobs for one defense-experiment run
//! and the small value types the builders derive from them. It provides:
//! 1. **Defaults:** Capture-time buffer constants and reserved name tags.
//! 2. **Options:** `ExperimentOptions`, the flat, typed bundle of every run parameter.
//! 3. **Derived types:** `ThreatModel` and `SequenceBound`.
//!
//! Options are supplied via JSON (the external key names are preserved with
//! serde renames) or built in code with `ExperimentOptions::default()` and
//! struct update syntax. Validation happens in the builders, not the parser:
//! a partially-filled bundle deserializes fine and fails later with a
//! precise [`ConfigError`](crate::ConfigError).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Fixed constants used during elastic-trace capture and reserved name tags.
pub mod defaults {
    /// Reorder buffer entries during trace capture.
    ///
    /// Large enough that the ROB never fills on realistic workloads, so
    /// resource stalls cannot leak into the captured trace. Replay models
    /// the experiment's real ROB size in the trace CPU.
    pub const TRACE_ROB_ENTRIES: u32 = 512;

    /// Load queue entries during trace capture.
    pub const TRACE_LQ_ENTRIES: u32 = 128;

    /// Store queue entries during trace capture.
    pub const TRACE_SQ_ENTRIES: u32 = 128;

    /// Dependency window size as a multiple of the ROB entry count.
    ///
    /// The elastic-trace listener tracks register and memory dependencies
    /// across a window of this many in-flight instructions.
    pub const DEP_WINDOW_FACTOR: u64 = 3;

    /// Hardware name tag of the baseline unprotected configuration.
    pub const UNSAFE_HW_NAME: &str = "Unsafe";

    /// Replay-detection scheme tag that enables the counter cache.
    pub const COUNTER_SCHEME: &str = "Counter";
}

/// The full set of user-facing knobs for one simulation run.
///
/// Immutable input, supplied once per run and shared read-only by every CPU
/// instance in the group. Field names follow the crate's conventions; the
/// serde renames preserve the external flat key/value contract.
///
/// # Examples
///
/// Deserializing a partial bundle from JSON:
///
/// ```
/// use o3shield_core::config::ExperimentOptions;
///
/// let json = r#"{
///     "needsTSO": true,
///     "threatModel": "Spectre",
///     "HWName": "ARM-v8",
///     "replayDetScheme": "Counter",
///     "CCAssoc": 4,
///     "CCSets": 256,
///     "dstate_end": 1000
/// }"#;
///
/// let options: ExperimentOptions = serde_json::from_str(json).unwrap();
/// assert_eq!(options.needs_tso, Some(true));
/// assert_eq!(options.threat_model, "Spectre");
/// assert_eq!(options.dstate_start, 0);
/// assert_eq!(options.dstate_end, 1000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExperimentOptions {
    /// Instruction-fetch trace output path, shared by every CPU in the group.
    pub inst_trace_file: String,

    /// Data-dependency trace output path, shared by every CPU in the group.
    pub data_trace_file: String,

    /// Whether the memory model must enforce total store order.
    ///
    /// Tri-state: `Some(true)`, `Some(false)`, or absent. Absence is a fatal
    /// [`MissingRequiredOption`](ConfigError::MissingRequiredOption) when the
    /// defense builder runs; there is no safe default for consistency.
    #[serde(rename = "needsTSO")]
    pub needs_tso: Option<bool>,

    /// Instruction budget for the run (0 = run to completion).
    pub maxinsts: u64,

    /// Hardware defense configuration name tag.
    #[serde(rename = "HWName")]
    pub hw_name: String,

    /// Threat model tag: `Unsafe`, `Spectre` or `Futuristic`. Required.
    #[serde(rename = "threatModel")]
    pub threat_model: String,

    /// Replay-detection scheme tag; `Counter` enables the counter cache.
    #[serde(rename = "replayDetScheme")]
    pub replay_det_scheme: String,

    /// Store-buffer hardware structure tag.
    #[serde(rename = "sbHWStruct")]
    pub sb_hw_struct: String,

    /// Threat class the replay detector defends against.
    #[serde(rename = "replayDetThreat")]
    pub replay_det_threat: String,

    /// Maximum replay count tracked per instruction.
    #[serde(rename = "maxReplays")]
    pub max_replays: u64,

    /// Counter cache associativity (ways).
    #[serde(rename = "CCAssoc")]
    pub cc_assoc: u32,

    /// Counter cache set count.
    #[serde(rename = "CCSets")]
    pub cc_sets: u32,

    /// Counter cache miss latency in cycles.
    #[serde(rename = "CCMissLatency")]
    pub cc_miss_latency: u64,

    /// Model the counter cache as ideal (never misses).
    #[serde(rename = "CCIdeal")]
    pub cc_ideal: bool,

    /// Maximum store buffer size.
    #[serde(rename = "maxSBSize")]
    pub max_sb_size: u32,

    /// Lift speculative restrictions when the store buffer clears.
    #[serde(rename = "liftOnClear")]
    pub lift_on_clear: bool,

    /// Projected element count for the replay detector's structures.
    #[serde(rename = "projectedElemCnt")]
    pub projected_elem_cnt: u32,

    /// Epoch information output path.
    pub epoch_path: String,

    /// Retirement epoch size.
    pub epoch_size: u64,

    /// Delete epoch records when their instructions retire.
    #[serde(rename = "deleteOnRetire")]
    pub delete_on_retire: bool,

    /// Number of simultaneously active epoch records.
    #[serde(rename = "activeRecords")]
    pub active_records: u32,

    /// Check every record rather than only the active window.
    #[serde(rename = "checkAllRecords")]
    pub check_all_records: bool,

    /// Replay counter width.
    #[serde(rename = "counterSize")]
    pub counter_size: u32,

    /// Lower replay bound as a raw sequence number; 0 means unbounded.
    pub dstate_start: u64,

    /// Upper replay bound as a raw sequence number; 0 means unbounded.
    pub dstate_end: u64,
}

/// The class of speculative-execution attack an experiment defends against.
///
/// `Spectre` and `Futuristic` are strictly more defended than `Unsafe`;
/// the builders reject pairings that violate that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ThreatModel {
    /// No defense; the baseline vulnerable configuration.
    Unsafe,
    /// Defend against Spectre-style control-flow speculation attacks.
    Spectre,
    /// Defend against all speculative side channels, known and future.
    Futuristic,
}

impl ThreatModel {
    /// True for every threat model that defends against Spectre.
    pub fn is_spectre(self) -> bool {
        !matches!(self, ThreatModel::Unsafe)
    }

    /// True only for the futuristic (all-channels) threat model.
    pub fn is_futuristic(self) -> bool {
        matches!(self, ThreatModel::Futuristic)
    }
}

impl FromStr for ThreatModel {
    type Err = ConfigError;

    /// Parses the external threat-model tag. There is no default: any
    /// unrecognized tag is a fatal [`ConfigError::UnknownThreatModel`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unsafe" => Ok(ThreatModel::Unsafe),
            "Spectre" => Ok(ThreatModel::Spectre),
            "Futuristic" => Ok(ThreatModel::Futuristic),
            other => Err(ConfigError::UnknownThreatModel(other.to_string())),
        }
    }
}

impl fmt::Display for ThreatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ThreatModel::Unsafe => "Unsafe",
            ThreatModel::Spectre => "Spectre",
            ThreatModel::Futuristic => "Futuristic",
        };
        write!(f, "{}", name)
    }
}

/// A replay/trace sequence-number bound with an explicit activity flag.
///
/// The external contract encodes "no bound" as the raw value 0, so `active`
/// must always equal `seq_num != 0`. [`SequenceBound::from_raw`] is the only
/// construction path, which keeps the pair from drifting apart.
///
/// Known limitation carried over from the source policy: a literal,
/// intentional bound at sequence number 0 cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceBound {
    /// The bounding sequence number; meaningful only when `active`.
    pub seq_num: u64,
    /// Whether the bound is in effect.
    pub active: bool,
}

impl SequenceBound {
    /// Derives the bound pair from a raw option value (0 = unbounded).
    pub fn from_raw(raw: u64) -> Self {
        Self {
            seq_num: raw,
            active: raw != 0,
        }
    }
}
