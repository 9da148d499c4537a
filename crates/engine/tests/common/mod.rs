//! Shared fixtures for the engine tests.

use o3shield_core::config::ExperimentOptions;

/// A fully-populated, valid option bundle for a Spectre experiment with the
/// counter-cache scheme. Tests override individual fields with struct update
/// syntax to probe one rule at a time.
pub fn base_options() -> ExperimentOptions {
    ExperimentOptions {
        inst_trace_file: "system.inst.trace.gz".into(),
        data_trace_file: "system.data.trace.gz".into(),
        needs_tso: Some(true),
        maxinsts: 2_000_000,
        hw_name: "ARM-v8".into(),
        threat_model: "Spectre".into(),
        replay_det_scheme: "Counter".into(),
        sb_hw_struct: "Cuckoo".into(),
        replay_det_threat: "Spectre".into(),
        max_replays: 64,
        cc_assoc: 4,
        cc_sets: 256,
        cc_miss_latency: 20,
        cc_ideal: false,
        max_sb_size: 56,
        lift_on_clear: true,
        projected_elem_cnt: 1024,
        epoch_path: "results/epochs".into(),
        epoch_size: 64,
        delete_on_retire: true,
        active_records: 2,
        check_all_records: false,
        counter_size: 16,
        dstate_start: 0,
        dstate_end: 1000,
    }
}
