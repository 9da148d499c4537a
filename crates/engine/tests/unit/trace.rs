//! # Trace Builder Tests
//!
//! Tests for elastic-trace configuration: shared file paths across the
//! group, the read-before-overwrite dependency-window contract, and the
//! capture-time buffer widening.

use o3shield_core::model::{CpuInstance, CpuModelClass};
use o3shield_core::{ConfigError, configure_elastic_trace};

use crate::common::base_options;

#[test]
fn test_trace_rejects_non_rob_model() {
    let mut cpus = vec![CpuInstance::new(192, 32, 32)];
    let err = configure_elastic_trace(CpuModelClass::AtomicSimple, &mut cpus, &base_options())
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::UnsupportedModel("AtomicSimple".to_string())
    );
    // The gate fails before any instance is touched.
    assert!(cpus[0].trace_listener.is_none());
    assert_eq!(cpus[0].num_rob_entries, 192);
}

#[test]
fn test_trace_paths_shared_across_group() {
    let mut cpus = vec![
        CpuInstance::new(192, 32, 32),
        CpuInstance::new(192, 32, 32),
        CpuInstance::new(192, 32, 32),
        CpuInstance::new(192, 32, 32),
    ];
    configure_elastic_trace(CpuModelClass::O3, &mut cpus, &base_options()).unwrap();

    for cpu in &cpus {
        let listener = cpu.trace_listener.as_ref().unwrap();
        assert_eq!(listener.inst_fetch_trace_file, "system.inst.trace.gz");
        assert_eq!(listener.data_dep_trace_file, "system.data.trace.gz");
    }
}

#[test]
fn test_window_uses_pre_overwrite_rob_count() {
    let mut cpus = vec![CpuInstance::new(192, 32, 32)];
    configure_elastic_trace(CpuModelClass::DefenseO3, &mut cpus, &base_options()).unwrap();

    // 3 x the original 192 entries, not 3 x the widened 512.
    let listener = cpus[0].trace_listener.as_ref().unwrap();
    assert_eq!(listener.dep_window_size, 3 * 192);
    assert_eq!(cpus[0].num_rob_entries, 512);
}

#[test]
fn test_window_tracks_each_instances_own_rob() {
    let mut cpus = vec![CpuInstance::new(64, 16, 16), CpuInstance::new(256, 48, 48)];
    configure_elastic_trace(CpuModelClass::O3, &mut cpus, &base_options()).unwrap();

    assert_eq!(cpus[0].trace_listener.as_ref().unwrap().dep_window_size, 192);
    assert_eq!(cpus[1].trace_listener.as_ref().unwrap().dep_window_size, 768);
}

#[test]
fn test_capture_buffers_widened() {
    let mut cpus = vec![CpuInstance::new(40, 16, 16)];
    configure_elastic_trace(CpuModelClass::O3, &mut cpus, &base_options()).unwrap();

    assert_eq!(cpus[0].num_rob_entries, 512);
    assert_eq!(cpus[0].lq_entries, 128);
    assert_eq!(cpus[0].sq_entries, 128);
}

#[test]
fn test_trace_needs_no_defense_options() {
    // The trace builder only consumes the two file paths; an otherwise empty
    // bundle must not fail.
    let options = o3shield_core::config::ExperimentOptions {
        inst_trace_file: "inst.gz".into(),
        data_trace_file: "data.gz".into(),
        ..Default::default()
    };
    let mut cpus = vec![CpuInstance::new(128, 32, 32)];
    configure_elastic_trace(CpuModelClass::O3, &mut cpus, &options).unwrap();
    assert_eq!(
        cpus[0].trace_listener.as_ref().unwrap().inst_fetch_trace_file,
        "inst.gz"
    );
}
