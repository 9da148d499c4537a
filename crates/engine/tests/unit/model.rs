//! # Model Tests
//!
//! Tests for the CPU model classes, the ROB eligibility gate, and the
//! per-core instance descriptor.

use rstest::rstest;

use o3shield_core::ConfigError;
use o3shield_core::model::{CpuInstance, CpuModelClass};

#[rstest]
#[case(CpuModelClass::O3)]
#[case(CpuModelClass::DefenseO3)]
fn gate_accepts_rob_based_models(#[case] class: CpuModelClass) {
    assert!(class.is_rob_based());
    assert_eq!(class.ensure_rob_based(), Ok(()));
}

#[rstest]
#[case(CpuModelClass::AtomicSimple)]
#[case(CpuModelClass::TimingSimple)]
#[case(CpuModelClass::Minor)]
fn gate_rejects_non_rob_models(#[case] class: CpuModelClass) {
    assert!(!class.is_rob_based());
    assert_eq!(
        class.ensure_rob_based(),
        Err(ConfigError::UnsupportedModel(class.name().to_string()))
    );
}

#[test]
fn test_unsupported_model_message_names_the_class() {
    let err = CpuModelClass::TimingSimple.ensure_rob_based().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("TimingSimple"), "got: {message}");
    assert!(message.contains("ROB"), "got: {message}");
}

#[test]
fn test_model_class_parse() {
    for class in [
        CpuModelClass::AtomicSimple,
        CpuModelClass::TimingSimple,
        CpuModelClass::Minor,
        CpuModelClass::O3,
        CpuModelClass::DefenseO3,
    ] {
        assert_eq!(class.name().parse::<CpuModelClass>(), Ok(class));
    }
}

#[test]
fn test_model_class_parse_unknown() {
    assert_eq!(
        "Pentium4".parse::<CpuModelClass>(),
        Err(ConfigError::UnsupportedModel("Pentium4".to_string()))
    );
}

#[test]
fn test_fresh_instance_has_empty_slots() {
    let cpu = CpuInstance::new(192, 32, 32);
    assert_eq!(cpu.num_rob_entries, 192);
    assert_eq!(cpu.lq_entries, 32);
    assert_eq!(cpu.sq_entries, 32);
    assert!(cpu.trace_listener.is_none());
    assert!(cpu.defense.is_none());
}
