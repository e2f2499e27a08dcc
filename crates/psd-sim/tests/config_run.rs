use std::fs;

use psd_core::{PsdError, ValidationPolicy};
use psd_dist::DensityTag;
use psd_instrument::DegeneratePolicy;
use psd_sim::commands::{encode, moments, remap, summary};
use psd_sim::RunConfig;

const RUN: &str = r#"
policy: strict
remap:
  shape_factor: 0.5235987755982988
  on_degenerate: zeros
distributions:
  - label: spike
    y: [1, 2, 3]
    density: [0, 1, 0]
    boundaries: [0, 1.5, 2.5, 4.5]
  - label: seed
    y: [20, 40, 60, 80, 100, 120, 140, 160]
    density: [lognormal, 4.2, 0.3]
  - y: [1, 2]
"#;

fn load() -> RunConfig {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("run.yaml");
    fs::write(&path, RUN).expect("write config");
    RunConfig::load(&path).expect("load config")
}

#[test]
fn yaml_configuration_loads() {
    let config = load();
    assert_eq!(config.policy, ValidationPolicy::Strict);
    assert_eq!(config.remap.on_degenerate, DegeneratePolicy::Zeros);
    let run = config.build().unwrap();
    assert_eq!(run.ensemble.len(), 3);
    assert_eq!(run.labels[0].as_deref(), Some("spike"));
    assert_eq!(run.labels[2], None);
    assert_eq!(run.ensemble.get(1).unwrap().tag(), DensityTag::Fnc);
    assert_eq!(run.ensemble.get(2).unwrap().tag(), DensityTag::Empty);
}

#[test]
fn missing_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = RunConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, PsdError::Config(_)));
    assert_eq!(err.info().code, "config-read");
}

#[test]
fn invalid_member_under_strict_policy_fails() {
    let config = RunConfig::from_yaml("policy: strict\ndistributions:\n  - y: [3, 1]\n").unwrap();
    let err = config.build().unwrap_err();
    assert!(matches!(err, PsdError::Config(_)));
    assert_eq!(err.info().context.get("distribution").map(String::as_str), Some("0"));

    let lenient = RunConfig::from_yaml("distributions:\n  - y: [3, 1]\n").unwrap();
    assert_eq!(lenient.build().unwrap().ensemble.len(), 1);
}

#[test]
fn moments_follow_requested_indices() {
    let run = load().build().unwrap();
    let output = moments::compute(&run, Some(1.0), &[0, 0]).unwrap();
    assert_eq!(output.values, vec![2.0, 2.0]);
    assert_eq!(output.labels, vec![Some("spike".into()), Some("spike".into())]);

    let missing = moments::compute(&run, None, &[]).unwrap();
    assert!(missing.values.is_empty());
    assert!(missing.indices.is_empty());
}

#[test]
fn remap_uses_configured_policy() {
    let run = load().build().unwrap();
    let entries = remap::compute(&run, None).unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries[0].report.degenerate);
    assert!(!entries[1].report.degenerate);
    assert_eq!(entries[1].record.label.as_deref(), Some("seed"));
    assert_eq!(entries[1].record.density.len(), 300);
    assert!((entries[1].record.m_0.unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn encoded_strings_summarize() {
    let run = load().build().unwrap();
    let lines = encode::encode(&run);
    assert_eq!(lines.len(), 3);
    let summaries = summary::summarize(&lines.join("\n")).unwrap();
    assert_eq!(summaries[0], "Vec; d_10 = 2, m_3 = 8");
    assert!(summaries[1].starts_with("Fnc; d_10 = "));
    assert_eq!(summaries[2], "Empty");
}
