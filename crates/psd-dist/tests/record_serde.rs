use psd_core::ValidationPolicy;
use psd_dist::{
    record_from_json, record_to_json, DensityTag, Distribution, DistributionRecord,
    DistributionSpec,
};

fn spec(json: &str) -> DistributionSpec {
    serde_json::from_str(json).expect("spec json")
}

#[test]
fn spec_density_forms() {
    let cases = [
        (r#"{"y": [1, 2, 3], "density": [0, 1, 0]}"#, DensityTag::Vec),
        (r#"{"y": [1, 2, 3], "density": ["lognormal", 0.5, 0.2]}"#, DensityTag::Fnc),
        (r#"{"y": [1, 2, 3], "density": "exp(-x)"}"#, DensityTag::Fnc),
        (r#"{"y": [1, 2, 3], "density": null}"#, DensityTag::Empty),
        (r#"{"y": [1, 2, 3]}"#, DensityTag::Empty),
    ];
    for (json, tag) in cases {
        let dist = spec(json).build(ValidationPolicy::Strict).expect(json);
        assert_eq!(dist.tag(), tag, "{json}");
        assert_eq!(dist.boundaries(), Some(&[0.0, 1.5, 2.5, 3.5][..]));
    }
}

#[test]
fn spec_with_bad_descriptor_depends_on_policy() {
    let bad = spec(r#"{"y": [1, 2], "density": ["weibull", 1, 2]}"#);
    assert!(bad.build(ValidationPolicy::Strict).is_err());
    let dist = bad.build(ValidationPolicy::Lenient).expect("lenient");
    assert_eq!(dist.tag(), DensityTag::Empty);
}

#[test]
fn record_round_trips_json() {
    let dist = spec(r#"{"label": "seed", "y": [1, 2, 3], "density": [0, 1, 0], "boundaries": [0, 1.5, 2.5, 4.5]}"#)
        .build(ValidationPolicy::Strict)
        .unwrap();
    let record = DistributionRecord::from_distribution(&dist, Some("seed".into())).unwrap();
    assert_eq!(record.m_0, Some(1.0));
    assert_eq!(record.d_10, Some(2.0));
    assert_eq!(record.m_3, Some(8.0));

    let json = record_to_json(&record).unwrap();
    let decoded = record_from_json(&json).unwrap();
    assert_eq!(decoded, record);

    let rebuilt = decoded.to_distribution().unwrap();
    assert_eq!(rebuilt.y(), dist.y());
    assert_eq!(rebuilt.density(), dist.density());
}

#[test]
fn record_without_pivots_rebuilds() {
    let record = DistributionRecord::from_distribution(&Distribution::default(), None).unwrap();
    assert!(record.boundaries.is_empty());
    let rebuilt = record.to_distribution().unwrap();
    assert!(rebuilt.y().is_empty());
    assert_eq!(rebuilt.boundaries(), None);
}

#[test]
fn empty_record_has_no_mean_size() {
    let dist = spec(r#"{"y": [1, 2]}"#).build(ValidationPolicy::Strict).unwrap();
    let record = DistributionRecord::from_distribution(&dist, None).unwrap();
    assert_eq!(record.tag, DensityTag::Empty);
    assert_eq!(record.d_10, None);
    let decoded = record_from_json(&record_to_json(&record).unwrap()).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn parametric_record_keeps_family_parameters() {
    let dist = spec(r#"{"y": [1, 2, 3], "density": ["Normal", 2, 0.5]}"#)
        .build(ValidationPolicy::Strict)
        .unwrap();
    let record = DistributionRecord::from_distribution(&dist, None).unwrap();
    assert_eq!(record.mu, Some(2.0));
    assert_eq!(record.sigma, Some(0.5));
    assert!(record.source.as_deref().unwrap_or_default().starts_with("1/(0.5*"));
}
