use proptest::prelude::*;
use psd_core::PsdError;
use psd_dist::{
    format_significant, parse_reconstructable, to_reconstructable_string, to_summary_string,
    DensityInput, DensityTag, Distribution,
};

fn spike() -> Distribution {
    Distribution::new(
        vec![1.0, 2.0, 3.0],
        vec![0.0, 1.0, 0.0],
        Some(vec![0.0, 1.5, 2.5, 4.5]),
    )
    .expect("valid")
}

#[test]
fn vector_distribution_string_is_literal() {
    assert_eq!(
        to_reconstructable_string(&spike()),
        "Distribution([1.0,2.0,3.0],[0.0,1.0,0.0],[0.0,1.5,2.5,4.5])"
    );
}

#[test]
fn vector_distribution_round_trips_bit_exact() {
    let dist = Distribution::new(
        vec![7.0e-300, 0.1 + 0.2, 1.0 / 3.0, 2.5e17],
        vec![1.0e-12, std::f64::consts::PI, 0.0, 42.0],
        None,
    )
    .expect("valid");
    let text = to_reconstructable_string(&dist);
    let parsed = parse_reconstructable(&text).expect("parse");
    assert_eq!(parsed.y(), dist.y());
    assert_eq!(parsed.boundaries(), dist.boundaries());
    assert_eq!(parsed.density(), dist.density());
    assert_eq!(to_reconstructable_string(&parsed), text);
}

#[test]
fn unset_boundaries_stay_unset() {
    let mut dist = Distribution::default();
    dist.set_y(vec![1.0, 2.0]).unwrap();
    let text = to_reconstructable_string(&dist);
    assert_eq!(text, "Distribution([1.0,2.0],[],[])");
    let parsed = parse_reconstructable(&text).unwrap();
    assert_eq!(parsed.boundaries(), None);
    assert_eq!(parsed.tag(), DensityTag::Empty);
}

#[test]
fn parametric_density_writes_literal_parameters() {
    let dist = Distribution::new(vec![1.0, 2.0, 3.0], ("lognormal", 0.5, 0.25), None).unwrap();
    let text = to_reconstructable_string(&dist);
    assert!(text.contains("1/(x*0.25)*exp(-(ln(x)-0.5)^2/(2*0.25^2))"), "{text}");

    let parsed = parse_reconstructable(&text).unwrap();
    assert_eq!(parsed.tag(), DensityTag::Fnc);
    for (a, b) in parsed.density().iter().zip(dist.density()) {
        assert!((a - b).abs() <= 1e-12 * b.abs().max(1.0));
    }
    assert_eq!(to_reconstructable_string(&parsed), text);
}

#[test]
fn whitespace_is_tolerated() {
    let parsed =
        parse_reconstructable("  Distribution( [1, 2] , 2 * x , [0, 1.5, 2.5] ) ").unwrap();
    assert_eq!(parsed.y(), &[1.0, 2.0]);
    assert_eq!(parsed.density(), vec![2.0, 4.0]);
}

#[test]
fn malformed_strings_are_rejected() {
    for text in [
        "Dist([1],[1],[])",
        "Distribution([1],[1])",
        "Distribution([1],[1],[],[])",
        "Distribution([1,2],[1,2],[0,1.5,2.5)",
        "Distribution([1,x],[1,2],[])",
        "Distribution([1,2],foo(x),[])",
    ] {
        let err = parse_reconstructable(text).expect_err(text);
        assert!(matches!(err, PsdError::Parse(_)), "{text}: {err}");
    }
    let err = parse_reconstructable("Distribution([2,1],[],[])").unwrap_err();
    assert!(matches!(err, PsdError::Validation(_)));
}

#[test]
fn summary_strings() {
    assert_eq!(to_summary_string(&Distribution::default()), "Empty");
    assert_eq!(to_summary_string(&spike()), "Vec; d_10 = 2, m_3 = 8");

    let analytic = Distribution::new(
        vec![1.0, 2.0, 3.0],
        DensityInput::Expression("1".into()),
        Some(vec![0.0, 1.5, 2.5, 4.5]),
    )
    .unwrap();
    // m_0 = 4.5, m_1 = 1.5 + 2 + 6, m_3 = 1.5 + 8 + 54
    assert_eq!(to_summary_string(&analytic), "Fnc; d_10 = 2.1, m_3 = 64");
}

#[test]
fn significant_digit_formatting() {
    let cases = [
        (2.0, "2"),
        (8.0, "8"),
        (63.5, "64"),
        (123.0, "1.2e+02"),
        (0.000123, "0.00012"),
        (0.0000123, "1.2e-05"),
        (-0.5, "-0.5"),
        (3.14159, "3.1"),
        (0.0, "0"),
        (f64::NAN, "NaN"),
        (f64::INFINITY, "Inf"),
    ];
    for (value, expected) in cases {
        assert_eq!(format_significant(value, 2), expected, "{value}");
    }
}

#[test]
fn cleared_density_summarises_and_round_trips_as_empty() {
    let mut dist = Distribution::default();
    dist.set_y(vec![1.0, 2.0]).expect("valid");
    dist.set_density(Vec::<f64>::new()).expect("clear");
    assert_eq!(to_summary_string(&dist), "Empty");
    let text = to_reconstructable_string(&dist);
    assert_eq!(text, "Distribution([1.0,2.0],[],[])");
    let parsed = parse_reconstructable(&text).expect("parse");
    assert_eq!(parsed.tag(), dist.tag());
}

#[test]
fn pivots_reassigned_after_construction_round_trip() {
    let mut dist =
        Distribution::new(vec![1.0, 2.0, 3.0], vec![1.0, 1.0, 1.0], None).expect("valid");
    dist.set_y(vec![1.0, 2.0]).expect("valid");
    assert_eq!(dist.boundaries(), None);
    assert_eq!(dist.effective_boundaries(), vec![0.0, 1.5, 2.5]);

    let parsed = parse_reconstructable(&to_reconstructable_string(&dist)).expect("parse");
    assert_eq!(parsed.y(), &[1.0, 2.0]);
    assert_eq!(parsed.boundaries(), dist.boundaries());
    assert_eq!(parsed.density(), dist.density());
}

proptest! {
    #[test]
    fn tabulated_round_trip(values in prop::collection::vec((0.0f64..1.0e9, -1.0e6f64..1.0e6), 1..24)) {
        let mut y: Vec<f64> = values.iter().map(|(y, _)| *y).collect();
        y.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let density: Vec<f64> = values.iter().map(|(_, f)| *f).collect();
        let dist = Distribution::new(y, density, None).unwrap();
        let parsed = parse_reconstructable(&to_reconstructable_string(&dist)).unwrap();
        prop_assert_eq!(parsed.y(), dist.y());
        prop_assert_eq!(parsed.boundaries(), dist.boundaries());
        prop_assert_eq!(parsed.density(), dist.density());
    }
}
