use psd_core::{PsdError, ValidationPolicy};

#[test]
fn lenient_swallows_advisory_rejections() {
    let outcome = Err(PsdError::validation("negative", "values must be nonnegative"));
    assert_eq!(ValidationPolicy::Lenient.apply(outcome), Ok(()));
}

#[test]
fn strict_propagates_advisory_rejections() {
    let err = PsdError::validation("negative", "values must be nonnegative");
    assert_eq!(ValidationPolicy::Strict.apply(Err(err.clone())), Err(err));
}

#[test]
fn lenient_still_propagates_hard_errors() {
    let err = PsdError::parse("syntax", "unbalanced brackets");
    assert_eq!(ValidationPolicy::Lenient.apply(Err(err.clone())), Err(err));
}

#[test]
fn default_policy_is_lenient() {
    assert_eq!(ValidationPolicy::default(), ValidationPolicy::Lenient);
    let json = serde_json::to_string(&ValidationPolicy::Strict).expect("serialize");
    assert_eq!(json, "\"strict\"");
}
