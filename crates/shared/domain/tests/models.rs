use mbridge_domain::{Importance, ModId, Platform};

#[test]
fn importance_defaults_to_required_and_parses_lowercase() {
    assert_eq!(Importance::default(), Importance::Required);
    let parsed: Vec<Importance> =
        serde_json::from_str(r#"["required", "recommended", "suggested"]"#).unwrap();
    assert_eq!(parsed, [Importance::Required, Importance::Recommended, Importance::Suggested]);
    assert!(serde_json::from_str::<Importance>(r#""optional""#).is_err());
}

#[test]
fn linkage_rule() {
    assert!(Importance::Required.links(false));
    assert!(Importance::Recommended.links(true));
    assert!(!Importance::Recommended.links(false));
    assert!(!Importance::Suggested.links(true));
}

#[test]
fn mod_ids_are_validated() {
    assert!(ModId::new("alpha.core").is_some());
    assert!(ModId::new("beta-ui_2").is_some());
    for bad in ["", "Alpha.core", ".alpha", "alpha.", "alpha/core", "alpha core"] {
        assert!(ModId::new(bad).is_none(), "{bad:?} should be rejected");
    }
    assert!(serde_json::from_str::<ModId>(r#""Bad/Id""#).is_err());
}

#[test]
fn artifact_names_follow_platform() {
    assert_eq!(Platform::Windows.artifact_name("alpha.core"), "alpha.core.dll");
    assert_eq!(Platform::MacOs.artifact_name("alpha.core"), "alpha.core.dylib");
    assert_eq!(Platform::IOs.artifact_name("alpha.core"), "alpha.core.ios.dylib");
    assert_eq!(Platform::Android32.artifact_name("alpha.core"), "alpha.core.android32.so");
    assert_eq!(Platform::Android64.artifact_name("alpha.core"), "alpha.core.android64.so");
    assert_eq!(Platform::Linux.to_string(), "linux");
}
