use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BoothError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BoothError::asset_load("x")
            .to_string()
            .contains("asset load error:")
    );
    assert!(BoothError::encode("x").to_string().contains("encode error:"));
    assert!(
        BoothError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn classifiers_match_variants() {
    assert!(BoothError::validation("x").is_validation());
    assert!(!BoothError::validation("x").is_asset_load());
    assert!(BoothError::asset_load("x").is_asset_load());
    assert!(!BoothError::encode("x").is_validation());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BoothError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
