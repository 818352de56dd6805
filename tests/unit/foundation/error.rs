use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LockshotError::resource_fetch("x")
            .to_string()
            .contains("resource fetch error:")
    );
    assert!(
        LockshotError::preview_unavailable("x")
            .to_string()
            .contains("preview unavailable:")
    );
    assert!(
        LockshotError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
    assert!(
        LockshotError::image_decode("x")
            .to_string()
            .contains("image decode error:")
    );
    assert!(
        LockshotError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LockshotError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn only_fetch_errors_are_recoverable() {
    assert!(!LockshotError::resource_fetch("x").is_hard_failure());
    assert!(LockshotError::preview_unavailable("x").is_hard_failure());
    assert!(LockshotError::encoding("x").is_hard_failure());
    assert!(LockshotError::image_decode("x").is_hard_failure());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LockshotError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
