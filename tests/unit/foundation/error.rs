use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TextfxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TextfxError::path_not_found("p")
            .to_string()
            .contains("path not found: p")
    );
    assert!(
        TextfxError::scene_not_found("s")
            .to_string()
            .contains("scene not found: s")
    );
    assert!(
        TextfxError::duplicate_event("x")
            .to_string()
            .contains("duplicate event registration:")
    );
    assert!(TextfxError::event("x").to_string().contains("event error:"));
    assert!(TextfxError::config("x").to_string().contains("config error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TextfxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_lookup_misses_are_not_found() {
    assert!(TextfxError::path_not_found("a").is_not_found());
    assert!(TextfxError::scene_not_found("a").is_not_found());
    assert!(!TextfxError::validation("a").is_not_found());
}
