use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PosterError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PosterError::geodata("x")
            .to_string()
            .contains("geodata error:")
    );
    assert!(PosterError::render("x").to_string().contains("render error:"));
    assert!(
        PosterError::location_not_found("Atlantis")
            .to_string()
            .contains("location not found: Atlantis")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PosterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
