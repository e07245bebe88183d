use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VeilError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        VeilError::missing_element(".hero-svg")
            .to_string()
            .contains("missing element: .hero-svg")
    );
    assert!(VeilError::raster("x").to_string().contains("raster error:"));
    assert!(VeilError::seed("x").to_string().contains("seed mask error:"));
    assert!(
        VeilError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VeilError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
