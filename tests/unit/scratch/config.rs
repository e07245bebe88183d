use super::*;

#[test]
fn defaults_match_the_page_overlay() {
    let cfg = ScratchConfig::default();
    assert_eq!(cfg.brush_diameter, 120.0);
    assert_eq!(cfg.overlay_color, "#39ff14");
    assert_eq!(cfg.reveal_alpha_epsilon, 10);
    assert_eq!(cfg.click_slop, 6.0);
    assert_eq!(cfg.sizing, Sizing::Container);
    assert!(cfg.seed.is_none());
    assert_eq!(
        cfg.overlay().unwrap(),
        Rgba8Premul::from_straight_rgba(0x39, 0xff, 0x14, 255)
    );
    cfg.validate().unwrap();
}

#[test]
fn json_fills_defaults() {
    let cfg = ScratchConfig::from_json_str(
        r#"{
            "sizing": "viewport",
            "seed": { "path": "images/lemon.png", "mode": { "kind": "luminance" } }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.sizing, Sizing::Viewport);
    let seed = cfg.seed.as_ref().unwrap();
    assert_eq!(seed.scale, 0.6);
    assert_eq!(seed.offset, None);
    assert_eq!(seed.mode, SeedMaskMode::Luminance { threshold: 128 });
    assert_eq!(cfg.anchors, ScratchAnchors::default());
}

#[test]
fn json_round_trips_through_pretty_printing() {
    let cfg = ScratchConfig::viewport_with_seed("lemon.png");
    let back = ScratchConfig::from_json_str(&cfg.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn validate_rejects_bad_values() {
    let mut cfg = ScratchConfig::default();
    cfg.brush_diameter = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = ScratchConfig::default();
    cfg.overlay_color = "green".to_string();
    assert!(cfg.validate().is_err());

    let mut cfg = ScratchConfig::viewport_with_seed("x.png");
    cfg.seed.as_mut().unwrap().scale = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = ScratchConfig::default();
    cfg.click_slop = -1.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn unknown_seed_mode_is_a_serde_error() {
    let err = ScratchConfig::from_json_str(r#"{"seed":{"path":"a","mode":{"kind":"hue"}}}"#)
        .unwrap_err();
    assert!(matches!(err, VeilError::Serde(_)));
}
