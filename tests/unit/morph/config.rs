use super::*;

#[test]
fn presets_validate() {
    MorphConfig::hero().validate().unwrap();
    MorphConfig::selected_works().validate().unwrap();
}

#[test]
fn hero_groups_are_four_by_three() {
    let g = MorphConfig::hero().groups().unwrap();
    assert_eq!(g.len(), 4);
    assert!(g.iter().all(|m| m.len() == 3));
}

#[test]
fn empty_groups_mean_one_group() {
    let g = MorphConfig::selected_works().groups().unwrap();
    assert_eq!(g.len(), 1);
    assert_eq!(g.members(0).len(), 12);
}

#[test]
fn mismatched_tall_points_are_rejected() {
    let mut cfg = MorphConfig::hero();
    if let Some(tall) = cfg.tall_points.as_mut() {
        tall.pop();
    }
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("tall_points has 11 points"));
}

#[test]
fn bad_partition_is_rejected() {
    let mut cfg = MorphConfig::hero();
    cfg.point_groups = vec![vec![0, 1, 2, 3], vec![3, 4, 5, 6, 7, 8, 9, 10, 11]];
    assert!(cfg.validate().is_err());
}

#[test]
fn non_positive_sensitivity_is_rejected() {
    let mut cfg = MorphConfig::selected_works();
    cfg.drag_sensitivity = 0.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn json_roundtrip_and_defaults() {
    let json = r##"{
        "logical_width": 600,
        "logical_height": 800,
        "start_points": [{"x": 300, "y": 35}, {"x": 545, "y": 140}, {"x": 300, "y": 760}],
        "anchors": {
            "svg_root_selector": ".works-svg",
            "polygon_element_id": "works-polygon",
            "handles_container_id": "works-handles"
        }
    }"##;
    let cfg = MorphConfig::from_json_str(json).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.drag_sensitivity, 120.0);
    assert_eq!(cfg.easing, Ease::OutCubic);
    assert!(cfg.anchors.mirror_polygon_ids.is_empty());

    let back = MorphConfig::from_json_str(&cfg.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = MorphConfig::from_json_str("{").unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}
