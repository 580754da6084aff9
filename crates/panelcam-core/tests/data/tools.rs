use panelcam_core::{init_standard_catalog, resolve, ModelError, ToolCatalog, ToolId, ToolKind};

#[test]
fn test_catalog_from_json() {
    let json = r#"[
        {"id": "mill_6", "kind": "milling_bit", "diameter": 6.0, "spindle_speed": 18000,
         "feed_rate": 4000.0, "plunge_rate": 1000.0, "max_depth": 20.0},
        {"id": "drill_5", "kind": "drill_bit", "diameter": 5.0}
    ]"#;

    let catalog: ToolCatalog = serde_json::from_str(json).unwrap();
    assert_eq!(catalog.len(), 2);
    catalog.validate().unwrap();

    let drill = resolve(&ToolId::from("drill_5"), &catalog).unwrap();
    assert_eq!(drill.kind, ToolKind::DrillBit);
    assert_eq!(drill.spindle_speed, 0);
    assert_eq!(drill.feed_rate, 0.0);
}

#[test]
fn test_catalog_validation_names_the_tool() {
    let json = r#"[{"id": "bad", "kind": "milling_bit", "diameter": 0.0}]"#;
    let catalog: ToolCatalog = serde_json::from_str(json).unwrap();
    match catalog.validate() {
        Err(ModelError::InvalidTool { id, .. }) => assert_eq!(id.as_str(), "bad"),
        other => panic!("expected invalid tool, got {:?}", other),
    }
}

#[test]
fn test_catalog_serializes_sorted_by_id() {
    let catalog = init_standard_catalog();
    let json = serde_json::to_string(&catalog).unwrap();
    let drill = json.find("\"drill_35\"").unwrap();
    let mill = json.find("\"mill_12\"").unwrap();
    assert!(drill < mill);

    let back: ToolCatalog = serde_json::from_str(&json).unwrap();
    assert_eq!(back, catalog);
}

#[test]
fn test_resolution_is_exact() {
    let catalog = init_standard_catalog();
    assert!(catalog.resolve(&ToolId::from("mill_6")).is_ok());
    assert!(catalog.resolve(&ToolId::from("mill_6 ")).is_err());
    assert!(catalog.resolve(&ToolId::from("mill")).is_err());
}
