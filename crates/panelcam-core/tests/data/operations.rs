use panelcam_core::{
    CompensationSide, EntryStrategy, ExitStrategy, ModelError, Operation, OperationKind,
    PocketStrategy,
};

#[test]
fn test_operations_from_json() {
    let json = r#"[
        {"type": "drill", "position": {"x": 100.0, "y": 100.0}, "diameter": 5.0, "depth": 10.0, "tool_id": "drill_5"},
        {"type": "contour", "path": [{"x": 0.0, "y": 0.0}, {"x": 50.0, "y": 0.0}],
         "closed": false, "depth": 12.0, "multi_pass": true, "per_pass_depth": 4.0,
         "entry": {"type": "ramp", "angle": 5.0}, "exit": "straight",
         "compensation": "left", "tool_id": "mill_6"},
        {"type": "closed_pocket", "path": [{"x": 10.0, "y": 10.0}], "strategy": "zigzag",
         "depth": 6.0, "entry": {"type": "spiral", "radius": 3.0}, "tool_id": "mill_6"},
        {"type": "open_pocket", "path": [{"x": 0.0, "y": 5.0}, {"x": 600.0, "y": 5.0}],
         "width": 8.0, "depth": 9.0, "tool_id": "mill_6"}
    ]"#;

    let ops: Vec<Operation> = serde_json::from_str(json).unwrap();
    assert_eq!(ops.len(), 4);
    let kinds: Vec<OperationKind> = ops.iter().map(Operation::kind).collect();
    assert_eq!(
        kinds,
        vec![
            OperationKind::Drill,
            OperationKind::Contour,
            OperationKind::ClosedPocket,
            OperationKind::OpenPocket
        ]
    );

    match &ops[0] {
        Operation::Drill(drill) => assert!(!drill.through),
        other => panic!("expected drill, got {:?}", other.kind()),
    }

    match &ops[1] {
        Operation::Contour(contour) => {
            assert!(contour.multi_pass);
            assert_eq!(contour.per_pass_depth, Some(4.0));
            assert_eq!(contour.entry, Some(EntryStrategy::Ramp { angle: 5.0 }));
            assert_eq!(contour.exit, Some(ExitStrategy::Straight));
            assert_eq!(contour.compensation, CompensationSide::Left);
        }
        other => panic!("expected contour, got {:?}", other.kind()),
    }

    match &ops[2] {
        Operation::ClosedPocket(pocket) => {
            assert_eq!(pocket.strategy, PocketStrategy::Zigzag);
            assert!(!pocket.closed);
        }
        other => panic!("expected closed pocket, got {:?}", other.kind()),
    }

    for op in &ops {
        op.validate().unwrap();
    }
}

#[test]
fn test_deserialized_empty_path_fails_validation() {
    let json = r#"{"type": "contour", "path": [], "depth": 5.0, "tool_id": "mill_6"}"#;
    let op: Operation = serde_json::from_str(json).unwrap();
    assert_eq!(
        op.validate(),
        Err(ModelError::EmptyPath {
            operation: "Contour"
        })
    );
}

#[test]
fn test_operations_from_toml() {
    let toml_src = r#"
[[operations]]
type = "drill"
diameter = 8.0
depth = 18.0
through = true
tool_id = "drill_8"
position = { x = 32.0, y = 37.0 }
"#;

    #[derive(serde::Deserialize)]
    struct Wrapper {
        operations: Vec<Operation>,
    }

    let wrapper: Wrapper = toml::from_str(toml_src).unwrap();
    match &wrapper.operations[0] {
        Operation::Drill(drill) => {
            assert!(drill.through);
            assert_eq!(drill.position.x, 32.0);
        }
        other => panic!("expected drill, got {:?}", other.kind()),
    }
}
