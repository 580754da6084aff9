use panelcam_camtools::{BlockStatus, CamError, ProgramAssembler};
use panelcam_core::{
    init_standard_catalog, ClosedPocketOperation, CompensationSide, ContourOperation,
    DrillOperation, ModelError, OpenPocketOperation, Operation, OperationKind, Panel, Point2D,
    Tool, ToolCatalog, ToolKind,
};
use panelcam_settings::{MachineDialect, MachineProfile};

const TIMESTAMP: &str = "2024-03-01 12:00:00 UTC";

fn panel() -> Panel {
    Panel::new("Cabinet side", 720.0, 560.0, 18.0, "Melamine").unwrap()
}

fn square() -> Vec<Point2D> {
    vec![
        Point2D::new(0.0, 0.0),
        Point2D::new(100.0, 0.0),
        Point2D::new(100.0, 100.0),
        Point2D::new(0.0, 100.0),
    ]
}

fn generate(ops: &[Operation], tools: &ToolCatalog, profile: &MachineProfile) -> String {
    ProgramAssembler::new(profile, tools)
        .with_timestamp(TIMESTAMP)
        .assemble(&panel(), ops)
        .unwrap()
        .to_string()
}

#[test]
fn test_drill_block_motion() {
    let mut tools = ToolCatalog::new();
    tools.add_tool(Tool::new("drill_5", ToolKind::DrillBit, 5.0, 18000, 2000.0).unwrap());
    let profile = MachineProfile::default();
    let op: Operation = DrillOperation::new((100.0, 100.0), 5.0, 10.0, false, "drill_5")
        .unwrap()
        .into();

    let program = ProgramAssembler::new(&profile, &tools)
        .with_timestamp(TIMESTAMP)
        .assemble(&panel(), &[op])
        .unwrap();

    assert_eq!(
        program.blocks[0].lines,
        vec![
            "; Operation 1: Drill [drill_5]",
            "G0 X100.000 Y100.000",
            "G0 Z10.000",
            "G1 Z-10.000 F1000",
            "G0 Z10.000",
        ]
    );
}

#[test]
fn test_multi_pass_closed_square() {
    let tools = init_standard_catalog();
    let profile = MachineProfile::default();
    let op: Operation = ContourOperation::new(square(), true, 18.0, "mill_6")
        .unwrap()
        .with_multi_pass(Some(6.0))
        .unwrap()
        .into();

    let program = ProgramAssembler::new(&profile, &tools)
        .with_timestamp(TIMESTAMP)
        .assemble(&panel(), &[op])
        .unwrap();
    let lines = &program.blocks[0].lines;

    let plunges: Vec<&str> = lines
        .iter()
        .filter(|l| l.starts_with("G1 Z"))
        .map(String::as_str)
        .collect();
    assert_eq!(
        plunges,
        vec!["G1 Z-6.000 F1200", "G1 Z-12.000 F1200", "G1 Z-18.000 F1200"]
    );

    let cuts = lines.iter().filter(|l| l.starts_with("G1 X")).count();
    assert_eq!(cuts, 3 * 5);

    for (i, plunge) in plunges.iter().enumerate() {
        let at = lines.iter().position(|l| l == plunge).unwrap();
        assert_eq!(lines[at + 5], "G1 X0.000 Y0.000 F4000", "pass {}", i + 1);
        assert_eq!(lines[at + 6], "G0 Z10.000", "pass {}", i + 1);
    }
}

#[test]
fn test_open_contour_ends_on_last_point() {
    let tools = init_standard_catalog();
    let profile = MachineProfile::default();
    let op: Operation = ContourOperation::new(square(), false, 5.0, "mill_6")
        .unwrap()
        .into();
    let program = ProgramAssembler::new(&profile, &tools)
        .with_timestamp(TIMESTAMP)
        .assemble(&panel(), &[op])
        .unwrap();
    let lines = &program.blocks[0].lines;
    assert_eq!(lines[lines.len() - 2], "G1 X0.000 Y100.000 F4000");
}

#[test]
fn test_identical_inputs_identical_output() {
    let tools = init_standard_catalog();
    let profile = MachineProfile::default();
    let ops: Vec<Operation> = vec![
        DrillOperation::new((32.0, 37.0), 5.0, 12.0, false, "drill_5")
            .unwrap()
            .into(),
        ClosedPocketOperation::new(square(), 8.0, "mill_12")
            .unwrap()
            .into(),
        ContourOperation::new(square(), true, 18.0, "mill_6")
            .unwrap()
            .with_multi_pass(None)
            .unwrap()
            .into(),
    ];

    let first = generate(&ops, &tools, &profile);
    let second = generate(&ops, &tools, &profile);
    assert_eq!(first, second);
    assert!(first.contains("; Generated: 2024-03-01 12:00:00 UTC\n"));
    assert!(first.ends_with("M30 ; End program\n"));
}

#[test]
fn test_compensation_iff_enabled_and_sided() {
    let tools = init_standard_catalog();
    for enabled in [false, true] {
        for side in [
            CompensationSide::None,
            CompensationSide::Left,
            CompensationSide::Right,
        ] {
            let profile = MachineProfile {
                tool_compensation: enabled,
                ..MachineProfile::default()
            };
            let op: Operation = ContourOperation::new(square(), true, 12.0, "mill_6")
                .unwrap()
                .with_multi_pass(Some(6.0))
                .unwrap()
                .with_compensation(side)
                .into();
            let text = generate(&[op], &tools, &profile);
            let lines: Vec<&str> = text.lines().collect();

            let on: Vec<usize> = lines
                .iter()
                .enumerate()
                .filter(|(_, l)| l.starts_with("G41") || l.starts_with("G42"))
                .map(|(i, _)| i)
                .collect();
            let off: Vec<usize> = lines
                .iter()
                .enumerate()
                .filter(|(_, l)| **l == "G40")
                .map(|(i, _)| i)
                .collect();

            if enabled && side != CompensationSide::None {
                assert_eq!(on.len(), 2);
                assert_eq!(off.len(), 2);
                for (start, stop) in on.iter().zip(&off) {
                    assert!(start < stop);
                    assert_eq!(lines[stop + 1], "G0 Z10.000");
                }
            } else {
                assert!(on.is_empty() && off.is_empty());
            }
        }
    }
}

#[test]
fn test_missing_tool_is_isolated() {
    let tools = init_standard_catalog();
    let profile = MachineProfile::default();
    let ops: Vec<Operation> = vec![
        DrillOperation::new((10.0, 10.0), 5.0, 10.0, false, "drill_5")
            .unwrap()
            .into(),
        ContourOperation::new(square(), true, 5.0, "mill_99")
            .unwrap()
            .into(),
        OpenPocketOperation::new(square(), 12.0, 6.0, "mill_12")
            .unwrap()
            .into(),
    ];

    let program = ProgramAssembler::new(&profile, &tools)
        .with_timestamp(TIMESTAMP)
        .assemble(&panel(), &ops)
        .unwrap();

    assert_eq!(program.blocks.len(), 3);
    assert_eq!(program.blocks[0].status, BlockStatus::Generated);
    assert_eq!(program.blocks[2].status, BlockStatus::Generated);

    let skipped: Vec<_> = program.skipped_operations().collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].index, 1);
    assert_eq!(skipped[0].kind, OperationKind::Contour);
    assert_eq!(
        skipped[0].lines,
        vec!["; ERROR: operation 2 (Contour) skipped, tool 'mill_99' not found"]
    );
    assert!(program.blocks[2]
        .lines
        .iter()
        .any(|l| l == "; Operation 3: Open pocket [mill_12], offset strategy"));
}

#[test]
fn test_line_breaks_in_names_stay_commented() {
    let tools = init_standard_catalog();
    let panel = Panel::new("Side\nG1 Z-50 F5000", 720.0, 560.0, 18.0, "MDF\r\nG0 Z-99").unwrap();
    let op: Operation = DrillOperation::new((10.0, 10.0), 5.0, 10.0, false, "x\nG0 X0 Y0 Z-40")
        .unwrap()
        .into();

    for dialect in MachineDialect::all() {
        let profile = MachineProfile::for_dialect(*dialect);
        let text = ProgramAssembler::new(&profile, &tools)
            .with_timestamp(TIMESTAMP)
            .assemble(&panel, std::slice::from_ref(&op))
            .unwrap()
            .to_string();

        for line in text.lines() {
            if line.contains("G1 Z-50") || line.contains("Z-40") || line.contains("Z-99") {
                assert!(
                    line.starts_with(';') || line.starts_with('('),
                    "{:?}: uncommented line {:?}",
                    dialect,
                    line
                );
            }
        }
    }
}

#[test]
fn test_empty_path_is_structured_error() {
    let tools = init_standard_catalog();
    let profile = MachineProfile::default();
    let mut op = ContourOperation::new(square(), true, 5.0, "mill_6").unwrap();
    op.path.clear();
    let ops: Vec<Operation> = vec![
        DrillOperation::new((10.0, 10.0), 5.0, 10.0, false, "drill_5")
            .unwrap()
            .into(),
        op.into(),
    ];

    let err = ProgramAssembler::new(&profile, &tools)
        .assemble(&panel(), &ops)
        .unwrap_err();
    assert_eq!(
        err,
        CamError::InvalidOperation {
            index: 1,
            kind: OperationKind::Contour,
            source: ModelError::EmptyPath {
                operation: "Contour"
            },
        }
    );
}

#[test]
fn test_invalid_catalog_tool_rejected() {
    let mut tools = ToolCatalog::new();
    tools.add_tool(Tool {
        id: "bad".into(),
        name: String::new(),
        kind: ToolKind::MillingBit,
        diameter: -6.0,
        spindle_speed: 18000,
        feed_rate: 3000.0,
        plunge_rate: None,
        max_depth: None,
    });
    let op: Operation = ContourOperation::new(square(), true, 5.0, "bad")
        .unwrap()
        .into();
    let err = ProgramAssembler::new(&MachineProfile::default(), &tools)
        .assemble(&panel(), &[op])
        .unwrap_err();
    assert!(matches!(err, CamError::InvalidTool { .. }));
}

#[test]
fn test_assembler_shared_across_threads() {
    let tools = init_standard_catalog();
    let profile = MachineProfile::default();
    let assembler = ProgramAssembler::new(&profile, &tools).with_timestamp(TIMESTAMP);
    let ops: Vec<Operation> = vec![ContourOperation::new(square(), true, 5.0, "mill_6")
        .unwrap()
        .into()];
    let panel = panel();

    let outputs: Vec<String> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| assembler.assemble(&panel, &ops).unwrap().to_string()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
}
