use panelcam_camtools::ProgramAssembler;
use panelcam_core::{init_standard_catalog, DrillOperation, Operation, Panel};
use panelcam_settings::{MachineDialect, MachineProfile};

fn program_for(dialect: MachineDialect) -> Vec<String> {
    let tools = init_standard_catalog();
    let profile = MachineProfile::for_dialect(dialect);
    let panel = Panel::new("Shelf", 600.0, 300.0, 18.0, "Birch ply").unwrap();
    let op: Operation = DrillOperation::new((32.0, 50.0), 5.0, 12.0, false, "drill_5")
        .unwrap()
        .into();
    ProgramAssembler::new(&profile, &tools)
        .with_timestamp("2024-03-01 12:00:00 UTC")
        .assemble(&panel, &[op])
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_biesse_spelling_and_comments() {
    let lines = program_for(MachineDialect::Biesse);
    assert_eq!(lines[0], "(Panel: Shelf)");
    assert!(lines.contains(&"G00 X32.000 Y50.000".to_string()));
    assert!(lines.contains(&"G01 Z-12.000 F1000".to_string()));
    assert!(lines.contains(&"M03 S18000 (Start spindle)".to_string()));
    assert_eq!(lines.last().unwrap(), "M30 (End program)");
}

#[test]
fn test_scm_program_end() {
    let lines = program_for(MachineDialect::Scm);
    assert_eq!(lines[0], "; Panel: Shelf");
    assert_eq!(lines.last().unwrap(), "M02 ; End program");
}

#[test]
fn test_grbl_has_no_inline_notes() {
    let lines = program_for(MachineDialect::Grbl);
    assert!(lines.contains(&"G90".to_string()));
    assert!(lines.contains(&"M3 S18000".to_string()));
    assert_eq!(lines.last().unwrap(), "M2");
}

#[test]
fn test_dialects_share_motion_content() {
    let strip = |line: &str| -> String {
        line.split([';', '('])
            .next()
            .unwrap_or("")
            .trim()
            .replace("G00", "G0")
            .replace("G01", "G1")
            .replace("M03", "M3")
            .replace("M05", "M5")
    };
    let motion = |lines: Vec<String>| -> Vec<String> {
        lines
            .iter()
            .map(|l| strip(l))
            .filter(|l| l.starts_with('G') && !l.starts_with("G9") && !l.starts_with("G2"))
            .collect()
    };
    let generic = motion(program_for(MachineDialect::Generic));
    for dialect in MachineDialect::all() {
        assert_eq!(motion(program_for(*dialect)), generic, "{}", dialect);
    }
}
