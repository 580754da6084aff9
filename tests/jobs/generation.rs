use panelcam::{resolve_profile, Job, MachineDialect, MachineProfile, Panel};
use panelcam_core::{ContourOperation, DrillOperation, Point2D};
use tempfile::TempDir;

fn job() -> Job {
    Job::new(Panel::new("Back", 800.0, 600.0, 8.0, "HDF").unwrap())
        .with_operation(DrillOperation::new((50.0, 50.0), 5.0, 8.0, true, "drill_5").unwrap())
        .with_operation(
            ContourOperation::new(
                vec![
                    Point2D::new(0.0, 0.0),
                    Point2D::new(800.0, 0.0),
                    Point2D::new(800.0, 600.0),
                    Point2D::new(0.0, 600.0),
                ],
                true,
                8.0,
                "mill_6",
            )
            .unwrap(),
        )
}

#[test]
fn test_explicit_profile_wins_over_embedded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("machine.toml");
    MachineProfile::for_dialect(MachineDialect::Scm)
        .save_to_file(&path)
        .unwrap();

    let mut job = job();
    job.profile = Some(MachineProfile::for_dialect(MachineDialect::Homag));

    let profile = resolve_profile(Some(&path), &job, None).unwrap();
    assert_eq!(profile.dialect, MachineDialect::Scm);
}

#[test]
fn test_default_path_used_when_present() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("machine.json");
    let saved = MachineProfile {
        safe_height: 30.0,
        ..MachineProfile::default()
    };
    saved.save_to_file(&path).unwrap();

    let profile = resolve_profile(None, &job(), Some(&path)).unwrap();
    assert_eq!(profile, saved);
}

#[test]
fn test_job_program_text() {
    let program = job()
        .assemble(&MachineProfile::default(), Some("2024-03-01 12:00:00 UTC"))
        .unwrap();
    let text = program.to_string();

    assert!(text.starts_with("; Panel: Back\n; Dimensions: 800 x 600 x 8 mm\n"));
    assert!(text.contains("G1 Z-10.000 F1000\n"));
    assert!(text.contains("; Operation 2: Contour [mill_6]\n"));
    assert_eq!(program.skipped_operations().count(), 0);
    assert_eq!(text.lines().count(), program.line_count());
}
