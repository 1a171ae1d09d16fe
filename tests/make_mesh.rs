use std::path::Path;

use wellmesh::{error::WellmeshError, mesher};

fn write_input(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("input.json");
    std::fs::write(&path, contents).unwrap();
    path
}

fn assert_mesh_format(path: &Path) {
    let contents = std::fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    assert_eq!(lines[0], "coordinates");
    assert!(lines.contains(&"end coordinates"));
    assert!(lines.contains(&"bar2"));
    assert!(lines.contains(&"end bar2"));
    assert_eq!(*lines.last().unwrap(), "return");

    let coordinate_lines = lines
        .iter()
        .position(|l| *l == "end coordinates")
        .unwrap()
        - 1;
    assert_eq!(coordinate_lines, 83);
}

#[test]
fn test_run_plain_mesh() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        r#"{
            "geometry": {
                "internal_diameter": 0.15716,
                "pipe_diameter": 0.17304,
                "well_diameter": 0.20955
            }
        }"#,
    );
    let output_dir = dir.path().join("mesh");

    mesher::run(&input, &output_dir, None).unwrap();

    let mesh_file = output_dir.join("mesh.dat");
    assert!(mesh_file.exists());
    assert_mesh_format(&mesh_file);
}

#[test]
fn test_run_with_standoff_writes_pair() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        r#"{
            "geometry": {
                "internal_diameter": 1.0,
                "pipe_diameter": 2.0,
                "well_diameter": 4.0
            },
            "standoff": {
                "variant": "rigid",
                "dc": 3.6
            }
        }"#,
    );
    let output_dir = dir.path().join("mesh");

    mesher::run(&input, &output_dir, None).unwrap();

    let thick = output_dir.join("mesh_thick.dat");
    let thin = output_dir.join("mesh_thin.dat");
    assert!(thick.exists());
    assert!(thin.exists());
    assert!(!output_dir.join("mesh.dat").exists());
    assert_mesh_format(&thick);
    assert_mesh_format(&thin);

    // the two sides describe different geometry
    assert_ne!(
        std::fs::read_to_string(&thick).unwrap(),
        std::fs::read_to_string(&thin).unwrap()
    );
}

#[test]
fn test_run_flexible_standoff() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        r#"{
            "geometry": {
                "internal_diameter": 1.0,
                "pipe_diameter": 2.0,
                "well_diameter": 4.0
            },
            "standoff": {
                "variant": "flexible",
                "lateral_forces": 1.0,
                "restoring_force": 2.0,
                "gamma_max": 0.1
            }
        }"#,
    );
    let output_dir = dir.path().join("mesh");

    mesher::run(&input, &output_dir, None).unwrap();

    assert!(output_dir.join("mesh_thick.dat").exists());
    assert!(output_dir.join("mesh_thin.dat").exists());
}

#[test]
fn test_run_decimals_override() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        r#"{
            "geometry": {
                "internal_diameter": 1.0,
                "pipe_diameter": 3.0,
                "well_diameter": 6.0,
                "decimal_places": 3
            }
        }"#,
    );
    let output_dir = dir.path().join("mesh");

    mesher::run(&input, &output_dir, Some(7)).unwrap();

    let contents = std::fs::read_to_string(output_dir.join("mesh.dat")).unwrap();
    let first_coordinate = contents.lines().nth(1).unwrap();
    let radius = first_coordinate.split_whitespace().nth(1).unwrap();
    assert_eq!(radius, "0.5000000");
}

#[test]
fn test_run_invalid_diameters_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        r#"{
            "geometry": {
                "internal_diameter": 3.0,
                "pipe_diameter": 1.0,
                "well_diameter": 6.0
            }
        }"#,
    );
    let output_dir = dir.path().join("mesh");

    assert!(matches!(
        mesher::run(&input, &output_dir, None),
        Err(WellmeshError::MeshDiameterInvalid(_))
    ));
    assert!(!output_dir.join("mesh.dat").exists());
}

#[test]
fn test_run_invalid_standoff_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        r#"{
            "geometry": {
                "internal_diameter": 1.0,
                "pipe_diameter": 2.0,
                "well_diameter": 4.0
            },
            "standoff": {
                "variant": "rigid",
                "dc": 2.0
            }
        }"#,
    );
    let output_dir = dir.path().join("mesh");

    assert!(matches!(
        mesher::run(&input, &output_dir, None),
        Err(WellmeshError::StandoffRatioInvalid(_))
    ));
    assert!(!output_dir.join("mesh_thick.dat").exists());
    assert!(!output_dir.join("mesh_thin.dat").exists());
}

#[test]
fn test_run_missing_geometry_field() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        r#"{
            "geometry": {
                "internal_diameter": 1.0,
                "well_diameter": 6.0
            }
        }"#,
    );

    assert!(matches!(
        mesher::run(&input, &dir.path().join("mesh"), None),
        Err(WellmeshError::Input(_))
    ));
}

#[test]
fn test_run_unknown_standoff_variant() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        r#"{
            "geometry": {
                "internal_diameter": 1.0,
                "pipe_diameter": 2.0,
                "well_diameter": 4.0
            },
            "standoff": {
                "variant": "magic"
            }
        }"#,
    );

    assert!(matches!(
        mesher::run(&input, &dir.path().join("mesh"), None),
        Err(WellmeshError::Input(_))
    ));
}

#[test]
fn test_run_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        mesher::run(
            &dir.path().join("nope.json"),
            &dir.path().join("mesh"),
            None
        ),
        Err(WellmeshError::Input(_))
    ));
}
