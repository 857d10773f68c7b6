use std::process::Command;

fn run(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-sizing"))
        .args(args)
        .output()
        .expect("pv-sizing process should run");
    (
        output.status.success(),
        String::from_utf8(output.stdout).expect("stdout should be valid UTF-8"),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

/// Extracts the DC/AC ratio printed in the report.
fn parse_ratio(stdout: &str) -> Option<f64> {
    stdout
        .lines()
        .find_map(|l| l.strip_prefix("DC/AC ratio:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|v| v.parse().ok())
}

#[test]
fn presets_run_via_cli_and_report_ratio() {
    for preset in ["rooftop", "commercial", "industrial"] {
        let (ok, stdout, stderr) = run(&["--preset", preset]);
        assert!(ok, "preset {preset} failed: stderr={stderr}");
        assert!(stdout.contains("--- Sizing Report ---"));
        assert!(stdout.contains("Main switchboard"));
        let ratio = parse_ratio(&stdout);
        assert!(
            ratio.is_some_and(|r| r > 1.0 && r < 1.4),
            "unexpected ratio for {preset}: {ratio:?}"
        );
    }
}

#[test]
fn project_files_run_via_cli() {
    for path in [
        "projects/rooftop.toml",
        "projects/commercial.toml",
        "projects/industrial.toml",
        "projects/carport.toml",
    ] {
        let (ok, stdout, stderr) = run(&["--project", path]);
        assert!(ok, "project {path} failed: stderr={stderr}");
        assert!(parse_ratio(&stdout).is_some(), "no ratio for {path}");
    }
}

#[test]
fn catalog_override_is_used() {
    let (ok, stdout, _) = run(&["--preset", "industrial", "--catalog", "projects/huawei.csv"]);
    assert!(ok);
    assert!(stdout.contains("Huawei"));
    assert!(!stdout.contains("Solis"));
}

#[test]
fn schedule_is_exported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("schedule.csv");
    let out_str = out.to_str().expect("utf-8 path");
    let (ok, _, stderr) = run(&["--preset", "industrial", "--schedule-out", out_str]);
    assert!(ok, "stderr={stderr}");
    let csv = std::fs::read_to_string(&out).expect("schedule written");
    assert!(csv.starts_with("circuit,model,count,"));
    assert!(csv.lines().last().is_some_and(|l| l.starts_with("MAIN,")));
}

#[test]
fn invalid_override_fails_validation() {
    let (ok, _, stderr) = run(&["--preset", "rooftop", "--panel-count", "0"]);
    assert!(!ok);
    assert!(stderr.contains("array.panel_count"));
}

#[test]
fn unknown_preset_fails() {
    let (ok, _, stderr) = run(&["--preset", "stadium"]);
    assert!(!ok);
    assert!(stderr.contains("unknown preset"));
}
