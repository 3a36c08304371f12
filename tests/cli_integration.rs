// Drives the compiled binary with piped stdin. Charting needs a tty, so these
// use --print/--csv and point --config at a temp dir to leave user settings alone.

use assert_cmd::Command;
use tempfile::tempdir;

const SCENARIO: &str =
    r#"{1: {"Max": 10, "Avg": 5}, 3: {"Max": 30, "Avg": 15}, 2: {"Max": 20, "Avg": 12}}"#;

fn diffplot(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("diffplot").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd.arg("--config").arg(config_dir.join("config.json"));
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn prints_prompt_then_sorted_table() {
    let dir = tempdir().unwrap();
    let stdout = stdout_of(diffplot(dir.path()).arg("--print").write_stdin(SCENARIO));

    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines[0], "Stats dict:");
    assert!(lines[1].contains("difficulty"));
    let keys: Vec<_> = lines[2..]
        .iter()
        .map(|l| l.split_whitespace().next().unwrap())
        .collect();
    assert_eq!(keys, vec!["1", "2", "3"]);
    assert!(lines[3].contains("20") && lines[3].contains("12"));
}

#[test]
fn writes_csv() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("series.csv");
    diffplot(dir.path())
        .arg("--csv")
        .arg(&csv_path)
        .write_stdin("{2: {'Max': 2, 'Avg': 2},\n1: {'Max': 1, 'Avg': 1.5}}\n")
        .assert()
        .success();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv, "difficulty,Max,Avg,runs\n1,1.0,1.5,0\n2,2.0,2.0,0\n");
}

#[test]
fn reads_from_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("report.txt");
    std::fs::write(
        &input,
        "Testing on a.txt...\n--Stats--\n{\n30: {\"Max\": 4, \"Avg\": 3, \"Avgs\": [2, 4]},\n}\n",
    )
    .unwrap();

    let stdout = stdout_of(diffplot(dir.path()).arg("--print").arg("-i").arg(&input));
    assert!(stdout.contains("2..4"));
}

#[test]
fn missing_field_fails() {
    let dir = tempdir().unwrap();
    let output = diffplot(dir.path())
        .arg("--print")
        .write_stdin(r#"{1: {"Max": 1}}"#)
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(
        stderr.lines().collect::<Vec<_>>(),
        vec!["diffplot: entry `1` is missing field \"Avg\""]
    );
}

#[test]
fn truncated_input_fails() {
    let dir = tempdir().unwrap();
    let output = diffplot(dir.path())
        .arg("--print")
        .write_stdin("{1: {\"Max\": 1")
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("input ended before"));
}

#[test]
fn chart_needs_a_terminal() {
    let dir = tempdir().unwrap();
    diffplot(dir.path()).write_stdin(SCENARIO).assert().failure();
}

#[test]
fn save_config_persists_title() {
    let dir = tempdir().unwrap();
    diffplot(dir.path())
        .args(["--print", "--save-config", "-t", "Givens"])
        .write_stdin(SCENARIO)
        .assert()
        .success();

    let saved = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(value["title"], "Givens");
}
