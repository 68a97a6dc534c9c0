//! End-to-end runs of the `fx` binary.

use crate::common::{run_fx, stderr_of, stdout_of, write_file};

const READINGS: &str = "# sensor readings\n0\n1\n1\n2\n2\n2.4\n2.9\n\n3.5\n4\n4.1\n4.2\n4.3\n5\n";

#[test]
fn windows_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "readings.txt", READINGS);
    let config = dir.path().join("missing.toml");

    let output = run_fx(
        &config,
        &[
            "windows",
            "--size",
            "2",
            "--step",
            "1",
            "--input",
            input.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", stderr_of(&output));
    assert_eq!(
        stdout_of(&output),
        "[0, 2) 0 1 1\n\
         [1, 3) 1 1 2 2 2.4 2.9\n\
         [2, 4) 2 2 2.4 2.9 3.5\n\
         [3, 5) 3.5 4 4.1 4.2 4.3\n\
         [4, 6) 4 4.1 4.2 4.3 5\n"
    );
}

#[test]
fn diffs_as_json_use_config_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "values.txt", "1\n2\n3.5\n");
    let config = write_file(
        dir.path(),
        "config.toml",
        "[window]\nsize = 2.0\n\n[output]\nformat = \"json\"\n",
    );

    let output = run_fx(&config, &["diffs", "--input", input.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr_of(&output));

    let records: Vec<serde_json::Value> = stdout_of(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(
        records,
        vec![
            serde_json::json!({"window_start": 1.0, "window_end": 3.0, "evict_count": 0, "added": [1.0, 2.0]}),
            serde_json::json!({"window_start": 3.0, "window_end": 5.0, "evict_count": 2, "added": [3.5]}),
        ]
    );
}

#[test]
fn bad_line_stops_output_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "values.txt", "0\n1\n5\noops\n6\n");
    let config = dir.path().join("missing.toml");

    let output = run_fx(
        &config,
        &["windows", "--size", "2", "--input", input.to_str().unwrap()],
    );
    assert!(!output.status.success());
    // The window holding 5 was still open when the bad line arrived.
    assert_eq!(stdout_of(&output), "[0, 2) 0 1\n[2, 4)\n");
    assert!(stderr_of(&output).contains("line 4"), "{}", stderr_of(&output));
}

#[test]
fn missing_size_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "values.txt", "1\n");
    let config = dir.path().join("missing.toml");

    let output = run_fx(&config, &["windows", "--input", input.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stdout_of(&output).is_empty());
    assert!(stderr_of(&output).contains("no window size"));
}

#[test]
fn broken_config_falls_back_to_flags() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "values.txt", "0\n3\n");
    let config = write_file(dir.path(), "config.toml", "[window\n");

    let output = run_fx(
        &config,
        &[
            "windows",
            "--size",
            "3",
            "--start",
            "-3",
            "--input",
            input.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "[-3, 0)\n[0, 3) 0\n[3, 6) 3\n");
    assert!(stderr_of(&output).contains("failed to parse config"));
}

#[test]
fn empty_stdin_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("missing.toml");

    let output = run_fx(&config, &["diffs", "--size", "1"]);
    assert!(output.status.success(), "{}", stderr_of(&output));
    assert!(stdout_of(&output).is_empty());
}
