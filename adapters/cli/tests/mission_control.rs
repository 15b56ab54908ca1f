use std::{
    fs,
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

fn run_mission(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mars-rover"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to launch mars-rover");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write scripted input");

    child.wait_with_output().expect("mars-rover did not exit")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn interactive_mission_reaches_expected_status() {
    let dir = tempfile::tempdir().expect("temp dir");
    let script = "5\n5\n1\n2\n2\n0\n0\nN\nMMMMRM\nS\nQ\n";

    let output = run_mission(dir.path(), &[], script);
    let stdout = stdout_of(&output);

    assert!(output.status.success(), "mission failed: {stdout}");
    assert!(stdout.starts_with("=== Mars Rover Mission Control ===\n"));
    assert!(stdout.contains("Rover moved to (1, 4) facing E"));
    assert!(stdout.contains("Rover is at (1, 4) facing E. Last 5 commands: M, M, M, R, M."));
    assert!(stdout.contains("Mission Control: Exiting..."));

    let log = fs::read_to_string(dir.path().join("mars-rover.log")).expect("mission log written");
    assert!(log.contains("Batch commands executed: MMMMRM"));
    assert!(log.contains("Mission terminated"));
}

#[test]
fn mission_file_batch_reports_collision() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mission = dir.path().join("mission.toml");
    fs::write(
        &mission,
        "[terrain]\nwidth = 3\nheight = 3\nobstacles = [{ x = 1, y = 0 }]\n\n\
         [rover]\nx = 0\ny = 0\ndirection = \"E\"\n",
    )
    .expect("write mission file");
    let mission = mission.to_str().expect("utf8 path");

    let output = run_mission(
        dir.path(),
        &["--mission", mission, "--commands", "M", "--no-log-file"],
        "",
    );
    let stdout = stdout_of(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stdout.contains("Mission Control Error: Cannot move to (1, 0): Obstacle detected"));
    assert!(stdout.contains("Rover is at (0, 0) facing E. No commands executed."));
    assert!(stderr.contains("batch 'M' did not complete"));
    assert!(!dir.path().join("mars-rover.log").exists());
}

#[test]
fn exhausted_setup_prompt_exits_with_error() {
    let dir = tempfile::tempdir().expect("temp dir");

    let output = run_mission(dir.path(), &["--max-attempts", "2"], "zero\n0\n");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Failed after 2 attempts: Width must be a positive integer"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn closed_input_ends_mission_cleanly() {
    let dir = tempfile::tempdir().expect("temp dir");

    let output = run_mission(dir.path(), &["--no-log-file"], "2\n2\n0\n1\n1\nw\nM\n");
    let stdout = stdout_of(&output);

    assert!(output.status.success(), "mission failed: {stdout}");
    assert!(stdout.contains("Rover moved to (0, 1) facing W"));
}
