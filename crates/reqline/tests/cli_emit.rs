#![cfg(all(unix, feature = "cli"))]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "reqline-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn reqline() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_reqline"));
    cmd.env_remove("REQLINE_DEBUG_LOG")
        .arg("--log-level")
        .arg("error");
    cmd
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("reqline should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin.as_bytes())
        .expect("stdin should accept input");
    child.wait_with_output().expect("reqline should exit")
}

const VERSION_REQUEST: &str = r#"{"id":1,"method":"server.getVersion"}"#;
const ROOTS_REQUEST: &str = r#"{"id":2,"method":"analysis.setRoots","params":{"included":["/a"]}}"#;

#[test]
fn emit_frames_stdin_to_stdout_with_debug_log() {
    let dir = unique_temp_dir("emit-stdout");
    let debug_log = dir.join("traffic.log");

    let mut cmd = reqline();
    cmd.arg("--format")
        .arg("json")
        .arg("emit")
        .arg("--line-ending")
        .arg("lf")
        .arg("--debug-log")
        .arg(&debug_log);
    let input = "{ \"id\": 1, \"method\": \"server.getVersion\" }\n\
                 {\n  \"id\": 2,\n  \"method\": \"analysis.setRoots\",\n  \"params\": {\"included\": [\"/a\"]}\n}\n";
    let output = run_with_stdin(cmd, input);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf-8");
    assert_eq!(stdout, format!("{VERSION_REQUEST}\n{ROOTS_REQUEST}\n"));

    let log = std::fs::read_to_string(&debug_log).expect("debug log should exist");
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 1);
    let (stamp, frame) = lines[0].split_once(" => ").expect("diagnostic separator");
    assert!(stamp.parse::<u64>().is_ok(), "timestamp: {stamp}");
    assert_eq!(frame, ROOTS_REQUEST);

    let summary: serde_json::Value = serde_json::from_slice(&output.stderr)
        .expect("summary should be JSON on stderr");
    assert_eq!(summary["frames_sent"], 2);
    assert_eq!(summary["frames_mirrored"], 1);
    assert_eq!(summary["frames_suppressed"], 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn emit_file_to_file_with_mirror_all() {
    let dir = unique_temp_dir("emit-file");
    let input = dir.join("requests.json");
    let out = dir.join("wire.txt");
    let debug_log = dir.join("traffic.log");
    std::fs::write(&input, format!("{VERSION_REQUEST} {ROOTS_REQUEST}"))
        .expect("input should be writable");

    let output = reqline()
        .arg("emit")
        .arg("--quiet")
        .arg("--mirror-all")
        .arg("--line-ending")
        .arg("crlf")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .arg("--debug-log")
        .arg(&debug_log)
        .output()
        .expect("reqline should run");

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    let wire = std::fs::read_to_string(&out).expect("output should exist");
    assert_eq!(wire, format!("{VERSION_REQUEST}\r\n{ROOTS_REQUEST}\r\n"));
    let log = std::fs::read_to_string(&debug_log).expect("debug log should exist");
    assert_eq!(log.matches("\r\n").count(), 2);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn emit_rejects_invalid_json_with_data_invalid_code() {
    let mut cmd = reqline();
    cmd.arg("emit").arg("--quiet").arg("--line-ending").arg("lf");
    let output = run_with_stdin(cmd, "{\"id\":1}\n{\"id\":");

    assert_eq!(output.status.code(), Some(60));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "{\"id\":1}\n"
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid request #2"));
}

#[test]
fn emit_missing_input_file_fails() {
    let dir = unique_temp_dir("emit-missing");
    let output = reqline()
        .arg("emit")
        .arg("--input")
        .arg(dir.join("absent.json"))
        .output()
        .expect("reqline should run");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed opening"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn version_prints_package_version() {
    let output = reqline()
        .arg("version")
        .output()
        .expect("reqline should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("reqline {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_exits_with_usage_code() {
    let output = reqline()
        .arg("emit")
        .arg("--no-such-flag")
        .output()
        .expect("reqline should run");

    assert_eq!(output.status.code(), Some(64));
    assert!(!output.stderr.is_empty());
}
