use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    std::env::temp_dir().join(format!("timefork-smoke-{}-{}", name, nanos))
}

#[test]
fn compiles_bundled_story() {
    let bin = env!("CARGO_BIN_EXE_tf-compile");
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let scripts = manifest_dir.join("..").join("..").join("states");
    let out = temp_path("story");

    let mut expected = fs::read_dir(&scripts)
        .expect("bundled scripts must exist")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("txt"))
        .filter_map(|path| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .collect::<Vec<_>>();
    expected.sort();
    assert!(!expected.is_empty(), "expected bundled scripts");

    let output = Command::new(bin)
        .arg(&scripts)
        .arg(&out)
        .output()
        .expect("cli should execute");

    if !output.status.success() {
        panic!(
            "compile failed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("RESULT:OK"), "stdout: {}", stdout);
    let compiled = stdout
        .lines()
        .filter_map(|line| line.strip_prefix("COMPILED:"))
        .map(str::to_string)
        .collect::<Vec<_>>();
    assert_eq!(compiled, expected);
    for name in &compiled {
        assert!(out.join(name).is_file(), "missing asset {}", name);
    }

    let _ = fs::remove_dir_all(out);
}

#[test]
fn malformed_transition_reports_error_protocol() {
    let bin = env!("CARGO_BIN_EXE_tf-compile");
    let root = temp_path("bad");
    let scripts = root.join("states");
    fs::create_dir_all(&scripts).expect("mkdir");
    fs::write(scripts.join("start.txt"), "Hello.\n-\n[Next -> start\n").expect("write");

    let output = Command::new(bin)
        .arg(&scripts)
        .arg(root.join("out"))
        .output()
        .expect("cli should execute");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RESULT:ERROR"));
    assert!(stdout.contains("ERROR_CODE:COMPILE_TRANSITION_SYNTAX"));
    assert!(stdout.contains("ERROR_LINE:3"));
    assert!(stdout.contains("ERROR_MSG_JSON:"));
    assert!(!root.join("out").exists());

    let _ = fs::remove_dir_all(root);
}
