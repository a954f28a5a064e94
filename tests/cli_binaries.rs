use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const CLEANER: &str = env!("CARGO_BIN_EXE_csv-cleaner");
const FFT: &str = env!("CARGO_BIN_EXE_fft-process");

fn run(bin: &str, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn cleaner_success() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("raw.csv");
    let output = dir.path().join("clean.csv");
    fs::write(&input, "t0,1.5\nt1,abc\n").unwrap();

    let out = run(
        CLEANER,
        &["--input_file", arg(&input), "--output_file", arg(&output)],
    );

    assert_eq!(out.status.code(), Some(0));
    let stdout = text(&out.stdout);
    assert!(stdout.contains(&format!("Cleaned data saved to {}", output.display())));
    assert!(stdout.trim_end().ends_with("Exiting CSV Cleaner"));
    assert!(out.stderr.is_empty(), "{}", text(&out.stderr));
    assert_eq!(fs::read_to_string(&output).unwrap(), "time,value\nt0,1.5\n");
}

#[test]
fn cleaner_bad_column() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("raw.csv");
    let output = dir.path().join("clean.csv");
    fs::write(&input, "1,2\n").unwrap();

    let out = run(
        CLEANER,
        &[
            "--input_file",
            arg(&input),
            "--output_file",
            arg(&output),
            "--data_col",
            "5",
        ],
    );

    assert_eq!(out.status.code(), Some(1));
    assert!(text(&out.stderr).contains(
        "Error while cleaning: column index 5 is out of bounds for a table with 2 columns"
    ));
    let stdout = text(&out.stdout);
    assert!(!stdout.contains("Cleaned data saved to"));
    assert!(stdout.contains("Exiting CSV Cleaner"));
    assert!(!output.exists());
}

#[test]
fn cleaner_missing_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("nope.csv");
    let output = dir.path().join("clean.csv");

    let out = run(
        CLEANER,
        &["--input_file", arg(&input), "--output_file", arg(&output)],
    );

    assert_eq!(out.status.code(), Some(1));
    assert!(text(&out.stderr).starts_with("Error while cleaning: could not read"));
    assert!(text(&out.stdout).contains("Exiting CSV Cleaner"));
}

#[test]
fn fft_success() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("signal.csv");
    let output = dir.path().join("fft.png");
    let signal_output = dir.path().join("signal.png");
    let samples: String = (0..32).map(|i| format!("{}\n", (i % 4) as f64)).collect();
    fs::write(&input, format!("signal\n{samples}")).unwrap();

    let out = run(
        FFT,
        &[
            "--input_file",
            arg(&input),
            "--output_file",
            arg(&output),
            "--output_signal_file",
            arg(&signal_output),
            "--fs",
            "100",
        ],
    );

    assert_eq!(out.status.code(), Some(0), "{}", text(&out.stderr));
    let stdout = text(&out.stdout);
    assert!(stdout.contains(&format!("FFT plot saved to {}", output.display())));
    assert!(stdout.contains(&format!("FFT plot saved to {}", signal_output.display())));
    assert!(stdout.trim_end().ends_with("Exiting FFT Process"));
    assert!(output.exists() && signal_output.exists());
}

#[test]
fn fft_missing_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("nope.csv");
    let output = dir.path().join("fft.png");

    let out = run(
        FFT,
        &[
            "--input_file",
            arg(&input),
            "--output_file",
            arg(&output),
            "--fs",
            "100",
        ],
    );

    assert_eq!(out.status.code(), Some(1));
    assert!(text(&out.stderr).starts_with("Error while processing: could not read"));
    assert!(text(&out.stdout).contains("Exiting FFT Process"));
    assert!(!output.exists());
}

#[test]
fn usage_errors_keep_clap_status() {
    let out = run(CLEANER, &["--input_file", "only.csv"]);
    assert_eq!(out.status.code(), Some(2));
}

/// SIGINT while the cleaner is blocked opening a FIFO that never gets a
/// writer: the process has to end on its own, mid-stage.
#[cfg(unix)]
#[test]
fn ctrl_c_exits_immediately() {
    use std::process::Stdio;
    use std::thread;
    use std::time::Duration;

    let dir = TempDir::new().unwrap();
    let fifo = dir.path().join("input.fifo");
    let output = dir.path().join("clean.csv");
    let made = Command::new("mkfifo").arg(&fifo).status().unwrap();
    assert!(made.success());

    let child = Command::new(CLEANER)
        .args(["--input_file", arg(&fifo), "--output_file", arg(&output)])
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // Give the binary time to install its handler and block on the FIFO.
    thread::sleep(Duration::from_millis(750));
    let sent = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(sent.success());

    let out = child.wait_with_output().unwrap();
    assert_eq!(out.status.code(), Some(130));
    assert_eq!(
        text(&out.stdout),
        "User pressed CTL+C to close out the program\nExiting CSV Cleaner\n"
    );
    assert!(!output.exists());
}
