use std::{fs, path::PathBuf, process::Command};

fn run_bin(args: &[&str]) -> String {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_coinflip"));

    let output = Command::new(bin)
        .args(args)
        .output()
        .expect("failed to execute command");

    let stdout_str =
        std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

    assert!(
        output.status.success(),
        "failed to run binary with {args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
    );

    stdout_str.to_owned()
}

fn test_dir(name: &str) -> PathBuf {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    test_dir
}

#[test]
fn basic_workflow() {
    let test_dir = test_dir("basic_workflow");
    let plot_file = test_dir.join("gaussian_distribution.png");
    let plot_file_str = plot_file
        .to_str()
        .expect("failed to convert plot file to string");

    let stdout = run_bin(&[
        "--n-cases",
        "20000",
        "--seed",
        "42",
        "--output",
        plot_file_str,
    ]);

    let lines: Vec<_> = stdout.lines().collect();
    assert!(lines[0].starts_with("{0: "), "unexpected first line {:?}", lines[0]);
    assert!(lines[0].contains(", 10: "));
    assert!(lines.contains(&"Exact P(5 heads in 10 flips):  24.60938%"));
    assert!(lines.contains(&"Exact P(2 heads in 10 flips):  4.39453%"));

    let bytes = fs::read(&plot_file).expect("failed to read plot file");
    assert!(bytes.starts_with(b"\x89PNG"));

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn config_file_workflow() {
    let test_dir = test_dir("config_file_workflow");

    let config_path = test_dir.join("config.toml");
    let config_contents = String::new()
        + "[sim]\n"
        + "n_cases = 5000\n"
        + "flips_per_case = 0\n"
        + "seed = 7\n"
        + "\n"
        + "[output]\n"
        + "plot_file = \"\"\n"
        + "\n"
        + "[report]\n"
        + "exact = [ [ 4, 1,], [ 0, 0,],]\n";

    fs::write(&config_path, config_contents).expect("failed to write config file");

    let config_path_str = config_path
        .to_str()
        .expect("failed to convert config path to string");

    let stdout = run_bin(&["--config", config_path_str]);

    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines[0], "{0: 100.0}");
    assert!(lines.contains(&"Exact P(1 heads in 4 flips):  25.00000%"));
    assert!(lines.contains(&"Exact P(0 heads in 0 flips):  100.00000%"));

    let n_files = fs::read_dir(&test_dir)
        .expect("failed to read test directory")
        .count();
    assert_eq!(n_files, 1);

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn zero_cases_fails() {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_coinflip"));

    let output = Command::new(bin)
        .args(["--n-cases", "0", "--output", ""])
        .output()
        .expect("failed to execute command");

    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1), "stderr:\n{stderr_str}");
    assert!(output.stdout.is_empty());
    assert!(
        stderr_str.contains("invalid number of cases"),
        "unexpected stderr:\n{stderr_str}"
    );
    assert!(!stderr_str.contains("panicked"));
}

#[test]
fn default_output_path() {
    let test_dir = test_dir("default_output_path");

    let bin = PathBuf::from(env!("CARGO_BIN_EXE_coinflip"));
    let output = Command::new(bin)
        .args(["--n-cases", "2000", "--seed", "3"])
        .current_dir(&test_dir)
        .output()
        .expect("failed to execute command");

    let stdout_str =
        std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");
    assert!(
        output.status.success(),
        "stdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
    );
    assert!(stdout_str.contains("Exact P(2 heads in 10 flips):  4.39453%"));

    let bytes = fs::read(test_dir.join("gaussian_distribution.png"))
        .expect("failed to read default plot file");
    assert!(bytes.starts_with(b"\x89PNG"));

    fs::remove_dir_all(&test_dir).ok();
}
