//! End-to-end tests for `cli::run` against files on disk.

use std::time::{Duration, SystemTime};

use cli::{EXIT_IO, EXIT_USAGE, run};
use test_support::TestDir;

fn run_in(dir: &TestDir, args: &[&str]) -> (i32, String, String) {
    let base = dir.path().to_string_lossy().into_owned();
    let mut argv = vec!["filestage".to_owned(), "--base".to_owned(), base];
    argv.extend(args.iter().map(|arg| (*arg).to_owned()));

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run(argv, &mut stdout, &mut stderr);
    (
        code,
        String::from_utf8(stdout).unwrap(),
        String::from_utf8(stderr).unwrap(),
    )
}

fn fixture() -> TestDir {
    let dir = TestDir::new().expect("create test dir");
    dir.write_file("app.js", b"console.log(1);\n").unwrap();
    dir.write_file("style.css", b"body {}\n").unwrap();
    dir.write_file("vendor/lib.js", b"/* vendored */\n").unwrap();
    dir.write_file("notes.md", b"").unwrap();
    dir
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn without_config_every_operand_is_printed() {
    let dir = fixture();
    let (code, stdout, stderr) = run_in(&dir, &["style.css", "app.js"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(stdout, "style.css\napp.js\n");
    assert!(stderr.contains("2 matched, 0 skipped, 0 excluded, 0 failed"));
}

#[test]
fn config_condition_selects_by_extension() {
    let dir = fixture();
    dir.write_file("filestage.toml", b"[condition]\nextensions = \"js\"\n")
        .unwrap();
    let config = dir.path().join("filestage.toml");
    let config = config.to_string_lossy();

    let (code, stdout, stderr) = run_in(
        &dir,
        &["-c", &config, "app.js", "style.css", "vendor/lib.js"],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(stdout, "app.js\nvendor/lib.js\n");
    assert!(stderr.contains("2 matched, 1 skipped, 0 excluded, 0 failed"));
}

#[test]
fn size_bounds_use_file_contents() {
    let dir = fixture();
    dir.write_file("filestage.toml", b"[condition]\nmin_size = 1\n")
        .unwrap();
    let config = dir.path().join("filestage.toml");
    let config = config.to_string_lossy();

    let (code, stdout, _) = run_in(&dir, &["-c", &config, "notes.md", "style.css"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "style.css\n");
}

#[test]
fn modified_after_filters_old_files() {
    let dir = fixture();
    let old = SystemTime::UNIX_EPOCH + Duration::from_secs(946_684_800);
    dir.set_modified("style.css", old).unwrap();
    dir.write_file(
        "filestage.toml",
        b"[condition]\nmodified_after = \"2015-06-01\"\n",
    )
    .unwrap();
    let config = dir.path().join("filestage.toml");
    let config = config.to_string_lossy();

    let (code, stdout, _) = run_in(&dir, &["-c", &config, "style.css", "app.js"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "app.js\n");
}

#[test]
fn literal_false_condition_prints_nothing() {
    let dir = fixture();
    dir.write_file("filestage.toml", b"condition = false\n").unwrap();
    let config = dir.path().join("filestage.toml");
    let config = config.to_string_lossy();

    let (code, stdout, stderr) = run_in(&dir, &["-c", &config, "app.js"]);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("0 matched, 1 skipped"));
}

// ============================================================================
// Exclusion
// ============================================================================

#[test]
fn exclude_option_drops_matching_paths() {
    let dir = fixture();
    let (code, stdout, stderr) = run_in(
        &dir,
        &["--exclude", "vendor", "app.js", "vendor/lib.js"],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout, "app.js\n");
    assert!(stderr.contains("1 matched, 0 skipped, 1 excluded, 0 failed"));
}

#[test]
fn config_and_option_excludes_combine() {
    let dir = fixture();
    dir.write_file("filestage.toml", b"exclude = [\"*.css\"]\n")
        .unwrap();
    let config = dir.path().join("filestage.toml");
    let config = config.to_string_lossy();

    let (code, stdout, _) = run_in(
        &dir,
        &[
            "-c",
            &config,
            "--exclude",
            "vendor",
            "style.css",
            "vendor/lib.js",
            "app.js",
        ],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout, "app.js\n");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn missing_operand_is_an_io_error() {
    let dir = fixture();
    let (code, stdout, stderr) = run_in(&dir, &["app.js", "absent.js"]);
    assert_eq!(code, EXIT_IO);
    assert!(stdout.is_empty());
    assert!(stderr.contains("absent.js"));
}

#[test]
fn missing_config_is_an_io_error() {
    let dir = fixture();
    let (code, _, stderr) = run_in(&dir, &["-c", "/nonexistent/filestage.toml", "app.js"]);
    assert_eq!(code, EXIT_IO);
    assert!(stderr.contains("failed to read config"));
}

#[test]
fn malformed_config_is_a_usage_error() {
    let dir = fixture();
    dir.write_file("filestage.toml", b"[condition]\nsize = 3\n")
        .unwrap();
    let config = dir.path().join("filestage.toml");
    let config = config.to_string_lossy();

    let (code, _, stderr) = run_in(&dir, &["-c", &config, "app.js"]);
    assert_eq!(code, EXIT_USAGE);
    assert!(stderr.contains("invalid config"));
}

#[test]
fn directory_operands_follow_the_condition() {
    let dir = fixture();
    dir.write_file("filestage.toml", b"condition = false\n").unwrap();
    let config = dir.path().join("filestage.toml");
    let config = config.to_string_lossy();

    let (code, stdout, stderr) = run_in(&dir, &["-c", &config, "vendor", "app.js"]);
    assert_eq!(code, 0);
    assert!(stdout.is_empty(), "stdout: {stdout}");
    assert!(stderr.contains("0 matched, 2 skipped, 0 excluded, 0 failed"));
}

#[test]
fn directory_operands_are_excluded() {
    let dir = fixture();
    let (code, stdout, stderr) = run_in(&dir, &["--exclude", "vendor", "vendor", "app.js"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "app.js\n");
    assert!(stderr.contains("1 matched, 0 skipped, 1 excluded, 0 failed"));
}

#[test]
fn matching_directory_operand_is_printed() {
    let dir = fixture();
    let (code, stdout, stderr) = run_in(&dir, &["vendor"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "vendor\n");
    assert!(stderr.contains("1 matched, 0 skipped, 0 excluded, 0 failed"));
}
