use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// 在指定工作目录下运行 ghostchar，可选地写入标准输入
fn run(cwd: &Path, args: &[&str], stdin: Option<&[u8]>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ghostchar"));
    cmd.current_dir(cwd)
        .args(args)
        .env("RUST_LOG", "warn")
        .env("NO_COLOR", "1")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() });

    let mut child = cmd.spawn().expect("spawn ghostchar");
    if let Some(data) = stdin {
        let mut pipe = child.stdin.take().expect("stdin pipe");
        pipe.write_all(data).expect("write stdin");
    }
    child.wait_with_output().expect("wait for ghostchar")
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).expect("utf-8 stdout")
}

fn fixture(dir: &Path) -> (String, String) {
    let dirty = dir.join("dirty.txt");
    let clean = dir.join("clean.txt");
    std::fs::write(&dirty, "Hello\u{200B}World").unwrap();
    std::fs::write(&clean, "plain text\n").unwrap();
    (dirty.display().to_string(), clean.display().to_string())
}

#[test]
fn fail_on_found_flag_sets_exit_status() {
    let dir = tempfile::tempdir().unwrap();
    let (dirty, clean) = fixture(dir.path());

    let out = run(dir.path(), &["scan", &dirty], None);
    assert_eq!(out.status.code(), Some(0));

    let out = run(dir.path(), &["scan", "--fail-on-found", &dirty], None);
    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.contains("1 hidden characters found"));
    assert!(text.contains("• U+200B × 1"));
    assert!(text.contains("Hello[U+200B]World"));

    let out = run(dir.path(), &["scan", "--fail-on-found", &clean], None);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("0 hidden characters found"));
}

#[test]
fn fail_on_found_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let (dirty, _) = fixture(dir.path());
    let cfg = dir.path().join("strict.toml");
    std::fs::write(&cfg, "fail_on_found = true\n").unwrap();
    let cfg = cfg.display().to_string();

    let out = run(dir.path(), &["scan", "--config", &cfg, &dirty], None);
    assert_eq!(out.status.code(), Some(1));

    let out = run(dir.path(), &["scan", "--config", &cfg, "--no-fail-on-found", &dirty], None);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn explicit_config_sets_format() {
    let dir = tempfile::tempdir().unwrap();
    let (dirty, clean) = fixture(dir.path());
    let cfg = dir.path().join("json.toml");
    std::fs::write(&cfg, "format = \"json\"\nthreads = 1\n").unwrap();
    let cfg = cfg.display().to_string();

    let out = run(dir.path(), &["scan", "--config", &cfg, &dirty, &clean], None);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["source"], dirty.as_str());
    assert_eq!(items[0]["report"]["matches"][0]["position"], 5);
    assert_eq!(items[1]["report"]["total"], 0);

    // 命令行参数优先于配置文件
    let out = run(dir.path(), &["scan", "--config", &cfg, "--format", "text", &dirty], None);
    assert!(stdout(&out).starts_with("== "));
}

#[test]
fn default_config_is_discovered_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let (dirty, _) = fixture(dir.path());
    let cfg = "format = \"json\"\nfail_on_found = true\n";
    std::fs::write(dir.path().join("ghostchar.toml"), cfg).unwrap();

    let out = run(dir.path(), &["scan", &dirty], None);
    assert_eq!(out.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(value[0]["report"]["counts"][0]["label"], "U+200B");
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let (dirty, _) = fixture(dir.path());
    let out = run(dir.path(), &["scan", "--config", "absent.toml", &dirty], None);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn reads_stdin_without_paths() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["scan"], Some("café\u{00A0}latte\nnext".as_bytes()));
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("== <stdin>\n"));
    assert!(text.contains("1 hidden characters found"));
    assert!(text.contains("• U+00A0 × 1"));
    assert!(text.contains("café[U+00A0]latte\nnext"));
    assert!(text.contains("Chars: 15"));
}

#[test]
fn dash_means_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["scan", "--fail-on-found", "-"], Some("\u{FEFF}x".as_bytes()));
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("[U+FEFF]x"));
}

#[test]
fn strict_utf8_engine_skips_invalid_stdin() {
    let dir = tempfile::tempdir().unwrap();

    let out = run(dir.path(), &["scan", "--engine", "utf8"], Some(&b"x\xffy"[..]));
    assert!(out.status.success());
    assert!(!stdout(&out).contains("<stdin>"));
    assert!(String::from_utf8_lossy(&out.stderr).contains("skipping undecodable input"));

    let out = run(dir.path(), &["scan", "--engine", "bytes"], Some(&b"x\xffy"[..]));
    assert!(stdout(&out).contains("x\u{FFFD}y"));
}

#[test]
fn oversized_stdin_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let input = &b"\xe2\x80\x8b0123456789"[..];
    let out = run(dir.path(), &["scan", "--max-file-size", "4"], Some(input));
    assert!(out.status.success());
    assert!(!stdout(&out).contains("<stdin>"));
}
