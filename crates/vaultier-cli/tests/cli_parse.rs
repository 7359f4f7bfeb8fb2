use std::process::Command;

fn bin() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_BIN_EXE_vaultier"))
}

#[test]
fn test_help_lists_all_commands() {
    let output = Command::new(bin()).arg("--help").output().expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in [
        "get",
        "set",
        "add",
        "delete",
        "destroy",
        "backup",
        "migrate",
        "migrate-and-destroy",
        "completions",
    ] {
        assert!(stdout.contains(command), "missing command: {}", command);
    }
}

#[test]
fn test_version_flag() {
    let output = Command::new(bin()).arg("--version").output().expect("run");
    assert!(output.status.success());
}

#[test]
fn test_missing_subcommand_fails() {
    let output = Command::new(bin()).output().expect("run");
    assert!(!output.status.success());
}

#[test]
fn test_completions_without_store_connection() {
    // Completions must not prompt for credentials or contact the store.
    let output = Command::new(bin())
        .args(["completions", "bash"])
        .output()
        .expect("run");
    assert!(output.status.success());
    assert!(!output.stdout.is_empty());
}
