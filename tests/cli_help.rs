use assert_cmd::Command;

fn normalize_output(output: &[u8]) -> String {
    String::from_utf8_lossy(output).replace("\r\n", "\n")
}

#[test]
fn cli_help_prints_expected_banner() {
    let assert = Command::cargo_bin("gopaths")
        .expect("binary")
        .arg("--help")
        .assert()
        .success();

    let stdout = normalize_output(&assert.get_output().stdout);
    assert!(stdout.contains("Multiple GOPATH manager"));
    for command in ["init", "enable", "disable", "add", "remove", "config"] {
        assert!(stdout.contains(command), "help should list `{command}`");
    }
}

#[test]
fn add_without_paths_is_a_usage_error() {
    Command::cargo_bin("gopaths")
        .expect("binary")
        .arg("add")
        .assert()
        .failure();
}
