use assert_cmd::Command;
use predicates::str::contains;

fn hashlist() -> Command {
    let mut cmd = Command::cargo_bin("hashlist").expect("binary");
    cmd.env_remove("HASHLIST_CONFIG");
    cmd
}

#[test]
fn hashlist_help_works() {
    hashlist()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("URL fragment"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = ["show", "add", "toggle", "remove", "move", "clear", "progress", "ui"];

    for cmd in subcommands {
        hashlist().arg(cmd).arg("--help").assert().success();
    }
}

#[test]
fn add_prints_new_fragment() {
    hashlist()
        .args(["add", "?s=2&0=buy+milk&1=walk+dog", "call mom"])
        .assert()
        .success()
        .stdout(contains("?s=2&0=buy+milk&1=walk+dog&2=call+mom"));
}

#[test]
fn toggle_accepts_full_urls() {
    hashlist()
        .args([
            "toggle",
            "https://example.com/todo.html#?s=2&0=buy+milk&1=walk+dog",
            "0",
        ])
        .assert()
        .success()
        .stdout(contains("?s=3&0=buy+milk&1=walk+dog"));
}

#[test]
fn show_lists_tasks_in_json() {
    let output = hashlist()
        .args(["--json", "show", "#?s=1&0=a&1=b"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["schema_version"], "hashlist.v1");
    assert_eq!(value["command"], "show");
    assert_eq!(value["data"]["tasks"][0]["text"], "a");
    assert_eq!(value["data"]["tasks"][0]["checked"], true);
    assert_eq!(value["data"]["tasks"][1]["checked"], false);
    assert_eq!(value["data"]["progress"]["checked"], 1);
}

#[test]
fn malformed_fragment_is_a_user_error() {
    hashlist()
        .args(["show", "?s=abc&0=x"])
        .assert()
        .code(2)
        .stderr(contains("Malformed fragment"));
}

#[test]
fn out_of_range_index_is_a_user_error() {
    hashlist()
        .args(["remove", "?s=0&0=x", "3"])
        .assert()
        .code(2)
        .stderr(contains("out of range"));
}

#[test]
fn progress_of_empty_list() {
    hashlist()
        .args(["progress", ""])
        .assert()
        .success()
        .stdout(contains("no tasks"));
}

#[test]
fn configured_base_url_prints_full_address() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("hashlist.toml");
    std::fs::write(&config, "[output]\nbase_url = \"https://example.com/todo.html\"\n")?;

    hashlist()
        .arg("--config")
        .arg(&config)
        .args(["move", "?s=1&0=a&1=b", "0", "1"])
        .assert()
        .success()
        .stdout(contains("https://example.com/todo.html#?s=2&0=b&1=a"));
    Ok(())
}

#[test]
fn json_errors_use_the_envelope() {
    let output = hashlist()
        .args(["--json", "show", "?s=abc&0=x"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["schema_version"], "hashlist.v1");
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["kind"], "user_error");
    assert_eq!(value["error"]["code"], 2);
    assert!(value["error"]["details"]["reason"].is_string());
    assert_eq!(value["next_steps"][0], "hashlist clear");
}

#[test]
fn clear_prints_empty_fragment() {
    let output = hashlist()
        .args(["--json", "clear"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["data"]["fragment"], "");
    assert!(value.get("warnings").is_none());
}
