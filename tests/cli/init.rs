use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created ./.potgenrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".potgenrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["output"], "messages.pot");
    assert_eq!(parsed["lineNumberStart"], 1);
    assert_eq!(parsed["extractors"]["calls"].as_array().map(Vec::len), Some(4));
    assert_eq!(parsed["extractors"]["calls"][0]["calleeNames"][0], "gettext");
    assert!(content.contains("\n  \"includes\""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".potgenrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: ./.potgenrc.json already exists
    ");
    assert_eq!(test.read_file(".potgenrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let status = cmd.status()?;
    assert!(status.success());
    test.write_file("src/app.js", "gettext('Ready');\n")?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Extracted 1 message from 1 file into ./messages.pot

    ----- stderr -----
    ");
    assert!(test.read_file("messages.pot")?.contains("msgid \"Ready\""));

    Ok(())
}
