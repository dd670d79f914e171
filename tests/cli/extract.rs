use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

const HEADER: &str = "msgid \"\"\nmsgstr \"\"\n\"Content-Type: text/plain; charset=UTF-8\\n\"\n";

#[test]
fn test_extract_with_default_config() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.js",
        r#"// Greeting shown on the home page
gettext('Hello');
ngettext('One file', '{{n}} files', n);
pgettext('menu', 'Open');
"#,
    )?;
    test.write_file(
        "src/other.jsx",
        "export const A = () => <b>{gettext('Hello')}</b>;\n",
    )?;
    test.write_file("src/app.test.js", "gettext('Only in tests');\n")?;
    test.write_file("node_modules/lib/index.js", "gettext('Vendored');\n")?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Extracted 3 messages from 2 files into ./messages.pot

    ----- stderr -----
    ");

    let expected = format!(
        "{HEADER}
#. Greeting shown on the home page
#: src/app.js:2 src/other.jsx:1
msgid \"Hello\"
msgstr \"\"

#: src/app.js:3
msgid \"One file\"
msgid_plural \"{{{{n}}}} files\"
msgstr[0] \"\"
msgstr[1] \"\"

#: src/app.js:4
msgctxt \"menu\"
msgid \"Open\"
msgstr \"\"
"
    );
    assert_eq!(test.read_file("messages.pot")?, expected);
    Ok(())
}

#[test]
fn test_extract_to_stdout_with_config() -> Result<()> {
    let test = CliTest::with_file(
        ".potgenrc.json",
        r#"{
  "output": "-",
  "headers": { "Project-Id-Version": "demo 1.0" },
  "extractors": {
    "calls": [{ "calleeNames": ["t"], "arguments": { "text": 0 } }],
    "jsxContent": [{ "selector": "[translate]", "attributes": { "context": "translate-context" } }]
  }
}"#,
    )?;
    test.write_file(
        "src/view.tsx",
        r#"export const View = () => (
  <p translate translate-context="intro">
    Welcome &amp; enjoy
  </p>
);
export const label = t('Save');
"#,
    )?;

    assert_cmd_snapshot!(test.extract_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    msgid ""
    msgstr ""
    "Content-Type: text/plain; charset=UTF-8\n"
    "Project-Id-Version: demo 1.0\n"

    #: src/view.tsx:6
    msgid "Save"
    msgstr ""

    #: src/view.tsx:2
    msgctxt "intro"
    msgid "Welcome & enjoy"
    msgstr ""

    ----- stderr -----
    ✓ Extracted 2 messages from 1 file
    "#);
    assert!(!test.root().join("messages.pot").exists());
    Ok(())
}

#[test]
fn test_extract_html_templates() -> Result<()> {
    let test = CliTest::with_file(
        ".potgenrc.json",
        r#"{
  "output": "-",
  "extractors": {
    "calls": [{ "calleeNames": ["_"], "arguments": { "text": 0 } }],
    "htmlContent": [{ "selector": "[translate]" }],
    "htmlEmbeddedJs": [{ "selector": "script" }]
  }
}"#,
    )?;
    test.write_file("src/app.js", "_('Loaded');\n")?;
    test.write_file(
        "src/index.html",
        r#"<h1 translate>Welcome</h1>
<script>
  _('Loaded');
</script>
"#,
    )?;

    assert_cmd_snapshot!(test.extract_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    msgid ""
    msgstr ""
    "Content-Type: text/plain; charset=UTF-8\n"

    #: src/app.js:1 src/index.html:3
    msgid "Loaded"
    msgstr ""

    #: src/index.html:1
    msgid "Welcome"
    msgstr ""

    ----- stderr -----
    ✓ Extracted 2 messages from 2 files
    "#);
    Ok(())
}

#[test]
fn test_flags_override_config() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "\n\ngettext('Third line');\n")?;

    let mut cmd = test.extract_command();
    cmd.args(["--output", "po/app.pot", "--line-number-start", "10", "-v"]);
    // Verbose mode also turns on debug logging; only the summary is stable.
    insta::with_settings!({filters => vec![(r"(?m)^.*DEBUG.*\n", "")]}, {
        assert_cmd_snapshot!(cmd, @r"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ Extracted 1 message from 1 file into ./po/app.pot
          messages             1
          plural messages      0
          message usages       1
          contexts             0
          parsed files         1
          files with messages  1

        ----- stderr -----
        ");
    });

    let catalog = test.read_file("po/app.pot")?;
    assert!(catalog.contains("#: src/a.js:12\nmsgid \"Third line\"\n"), "{catalog}");
    Ok(())
}

#[test]
fn test_source_root_flag() -> Result<()> {
    let test = CliTest::with_file("web/src/a.js", "gettext('Nested');\n")?;
    test.write_file("other/b.js", "gettext('Elsewhere');\n")?;

    let mut cmd = test.extract_command();
    cmd.args(["--source-root", "web"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Extracted 1 message from 1 file into web/messages.pot

    ----- stderr -----
    ");

    let catalog = test.read_file("web/messages.pot")?;
    assert!(catalog.contains("#: src/a.js:1\nmsgid \"Nested\"\n"), "{catalog}");
    assert!(!catalog.contains("Elsewhere"));
    Ok(())
}

#[test]
fn test_empty_project_writes_header_only() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Extracted 0 messages from 0 files into ./messages.pot

    ----- stderr -----
    ");
    assert_eq!(test.read_file("messages.pot")?, HEADER);
    Ok(())
}

#[test]
fn test_parse_error_fails() -> Result<()> {
    let test = CliTest::with_file("src/broken.js", "gettext('a'\n")?;

    // The parser's own wording is not part of the interface.
    insta::with_settings!({filters => vec![(r"(Failed to parse src/broken\.js): .*", "$1: [MESSAGE]")]}, {
        assert_cmd_snapshot!(test.extract_command(), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        ✘ Failed to parse src/broken.js: [MESSAGE]
        ");
    });
    assert!(!test.root().join("messages.pot").exists());
    Ok(())
}

#[test]
fn test_invalid_extractor_config_fails() -> Result<()> {
    let test = CliTest::with_file(
        ".potgenrc.json",
        r#"{ "extractors": { "calls": [{ "calleeNames": [], "arguments": { "text": 0 } }] } }"#,
    )?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    ✘ Invalid extractor 'extractors.calls[0]': Argument 'calleeName' must be a non-empty list
    ");
    Ok(())
}

#[test]
fn test_no_extractors_fails() -> Result<()> {
    let test = CliTest::with_file(".potgenrc.json", r#"{ "extractors": {} }"#)?;
    test.write_file("a.js", "gettext('Foo');\n")?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    ✘ Missing extractor functions. Provide them when creating the parser or dynamically add extractors using 'add_extractor()'
    ");
    Ok(())
}

#[test]
fn test_plural_conflict_policy() -> Result<()> {
    let test = CliTest::with_file(
        "a.js",
        "ngettext('File', 'Files', n);\nngettext('File', 'Many files', n);\n",
    )?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Extracted 1 message from 1 file into ./messages.pot

    ----- stderr -----
    ");
    assert!(test.read_file("messages.pot")?.contains("msgid_plural \"Files\"\n"));

    let mut cmd = test.extract_command();
    cmd.args(["--plural-conflicts", "reject", "--output", "strict.pot"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    ✘ Conflicting plural text for message "File": kept "Files", rejected "Many files"
    "#);
    assert!(!test.root().join("strict.pot").exists());
    Ok(())
}

#[test]
fn test_missing_source_root_fails() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.extract_command();
    cmd.args(["--source-root", "nope"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    ✘ Source root is not a directory: nope
    ");
    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("--help");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extract translatable strings from JavaScript/TypeScript sources and HTML templates into gettext POT catalogs

    Usage: potgen [COMMAND]

    Commands:
      extract  Extract translatable strings into a POT catalog
      init     Initialize a new .potgenrc.json configuration file
      help     Print this message or the help of the given subcommand(s)

    Options:
      -h, --help     Print help
      -V, --version  Print version

    ----- stderr -----
    ");
    Ok(())
}
