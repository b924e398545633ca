use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn token_file(json: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("temp file");
    file.write_all(json.as_bytes()).expect("write tokens");
    file
}

const SPEC_TOKENS: &str = r#"[
    {"kind": "Spec", "value": "Login", "line_number": 1},
    {"kind": "Scenario", "value": "Admin logs in", "line_number": 3},
    {"kind": "Step", "value": "login as \"admin\"", "line_number": 5},
    {"kind": "Step", "value": "add users", "line_number": 6},
    {"kind": "TableHeader", "line_number": 7, "args": ["id", "name"]},
    {"kind": "TableRow", "line_number": 8, "args": ["1", "alice"]}
]"#;

const CONCEPT_TOKENS: &str = r#"[
    {"kind": "Spec", "value": "login as <user>", "line_number": 1},
    {"kind": "Step", "value": "enter <user> in \"name\"", "line_number": 2}
]"#;

#[test]
fn formats_spec_canonically() {
    let spec = token_file(SPEC_TOKENS);
    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(spec.path());

    cmd.assert().success().stdout(
        "Login\n=====\nAdmin logs in\n-------------\n* login as \"admin\"\n* add users \n     |id|name |\n     |--|-----|\n     |1 |alice|\n",
    );
}

#[test]
fn config_file_changes_table_indent() {
    let spec = token_file(SPEC_TOKENS);
    let mut config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(config, "[formatting]\ntable_indent = 2").expect("write config");

    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(spec.path()).arg("--config").arg(config.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\n  |id|name |\n"));
}

#[test]
fn treeviz_marks_concept_invocations() {
    let spec = token_file(SPEC_TOKENS);
    let concepts = token_file(CONCEPT_TOKENS);
    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(spec.path())
        .arg("--concepts")
        .arg(concepts.path())
        .arg("--format")
        .arg("treeviz");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("⧉ Login").and(predicate::str::contains("≔ login as")));
}

#[test]
fn ast_json_carries_concept_binding() {
    let spec = token_file(SPEC_TOKENS);
    let concepts = token_file(CONCEPT_TOKENS);
    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(spec.path())
        .arg("-C")
        .arg(concepts.path())
        .arg("-f")
        .arg("ast-json");

    cmd.assert().success().stdout(
        predicate::str::contains("\"heading\": \"Login\"")
            .and(predicate::str::contains("\"is_concept\": true")),
    );
}

#[test]
fn concepts_format_needs_no_spec() {
    let concepts = token_file(CONCEPT_TOKENS);
    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg("--concepts")
        .arg(concepts.path())
        .arg("--format")
        .arg("concepts");

    cmd.assert().success().stdout(predicate::str::contains(
        "# login as <user>\\n* enter <user> in \\\"name\\\"\\n",
    ));
}

#[test]
fn errors_fail_the_run() {
    let spec = token_file(
        r#"[
        {"kind": "Spec", "value": "Login", "line_number": 1},
        {"kind": "Scenario", "value": "Broken", "line_number": 2},
        {"kind": "Step", "value": "open \"unterminated", "line_number": 3}
    ]"#,
    );
    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(spec.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error [line 3]"));
}

#[test]
fn diagnostics_format_reports_json() {
    let spec = token_file(
        r#"[
        {"kind": "Spec", "value": "Login", "line_number": 1},
        {"kind": "Scenario", "value": "Guest", "line_number": 2},
        {"kind": "Step", "value": "login as <user>", "line_number": 3}
    ]"#,
    );
    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(spec.path()).arg("--format").arg("diagnostics");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"severity\": \"Warning\""));
}

#[test]
fn warnings_fail_when_configured() {
    let spec = token_file(
        r#"[
        {"kind": "Spec", "value": "Login", "line_number": 1},
        {"kind": "Scenario", "value": "Guest", "line_number": 2},
        {"kind": "Step", "value": "login as <user>", "line_number": 3}
    ]"#,
    );
    let mut config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(config, "[diagnostics]\nfail_on_warnings = true").expect("write config");

    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(spec.path()).arg("--config").arg(config.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("warning [line 3]"));
}

#[test]
fn invalid_token_file_is_reported() {
    let spec = token_file("not json");
    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(spec.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("is not a token stream"));
}
