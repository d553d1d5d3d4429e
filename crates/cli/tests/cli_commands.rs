use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const PAGE: &str = r#"<body>
  <label for="turma">Turma</label>
  <div class="modal" id="editor">
    <input id="turma" type="text" required=""/>
    <label>Duração</label>
    <input type="number"/>
    <div class="btn-group">
      <button>Sim</button>
      <button>Não</button>
    </div>
  </div>
  <input name="busca" type="text"/>
</body>"#;

#[allow(deprecated)]
fn mapper() -> Command {
    let mut cmd = Command::cargo_bin("modal-mapper").expect("binary");
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn write(dir: &Path, name: &str, body: &str) {
    if let Some(parent) = dir.join(name).parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(dir.join(name), body).unwrap();
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

fn names(fields: &Value) -> Vec<&str> {
    fields
        .as_array()
        .expect("array")
        .iter()
        .map(|field| field["name"].as_str().expect("name"))
        .collect()
}

#[test]
fn scan_prints_field_mappings() {
    let temp = tempdir().unwrap();
    write(temp.path(), "page.xhtml", PAGE);

    let fields = stdout_json(mapper().arg("scan").arg(temp.path().join("page.xhtml")));
    assert_eq!(names(&fields), ["turma", "durao", "busca", "durao_2"]);

    let turma = &fields[0];
    assert_eq!(turma["selector"], "#turma");
    assert_eq!(turma["kind"], "native_input");
    assert_eq!(turma["input_type"], "text");
    assert_eq!(turma["required"], true);
    assert_eq!(turma["data_type"], "string");
    assert!(turma.get("options").is_none());

    let group = &fields[3];
    assert_eq!(group["kind"], "button_group");
    assert_eq!(group["options"], serde_json::json!(["Sim", "Não"]));
}

#[test]
fn scan_within_limits_to_panel_but_keeps_page_labels() {
    let temp = tempdir().unwrap();
    write(temp.path(), "page.xhtml", PAGE);

    let fields = stdout_json(
        mapper()
            .arg("scan")
            .arg(temp.path().join("page.xhtml"))
            .args(["--within", "#editor", "--pretty"]),
    );
    assert_eq!(names(&fields), ["turma", "durao", "durao_2"]);
}

#[test]
fn scan_within_accepts_document_root() {
    let temp = tempdir().unwrap();
    write(
        temp.path(),
        "panel.xhtml",
        r#"<div id="editor"><label>Turma</label><input type="text"/></div>"#,
    );

    let fields = stdout_json(
        mapper()
            .arg("scan")
            .arg(temp.path().join("panel.xhtml"))
            .args(["--within", "#editor"]),
    );
    assert_eq!(names(&fields), ["turma"]);
}

#[test]
fn scan_within_unmatched_selector_fails() {
    let temp = tempdir().unwrap();
    write(temp.path(), "page.xhtml", PAGE);

    mapper()
        .arg("scan")
        .arg(temp.path().join("page.xhtml"))
        .args(["--within", "#missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("#missing"));
}

#[test]
fn scan_honours_config_file() {
    let temp = tempdir().unwrap();
    write(temp.path(), "page.xhtml", PAGE);
    write(
        temp.path(),
        "mapper.toml",
        r#"
        [button_group]
        classes = ["choice-row"]
        "#,
    );

    let fields = stdout_json(
        mapper()
            .arg("scan")
            .arg(temp.path().join("page.xhtml"))
            .arg("--config")
            .arg(temp.path().join("mapper.toml")),
    );
    assert_eq!(names(&fields), ["turma", "durao", "busca"]);
}

#[test]
fn scan_rejects_invalid_config() {
    let temp = tempdir().unwrap();
    write(temp.path(), "page.xhtml", PAGE);
    write(temp.path(), "mapper.toml", "min_checkboxes = 1\n");

    mapper()
        .arg("scan")
        .arg(temp.path().join("page.xhtml"))
        .arg("--config")
        .arg(temp.path().join("mapper.toml"))
        .assert()
        .failure();
}

#[test]
fn scan_rejects_malformed_markup() {
    let temp = tempdir().unwrap();
    write(temp.path(), "broken.xhtml", "<div><input type=\"text\"></div>");

    mapper()
        .arg("scan")
        .arg(temp.path().join("broken.xhtml"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn resolve_lists_matching_elements() {
    let temp = tempdir().unwrap();
    write(temp.path(), "page.xhtml", PAGE);

    let found = stdout_json(
        mapper()
            .arg("resolve")
            .arg(temp.path().join("page.xhtml"))
            .arg("[name=\"busca\"]"),
    );
    assert_eq!(found, serde_json::json!([{ "tag": "input", "name": "busca", "text": "" }]));

    let group = stdout_json(
        mapper()
            .arg("resolve")
            .arg(temp.path().join("page.xhtml"))
            .arg(".btn-group"),
    );
    assert_eq!(group[0]["text"], "Sim Não");
}

#[test]
fn resolve_rejects_unsupported_selector() {
    let temp = tempdir().unwrap();
    write(temp.path(), "page.xhtml", PAGE);

    mapper()
        .arg("resolve")
        .arg(temp.path().join("page.xhtml"))
        .arg("div > input")
        .assert()
        .failure();
}

#[test]
fn batch_scans_every_activity() {
    let temp = tempdir().unwrap();
    write(temp.path(), "modals/page.xhtml", PAGE);
    write(
        temp.path(),
        "modals/quiz.xhtml",
        r#"<div><textarea name="pergunta"></textarea></div>"#,
    );
    write(
        temp.path(),
        "activities.toml",
        r#"
        [activities]
        plano-aula = "modals/page.xhtml"
        quiz = "modals/quiz.xhtml"
        "#,
    );

    let cache = stdout_json(mapper().arg("batch").arg(temp.path().join("activities.toml")));
    let activities: Vec<_> = cache.as_object().expect("object").keys().cloned().collect();
    assert_eq!(activities, ["plano-aula", "quiz"]);
    assert_eq!(names(&cache["plano-aula"]).len(), 4);
    assert_eq!(cache["quiz"][0]["kind"], "native_textarea");
    assert_eq!(cache["quiz"][0]["selector"], "[name=\"pergunta\"]");
}

#[test]
fn batch_fails_on_missing_markup() {
    let temp = tempdir().unwrap();
    write(
        temp.path(),
        "activities.toml",
        "[activities]\nquiz = \"nowhere.xhtml\"\n",
    );

    mapper()
        .arg("batch")
        .arg(temp.path().join("activities.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere.xhtml"));
}
