//! Tests that drive the compiled `plantdraw` binary.

use std::fs;
use std::process::Command;

fn plantdraw() -> Command {
    Command::new(env!("CARGO_BIN_EXE_plantdraw"))
}

#[test]
fn convert_writes_drawio_next_to_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("ping.puml");
    fs::write(
        &input,
        "@startuml\nparticipant A\nparticipant B\nA -> B : ping\n@enduml\n",
    )
    .expect("write input");

    let output = plantdraw()
        .arg("convert")
        .arg(&input)
        .output()
        .expect("run plantdraw");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("converted 1/1"), "stdout: {stdout}");

    let written = fs::read_to_string(dir.path().join("ping.drawio")).expect("output file");
    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(written.contains("mxGraphModel"));
}

#[test]
fn convert_honours_explicit_output_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("flow.puml");
    fs::write(&input, "@startuml\nstart\n:Work;\nstop\n@enduml\n").expect("write input");
    let target = dir.path().join("custom.drawio");

    let output = plantdraw()
        .arg("convert")
        .arg(&input)
        .arg("--output")
        .arg(&target)
        .output()
        .expect("run plantdraw");
    assert!(output.status.success());
    assert!(target.exists());
}

#[test]
fn convert_rejects_output_with_multiple_inputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = dir.path().join("a.puml");
    let second = dir.path().join("b.puml");
    fs::write(&first, "@startuml\nA -> B\n@enduml\n").expect("write input");
    fs::write(&second, "@startuml\nA -> B\n@enduml\n").expect("write input");

    let output = plantdraw()
        .arg("convert")
        .arg(&first)
        .arg(&second)
        .arg("--output")
        .arg(dir.path().join("out.drawio"))
        .output()
        .expect("run plantdraw");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("single input"), "stderr: {stderr}");
}

#[test]
fn convert_keeps_going_after_a_bad_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bad = dir.path().join("bad.puml");
    let good = dir.path().join("good.puml");
    fs::write(&bad, "@startuml\njust prose, nothing recognizable\n@enduml\n").expect("write input");
    fs::write(&good, "@startuml\nparticipant A\nA -> A : loop\n@enduml\n").expect("write input");

    let output = plantdraw()
        .arg("convert")
        .arg(&bad)
        .arg(&good)
        .output()
        .expect("run plantdraw");
    assert!(!output.status.success(), "a failed file should fail the run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("converted 1/2"), "stdout: {stdout}");
    assert!(dir.path().join("good.drawio").exists());
    assert!(!dir.path().join("bad.drawio").exists());
}

#[test]
fn detect_reports_type_as_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("uc.puml");
    fs::write(&input, "@startuml\nactor User\nusecase Login\n@enduml\n").expect("write input");

    let output = plantdraw()
        .arg("detect")
        .arg(&input)
        .output()
        .expect("run plantdraw");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"diagram_type\": \"usecase\""), "stdout: {stdout}");
    assert!(stdout.contains("\"supported\": true"));
}

#[test]
fn parse_emits_model_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("seq.puml");
    fs::write(&input, "@startuml\nparticipant A\nA -> A : self\n@enduml\n").expect("write input");

    let output = plantdraw()
        .arg("parse")
        .arg(&input)
        .output()
        .expect("run plantdraw");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let model: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    assert!(model.get("Sequence").is_some(), "model: {model}");
}
