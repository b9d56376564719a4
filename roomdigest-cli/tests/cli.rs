use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

const OPS_PAYLOAD: &str = r#"{
  "room": {"title": "Ops"},
  "link": "https://x/r/1",
  "messages": [
    {"sender_name": "Ann", "timestamp": 1700000000000, "kind": "m.text", "body_text_plain": "hi"},
    {"sender_name": "Bo", "timestamp": 1700000060000, "kind": "m.emote", "body_text_plain": "waves"}
  ]
}"#;

// 2023-11-14T22:13:20Z shifted to 12:00:20.
const OPS_OFFSET: &str = "-10:13";

fn write_payload(temp: &TempDir, raw: &str) -> PathBuf {
    let path = temp.path().join("payload.json");
    fs::write(&path, raw).expect("write payload");
    path
}

fn roomdigest(temp: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("roomdigest"));
    cmd.env("ROOMDIGEST_CONFIG", temp.path().join("missing-config.json"));
    cmd
}

#[test]
fn renders_digest_from_file() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(&temp, OPS_PAYLOAD);

    roomdigest(&temp)
        .arg(&payload)
        .arg("--footer")
        .arg("Voir {room_title} à {link}")
        .arg("--utc-offset")
        .arg(OPS_OFFSET)
        .assert()
        .success()
        .stdout("Ann (12:00)\nhi\n* Bo (12:01)\nwaves\n\nVoir Ops à https://x/r/1\n");
}

#[test]
fn reads_payload_from_stdin() {
    let temp = tempdir().expect("tempdir");

    roomdigest(&temp)
        .arg("-")
        .arg("--locale")
        .arg("fr")
        .arg("--utc-offset=Z")
        .write_stdin(OPS_PAYLOAD)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ann (22:13)\nhi\n"))
        .stdout(predicate::str::contains("* Bo (22:14)\nwaves\n"))
        .stdout(predicate::str::ends_with("Voir Ops à https://x/r/1\n"));
}

#[test]
fn defaults_to_english_footer() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(&temp, OPS_PAYLOAD);

    roomdigest(&temp)
        .arg(&payload)
        .arg("--utc-offset=+00:00")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\n\nSee Ops at https://x/r/1\n"));
}

#[test]
fn empty_batch_prints_footer_only() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(
        &temp,
        r#"{"room":{"title":"Ops"},"link":"https://x/r/1","messages":[]}"#,
    );

    roomdigest(&temp)
        .arg(&payload)
        .assert()
        .success()
        .stdout("See Ops at https://x/r/1\n");
}

#[test]
fn missing_messages_fails() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(&temp, r#"{"room":{"title":"Ops"},"link":"https://x/r/1"}"#);

    roomdigest(&temp)
        .arg(&payload)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error: invalid payload"));
}

#[test]
fn unknown_kind_prints_header_only() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(
        &temp,
        r#"{"room":{"title":"Ops"},"link":"https://x/r/1","messages":[
            {"sender_name":"Ann","timestamp":1700000000000,"kind":"m.location","body_text_plain":"geo:1,2"},
            {"sender_name":"Bo","timestamp":1700000060000,"kind":"m.notice","body_text_plain":"ok"}
        ]}"#,
    );

    roomdigest(&temp)
        .arg(&payload)
        .arg("--utc-offset")
        .arg("Z")
        .assert()
        .success()
        .stdout("Ann (22:13)\nBo (22:14)\nok\n\nSee Ops at https://x/r/1\n");
}

#[test]
fn missing_kind_and_null_body_still_render() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(
        &temp,
        r#"{"room":{"title":"Ops"},"link":"https://x/r/1","messages":[
            {"sender_name":"Ann","timestamp":1700000000000,"body_text_plain":"no kind"},
            {"sender_name":"Bo","timestamp":1700000060000,"kind":null},
            {"sender_name":"Cy","timestamp":1700000120000,"kind":"m.image","body_text_plain":null}
        ]}"#,
    );

    roomdigest(&temp)
        .arg(&payload)
        .arg("--utc-offset=Z")
        .assert()
        .success()
        .stdout("Ann (22:13)\nBo (22:14)\nCy (22:15)\n\n\nSee Ops at https://x/r/1\n");
}

#[test]
fn subject_flag_prints_subject_first() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(&temp, OPS_PAYLOAD);

    roomdigest(&temp)
        .arg(&payload)
        .arg("--subject")
        .arg("--utc-offset=Z")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "[Matrix] You have messages on Matrix in the Ops room...\n\nAnn (22:13)\nhi\n",
        ));
}

#[test]
fn subject_follows_config_locale_and_app_name() {
    let temp = tempdir().expect("tempdir");
    let config = temp.path().join("config.json");
    fs::write(&config, r#"{"locale":"fr","app_name":"Element"}"#).expect("write config");
    let payload = write_payload(
        &temp,
        r#"{"room":{"title":""},"link":"https://x/r/1","messages":[
            {"sender_name":"Ann","timestamp":1700000000000,"kind":"m.text","body_text_plain":"hi"}
        ]}"#,
    );

    roomdigest(&temp)
        .arg(&payload)
        .arg("--config")
        .arg(&config)
        .arg("--subject")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "[Element] Vous avez un message sur Element de Ann...\n\n",
        ));
}

#[test]
fn subject_flag_skips_empty_batch() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(
        &temp,
        r#"{"room":{"title":"Ops"},"link":"https://x/r/1","messages":[]}"#,
    );

    roomdigest(&temp)
        .arg(&payload)
        .arg("--subject")
        .assert()
        .success()
        .stdout("See Ops at https://x/r/1\n");
}

#[test]
fn raw_outputs_json_view() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(&temp, OPS_PAYLOAD);

    roomdigest(&temp)
        .arg(&payload)
        .arg("--raw")
        .arg("--utc-offset")
        .arg("Z")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fragments\""))
        .stdout(predicate::str::contains(
            "\"subject\": \"[Matrix] You have messages on Matrix in the Ops room...\"",
        ))
        .stdout(predicate::str::contains("\"header\": \"* Bo (22:14)\""))
        .stdout(predicate::str::contains("\"footer\": \"See Ops at https://x/r/1\""));
}

#[test]
fn config_file_sets_locale_and_links() {
    let temp = tempdir().expect("tempdir");
    let config = temp.path().join("config.json");
    fs::write(
        &config,
        r#"{"locale":"fr-FR","utc_offset":"+01:00","app_name":"Vector"}"#,
    )
    .expect("write config");
    let payload = write_payload(
        &temp,
        r#"{"room":{"title":"Ops"},"room_id":"!ops:example.org","messages":[
            {"sender_name":"Ann","ts":1700000000000,"msgtype":"m.file","body_text_plain":"report.pdf"}
        ]}"#,
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("roomdigest"));
    cmd.env("ROOMDIGEST_CONFIG", &config)
        .arg(&payload)
        .assert()
        .success()
        .stdout(
            "Ann (23:13)\nreport.pdf\n\nVoir Ops à https://vector.im/beta/#/room/!ops:example.org\n",
        );
}

#[test]
fn explicit_config_flag_overrides_env() {
    let temp = tempdir().expect("tempdir");
    let config = temp.path().join("digest.json");
    fs::write(&config, r#"{"footer_pattern":"Open {room_title}: {link}"}"#).expect("write");
    let payload = write_payload(
        &temp,
        r#"{"room":{"title":"Ops"},"link":"https://x/r/1","messages":[]}"#,
    );

    roomdigest(&temp)
        .arg(&payload)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout("Open Ops: https://x/r/1\n");
}

#[test]
fn missing_link_and_room_id_fails() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(&temp, r#"{"room":{"title":"Ops"},"messages":[]}"#);

    roomdigest(&temp)
        .arg(&payload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("neither link nor room_id"));
}

#[test]
fn invalid_footer_placeholder_fails() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(&temp, OPS_PAYLOAD);

    roomdigest(&temp)
        .arg(&payload)
        .arg("--footer")
        .arg("See {room} at {link}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid footer template"));
}

#[test]
fn unknown_locale_fails() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(&temp, OPS_PAYLOAD);

    roomdigest(&temp)
        .arg(&payload)
        .arg("--locale")
        .arg("xx")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown locale: xx (supported: en, fr)"));
}

#[test]
fn invalid_time_format_fails() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(&temp, OPS_PAYLOAD);

    roomdigest(&temp)
        .arg(&payload)
        .arg("--time-format")
        .arg("%Q")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid time pattern"));
}

#[test]
fn malformed_payload_reports_path() {
    let temp = tempdir().expect("tempdir");
    let payload = write_payload(&temp, "{not json");

    roomdigest(&temp)
        .arg(&payload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid json in"))
        .stderr(predicate::str::contains("payload.json"));
}

#[test]
fn missing_payload_file_fails() {
    let temp = tempdir().expect("tempdir");

    roomdigest(&temp)
        .arg(temp.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("i/o error on"));
}
