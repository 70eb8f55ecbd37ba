use std::ffi::OsStr;
use std::path::Path;

use assert_cmd::{assert::Assert, Command};
use mockito::Matcher;
use predicates::prelude::*;

mod stubs;

use stubs::credentials::*;

fn send_text_assert(
    config: &Path,
    api_base_url: &str,
    args: impl IntoIterator<Item = impl AsRef<OsStr>>,
) -> Assert {
    let mut cmd = Command::cargo_bin("picam").unwrap();
    cmd.env("PICAM_CONFIG", config)
        .env("TWILIO_API_BASE_URL", api_base_url)
        .arg("send-text")
        .args(args)
        .assert()
}

#[test]
fn pretend_prints_message() {
    let tempdir = tempfile::tempdir().unwrap();
    let config = write_credentials(tempdir.path(), &[TO_PHONE_1]);

    send_text_assert(&config, "http://127.0.0.1:9", ["--pretend", r"Hello\nfrom", "the", "camera"])
        .success()
        .stdout("\n\nTEXT that would be sent:\nHello\nfrom the camera\n");
}

#[test]
fn sends_to_every_recipient() {
    let tempdir = tempfile::tempdir().unwrap();
    let config = write_credentials(tempdir.path(), &[TO_PHONE_1, TO_PHONE_2]);
    let mut server = mockito::Server::new();

    let mocks: Vec<_> = [TO_PHONE_1, TO_PHONE_2]
        .iter()
        .map(|to| {
            server
                .mock("POST", messages_path(ACCOUNT_SID).as_str())
                .match_body(Matcher::AllOf(vec![
                    Matcher::UrlEncoded("To".into(), to.to_string()),
                    Matcher::UrlEncoded("From".into(), FROM_PHONE.into()),
                    Matcher::UrlEncoded("Body".into(), "Door\nopened".into()),
                ]))
                .with_status(201)
                .with_body(MESSAGE_CREATED)
                .expect(1)
                .create()
        })
        .collect();

    send_text_assert(&config, &server.url(), [r"Door\nopened"])
        .success()
        .stdout("");

    mocks.iter().for_each(|m| m.assert());
}

#[test]
fn test_profile_uses_test_account() {
    let tempdir = tempfile::tempdir().unwrap();
    let config = write_credentials(tempdir.path(), &[TO_PHONE_1]);
    let mut server = mockito::Server::new();

    let m = server
        .mock("POST", messages_path(TEST_ACCOUNT_SID).as_str())
        .match_body(Matcher::UrlEncoded("From".into(), TEST_FROM_PHONE.into()))
        .with_status(201)
        .with_body(MESSAGE_CREATED)
        .expect(1)
        .create();

    send_text_assert(&config, &server.url(), ["--test", "ping"]).success();

    m.assert();
}

#[test]
fn provider_rejection_fails() {
    let tempdir = tempfile::tempdir().unwrap();
    let config = write_credentials(tempdir.path(), &[TO_PHONE_1]);
    let mut server = mockito::Server::new();

    let _m = server
        .mock("POST", messages_path(ACCOUNT_SID).as_str())
        .with_status(401)
        .with_body(r#"{"code": 20003, "message": "Authenticate"}"#)
        .create();

    send_text_assert(&config, &server.url(), ["ping"])
        .failure()
        .stderr(predicate::str::contains("Authenticate"));
}

#[test]
fn empty_message_fails() {
    let tempdir = tempfile::tempdir().unwrap();
    let config = write_credentials(tempdir.path(), &[TO_PHONE_1]);

    send_text_assert(&config, "http://127.0.0.1:9", ["--pretend"])
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("there must be a message"));
}

#[test]
fn missing_credentials_fail() {
    let tempdir = tempfile::tempdir().unwrap();

    send_text_assert(
        &tempdir.path().join("absent.json"),
        "http://127.0.0.1:9",
        ["--pretend", "hello"],
    )
    .failure()
    .stdout("")
    .stderr(predicate::str::contains("could not read credentials file"));
}
