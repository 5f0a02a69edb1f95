use std::fs;

use anyhow::Result;
use serde_json::Value;
use tempfile::tempdir;

use crate::common::{
    copy_fixture, has_han, run_binary, write_config, FakeDeepL, TEST_AUTH_KEY,
};

#[test]
fn translate_replace_rewrites_listed_files() -> Result<()> {
    let server = FakeDeepL::start(200)?;
    let temp = tempdir()?;
    let source = copy_fixture("tests/fixtures/sample.cs", temp.path())?;
    let manifest = temp.path().join("cs_file_path.txt");
    fs::write(&manifest, format!("\u{feff}{}\n\n", source.display()))?;
    let config = write_config(temp.path(), &server.endpoint, Some(TEST_AUTH_KEY))?;

    let output = run_binary(&[
        "--config",
        &config.display().to_string(),
        "translate",
        &manifest.display().to_string(),
    ])?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("TRANSLATION SUMMARY"), "{stdout}");
    assert!(stdout.contains("Translation mode: Replace"), "{stdout}");
    assert!(stdout.contains("Files rewritten: 1"), "{stdout}");

    let rewritten = fs::read_to_string(&source)?;
    assert!(!has_han(&rewritten), "{rewritten}");
    assert!(rewritten.contains("var total = 0; //English 3"), "{rewritten}");

    let requests = server.requests();
    assert!(!requests.is_empty());
    for request in &requests {
        assert_eq!(
            request.authorization.as_deref(),
            Some(format!("DeepL-Auth-Key {TEST_AUTH_KEY}").as_str())
        );
        assert_eq!(request.body["source_lang"], "ZH");
        assert_eq!(request.body["target_lang"], "EN-US");
    }
    Ok(())
}

#[test]
fn translate_append_json_reports_without_writing() -> Result<()> {
    let server = FakeDeepL::start(200)?;
    let temp = tempdir()?;
    let source = copy_fixture("tests/fixtures/sample.cs", temp.path())?;
    let before = fs::read_to_string(&source)?;
    let manifest = temp.path().join("files.txt");
    fs::write(&manifest, source.display().to_string())?;
    let config = write_config(temp.path(), &server.endpoint, None)?;

    let output = run_binary(&[
        "--config",
        &config.display().to_string(),
        "translate",
        &manifest.display().to_string(),
        "--append",
        "--auth-key",
        TEST_AUTH_KEY,
        "--format",
        "json",
    ])?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(fs::read_to_string(&source)?, before);

    let payload: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(payload["mode"], "Append");
    assert_eq!(payload["write_output"], false);
    let file = &payload["files"][0];
    assert_eq!(file["multiline_count"], 2);
    assert_eq!(file["singleline_count"], 1);
    assert_eq!(file["doc_block_count"], 1);
    assert_eq!(file["written"], false);
    assert_eq!(payload["summary"]["files_processed"], 1);
    Ok(())
}

#[test]
fn backend_failures_become_inline_markers() -> Result<()> {
    let server = FakeDeepL::start(456)?;
    let temp = tempdir()?;
    let source = copy_fixture("tests/fixtures/sample.cs", temp.path())?;
    let manifest = temp.path().join("files.txt");
    fs::write(&manifest, source.display().to_string())?;
    let config = write_config(temp.path(), &server.endpoint, Some(TEST_AUTH_KEY))?;

    let output = run_binary(&[
        "--config",
        &config.display().to_string(),
        "translate",
        &manifest.display().to_string(),
    ])?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("Total characters translated: 0"), "{stdout}");
    let rewritten = fs::read_to_string(&source)?;
    assert!(
        rewritten.contains("[Translation Error: backend answered with status 456"),
        "{rewritten}"
    );
    Ok(())
}

#[test]
fn missing_manifest_is_reported_and_batch_is_empty() -> Result<()> {
    let server = FakeDeepL::start(200)?;
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.endpoint, Some(TEST_AUTH_KEY))?;
    let manifest = temp.path().join("absent.txt");

    let output = run_binary(&[
        "--config",
        &config.display().to_string(),
        "translate",
        &manifest.display().to_string(),
    ])?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("not found"), "{stdout}");
    assert!(stdout.contains("Files processed: 0"), "{stdout}");
    assert!(server.requests().is_empty());
    Ok(())
}

#[test]
fn missing_auth_key_is_fatal() -> Result<()> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), "http://127.0.0.1:9/v2/translate", None)?;
    let manifest = temp.path().join("files.txt");
    fs::write(&manifest, "")?;

    let output = run_binary(&[
        "--config",
        &config.display().to_string(),
        "translate",
        &manifest.display().to_string(),
    ])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("auth key"), "{stderr}");
    Ok(())
}

#[test]
fn invalid_config_is_fatal() -> Result<()> {
    let temp = tempdir()?;
    let config = temp.path().join("translator.toml");
    fs::write(&config, "[translation]\ntimeout_secs = 0\n")?;

    let output = run_binary(&["--config", &config.display().to_string(), "translate"])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("timeout_secs"), "{stderr}");
    Ok(())
}
