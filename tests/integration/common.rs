use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    io::{self, BufRead, BufReader, Read, Write},
    net::{TcpListener, TcpStream},
    path::{Path, PathBuf},
    process::{Command, Output},
    sync::{Arc, Mutex},
    thread,
};

use anyhow::{Context, Result};
use comment_translator::{lib::errors::TranslateError, translator::TranslationBackend};
use serde_json::{json, Value};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_comment-translator");
pub const TEST_AUTH_KEY: &str = "integration-key:fx";

pub fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// Copy a fixture into `dir` and return the copy's path.
pub fn copy_fixture(relative: &str, dir: &Path) -> Result<PathBuf> {
    let source = fixture(relative);
    let name = source.file_name().context("fixture has a file name")?;
    let destination = dir.join(name);
    fs::copy(&source, &destination)
        .with_context(|| format!("failed to copy {}", source.display()))?;
    Ok(destination)
}

pub fn has_han(text: &str) -> bool {
    text.chars()
        .any(|c| ('\u{4E00}'..='\u{9FFF}').contains(&c))
}

/// Run the binary with a clean environment for the variables it reads.
pub fn run_binary(args: &[&str]) -> Result<Output> {
    Command::new(BINARY_PATH)
        .args(args)
        .env_remove("DEEPL_AUTH_KEY")
        .env_remove("COMMENT_TRANSLATOR_CONFIG")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .env("RUST_LOG", "warn")
        .output()
        .context("failed to run comment-translator")
}

/// Write a config file pointing the translator at `endpoint`.
pub fn write_config(dir: &Path, endpoint: &str, auth_key: Option<&str>) -> Result<PathBuf> {
    let mut body = format!("[translation]\nendpoint = \"{endpoint}\"\ntimeout_secs = 5\n");
    if let Some(key) = auth_key {
        body.push_str(&format!("auth_key = \"{key}\"\n"));
    }
    let path = dir.join("translator.toml");
    fs::write(&path, body)?;
    Ok(path)
}

/// In-process backend: dictionary lookups, `en(<n> chars)` otherwise,
/// matching the crate's own test backend.
#[derive(Default)]
pub struct FakeBackend {
    dictionary: HashMap<String, String>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self {
            dictionary: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Self::default()
        }
    }
}

impl TranslationBackend for FakeBackend {
    fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        _target_lang: &str,
    ) -> Result<String, TranslateError> {
        self.calls.borrow_mut().push(text.to_string());
        Ok(self
            .dictionary
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("en({} chars)", text.chars().count())))
    }
}

/// Request seen by [`FakeDeepL`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

/// Minimal HTTP server speaking the DeepL translate schema.
///
/// Answers every request with `status`; successful answers translate a
/// fragment of `n` characters to `English <n>`.
pub struct FakeDeepL {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeDeepL {
    pub fn start(status: u16) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").context("failed to bind fake DeepL")?;
        let endpoint = format!("http://{}/v2/translate", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let _ = handle_connection(stream, status, &recorded);
            }
        });
        Ok(Self { endpoint, requests })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

fn handle_connection(
    mut stream: TcpStream,
    status: u16,
    requests: &Mutex<Vec<RecordedRequest>>,
) -> io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut content_length = 0;
    let mut authorization = None;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                "authorization" => authorization = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body)?;
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let text = body["text"][0].as_str().unwrap_or_default().to_string();
    if let Ok(mut requests) = requests.lock() {
        requests.push(RecordedRequest {
            authorization,
            body: body.clone(),
        });
    }

    let (reason, payload) = if status == 200 {
        let translated = format!("English {}", text.chars().count());
        (
            "OK",
            json!({ "translations": [{ "detected_source_language": "ZH", "text": translated }] })
                .to_string(),
        )
    } else {
        ("Error", json!({ "message": "Quota exceeded" }).to_string())
    };
    write!(
        stream,
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    )?;
    stream.flush()
}
