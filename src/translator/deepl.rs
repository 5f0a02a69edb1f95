//! DeepL HTTP backend.
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TranslationSection;
use crate::lib::errors::TranslateError;

use super::TranslationBackend;

const USER_AGENT: &str = concat!("comment-translator/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: [&'a str; 1],
    source_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslationEntry>,
}

#[derive(Debug, Deserialize)]
struct TranslationEntry {
    text: String,
}

/// Backend calling the DeepL `/v2/translate` endpoint with a blocking client.
pub struct DeepLBackend {
    client: Client,
    endpoint: String,
    auth_key: String,
}

impl DeepLBackend {
    /// Build a backend from the translation settings; fails without an auth key.
    pub fn from_section(section: &TranslationSection) -> Result<Self, TranslateError> {
        let auth_key = section
            .auth_key
            .clone()
            .ok_or(TranslateError::MissingAuthKey)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(section.timeout_secs))
            .build()
            .map_err(|source| TranslateError::Http {
                endpoint: section.endpoint.clone(),
                source,
            })?;

        Ok(Self {
            client,
            endpoint: section.endpoint.clone(),
            auth_key,
        })
    }
}

impl TranslationBackend for DeepLBackend {
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        let request = TranslateRequest {
            text: [text],
            source_lang,
            target_lang,
        };
        debug!(
            target: "comment_translator::translate",
            endpoint = %self.endpoint,
            chars = text.chars().count(),
            "Sending fragment to DeepL"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("DeepL-Auth-Key {}", self.auth_key),
            )
            .json(&request)
            .send()
            .map_err(|source| TranslateError::Http {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TranslateError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let payload: TranslateResponse = response
            .json()
            .map_err(|source| TranslateError::Decode { source })?;
        first_translation(payload)
    }
}

fn first_translation(payload: TranslateResponse) -> Result<String, TranslateError> {
    payload
        .translations
        .into_iter()
        .next()
        .map(|entry| entry.text)
        .ok_or(TranslateError::EmptyResponse)
}
