// Gemini summary client
//
// Text in, text out: one user-role part per request, candidate parts joined
// on the way back.

use std::sync::Arc;

use nextlog_config::{ConfigStore, DEFAULT_AI_MODEL};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::client::read_json;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Production generative-language API root.
pub const DEFAULT_SUMMARY_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Returned when the service answers without any candidate text.
const NO_RESPONSE: &str = "No response";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .map_or_else(
                || NO_RESPONSE.to_owned(),
                |parts| {
                    parts
                        .into_iter()
                        .map(|p| p.text.unwrap_or_default())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )
    }
}

/// Client for the `generateContent` endpoint.
///
/// Model name and key come from the shared [`ConfigStore`] on every call.
pub struct SummaryClient {
    http: reqwest::Client,
    base_url: Url,
    config: Arc<ConfigStore>,
}

impl SummaryClient {
    pub fn new(config: Arc<ConfigStore>, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, Url::parse(DEFAULT_SUMMARY_BASE_URL)?, config))
    }

    pub fn with_client(http: reqwest::Client, base_url: Url, config: Arc<ConfigStore>) -> Self {
        Self {
            http,
            base_url,
            config,
        }
    }

    /// Ask the model to respond to `text`.
    ///
    /// `POST /v1beta/models/{model}:generateContent?key={key}`
    pub async fn summarize(&self, text: &str) -> Result<String, Error> {
        let config = self.config.snapshot();
        if config.ai_api_key.is_empty() {
            return Err(Error::configuration(
                "Gemini API key is not configured; run `nextlog config set --gemini-key`",
            ));
        }
        let model = if config.ai_model.is_empty() {
            DEFAULT_AI_MODEL
        } else {
            config.ai_model.as_str()
        };

        let method = format!("{model}:generateContent");
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["v1beta", "models", method.as_str()]);
        url.query_pairs_mut().append_pair("key", &config.ai_api_key);

        // The URL carries the key; log the model only.
        debug!(model, chars = text.len(), "requesting summary");

        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text }],
            }],
        };
        let resp = self.http.post(url).json(&body).send().await?;
        let parsed: Option<GenerateResponse> = read_json(resp).await?;
        Ok(parsed.map_or_else(|| NO_RESPONSE.to_owned(), GenerateResponse::into_text))
    }
}
