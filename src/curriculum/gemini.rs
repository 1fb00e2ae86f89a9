//! Gemini `generateContent` backend.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use super::{COURSE_WEEKS, Curriculum, CurriculumGenerator, GenerateError};
use crate::config::GeneratorConfig;
use crate::debug;
use crate::probe::Transport;

/// Calls a Gemini model with a JSON response schema.
pub struct GeminiGenerator {
    transport: Arc<dyn Transport>,
    url: Url,
    model: String,
}

impl GeminiGenerator {
    /// Build from config, reading the API key from the configured variable.
    pub fn from_config(
        config: &GeneratorConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, GenerateError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GenerateError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(&config.endpoint, &config.model, &api_key, transport)
    }

    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, GenerateError> {
        let raw = format!(
            "{}/models/{}:generateContent",
            endpoint.trim_end_matches('/'),
            model
        );
        let mut url = Url::parse(&raw).map_err(|_| GenerateError::InvalidEndpoint(raw.clone()))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(Self {
            transport,
            url,
            model: model.to_string(),
        })
    }

    fn request_body(topic: &str, source: &str) -> Value {
        let prompt = format!(
            "You are an expert technical curriculum designer. Based on the topic \"{topic}\" \
             and this source data: \"{source}\", generate a {COURSE_WEEKS}-week course structure. \
             Each week should have a title, a brief description, and 3 key learning objectives."
        );
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "week": { "type": "NUMBER" },
                            "title": { "type": "STRING" },
                            "description": { "type": "STRING" },
                            "objectives": { "type": "ARRAY", "items": { "type": "STRING" } }
                        },
                        "required": ["week", "title", "description", "objectives"]
                    }
                }
            }
        })
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CurriculumGenerator for GeminiGenerator {
    async fn generate(&self, topic: &str, source: &str) -> Result<Curriculum, GenerateError> {
        debug!("generate"; "calling model {}", self.model);
        let body = Self::request_body(topic, source);
        let raw = self.transport.post_json(&self.url, &body).await?;
        let response: GenerateResponse =
            serde_json::from_str(&raw).map_err(GenerateError::Malformed)?;
        Curriculum::from_json(&response.text())
    }
}
