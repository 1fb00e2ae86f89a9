//! Curriculum generation pipeline.
//!
//! A language-model service turns a topic plus source material into a
//! 4-week outline. The service is behind [`CurriculumGenerator`] so the
//! pipeline does not depend on a specific vendor.

mod gemini;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::log;
use crate::probe::NetError;

pub use gemini::GeminiGenerator;

/// Number of weeks the generator is asked for.
pub const COURSE_WEEKS: u32 = 4;

/// One generated week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPlan {
    #[serde(deserialize_with = "week_number")]
    pub week: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub objectives: Vec<String>,
}

/// Generated outline, weeks in the order the service returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Curriculum {
    pub weeks: Vec<WeekPlan>,
}

impl Curriculum {
    /// Parse the service's JSON text. Empty text is an empty curriculum.
    pub fn from_json(text: &str) -> Result<Self, GenerateError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::default());
        }
        let weeks = serde_json::from_str(text).map_err(GenerateError::Malformed)?;
        Ok(Self { weeks })
    }
}

/// Models declare the week as a JSON number, which may arrive as `1.0`.
fn week_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < 1.0 || value > f64::from(u32::MAX) {
        return Err(serde::de::Error::custom(format!(
            "invalid week number {value}"
        )));
    }
    Ok(value as u32)
}

/// Curriculum pipeline errors.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("no source material provided")]
    MissingSource,

    #[error("environment variable `{0}` holding the API key is not set")]
    MissingApiKey(String),

    #[error("invalid generator endpoint `{0}`")]
    InvalidEndpoint(String),

    #[error("generator request failed: {0}")]
    Transport(NetError),

    #[error("generator returned a malformed curriculum: {0}")]
    Malformed(serde_json::Error),
}

impl From<NetError> for GenerateError {
    fn from(err: NetError) -> Self {
        Self::Transport(err)
    }
}

/// A service that drafts a curriculum.
#[async_trait]
pub trait CurriculumGenerator: Send + Sync {
    async fn generate(&self, topic: &str, source: &str) -> Result<Curriculum, GenerateError>;
}

/// Run the ingestion pipeline: validate input, call the generator, report.
pub async fn run_pipeline(
    generator: &dyn CurriculumGenerator,
    topic: &str,
    source: &str,
) -> Result<Curriculum, GenerateError> {
    let source = source.trim();
    if source.is_empty() {
        return Err(GenerateError::MissingSource);
    }

    log!("generate"; "initiating ingestion pipeline for \"{}\"", topic.trim());
    log!("generate"; "source material: {} characters", source.chars().count());
    log!("generate"; "structuring {}-week curriculum", COURSE_WEEKS);

    let curriculum = generator.generate(topic.trim(), source).await?;
    log!("generate"; "generation successful, {} modules cataloged", curriculum.weeks.len());
    Ok(curriculum)
}
