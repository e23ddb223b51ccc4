//! Delegated intelligence: everything the bot cannot compute is one LLM call
//! with a crafted prompt. No retries, no caching.

pub mod openai;
pub mod prompts;

use async_trait::async_trait;

use crate::core::Result;

pub use openai::OpenAiAssessor;

/// Inputs for the developmental-age estimate.
#[derive(Debug, Clone)]
pub struct DevAgeRequest {
    /// Chronological bucket of the child.
    pub age_group: u32,
    /// Expected milestones per bucket: the child's bucket plus up to two
    /// preceding ones, for model context.
    pub milestone_context: Vec<(u32, Vec<String>)>,
    /// Aggregated (statement, achieved) pairs across every visited bucket.
    pub checklist: Vec<(String, bool)>,
}

/// Inputs for recommendation generation.
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub age_group: u32,
    /// The bucket's suggestion phrases; the model must stick to these.
    pub suggestions: Vec<String>,
    pub checklist: Vec<(String, bool)>,
}

/// The three LLM-backed operations of the screening.
#[async_trait]
pub trait Assessor: Send + Sync {
    /// Reads an age in months out of free-form text; `None` when the text
    /// carries no age.
    async fn extract_age_months(&self, text: &str) -> Result<Option<u32>>;

    /// Estimates the developmental age in months from the toggled checklist.
    async fn estimate_developmental_age(&self, request: &DevAgeRequest) -> Result<u32>;

    /// Generates Markdown recommendations drawn from the bucket's suggestions.
    async fn generate_recommendations(&self, request: &RecommendationRequest) -> Result<String>;
}
