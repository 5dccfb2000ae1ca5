use serde::{Deserialize, Serialize};

/// Value recorded in `QuestionResult::error` when a question completed cleanly.
pub const NO_ERROR: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    pub prompt_prefix: String,
}

impl Strategy {
    pub fn new(name: impl Into<String>, prompt_prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt_prefix: prompt_prefix.into(),
        }
    }

    /// Prompt asking the model for SQL that answers `question`.
    pub fn question_prompt(&self, question: &str) -> String {
        format!("{} {}", self.prompt_prefix, question)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question: String,
    pub sql: Option<String>,
    #[serde(rename = "queryRawResponse")]
    pub query_raw_response: Option<String>,
    #[serde(rename = "friendlyResponse")]
    pub friendly_response: Option<String>,
    pub error: String,
}

impl QuestionResult {
    pub fn is_ok(&self) -> bool {
        self.error == NO_ERROR
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub strategy: String,
    pub prompt_prefix: String,
    #[serde(rename = "questionResults")]
    pub question_results: Vec<QuestionResult>,
}

impl StrategyReport {
    pub fn error_count(&self) -> usize {
        self.question_results.iter().filter(|r| !r.is_ok()).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    #[serde(default)]
    pub meta: serde_json::Value,
}
