use anyhow::Context;
use std::path::Path;

/// Table definitions and seed rows, read once at startup.
///
/// The schema text also seeds every strategy's prompt prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaScripts {
    pub schema: String,
    pub seed: String,
}

impl SchemaScripts {
    pub fn new(schema: impl Into<String>, seed: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            seed: seed.into(),
        }
    }

    pub fn read(schema_path: &Path, seed_path: &Path) -> anyhow::Result<Self> {
        let schema = std::fs::read_to_string(schema_path)
            .with_context(|| format!("failed to read schema script {}", schema_path.display()))?;
        let seed = std::fs::read_to_string(seed_path)
            .with_context(|| format!("failed to read seed script {}", seed_path.display()))?;
        Ok(Self { schema, seed })
    }
}
