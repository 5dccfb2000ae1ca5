use crate::model::StrategyReport;
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const REPORT_PREFIX: &str = "response";

/// `response_<strategy>_<unix seconds>.<micros>`, without extension.
pub fn report_stem(strategy: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}.{:06}",
        REPORT_PREFIX,
        strategy,
        at.timestamp(),
        at.timestamp_subsec_micros()
    )
}

pub fn write_strategy_report(report: &StrategyReport, dir: &Path) -> anyhow::Result<PathBuf> {
    write_strategy_report_at(report, dir, Utc::now())
}

/// Writes the report as pretty JSON. Existing files are never replaced: a
/// name already taken gets a numeric suffix.
pub fn write_strategy_report_at(
    report: &StrategyReport,
    dir: &Path,
    at: DateTime<Utc>,
) -> anyhow::Result<PathBuf> {
    let stem = report_stem(&report.strategy, at);
    let mut attempt = 0u32;
    let (path, file) = loop {
        let name = if attempt == 0 {
            format!("{stem}.json")
        } else {
            format!("{stem}-{attempt}.json")
        };
        let path = dir.join(name);
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(f) => break (path, f),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => {
                return Err(e).with_context(|| format!("failed to create {}", path.display()))
            }
        }
    };

    let mut w = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, report)?;
    w.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(
        event = "report_written",
        strategy = %report.strategy,
        path = %path.display(),
        results = report.question_results.len()
    );
    Ok(path)
}
