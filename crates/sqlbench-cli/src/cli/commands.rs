use super::args::Cli;
use sqlbench_core::config::load_config;
use sqlbench_core::config::path_resolver::PathResolver;
use sqlbench_core::engine::runner::{RunPolicy, Runner};
use sqlbench_core::providers::llm::openai::OpenAIClient;
use sqlbench_core::providers::llm::LlmClient;
use sqlbench_core::report::{console::print_summary, json::write_strategy_report};
use sqlbench_core::storage::schema::SchemaScripts;
use sqlbench_core::storage::store::{SqlPolicy, Store};
use sqlbench_core::strategies::default_strategies;
use std::sync::Arc;
use std::time::Duration;

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const SETUP_ERROR: i32 = 2;
}

/// Full experiment: rebuild the store, run every strategy, write reports.
///
/// Errors returned here are setup or report-writing failures; per-question
/// failures end up inside the reports.
pub async fn run(cli: Cli) -> anyhow::Result<i32> {
    println!("Running sqlbench!");

    let paths = match &cli.dir {
        Some(dir) => PathResolver::new(dir),
        None => PathResolver::program_dir()?,
    };
    tracing::info!(event = "run_start", base_dir = %paths.base_dir().display());

    let cfg = load_config(&paths.config())?;
    let scripts = SchemaScripts::read(&paths.schema(), &paths.seed())?;

    let policy = SqlPolicy::from_flag(cli.read_only || cfg.read_only_sql);
    let db_path = paths.database();
    let store = Store::rebuild(&db_path, &scripts)?.with_policy(policy);
    tracing::info!(event = "store_ready", path = %db_path.display(), policy = ?policy);

    let model = cli.model.clone().unwrap_or_else(|| cfg.model.clone());
    let client: Arc<dyn LlmClient> = Arc::new(
        OpenAIClient::new(model.clone(), cfg.openai_key.clone()).with_base_url(&cfg.base_url),
    );
    tracing::info!(event = "client_ready", provider = client.provider_name(), model = %model, config = ?cfg);

    let runner = Runner::new(&store, client).with_policy(RunPolicy {
        timeout: cfg.timeout_seconds.map(Duration::from_secs),
    });

    let out_dir = cli
        .out_dir
        .as_ref()
        .map(|d| paths.resolve(d))
        .unwrap_or_else(|| paths.base_dir().to_path_buf());

    let strategies = default_strategies(&scripts.schema);
    let reports = runner
        .run_all(&strategies, |report| {
            let path = write_strategy_report(report, &out_dir)?;
            println!("Wrote {}", path.display());
            Ok(())
        })
        .await?;

    print_summary(&reports);
    tracing::info!(
        event = "run_done",
        strategies = reports.len(),
        errors = reports.iter().map(|r| r.error_count()).sum::<usize>()
    );
    println!("Done!");
    Ok(exit_codes::OK)
}
