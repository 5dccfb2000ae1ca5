use clap::Parser;

mod cli;

use cli::args::Cli;
use cli::commands::{exit_codes, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    cli::logging::init(&cli.log_level);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(event = "run_aborted", error = %format!("{e:#}"));
            eprintln!("fatal: {e:#}");
            exit_codes::SETUP_ERROR
        }
    };
    std::process::exit(code);
}
