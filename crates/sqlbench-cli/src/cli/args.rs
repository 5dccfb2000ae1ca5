use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sqlbench",
    version,
    about = "Benchmarks prompt strategies for natural-language to SQL"
)]
pub struct Cli {
    /// directory holding setup.sql, setupData.sql and config.json (default: the executable's directory)
    #[arg(long, env = "SQLBENCH_DIR")]
    pub dir: Option<PathBuf>,

    /// where report files are written (default: --dir); a relative path is resolved against --dir
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// model id, overrides config.json
    #[arg(long, env = "SQLBENCH_MODEL")]
    pub model: Option<String>,

    /// reject generated statements that would modify the database
    #[arg(long)]
    pub read_only: bool,

    #[arg(long, env = "SQLBENCH_LOG", default_value = "info")]
    pub log_level: String,
}
