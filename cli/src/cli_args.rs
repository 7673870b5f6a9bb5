use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "snake_case")]
pub enum CliFormat {
    /// One plain line per record, sizes in bytes
    Text,
    /// Like text, with sizes rendered as e.g. '352.3 KB'
    Human,
    /// One JSON object per line
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "snake_case")]
pub enum CliReport {
    /// Table listing, filtered by ENV_SCHEMA_PATTERN and ENV_TABLE_PATTERN
    Tables,
    /// Table sizes, filtered by ENV_SCHEMA_PATTERN and ENV_TABLE_NAMES
    Sizes,
}

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "pgtabsz",
    version,
    about = "Lists PostgreSQL tables and their sizes",
    after_help = "Report filters are read from ENV_SCHEMA_PATTERN, ENV_TABLE_PATTERN and ENV_TABLE_NAMES (comma separated, not trimmed)"
)]
pub struct CliArgs {
    #[clap(short = 'd', long, env = "DATABASE_URL", help = "PostgreSQL url. Leave empty to use the PG* environment variables")]
    pub database_url: Option<String>,
    #[clap(short = 'p', long, default_value = "2", help = "Max connections in the pool")]
    pub pool_size: u32,
    #[clap(short = 'a', long, default_value = "10", help = "Connection acquire timeout (in seconds)")]
    pub acquire_timeout: u64,
    #[clap(short = 't', long, help = "Abort the whole run after this many seconds")]
    pub timeout: Option<u64>,
    #[clap(short = 'f', long, value_enum, default_value = "text", help = "Output format")]
    pub format: CliFormat,
    #[clap(long, help = "Skip specific reports", value_enum, use_value_delimiter = true)]
    pub skip: Option<Vec<CliReport>>,
    #[clap(short = 'l', long, default_value = "info", help = "error, warn, info, debug, trace, off")]
    pub log_level: String,
    #[clap(long, help = "Disable colored output")]
    pub log_no_color: bool,
}

impl CliArgs {
    pub fn is_skipped(&self, report: CliReport) -> bool {
        self.skip.as_ref().is_some_and(|skip| skip.contains(&report))
    }
}

pub fn get_cli_args() -> CliArgs {
    CliArgs::parse()
}
