use std::time::Duration;

use pgtabsz_cli::cli_args::{CliArgs, CliFormat, CliReport};
use pgtabsz_database::client::ConnectSettings;

/// Which reports run, in the fixed order tables then sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reports {
    pub tables: bool,
    pub sizes: bool,
}

impl Default for Reports {
    fn default() -> Self {
        Reports { tables: true, sizes: true }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub connect: ConnectSettings,
    pub reports: Reports,
    pub format: CliFormat,
    pub timeout: Option<Duration>,
}

impl From<&CliArgs> for Settings {
    fn from(cli_args: &CliArgs) -> Self {
        Settings {
            connect: ConnectSettings {
                database_url: cli_args.database_url.clone(),
                pool_size: cli_args.pool_size,
                acquire_timeout: Duration::from_secs(cli_args.acquire_timeout),
            },
            reports: Reports { tables: !cli_args.is_skipped(CliReport::Tables), sizes: !cli_args.is_skipped(CliReport::Sizes) },
            format: cli_args.format,
            timeout: cli_args.timeout.map(Duration::from_secs),
        }
    }
}
