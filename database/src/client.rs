use std::str::FromStr;
use std::time::Duration;

use log::{debug, info, LevelFilter};
use pgtabsz_core::models::input::{TableSizeInput, TablesInput};
use pgtabsz_core::models::table_info::TableInfo;
use pgtabsz_core::models::table_size_info::TableSizeInfo;
use pgtabsz_core::source::{TableSizesSource, TablesSource};
use pgtabsz_core::{Error as TabszError, Io};
use regex::Regex;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, Error, Pool, Postgres};

use crate::query;

#[derive(Clone, Debug)]
pub struct ConnectSettings {
    /// None reads connection parameters from the libpq environment (PGHOST, PGUSER, ...)
    pub database_url: Option<String>,
    pub pool_size: u32,
    pub acquire_timeout: Duration,
}

impl Default for ConnectSettings {
    fn default() -> Self {
        ConnectSettings { database_url: None, pool_size: 2, acquire_timeout: Duration::from_secs(10) }
    }
}

#[derive(Clone)]
pub struct PgTabszClient {
    pool: Pool<Postgres>,
}

impl PgTabszClient {
    pub async fn new(url: Option<&str>) -> Result<PgTabszClient, Error> {
        let defaults = ConnectSettings::default();
        Self::new_with_args(url, defaults.pool_size, defaults.acquire_timeout).await
    }

    pub async fn new_with_args(url: Option<&str>, pool_size: u32, acquire_timeout: Duration) -> Result<PgTabszClient, Error> {
        let (connect_opts, target) = match url {
            Some(url) => (PgConnectOptions::from_str(url)?, redact_password(url)),
            None => (PgConnectOptions::new(), "from PG* environment".to_string()),
        };
        debug!("Connecting to PostgreSQL {}", target);
        let connect_opts = connect_opts.log_slow_statements(LevelFilter::Warn, Duration::from_secs(60));
        let pool =
            PgPoolOptions::new().acquire_timeout(acquire_timeout).max_connections(pool_size).connect_with(connect_opts).await?;
        info!("Connected to PostgreSQL {}", target);
        Ok(PgTabszClient { pool })
    }

    /// Pool creation as an effect, abandoned if the context is cancelled or times out first.
    pub fn connect(settings: ConnectSettings) -> Io<PgTabszClient> {
        Io::new(move |ctx| {
            let settings = settings.clone();
            async move {
                ctx.guard(async {
                    Self::new_with_args(settings.database_url.as_deref(), settings.pool_size, settings.acquire_timeout)
                        .await
                        .map_err(TabszError::database)
                })
                .await
            }
        })
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    pub async fn select_tables(&self, input: &TablesInput) -> Result<Vec<TableInfo>, Error> {
        query::select::select_tables(input, &self.pool).await
    }

    pub async fn select_table_sizes(&self, input: &TableSizeInput) -> Result<Vec<TableSizeInfo>, Error> {
        query::select::select_table_sizes(input, &self.pool).await
    }
}

impl TablesSource for PgTabszClient {
    fn tables(&self, input: TablesInput) -> Io<Vec<TableInfo>> {
        let client = self.clone();
        Io::new(move |ctx| {
            let client = client.clone();
            let input = input.clone();
            async move { ctx.guard(async { client.select_tables(&input).await.map_err(TabszError::database) }).await }
        })
    }
}

impl TableSizesSource for PgTabszClient {
    fn table_sizes(&self, input: TableSizeInput) -> Io<Vec<TableSizeInfo>> {
        let client = self.clone();
        Io::new(move |ctx| {
            let client = client.clone();
            let input = input.clone();
            async move { ctx.guard(async { client.select_table_sizes(&input).await.map_err(TabszError::database) }).await }
        })
    }
}

pub fn redact_password(url: &str) -> String {
    let password = Regex::new(r"^(postgres(?:ql)?://[^:@/?#]*:)[^@/?#]*(@)").expect("Failed to parse url regex");
    password.replace(url, "${1}***${2}").to_string()
}
