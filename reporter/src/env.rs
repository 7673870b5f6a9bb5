use std::sync::Arc;

use pgtabsz_core::models::input::{TableSizeInput, TablesInput};
use pgtabsz_core::{bind, lift, Error, Io};

pub const ENV_SCHEMA_PATTERN: &str = "ENV_SCHEMA_PATTERN";
pub const ENV_TABLE_PATTERN: &str = "ENV_TABLE_PATTERN";
pub const ENV_TABLE_NAMES: &str = "ENV_TABLE_NAMES";
pub const TABLE_NAMES_SEPARATOR: &str = ",";

type Lookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Source of the report inputs. Every variable is required; values are used verbatim.
#[derive(Clone)]
pub struct Env {
    lookup: Arc<Lookup>,
}

impl Env {
    pub fn process() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Env { lookup: Arc::new(lookup) }
    }

    pub fn var(&self, key: &'static str) -> Io<String> {
        let lookup = self.lookup.clone();
        Io::new(move |_| {
            let value = lookup(key).ok_or_else(|| Error::MissingEnv(key.to_string()));
            async move { value }
        })
    }

    pub fn tables_input(&self) -> Io<TablesInput> {
        let table_pattern = self.var(ENV_TABLE_PATTERN);
        bind(self.var(ENV_SCHEMA_PATTERN), move |schema_pattern| {
            bind(
                table_pattern.clone(),
                lift(move |table_pattern: String| Ok(TablesInput { schema_pattern: schema_pattern.clone(), table_pattern })),
            )
        })
    }

    pub fn table_size_input(&self) -> Io<TableSizeInput> {
        let table_names = self.var(ENV_TABLE_NAMES);
        bind(self.var(ENV_SCHEMA_PATTERN), move |schema_pattern| {
            bind(
                table_names.clone(),
                lift(move |names: String| {
                    Ok(TableSizeInput { schema_pattern: schema_pattern.clone(), table_names: None }
                        .with_table_names_string(&names, TABLE_NAMES_SEPARATOR))
                }),
            )
        })
    }

    /// Both report inputs, resolved together so a missing variable fails before any query.
    pub fn inputs(&self) -> Io<(TablesInput, TableSizeInput)> {
        let table_size_input = self.table_size_input();
        bind(self.tables_input(), move |tables_input| {
            bind(table_size_input.clone(), lift(move |table_size_input: TableSizeInput| Ok((tables_input.clone(), table_size_input))))
        })
    }
}
