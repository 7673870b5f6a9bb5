use log::info;
use pgtabsz_core::models::input::{TableSizeInput, TablesInput};
use pgtabsz_core::models::table_info::TableInfo;
use pgtabsz_core::models::table_size_info::TableSizeInfo;
use pgtabsz_core::source::{TableSizesSource, TablesSource};
use pgtabsz_core::{all, bind, Io};

use crate::output::Printer;
use crate::settings::Reports;

/// Prints the selected reports from `source`, tables first. A failing report stops the ones after it.
pub fn reports<S>(source: &S, tables_input: TablesInput, table_size_input: TableSizeInput, printer: &Printer, selection: Reports) -> Io<()>
where
    S: TablesSource + TableSizesSource,
{
    let mut ios = Vec::new();
    if selection.tables {
        let printer = printer.clone();
        let tables = source.tables(tables_input).map(|tables: Vec<TableInfo>| {
            info!("Found {} table(s)", tables.len());
            tables
        });
        ios.push(bind(tables, move |tables| printer.print(tables)));
    }
    if selection.sizes {
        let printer = printer.clone();
        let sizes = source.table_sizes(table_size_input).map(|sizes: Vec<TableSizeInfo>| {
            info!("Found sizes for {} table(s)", sizes.len());
            sizes
        });
        ios.push(bind(sizes, move |sizes| printer.print(sizes)));
    }
    all(ios).map(|_| ())
}

/// Resolves the inputs, then acquires the source, then runs the reports.
pub fn program<S>(inputs: Io<(TablesInput, TableSizeInput)>, source: Io<S>, printer: Printer, selection: Reports) -> Io<()>
where
    S: TablesSource + TableSizesSource + 'static,
{
    bind(inputs, move |(tables_input, table_size_input)| {
        let printer = printer.clone();
        bind(source.clone(), move |source| reports(&source, tables_input.clone(), table_size_input.clone(), &printer, selection))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Env, ENV_SCHEMA_PATTERN, ENV_TABLE_NAMES, ENV_TABLE_PATTERN};
    use crate::output::tests::SharedBuf;
    use pgtabsz_cli::cli_args::CliFormat;
    use pgtabsz_core::catalog::{MemoryCatalog, Relation, RelationKind};
    use pgtabsz_core::{Context, Error};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new(vec![
            Relation::table(16384, "public", "orders").with_sizes(1200.0, 352256, 65536, Some(8192)),
            Relation::table(16390, "public", "users").with_sizes(42.0, 40960, 16384, None),
            Relation::table(16395, "public", "active_users").with_kind(RelationKind::View),
            Relation::table(16400, "sales", "orders").with_sizes(10.0, 24576, 8192, None),
        ])
    }

    fn env(vars: &[(&str, &str)]) -> Env {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Env::from_lookup(move |key| vars.get(key).cloned())
    }

    fn counted<S: Clone + Send + Sync + 'static>(source: S, acquired: &Arc<AtomicUsize>) -> Io<S> {
        let acquired = acquired.clone();
        Io::new(move |_| {
            acquired.fetch_add(1, Ordering::SeqCst);
            let source = source.clone();
            async move { Ok(source) }
        })
    }

    #[tokio::test]
    async fn prints_both_reports_in_order() {
        let env = env(&[(ENV_SCHEMA_PATTERN, "public"), (ENV_TABLE_PATTERN, "%"), (ENV_TABLE_NAMES, "orders,users")]);
        let buf = SharedBuf::default();
        let printer = Printer::new(CliFormat::Text, buf.clone());
        let acquired = Arc::new(AtomicUsize::new(0));

        let program = program(env.inputs(), counted(catalog(), &acquired), printer, Reports::default());
        program.run(&Context::background()).await.unwrap();

        assert_eq!(
            buf.lines(),
            vec![
                "public.orders",
                "public.users",
                "16384 public.orders rows=1200 total=352256 index=65536 toast=8192",
                "16390 public.users rows=42 total=40960 index=16384 toast=-",
            ]
        );
        assert_eq!(acquired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_configuration_stops_before_the_source() {
        let env = env(&[(ENV_SCHEMA_PATTERN, "public"), (ENV_TABLE_PATTERN, "%")]);
        let buf = SharedBuf::default();
        let acquired = Arc::new(AtomicUsize::new(0));

        let program = program(env.inputs(), counted(catalog(), &acquired), Printer::new(CliFormat::Text, buf.clone()), Reports::default());
        let result = program.run(&Context::background()).await;

        assert!(matches!(result, Err(Error::MissingEnv(key)) if key == ENV_TABLE_NAMES));
        assert_eq!(acquired.load(Ordering::SeqCst), 0);
        assert!(buf.lines().is_empty());
    }

    #[derive(Clone)]
    struct FailingTables {
        size_queries: Arc<AtomicUsize>,
    }

    impl TablesSource for FailingTables {
        fn tables(&self, _: TablesInput) -> Io<Vec<TableInfo>> {
            Io::fail(|| Error::Config("relation listing rejected".to_string()))
        }
    }

    impl TableSizesSource for FailingTables {
        fn table_sizes(&self, _: TableSizeInput) -> Io<Vec<TableSizeInfo>> {
            let size_queries = self.size_queries.clone();
            Io::new(move |_| {
                size_queries.fetch_add(1, Ordering::SeqCst);
                async { Ok(Vec::new()) }
            })
        }
    }

    #[tokio::test]
    async fn failing_tables_report_prevents_the_sizes_report() {
        let source = FailingTables { size_queries: Arc::new(AtomicUsize::new(0)) };
        let buf = SharedBuf::default();
        let printer = Printer::new(CliFormat::Text, buf.clone());

        let io = reports(&source, TablesInput::default(), TableSizeInput::default(), &printer, Reports::default());
        let result = io.run(&Context::background()).await;

        assert!(matches!(result, Err(Error::Config(message)) if message == "relation listing rejected"));
        assert_eq!(source.size_queries.load(Ordering::SeqCst), 0);
        assert!(buf.lines().is_empty());
    }

    #[tokio::test]
    async fn skipped_reports_are_not_run() {
        let source = FailingTables { size_queries: Arc::new(AtomicUsize::new(0)) };
        let printer = Printer::new(CliFormat::Text, SharedBuf::default());

        let io = reports(&source, TablesInput::default(), TableSizeInput::default(), &printer, Reports { tables: false, sizes: true });
        io.run(&Context::background()).await.unwrap();

        assert_eq!(source.size_queries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn whitespace_in_names_misses_tables() {
        let env = env(&[(ENV_SCHEMA_PATTERN, "public"), (ENV_TABLE_PATTERN, "users"), (ENV_TABLE_NAMES, "orders, users")]);
        let buf = SharedBuf::default();
        let printer = Printer::new(CliFormat::Text, buf.clone());

        program(env.inputs(), Io::pure(catalog()), printer, Reports::default()).run(&Context::background()).await.unwrap();

        assert_eq!(buf.lines(), vec!["public.users", "16384 public.orders rows=1200 total=352256 index=65536 toast=8192"]);
    }

    #[tokio::test]
    async fn cancellation_reaches_the_source() {
        let env = env(&[(ENV_SCHEMA_PATTERN, "%"), (ENV_TABLE_PATTERN, "%"), (ENV_TABLE_NAMES, "orders")]);
        let ctx = Context::background();
        ctx.cancel();
        let printer = Printer::new(CliFormat::Text, SharedBuf::default());

        let result = program(env.inputs(), Io::pure(catalog()), printer, Reports::default()).run(&ctx).await;

        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
