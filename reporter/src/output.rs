use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use bytesize::ByteSize;
use pgtabsz_cli::cli_args::CliFormat;
use pgtabsz_core::models::table_info::TableInfo;
use pgtabsz_core::models::table_size_info::TableSizeInfo;
use pgtabsz_core::{Io, Result};
use serde::Serialize;

pub trait Render: Serialize {
    fn render_text(&self) -> String;

    fn render_human(&self) -> String {
        self.render_text()
    }

    fn render(&self, format: CliFormat) -> io::Result<String> {
        match format {
            CliFormat::Text => Ok(self.render_text()),
            CliFormat::Human => Ok(self.render_human()),
            CliFormat::Json => Ok(serde_json::to_string(self)?),
        }
    }
}

impl Render for TableInfo {
    fn render_text(&self) -> String {
        self.to_string()
    }
}

impl Render for TableSizeInfo {
    fn render_text(&self) -> String {
        self.to_string()
    }

    fn render_human(&self) -> String {
        let pretty = |bytes: i64| ByteSize(u64::try_from(bytes).unwrap_or(0)).to_string();
        format!(
            "{} {}.{} rows~{} total={} index={} toast={}",
            self.oid,
            self.table_schema,
            self.table_name,
            self.row_estimate,
            pretty(self.total_bytes),
            pretty(self.index_bytes),
            self.toast_bytes.map_or_else(|| "-".to_string(), pretty)
        )
    }
}

/// Writes records one per line to a shared sink.
#[derive(Clone)]
pub struct Printer {
    format: CliFormat,
    out: Arc<Mutex<dyn Write + Send>>,
}

impl Printer {
    pub fn new<W: Write + Send + 'static>(format: CliFormat, out: W) -> Self {
        Printer { format, out: Arc::new(Mutex::new(out)) }
    }

    pub fn stdout(format: CliFormat) -> Self {
        Self::new(format, io::stdout())
    }

    pub fn print<R>(&self, records: Vec<R>) -> Io<()>
    where
        R: Render + Send + Sync + 'static,
    {
        let printer = self.clone();
        Io::new(move |_| {
            let result = printer.write_all(&records);
            async move { result }
        })
    }

    fn write_all<R: Render>(&self, records: &[R]) -> Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        for record in records {
            writeln!(out, "{}", record.render(self.format)?)?;
        }
        out.flush()?;
        Ok(())
    }
}
