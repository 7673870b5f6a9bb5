use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableSizeInfo {
    pub oid: String,
    pub table_schema: String,
    /// Planner estimate (pg_class.reltuples), not an exact count
    pub row_estimate: f32,
    pub table_name: String,
    /// Heap, indexes and TOAST together
    pub total_bytes: i64,
    pub index_bytes: i64,
    /// None when the relation has no TOAST table
    pub toast_bytes: Option<i64>,
}

impl Display for TableSizeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}.{} rows={} total={} index={} toast=",
            self.oid, self.table_schema, self.table_name, self.row_estimate, self.total_bytes, self.index_bytes
        )?;
        match self.toast_bytes {
            Some(toast_bytes) => write!(f, "{}", toast_bytes),
            None => write!(f, "-"),
        }
    }
}
