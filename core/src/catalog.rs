use std::sync::Arc;

use crate::error::Result;
use crate::io::Io;
use crate::like::LikePattern;
use crate::models::input::{TableSizeInput, TablesInput};
use crate::models::table_info::TableInfo;
use crate::models::table_size_info::TableSizeInfo;
use crate::source::{TableSizesSource, TablesSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationKind {
    Table,
    View,
    MaterializedView,
    Index,
    Sequence,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Relation {
    pub oid: u32,
    pub schema: String,
    pub name: String,
    pub kind: RelationKind,
    pub row_estimate: f32,
    pub total_bytes: i64,
    pub index_bytes: i64,
    pub toast_bytes: Option<i64>,
}

impl Relation {
    pub fn table(oid: u32, schema: &str, name: &str) -> Self {
        Relation {
            oid,
            schema: schema.to_string(),
            name: name.to_string(),
            kind: RelationKind::Table,
            row_estimate: 0.0,
            total_bytes: 0,
            index_bytes: 0,
            toast_bytes: None,
        }
    }

    pub fn with_kind(self, kind: RelationKind) -> Self {
        Relation { kind, ..self }
    }

    pub fn with_sizes(self, row_estimate: f32, total_bytes: i64, index_bytes: i64, toast_bytes: Option<i64>) -> Self {
        Relation { row_estimate, total_bytes, index_bytes, toast_bytes, ..self }
    }

    fn table_info(&self) -> TableInfo {
        TableInfo::new(self.schema.as_str(), self.name.as_str())
    }

    fn table_size_info(&self) -> TableSizeInfo {
        TableSizeInfo {
            oid: self.oid.to_string(),
            table_schema: self.schema.clone(),
            row_estimate: self.row_estimate,
            table_name: self.name.clone(),
            total_bytes: self.total_bytes,
            index_bytes: self.index_bytes,
            toast_bytes: self.toast_bytes,
        }
    }
}

/// Catalog held in memory, answering both reports with the same filtering rules as the
/// PostgreSQL queries. Rows come back in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    relations: Arc<Vec<Relation>>,
}

impl MemoryCatalog {
    pub fn new(relations: Vec<Relation>) -> Self {
        MemoryCatalog { relations: Arc::new(relations) }
    }

    pub fn list_tables(&self, input: &TablesInput) -> Result<Vec<TableInfo>> {
        let schema = LikePattern::new(&input.schema_pattern)?;
        let table = LikePattern::new(&input.table_pattern)?;
        Ok(self
            .ordinary_tables()
            .filter(|r| schema.is_match(&r.schema) && table.is_match(&r.name))
            .map(Relation::table_info)
            .collect())
    }

    pub fn list_table_sizes(&self, input: &TableSizeInput) -> Result<Vec<TableSizeInfo>> {
        let schema = LikePattern::new(&input.schema_pattern)?;
        let names = input.names();
        Ok(self
            .ordinary_tables()
            .filter(|r| schema.is_match(&r.schema) && names.contains(&r.name))
            .map(Relation::table_size_info)
            .collect())
    }

    fn ordinary_tables(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter().filter(|r| r.kind == RelationKind::Table)
    }
}

impl TablesSource for MemoryCatalog {
    fn tables(&self, input: TablesInput) -> Io<Vec<TableInfo>> {
        let catalog = self.clone();
        Io::new(move |ctx| {
            let catalog = catalog.clone();
            let input = input.clone();
            async move { ctx.guard(async { catalog.list_tables(&input) }).await }
        })
    }
}

impl TableSizesSource for MemoryCatalog {
    fn table_sizes(&self, input: TableSizeInput) -> Io<Vec<TableSizeInfo>> {
        let catalog = self.clone();
        Io::new(move |ctx| {
            let catalog = catalog.clone();
            let input = input.clone();
            async move { ctx.guard(async { catalog.list_table_sizes(&input) }).await }
        })
    }
}
