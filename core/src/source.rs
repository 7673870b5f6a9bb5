use crate::io::Io;
use crate::models::input::{TableSizeInput, TablesInput};
use crate::models::table_info::TableInfo;
use crate::models::table_size_info::TableSizeInfo;

/// Lists ordinary tables whose schema and name match the input's `LIKE` patterns.
pub trait TablesSource: Send + Sync {
    fn tables(&self, input: TablesInput) -> Io<Vec<TableInfo>>;
}

/// Reports sizes of ordinary tables in matching schemas whose name is one of the input's names.
pub trait TableSizesSource: Send + Sync {
    fn table_sizes(&self, input: TableSizeInput) -> Io<Vec<TableSizeInfo>>;
}

impl<F> TablesSource for F
where
    F: Fn(TablesInput) -> Io<Vec<TableInfo>> + Send + Sync,
{
    fn tables(&self, input: TablesInput) -> Io<Vec<TableInfo>> {
        self(input)
    }
}

impl<F> TableSizesSource for F
where
    F: Fn(TableSizeInput) -> Io<Vec<TableSizeInfo>> + Send + Sync,
{
    fn table_sizes(&self, input: TableSizeInput) -> Io<Vec<TableSizeInfo>> {
        self(input)
    }
}
