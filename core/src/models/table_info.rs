use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub table_schema: String,
    pub table_name: String,
}

impl TableInfo {
    pub fn new(table_schema: impl Into<String>, table_name: impl Into<String>) -> Self {
        TableInfo { table_schema: table_schema.into(), table_name: table_name.into() }
    }
}

impl Display for TableInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table_schema, self.table_name)
    }
}
