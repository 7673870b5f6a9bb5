use log::debug;
use pgtabsz_core::models::input::{TableSizeInput, TablesInput};
use pgtabsz_core::models::table_info::TableInfo;
use pgtabsz_core::models::table_size_info::TableSizeInfo;
use pgtabsz_core::query::{GET_TABLES_QUERY, GET_TABLE_SIZE_QUERY};
use sqlx::postgres::PgRow;
use sqlx::{Error, Pool, Postgres, Row};

pub async fn select_tables(input: &TablesInput, pool: &Pool<Postgres>) -> Result<Vec<TableInfo>, Error> {
    debug!("Selecting tables, schema LIKE '{}', table LIKE '{}'", input.schema_pattern, input.table_pattern);
    let rows = sqlx::query(GET_TABLES_QUERY).bind(&input.schema_pattern).bind(&input.table_pattern).fetch_all(pool).await?;
    rows.iter().map(table_info_from_row).collect()
}

pub async fn select_table_sizes(input: &TableSizeInput, pool: &Pool<Postgres>) -> Result<Vec<TableSizeInfo>, Error> {
    debug!("Selecting table sizes, schema LIKE '{}', tables {:?}", input.schema_pattern, input.names());
    let rows = sqlx::query(GET_TABLE_SIZE_QUERY)
        .bind(&input.schema_pattern)
        .bind(input.table_names.as_deref())
        .fetch_all(pool)
        .await?;
    rows.iter().map(table_size_info_from_row).collect()
}

fn table_info_from_row(row: &PgRow) -> Result<TableInfo, Error> {
    Ok(TableInfo { table_schema: row.try_get("table_schema")?, table_name: row.try_get("table_name")? })
}

fn table_size_info_from_row(row: &PgRow) -> Result<TableSizeInfo, Error> {
    Ok(TableSizeInfo {
        oid: row.try_get("oid")?,
        table_schema: row.try_get("table_schema")?,
        row_estimate: row.try_get("row_estimate")?,
        table_name: row.try_get("table_name")?,
        total_bytes: row.try_get("total_bytes")?,
        index_bytes: row.try_get("index_bytes")?,
        toast_bytes: row.try_get("toast_bytes")?,
    })
}
