/// Ordinary tables whose schema matches `$1` and whose name matches `$2`, both as `LIKE` patterns.
/// Same relkind filter as the size query, so partitioned parents and views are left out of both.
pub const GET_TABLES_QUERY: &str = "
    SELECT
        nsp.nspname::TEXT AS table_schema,
        cls.relname::TEXT AS table_name
    FROM pg_class cls
    JOIN pg_namespace nsp ON nsp.oid = cls.relnamespace
    WHERE cls.relkind = 'r'
    AND nsp.nspname LIKE $1::TEXT
    AND cls.relname LIKE $2::TEXT
";

/// Sizes of ordinary tables whose schema matches `$1` (`LIKE`) and whose name is in `$2`.
/// `toast_bytes` is NULL for relations without a TOAST table (reltoastrelid = 0).
pub const GET_TABLE_SIZE_QUERY: &str = "
    SELECT
        cls.oid::TEXT AS oid,
        nsp.nspname::TEXT AS table_schema,
        cls.reltuples::REAL AS row_estimate,
        cls.relname::TEXT AS table_name,
        pg_total_relation_size(cls.oid)::BIGINT AS total_bytes,
        pg_indexes_size(cls.oid)::BIGINT AS index_bytes,
        pg_total_relation_size(cls.reltoastrelid)::BIGINT AS toast_bytes
    FROM pg_class cls
    LEFT JOIN pg_namespace nsp ON nsp.oid = cls.relnamespace
    WHERE cls.relkind = 'r'
    AND nsp.nspname LIKE $1::TEXT
    AND cls.relname = ANY($2::TEXT[])
";
