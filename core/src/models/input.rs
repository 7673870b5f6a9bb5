/// Filter for the table listing. Both patterns use SQL `LIKE` wildcards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TablesInput {
    pub schema_pattern: String,
    pub table_pattern: String,
}

impl Default for TablesInput {
    fn default() -> Self {
        TablesInput { schema_pattern: "%".to_string(), table_pattern: "%".to_string() }
    }
}

/// Filter for the size report. Names are matched exactly; `None` or an empty list selects nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSizeInput {
    pub schema_pattern: String,
    pub table_names: Option<Vec<String>>,
}

impl Default for TableSizeInput {
    fn default() -> Self {
        TableSizeInput { schema_pattern: "%".to_string(), table_names: None }
    }
}

impl TableSizeInput {
    /// Splits `names` on `sep`. Substrings are kept exactly as written, whitespace included.
    pub fn with_table_names_string(self, names: &str, sep: &str) -> Self {
        TableSizeInput { table_names: Some(names.split(sep).map(str::to_string).collect()), ..self }
    }

    pub fn names(&self) -> &[String] {
        self.table_names.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_everything_and_nothing() {
        let tables = TablesInput::default();
        assert_eq!(tables.schema_pattern, "%");
        assert_eq!(tables.table_pattern, "%");

        let sizes = TableSizeInput::default();
        assert_eq!(sizes.schema_pattern, "%");
        assert_eq!(sizes.table_names, None);
        assert!(sizes.names().is_empty());
    }

    #[test]
    fn splitting_names_keeps_whitespace() {
        let input = TableSizeInput { schema_pattern: "public".to_string(), table_names: None }
            .with_table_names_string("orders, users", ",");
        assert_eq!(input.names(), ["orders".to_string(), " users".to_string()]);
        assert_eq!(input.schema_pattern, "public");
    }

    #[test]
    fn splitting_an_empty_string_yields_one_empty_name() {
        let input = TableSizeInput::default().with_table_names_string("", ",");
        assert_eq!(input.table_names, Some(vec![String::new()]));
    }
}
