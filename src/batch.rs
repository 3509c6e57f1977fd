// Whole-input helpers
//
// Materialize complete in-memory inputs. The parallel variant gives each
// input its own Table on the rayon pool; a single Table is never shared
// between threads.

use crate::error::ParseError;
use crate::table::{Column, Row, Table, TableConfig};
use rayon::prelude::*;

/// Everything a table produced for one complete input.
#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub errors: Vec<ParseError>,
}

impl ParsedTable {
    /// First column with this name, compared byte for byte.
    pub fn column_by_name<N: AsRef<[u8]> + ?Sized>(&self, name: &N) -> Option<&Column> {
        let name = name.as_ref();
        self.columns.iter().find(|c| c.name_bytes() == name)
    }
}

/// Parse a complete input, including a final record without a trailing
/// newline.
pub fn parse_table(input: &[u8]) -> ParsedTable {
    parse_table_with_config(input, TableConfig::default())
}

pub fn parse_table_with_config(input: &[u8], config: TableConfig) -> ParsedTable {
    let mut table = Table::with_config(config);
    table.add_data(input);
    table.finish();
    ParsedTable {
        columns: table.columns().to_vec(),
        rows: table.rows().collect(),
        errors: table.errors().collect(),
    }
}

/// Parse independent inputs in parallel. Output order matches `inputs`.
pub fn parse_tables_parallel(inputs: &[&[u8]], config: TableConfig) -> Vec<ParsedTable> {
    inputs
        .par_iter()
        .map(|input| parse_table_with_config(input, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_without_trailing_newline() {
        let parsed = parse_table(b"a,b\n1,2\n3,4");
        assert_eq!(parsed.columns.len(), 2);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[1].get(1), Some("4"));
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn test_parallel_keeps_input_order() {
        let inputs: Vec<Vec<u8>> = (0..16)
            .map(|i| format!("id\n{i}\n").into_bytes())
            .collect();
        let refs: Vec<&[u8]> = inputs.iter().map(|v| v.as_slice()).collect();
        let parsed = parse_tables_parallel(&refs, TableConfig::default());
        for (i, table) in parsed.iter().enumerate() {
            let id = table.column_by_name("id").unwrap();
            assert_eq!(table.rows[0].parse::<u64>(id).unwrap(), Some(i as u64));
        }
    }

    #[test]
    fn test_parallel_collects_errors_per_input() {
        let refs: [&[u8]; 2] = [b"a\n1,2\n", b"a\n1\n"];
        let parsed = parse_tables_parallel(&refs, TableConfig::default());
        assert_eq!(parsed[0].errors.len(), 1);
        assert!(parsed[1].errors.is_empty());
    }
}
