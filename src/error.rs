// Error types
//
// Two families:
// - ParseError: malformed input, queued in the table's error sink and
//   drained by the caller. Parsing always continues past these.
// - TableError: API misuse (pairing a row with a column of another
//   table), returned directly as Err.

use std::fmt;

/// Kind of malformed input detected by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A data row carried more cells than the header declared.
    ExtraColumn,
    /// A non-blank byte followed the closing quote of an escaped field.
    SymbolAfterEscape,
}

impl ParseErrorKind {
    /// The fixed diagnostic text for this kind.
    pub fn message(self) -> &'static str {
        match self {
            ParseErrorKind::ExtraColumn => "Unexpected extra column",
            ParseErrorKind::SymbolAfterEscape => "Unexpected symbol after end of escaped string",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A diagnostic for malformed input.
///
/// `line` is 1-based. `column` counts bytes since the last `\n`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        ParseError { kind, line, column }
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

/// Misuse of the row/column accessors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The column was registered by a different table than the row.
    #[error("column {column:?} belongs to table {column_table}, row belongs to table {row_table}")]
    ForeignColumn {
        column: String,
        column_table: u64,
        row_table: u64,
    },

    /// The column index does not fit the row's slots.
    #[error("column index {index} out of range for row with {len} values")]
    ColumnOutOfRange { index: usize, len: usize },

    /// Text was requested but the cell's bytes are not valid UTF-8.
    #[error("cell at row {row}, column {column} is not valid UTF-8")]
    NotUtf8 { row: usize, column: usize },
}
