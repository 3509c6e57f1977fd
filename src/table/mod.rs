// Streaming table
//
// Table is the public entry point: feed bytes with add_data(), then pull
// the header, rows and diagnostics. The Tokenizer produces field and
// record events; the Assembler turns them into columns (before the header
// ends) or rows (after), and queues finished rows.

pub mod queue;
pub mod row;
pub mod schema;
pub mod value;

use std::collections::VecDeque;

use crate::core::{Position, RecordSink, Tokenizer, DEFAULT_SEPARATOR, INITIAL_CELL_CAPACITY};
use crate::error::{ParseError, ParseErrorKind};

pub use queue::{RowQueue, INITIAL_QUEUE_CAPACITY};
pub use row::Row;
pub use schema::{Column, Schema, TableId};
pub use value::CellValue;

/// Construction options for a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Field separator byte.
    pub separator: u8,
    /// Initial byte capacity of the in-progress field buffer.
    pub initial_cell_capacity: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            separator: DEFAULT_SEPARATOR,
            initial_cell_capacity: INITIAL_CELL_CAPACITY,
        }
    }
}

/// Everything the tokenizer's events build up.
#[derive(Debug)]
struct Assembler {
    id: TableId,
    schema: Schema,
    has_header: bool,
    pending: Option<Row>,
    /// Cells seen in the pending row, including dropped extras.
    pending_cells: usize,
    rows_seen: usize,
    queue: RowQueue<Row>,
    errors: VecDeque<ParseError>,
}

impl Assembler {
    fn new(id: TableId) -> Self {
        Assembler {
            id,
            schema: Schema::new(id),
            has_header: false,
            pending: None,
            pending_cells: 0,
            rows_seen: 0,
            queue: RowQueue::new(),
            errors: VecDeque::new(),
        }
    }

    fn report(&mut self, error: ParseError) {
        tracing::debug!(
            table = %self.id,
            line = error.line,
            column = error.column,
            "{}",
            error.kind
        );
        self.errors.push_back(error);
    }
}

impl RecordSink for Assembler {
    fn field(&mut self, text: Box<[u8]>, at: Position) {
        if !self.has_header {
            self.schema.push(text);
            return;
        }

        if self.pending.is_none() {
            self.pending = Some(Row::new(self.id, self.rows_seen, self.schema.len()));
            self.rows_seen += 1;
            self.pending_cells = 0;
        }

        let slot = self.pending_cells;
        self.pending_cells += 1;
        let stored = match self.pending.as_mut() {
            Some(row) => row.set(slot, text),
            None => false,
        };
        if !stored {
            self.report(ParseError::new(
                ParseErrorKind::ExtraColumn,
                at.line,
                at.column,
            ));
        }
    }

    fn end_record(&mut self) {
        if !self.has_header {
            if !self.schema.is_empty() {
                self.has_header = true;
                tracing::debug!(table = %self.id, columns = self.schema.len(), "header complete");
            }
            return;
        }

        if let Some(row) = self.pending.take() {
            tracing::trace!(table = %self.id, index = row.index(), "row queued");
            self.queue.push(row);
            self.pending_cells = 0;
        }
    }

    fn error(&mut self, error: ParseError) {
        self.report(error);
    }
}

/// Incremental CSV reader.
///
/// ```
/// use csvtable::Table;
///
/// let mut table = Table::new();
/// table.add_data(b"name,age\nal");
/// table.add_data(b"ice, 30\n");
///
/// let age = table.column_by_name("age").unwrap().clone();
/// let row = table.next_row().unwrap();
/// assert_eq!(row.parse_or(&age, 0u8).unwrap(), 30);
/// ```
#[derive(Debug)]
pub struct Table {
    tokenizer: Tokenizer,
    assembler: Assembler,
}

impl Table {
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    pub fn with_separator(separator: u8) -> Self {
        Self::with_config(TableConfig {
            separator,
            ..TableConfig::default()
        })
    }

    pub fn with_config(config: TableConfig) -> Self {
        Table {
            tokenizer: Tokenizer::with_cell_capacity(config.separator, config.initial_cell_capacity),
            assembler: Assembler::new(TableId::next()),
        }
    }

    pub fn separator(&self) -> u8 {
        self.tokenizer.separator()
    }

    /// Applies to bytes added after this call.
    pub fn set_separator(&mut self, separator: u8) {
        self.tokenizer.set_separator(separator);
    }

    /// Feed more input. Chunks may split records and fields anywhere.
    pub fn add_data(&mut self, data: &[u8]) {
        self.tokenizer.feed(data, &mut self.assembler);
    }

    pub fn add_str(&mut self, data: &str) {
        self.add_data(data.as_bytes());
    }

    /// Signal end of input: a final record without a trailing newline is
    /// sealed and queued. Further data may still be added afterwards.
    pub fn finish(&mut self) {
        self.tokenizer.finish(&mut self.assembler);
    }

    /// Where the tokenizer currently is in the input.
    pub fn position(&self) -> Position {
        self.tokenizer.position()
    }

    pub fn has_header(&self) -> bool {
        self.assembler.has_header
    }

    pub fn column_count(&self) -> usize {
        self.assembler.schema.len()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.assembler.schema.get(index)
    }

    /// On duplicate header names the first column wins.
    pub fn column_by_name<N: AsRef<[u8]> + ?Sized>(&self, name: &N) -> Option<&Column> {
        self.assembler.schema.by_name(name)
    }

    pub fn columns(&self) -> &[Column] {
        self.assembler.schema.columns()
    }

    pub fn has_row(&self) -> bool {
        !self.assembler.queue.is_empty()
    }

    pub fn available_rows(&self) -> usize {
        self.assembler.queue.len()
    }

    /// Pop the oldest queued row. The caller owns it from here on.
    pub fn next_row(&mut self) -> Option<Row> {
        self.assembler.queue.pop()
    }

    /// Drain queued rows, oldest first.
    pub fn rows(&mut self) -> impl Iterator<Item = Row> + '_ {
        std::iter::from_fn(move || self.next_row())
    }

    pub fn has_error(&self) -> bool {
        !self.assembler.errors.is_empty()
    }

    pub fn pending_errors(&self) -> usize {
        self.assembler.errors.len()
    }

    /// Pop the oldest diagnostic.
    pub fn next_error(&mut self) -> Option<ParseError> {
        self.assembler.errors.pop_front()
    }

    /// Pop diagnostics lazily, oldest first. Errors not pulled from the
    /// iterator stay queued.
    pub fn errors(&mut self) -> impl Iterator<Item = ParseError> + '_ {
        std::iter::from_fn(move || self.next_error())
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}
