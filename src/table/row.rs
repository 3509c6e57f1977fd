// Data rows
//
// A row holds one optional cell per header column. Slots that no cell was
// written to stay None. Cells keep the input bytes unchanged; the &str
// accessors validate UTF-8 on read.

use super::schema::{Column, TableId};
use super::value::{parse_optional, CellValue};
use crate::error::TableError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    table: TableId,
    index: usize,
    values: Box<[Option<Box<[u8]>>]>,
}

impl Row {
    pub(crate) fn new(table: TableId, index: usize, columns: usize) -> Self {
        Row {
            table,
            index,
            values: vec![None; columns].into_boxed_slice(),
        }
    }

    /// Store a cell. Returns false if `slot` is past the last column.
    pub(crate) fn set(&mut self, slot: usize, cell: Box<[u8]>) -> bool {
        match self.values.get_mut(slot) {
            Some(value) => {
                *value = Some(cell);
                true
            }
            None => false,
        }
    }

    /// Position of this row among all data rows the table has seen.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn table(&self) -> TableId {
        self.table
    }

    /// Number of slots (the table's column count).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw cell by column index, without table validation.
    pub fn get_bytes(&self, slot: usize) -> Option<&[u8]> {
        self.values.get(slot).and_then(|v| v.as_deref())
    }

    /// Cell text by column index. `None` if absent or not valid UTF-8.
    pub fn get(&self, slot: usize) -> Option<&str> {
        self.get_bytes(slot)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Raw cells in column order.
    pub fn values(&self) -> impl Iterator<Item = Option<&[u8]>> {
        self.values.iter().map(|v| v.as_deref())
    }

    fn slot(&self, column: &Column) -> Result<Option<&[u8]>, TableError> {
        if column.table() != self.table {
            return Err(TableError::ForeignColumn {
                column: String::from_utf8_lossy(column.name_bytes()).into_owned(),
                column_table: column.table().get(),
                row_table: self.table.get(),
            });
        }
        self.values
            .get(column.index())
            .map(|v| v.as_deref())
            .ok_or(TableError::ColumnOutOfRange {
                index: column.index(),
                len: self.values.len(),
            })
    }

    /// The raw cell under `column`, `None` if it was never written.
    pub fn value_bytes(&self, column: &Column) -> Result<Option<&[u8]>, TableError> {
        self.slot(column)
    }

    /// The cell under `column` as text, `None` if it was never written.
    pub fn value(&self, column: &Column) -> Result<Option<&str>, TableError> {
        match self.slot(column)? {
            Some(bytes) => std::str::from_utf8(bytes)
                .map(Some)
                .map_err(|_| TableError::NotUtf8 {
                    row: self.index,
                    column: column.index(),
                }),
            None => Ok(None),
        }
    }

    /// The cell under `column`, with absent cells read as `""`.
    pub fn text(&self, column: &Column) -> Result<&str, TableError> {
        Ok(self.value(column)?.unwrap_or(""))
    }

    /// True for absent and zero-length cells.
    pub fn cell_is_empty(&self, column: &Column) -> Result<bool, TableError> {
        Ok(self.slot(column)?.map_or(true, <[u8]>::is_empty))
    }

    /// Parse the cell. `None` when absent, empty, not UTF-8 or not a `T`.
    pub fn parse<T: CellValue>(&self, column: &Column) -> Result<Option<T>, TableError> {
        let text = self
            .slot(column)?
            .and_then(|bytes| std::str::from_utf8(bytes).ok());
        Ok(parse_optional(text))
    }

    /// Parse the cell, substituting `default` when that fails.
    pub fn parse_or<T: CellValue>(&self, column: &Column, default: T) -> Result<T, TableError> {
        Ok(self.parse(column)?.unwrap_or(default))
    }
}
