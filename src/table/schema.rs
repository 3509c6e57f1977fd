// Schema registry: the ordered column set built from the header record.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a table. Rows and columns carry it so that
/// pairing them across tables is detected without holding a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(u64);

impl TableId {
    pub(crate) fn next() -> Self {
        TableId(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A header field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    table: TableId,
    index: usize,
    name: Box<[u8]>,
}

impl Column {
    pub fn index(&self) -> usize {
        self.index
    }

    /// The header text exactly as read.
    pub fn name_bytes(&self) -> &[u8] {
        &self.name
    }

    /// The header text, `None` if it is not valid UTF-8.
    pub fn name(&self) -> Option<&str> {
        std::str::from_utf8(&self.name).ok()
    }

    pub fn table(&self) -> TableId {
        self.table
    }
}

/// Append-only list of columns. Frozen by the owning table once the
/// header record ends.
#[derive(Debug)]
pub struct Schema {
    table: TableId,
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(table: TableId) -> Self {
        Schema {
            table,
            columns: Vec::new(),
        }
    }

    /// Register the next column. Duplicate names are kept.
    pub fn push(&mut self, name: Box<[u8]>) -> &Column {
        let index = self.columns.len();
        self.columns.push(Column {
            table: self.table,
            index,
            name,
        });
        &self.columns[index]
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// First-registered column with this name. Compared byte for byte.
    pub fn by_name<N: AsRef<[u8]> + ?Sized>(&self, name: &N) -> Option<&Column> {
        let name = name.as_ref();
        self.columns.iter().find(|c| &*c.name == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}
