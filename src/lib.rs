// csvtable - Incremental CSV table reader
//
// Feed arbitrarily chunked bytes into a Table; it yields a header (column
// set), a FIFO queue of parsed rows and a queue of diagnostics.
//
// Layers:
// core:  byte scanner, cell buffer, tokenizer state machine
// table: schema, rows, typed values, ring-buffer row queue, Table facade
// batch: whole-input helpers (sequential and rayon-parallel)
// nif:   Erlang/Elixir binding (feature "nif")

pub mod batch;
pub mod core;
pub mod error;
pub mod table;

#[cfg(feature = "nif")]
mod nif;
#[cfg(feature = "nif")]
mod resource;
#[cfg(feature = "nif")]
mod term;

pub use batch::{parse_table, parse_table_with_config, parse_tables_parallel, ParsedTable};
pub use crate::core::{Position, DEFAULT_SEPARATOR};
pub use error::{ParseError, ParseErrorKind, TableError};
pub use table::{CellValue, Column, Row, Table, TableConfig, TableId};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;
