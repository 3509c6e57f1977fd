// Core primitives for incremental CSV tokenizing

pub mod cell;
pub mod scanner;
pub mod tokenizer;

pub use cell::{CellBuffer, INITIAL_CELL_CAPACITY};
pub use tokenizer::{Position, RecordSink, Tokenizer, DEFAULT_SEPARATOR};
