// Term building for the NIF layer: rows, header and diagnostics.

use crate::error::ParseError;
use crate::table::{Column, Row};
use rustler::types::atom;
use rustler::{Encoder, Env, NewBinary, Term};

/// Copy bytes into a fresh binary term.
pub fn bytes_to_term<'a>(env: Env<'a>, bytes: &[u8]) -> Term<'a> {
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}

/// A cell as a binary of its raw bytes, or `nil` when it was never written.
pub fn cell_to_term<'a>(env: Env<'a>, cell: Option<&[u8]>) -> Term<'a> {
    match cell {
        Some(bytes) => bytes_to_term(env, bytes),
        None => atom::nil().encode(env),
    }
}

/// Convert a row to an Elixir list of binaries/nil
pub fn row_to_term<'a>(env: Env<'a>, row: &Row) -> Term<'a> {
    let cells: Vec<Option<&[u8]>> = row.values().collect();
    let mut list = Term::list_new_empty(env);

    // Build list in reverse (efficient for cons lists)
    for cell in cells.into_iter().rev() {
        list = list.list_prepend(cell_to_term(env, cell));
    }

    list
}

/// Convert popped rows to a list of lists.
pub fn rows_to_term<'a>(env: Env<'a>, rows: Vec<Row>) -> Term<'a> {
    let mut list = Term::list_new_empty(env);

    for row in rows.iter().rev() {
        list = list.list_prepend(row_to_term(env, row));
    }

    list
}

/// Header names as a list of binaries.
pub fn columns_to_term<'a>(env: Env<'a>, columns: &[Column]) -> Term<'a> {
    let mut list = Term::list_new_empty(env);

    for column in columns.iter().rev() {
        list = list.list_prepend(bytes_to_term(env, column.name_bytes()));
    }

    list
}

/// Diagnostics as `{message, line, column}` tuples.
pub fn errors_to_term<'a>(env: Env<'a>, errors: Vec<ParseError>) -> Term<'a> {
    let mut list = Term::list_new_empty(env);

    for error in errors.iter().rev() {
        let message = bytes_to_term(env, error.message().as_bytes());
        let tuple = (message, error.line, error.column).encode(env);
        list = list.list_prepend(tuple);
    }

    list
}
