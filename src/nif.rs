// Erlang/Elixir NIF entry points
//
// The Elixir side owns a TableRef and drives it with small calls:
// feed chunks, pull rows in batches, pull diagnostics.

use crate::resource::{TableRef, TableResource};
use crate::table::TableConfig;
use crate::term::{columns_to_term, errors_to_term, rows_to_term};
use rustler::{Binary, Env, Error, NifResult, ResourceArc, Term};

/// Decode separator from a Term.
/// Accepts: integer 44 or single-byte binary <<44>>
fn decode_separator<'a>(term: Term<'a>) -> NifResult<u8> {
    if let Ok(byte) = term.decode::<u8>() {
        return Ok(byte);
    }
    if let Ok(binary) = term.decode::<Binary<'a>>() {
        if let [byte] = binary.as_slice() {
            return Ok(*byte);
        }
    }
    Err(Error::BadArg)
}

/// Create a table with the default `,` separator
#[rustler::nif]
fn table_new() -> TableRef {
    ResourceArc::new(TableResource::new())
}

/// Create a table with a custom separator
#[rustler::nif]
fn table_new_with_separator<'a>(sep_term: Term<'a>) -> NifResult<TableRef> {
    let separator = decode_separator(sep_term)?;
    Ok(ResourceArc::new(TableResource::with_config(TableConfig {
        separator,
        ..TableConfig::default()
    })))
}

/// Feed a chunk; returns (available_rows, pending_errors)
#[rustler::nif]
fn table_feed(table: TableRef, chunk: Binary) -> NifResult<(usize, usize)> {
    let mut inner = table.lock()?;
    inner.add_data(chunk.as_slice());
    Ok((inner.available_rows(), inner.pending_errors()))
}

/// Seal a final record that has no trailing newline
#[rustler::nif]
fn table_finish(table: TableRef) -> NifResult<(usize, usize)> {
    let mut inner = table.lock()?;
    inner.finish();
    Ok((inner.available_rows(), inner.pending_errors()))
}

/// Header names (empty until the header record has ended)
#[rustler::nif]
fn table_header<'a>(env: Env<'a>, table: TableRef) -> NifResult<Term<'a>> {
    let inner = table.lock()?;
    if !inner.has_header() {
        return Ok(Term::list_new_empty(env));
    }
    Ok(columns_to_term(env, inner.columns()))
}

/// Take up to `max` rows
#[rustler::nif]
fn table_next_rows<'a>(env: Env<'a>, table: TableRef, max: usize) -> NifResult<Term<'a>> {
    let mut inner = table.lock()?;
    let rows = inner.rows().take(max).collect();
    Ok(rows_to_term(env, rows))
}

/// Drain all pending diagnostics
#[rustler::nif]
fn table_errors<'a>(env: Env<'a>, table: TableRef) -> NifResult<Term<'a>> {
    let mut inner = table.lock()?;
    let errors = inner.errors().collect();
    Ok(errors_to_term(env, errors))
}

/// (has_header, available_rows, pending_errors)
#[rustler::nif]
fn table_status(table: TableRef) -> NifResult<(bool, usize, usize)> {
    let inner = table.lock()?;
    Ok((
        inner.has_header(),
        inner.available_rows(),
        inner.pending_errors(),
    ))
}

rustler::init!("Elixir.CsvTable.Native");
