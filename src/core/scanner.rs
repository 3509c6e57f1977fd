// Byte-level helpers for the tokenizer.

use memchr::{memchr, memchr3, memchr_iter, memrchr};

pub const QUOTE: u8 = b'"';

/// `\n` or `\r`. Any run of them is a single record boundary.
#[inline]
pub fn is_newline(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

/// Space or tab, trimmed around fields.
#[inline]
pub fn is_blank(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// Length of the run of plain bytes at the start of an unquoted field
/// remainder, i.e. up to the next separator or newline byte.
#[inline]
pub fn unquoted_run(input: &[u8], separator: u8) -> usize {
    memchr3(separator, b'\n', b'\r', input).unwrap_or(input.len())
}

/// Length of the run of verbatim bytes inside a quoted field, i.e. up to
/// the next quote.
#[inline]
pub fn quoted_run(input: &[u8]) -> usize {
    memchr(QUOTE, input).unwrap_or(input.len())
}

/// Count of `\n` bytes in `span` and the number of bytes after the last one.
/// Used to advance line/column over a bulk-copied quoted span.
#[inline]
pub fn newline_stats(span: &[u8]) -> (usize, Option<usize>) {
    match memrchr(b'\n', span) {
        Some(last) => (memchr_iter(b'\n', span).count(), Some(span.len() - last - 1)),
        None => (0, None),
    }
}

/// Remove trailing spaces/tabs.
#[inline]
pub fn trim_trailing_blanks(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&b| !is_blank(b))
        .map_or(0, |p| p + 1);
    &bytes[..end]
}
