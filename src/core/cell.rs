// Cell buffer
//
// Accumulates the raw bytes of the field being parsed. Bytes may arrive
// across any number of feed() calls; the buffer is only copied out when
// the field ends. Bytes are kept exactly as read, whatever the encoding.

use super::scanner::trim_trailing_blanks;

/// Initial byte capacity of the cell buffer.
pub const INITIAL_CELL_CAPACITY: usize = 128;

#[derive(Debug)]
pub struct CellBuffer {
    bytes: Vec<u8>,
}

impl CellBuffer {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CELL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        CellBuffer {
            bytes: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    #[inline]
    pub fn extend(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Copy out the accumulated bytes and reset the buffer for the next
    /// field. With `trim`, trailing spaces/tabs are dropped first.
    pub fn take(&mut self, trim: bool) -> Box<[u8]> {
        let bytes = if trim {
            trim_trailing_blanks(&self.bytes)
        } else {
            &self.bytes[..]
        };
        let text: Box<[u8]> = bytes.into();
        // Keep the allocation for the next field.
        self.bytes.clear();
        text
    }
}

impl Default for CellBuffer {
    fn default() -> Self {
        Self::new()
    }
}
