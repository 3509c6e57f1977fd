// Typed cell conversion
//
// Cells are stored as text; conversion happens on read. Failures are
// local (None / default) and never reach the table's error sink.

/// A type a cell's text can be parsed into.
pub trait CellValue: Sized {
    /// Parse non-empty cell text. `None` when the text does not represent
    /// a value of this type (including integer range overflow).
    fn parse_cell(text: &str) -> Option<Self>;
}

macro_rules! impl_cell_value_fromstr {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CellValue for $ty {
                #[inline]
                fn parse_cell(text: &str) -> Option<Self> {
                    text.trim_matches(|c: char| c == ' ' || c == '\t').parse().ok()
                }
            }
        )*
    };
}

impl_cell_value_fromstr!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

/// Accepted spellings, compared case-insensitively.
const TRUE_WORDS: [&str; 4] = ["true", "yes", "on", "1"];
const FALSE_WORDS: [&str; 4] = ["false", "no", "off", "0"];

impl CellValue for bool {
    fn parse_cell(text: &str) -> Option<Self> {
        let text = text.trim_matches(|c: char| c == ' ' || c == '\t');
        if TRUE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(text)) {
            Some(true)
        } else if FALSE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(text)) {
            Some(false)
        } else {
            None
        }
    }
}

/// Parse an optional cell. Absent and empty cells yield `None`.
pub fn parse_optional<T: CellValue>(text: Option<&str>) -> Option<T> {
    match text {
        Some(t) if !t.is_empty() => T::parse_cell(t),
        _ => None,
    }
}
