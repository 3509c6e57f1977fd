// Incremental tokenizer
//
// Byte-driven state machine that turns arbitrarily chunked input into
// field / end-of-record events. All state needed to resume lives in the
// Tokenizer, so results never depend on where chunks were split.
//
// Key design:
// - A per-byte handler returns Flow::Reprocess when the byte has to be
//   looked at again by the state it just switched to (newline after a
//   field, the byte following a closing quote).
// - Runs of plain bytes inside a field are bulk-copied with memchr.
// - Output goes to a RecordSink; the tokenizer owns no rows or columns.

use super::cell::CellBuffer;
use super::scanner::{
    is_blank, is_newline, newline_stats, quoted_run, unquoted_run, QUOTE,
};
use crate::error::{ParseError, ParseErrorKind};

/// Default field separator.
pub const DEFAULT_SEPARATOR: u8 = b',';

/// Location in the input. `line` is 1-based, `column` counts bytes since
/// the last `\n` (0 right after a newline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Receiver of tokenizer events.
pub trait RecordSink {
    /// A field ended. `at` is where its first byte was seen.
    fn field(&mut self, text: Box<[u8]>, at: Position);

    /// A record boundary was reached. Called once for every byte of a
    /// newline run, so implementations must treat repeats as no-ops.
    fn end_record(&mut self);

    /// Malformed input was skipped.
    fn error(&mut self, error: ParseError);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingRow,
    FieldStart,
    FieldUnquoted,
    FieldQuoted,
    FieldQuotedSawQuote,
    FieldQuotedDone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Consume,
    Reprocess,
}

#[derive(Debug)]
pub struct Tokenizer {
    state: State,
    separator: u8,
    line: usize,
    column: usize,
    cell: CellBuffer,
    cell_start: Position,
}

impl Tokenizer {
    pub fn new(separator: u8) -> Self {
        Self::with_cell_capacity(separator, super::cell::INITIAL_CELL_CAPACITY)
    }

    pub fn with_cell_capacity(separator: u8, cell_capacity: usize) -> Self {
        Tokenizer {
            state: State::AwaitingRow,
            separator,
            line: 1,
            column: 0,
            cell: CellBuffer::with_capacity(cell_capacity),
            cell_start: Position::default(),
        }
    }

    pub fn separator(&self) -> u8 {
        self.separator
    }

    /// Only affects bytes fed after the call.
    pub fn set_separator(&mut self, separator: u8) {
        self.separator = separator;
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// True while a field or record is partially parsed.
    pub fn has_partial(&self) -> bool {
        self.state != State::AwaitingRow
    }

    /// Feed a chunk of input.
    pub fn feed<S: RecordSink + ?Sized>(&mut self, data: &[u8], sink: &mut S) {
        let mut pos = 0;

        while pos < data.len() {
            // Bulk-copy plain bytes inside a field.
            match self.state {
                State::FieldUnquoted => {
                    let run = unquoted_run(&data[pos..], self.separator);
                    if run > 0 {
                        self.cell.extend(&data[pos..pos + run]);
                        self.column += run;
                        pos += run;
                        continue;
                    }
                }
                State::FieldQuoted => {
                    let run = quoted_run(&data[pos..]);
                    if run > 0 {
                        let span = &data[pos..pos + run];
                        self.cell.extend(span);
                        self.advance_over(span);
                        pos += run;
                        continue;
                    }
                }
                _ => {}
            }

            let byte = data[pos];
            self.column += 1;
            while self.step(byte, sink) == Flow::Reprocess {}
            if byte == b'\n' {
                self.line += 1;
                self.column = 0;
            }
            pos += 1;
        }
    }

    /// End of input: flush the field in progress and seal the record.
    /// An unterminated quoted field is kept verbatim.
    pub fn finish<S: RecordSink + ?Sized>(&mut self, sink: &mut S) {
        match self.state {
            State::AwaitingRow => {}
            State::FieldStart => {
                self.cell_start = self.position();
                self.flush_field(true, sink);
            }
            State::FieldUnquoted => self.flush_field(true, sink),
            State::FieldQuoted | State::FieldQuotedSawQuote | State::FieldQuotedDone => {
                self.flush_field(false, sink)
            }
        }
        sink.end_record();
        self.state = State::AwaitingRow;
    }

    fn step<S: RecordSink + ?Sized>(&mut self, byte: u8, sink: &mut S) -> Flow {
        match self.state {
            State::AwaitingRow => {
                sink.end_record();
                if is_newline(byte) {
                    Flow::Consume
                } else {
                    self.state = State::FieldStart;
                    Flow::Reprocess
                }
            }

            State::FieldStart => {
                if is_newline(byte) {
                    self.cell_start = self.position();
                    self.flush_field(true, sink);
                    self.state = State::AwaitingRow;
                    Flow::Reprocess
                } else if byte == self.separator {
                    self.cell_start = self.position();
                    self.flush_field(true, sink);
                    Flow::Consume
                } else if is_blank(byte) {
                    Flow::Consume
                } else if byte == QUOTE {
                    self.cell_start = self.position();
                    self.state = State::FieldQuoted;
                    Flow::Consume
                } else {
                    self.cell_start = self.position();
                    self.cell.push(byte);
                    self.state = State::FieldUnquoted;
                    Flow::Consume
                }
            }

            State::FieldUnquoted => {
                if is_newline(byte) {
                    self.flush_field(true, sink);
                    self.state = State::AwaitingRow;
                    Flow::Reprocess
                } else if byte == self.separator {
                    self.flush_field(true, sink);
                    self.state = State::FieldStart;
                    Flow::Consume
                } else {
                    self.cell.push(byte);
                    Flow::Consume
                }
            }

            State::FieldQuoted => {
                if byte == QUOTE {
                    self.state = State::FieldQuotedSawQuote;
                } else {
                    self.cell.push(byte);
                }
                Flow::Consume
            }

            State::FieldQuotedSawQuote => {
                if byte == QUOTE {
                    self.cell.push(QUOTE);
                    self.state = State::FieldQuoted;
                    Flow::Consume
                } else {
                    self.state = State::FieldQuotedDone;
                    Flow::Reprocess
                }
            }

            State::FieldQuotedDone => {
                if is_newline(byte) {
                    self.flush_field(false, sink);
                    self.state = State::AwaitingRow;
                    Flow::Reprocess
                } else if byte == self.separator {
                    self.flush_field(false, sink);
                    self.state = State::FieldStart;
                    Flow::Consume
                } else if is_blank(byte) {
                    Flow::Consume
                } else {
                    sink.error(ParseError::new(
                        ParseErrorKind::SymbolAfterEscape,
                        self.line,
                        self.column,
                    ));
                    Flow::Consume
                }
            }
        }
    }

    fn flush_field<S: RecordSink + ?Sized>(&mut self, trim: bool, sink: &mut S) {
        let text = self.cell.take(trim);
        sink.field(text, self.cell_start);
    }

    /// Advance line/column over bytes copied verbatim.
    fn advance_over(&mut self, span: &[u8]) {
        match newline_stats(span) {
            (count, Some(tail)) => {
                self.line += count;
                self.column = tail;
            }
            (_, None) => self.column += span.len(),
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Field(String, usize, usize),
        End,
        Error(ParseErrorKind, usize, usize),
    }

    /// Records events, collapsing repeated end-of-record calls.
    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl RecordSink for Recorder {
        fn field(&mut self, text: Box<[u8]>, at: Position) {
            let text = String::from_utf8_lossy(&text).into_owned();
            self.events.push(Event::Field(text, at.line, at.column));
        }

        fn end_record(&mut self) {
            if !matches!(self.events.last(), None | Some(Event::End)) {
                self.events.push(Event::End);
            }
        }

        fn error(&mut self, error: ParseError) {
            self.events
                .push(Event::Error(error.kind, error.line, error.column));
        }
    }

    fn fields(events: &[Event]) -> Vec<Vec<String>> {
        let mut rows = vec![Vec::new()];
        for event in events {
            match event {
                Event::Field(text, _, _) => rows.last_mut().unwrap().push(text.clone()),
                Event::End => rows.push(Vec::new()),
                Event::Error(..) => {}
            }
        }
        rows.retain(|r| !r.is_empty());
        rows
    }

    fn run(input: &[u8]) -> Vec<Event> {
        let mut tok = Tokenizer::default();
        let mut rec = Recorder::default();
        tok.feed(input, &mut rec);
        rec.events
    }

    #[test]
    fn test_simple_records() {
        let events = run(b"a,b\n1,2\n");
        assert_eq!(fields(&events), vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_field_positions() {
        let events = run(b"ab, cd\n");
        assert_eq!(events[0], Event::Field("ab".into(), 1, 1));
        assert_eq!(events[1], Event::Field("cd".into(), 1, 5));
    }

    #[test]
    fn test_whitespace_trimming() {
        let events = run(b"  a  ,\t\"b \" \t, c d \n");
        assert_eq!(fields(&events), vec![vec!["a", "b ", "c d"]]);
    }

    #[test]
    fn test_empty_fields() {
        let events = run(b"a,,b,\n");
        assert_eq!(fields(&events), vec![vec!["a", "", "b", ""]]);
    }

    #[test]
    fn test_quoted_separator_and_newline() {
        let events = run(b"\"a,b\",\"c\nd\"\n");
        assert_eq!(fields(&events), vec![vec!["a,b", "c\nd"]]);
    }

    #[test]
    fn test_doubled_quote() {
        let events = run(b"\"a\"\"b\"\n");
        assert_eq!(fields(&events), vec![vec!["a\"b"]]);
    }

    #[test]
    fn test_symbol_after_quote_is_reported_and_dropped() {
        let events = run(b"\"ab\"x,c\n");
        assert_eq!(events[0], Event::Error(ParseErrorKind::SymbolAfterEscape, 1, 5));
        assert_eq!(fields(&events), vec![vec!["ab", "c"]]);
    }

    #[test]
    fn test_line_counting_inside_quotes() {
        let events = run(b"\"a\nb\"z\n");
        assert_eq!(events[0], Event::Error(ParseErrorKind::SymbolAfterEscape, 2, 3));
    }

    #[test]
    fn test_tab_separator() {
        let mut tok = Tokenizer::new(b'\t');
        let mut rec = Recorder::default();
        tok.feed(b"a\t\tb\n", &mut rec);
        assert_eq!(fields(&rec.events), vec![vec!["a", "", "b"]]);
    }

    #[test]
    fn test_byte_at_a_time_matches_whole() {
        let input = b"h1, \"h 2\"\r\n\r\n1,\"x\"\"y\"\n\"q\" z,2\n";
        let whole = run(input);

        let mut tok = Tokenizer::default();
        let mut rec = Recorder::default();
        for byte in input.iter() {
            tok.feed(std::slice::from_ref(byte), &mut rec);
        }
        assert_eq!(rec.events, whole);
    }

    #[test]
    fn test_finish_flushes_partial() {
        let mut tok = Tokenizer::default();
        let mut rec = Recorder::default();
        tok.feed(b"a,b\n1,\"unterminated", &mut rec);
        assert!(tok.has_partial());
        tok.finish(&mut rec);
        assert!(!tok.has_partial());
        assert_eq!(
            fields(&rec.events),
            vec![vec!["a", "b"], vec!["1", "unterminated"]]
        );
    }

    #[test]
    fn test_position_after_newlines() {
        let mut tok = Tokenizer::default();
        let mut rec = Recorder::default();
        tok.feed(b"ab\ncde", &mut rec);
        assert_eq!(tok.position(), Position { line: 2, column: 3 });
    }
}
