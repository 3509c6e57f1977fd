// Property tests: chunk-boundary independence and queue FIFO behavior.

use csvtable::table::RowQueue;
use csvtable::Table;
use proptest::prelude::*;
use std::collections::VecDeque;

type Snapshot = (
    Vec<String>,
    Vec<(usize, Vec<Option<String>>)>,
    Vec<(String, usize, usize)>,
);

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn run<'a>(chunks: impl IntoIterator<Item = &'a [u8]>, sep: u8) -> Snapshot {
    let mut table = Table::with_separator(sep);
    for chunk in chunks {
        table.add_data(chunk);
    }
    table.finish();
    let header = table.columns().iter().map(|c| lossy(c.name_bytes())).collect();
    let rows = table
        .rows()
        .map(|r| (r.index(), r.values().map(|v| v.map(lossy)).collect()))
        .collect();
    let errors = table
        .errors()
        .map(|e| (e.message().to_string(), e.line, e.column))
        .collect();
    (header, rows, errors)
}

/// Inputs built from the bytes the tokenizer treats specially.
fn csv_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop::sample::select(vec![b'a', b'b', b'1', b' ', b'\t', b',', b';', b'"', b'\n', b'\r']),
        0..96,
    )
}

fn split_at_cuts(input: &[u8], mut cuts: Vec<usize>) -> Vec<&[u8]> {
    cuts.iter_mut().for_each(|c| *c %= input.len() + 1);
    cuts.sort_unstable();
    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        chunks.push(&input[start..cut]);
        start = cut;
    }
    chunks.push(&input[start..]);
    chunks
}

#[derive(Debug, Clone)]
enum QueueOp {
    Push,
    Pop,
}

fn queue_ops() -> impl Strategy<Value = Vec<QueueOp>> {
    prop::collection::vec(
        prop_oneof![3 => Just(QueueOp::Push), 2 => Just(QueueOp::Pop)],
        0..200,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_chunking_does_not_change_output(
        input in csv_bytes(),
        cuts in prop::collection::vec(any::<usize>(), 0..8),
        sep in prop::sample::select(vec![b',', b';', b'\t']),
    ) {
        let whole = run([input.as_slice()], sep);
        let chunked = run(split_at_cuts(&input, cuts), sep);
        prop_assert_eq!(whole, chunked);
    }

    #[test]
    fn prop_rows_have_column_count_slots(input in csv_bytes()) {
        let (header, rows, _) = run([input.as_slice()], b',');
        for (i, (index, values)) in rows.iter().enumerate() {
            prop_assert_eq!(*index, i);
            prop_assert_eq!(values.len(), header.len());
        }
    }

    #[test]
    fn prop_queue_matches_model(ops in queue_ops()) {
        let mut queue = RowQueue::new();
        let mut model = VecDeque::new();
        let mut next = 0u32;
        for op in ops {
            match op {
                QueueOp::Push => {
                    queue.push(next);
                    model.push_back(next);
                    next += 1;
                }
                QueueOp::Pop => {
                    prop_assert_eq!(queue.pop(), model.pop_front());
                }
            }
            prop_assert_eq!(queue.len(), model.len());
            prop_assert!(queue.capacity().is_power_of_two());
            prop_assert!(queue.len() < queue.capacity());
        }
    }
}
