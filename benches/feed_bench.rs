// Standalone Rust benchmark for incremental table feeding
//
// Run: cargo bench --bench feed_bench
//
// Compares chunk sizes across:
//   - Clean data (no quoting)
//   - Mixed data (quoted fields, embedded quotes and newlines)
//   - Various sizes (1K, 10K, 100K rows)

use std::time::Instant;

use csvtable::Table;

/// Generate clean CSV (no field needs quoting)
fn generate_clean(num_rows: usize, fields_per_row: usize) -> Vec<u8> {
    let mut out = String::new();
    let header: Vec<String> = (0..fields_per_row).map(|j| format!("col_{j}")).collect();
    out.push_str(&header.join(","));
    out.push('\n');
    for i in 0..num_rows {
        let row: Vec<String> = (0..fields_per_row)
            .map(|j| format!("field_{i}_{j}_value"))
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out.into_bytes()
}

/// Generate mixed CSV (some fields quoted)
fn generate_mixed(num_rows: usize, fields_per_row: usize) -> Vec<u8> {
    let mut out = String::new();
    let header: Vec<String> = (0..fields_per_row).map(|j| format!("col_{j}")).collect();
    out.push_str(&header.join(","));
    out.push_str("\r\n");
    for i in 0..num_rows {
        let row: Vec<String> = (0..fields_per_row)
            .map(|j| match j % 4 {
                0 => format!("plain_{i}"),
                1 => format!("\"has,comma_{i}\""),
                2 => format!("\"has \"\"quote\"\" {i}\""),
                _ => format!("\"multi\nline_{i}\""),
            })
            .collect();
        out.push_str(&row.join(", "));
        out.push_str("\r\n");
    }
    out.into_bytes()
}

fn bench<F: FnMut() -> usize>(name: &str, iterations: u32, mut f: F) {
    // Warm up
    let mut rows = f();

    let start = Instant::now();
    for _ in 0..iterations {
        rows = f();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations;
    println!(
        "{:<40} {:>10.3?} / iter  ({} rows)",
        name,
        per_iter,
        rows
    );
}

fn feed(input: &[u8], chunk: usize) -> usize {
    let mut table = Table::new();
    let mut rows = 0;
    for part in input.chunks(chunk) {
        table.add_data(part);
        rows += table.rows().count();
    }
    table.finish();
    rows + table.rows().count()
}

fn iterations_for(size: usize) -> u32 {
    match size {
        0..=1_000 => 200,
        1_001..=10_000 => 20,
        _ => 3,
    }
}

fn main() {
    println!("feed_bench\n");

    for &rows in &[1_000usize, 10_000, 100_000] {
        let clean = generate_clean(rows, 8);
        let mixed = generate_mixed(rows, 8);
        let iterations = iterations_for(rows);

        for &chunk in &[64usize, 4096, usize::MAX] {
            let label = if chunk == usize::MAX {
                "whole".to_string()
            } else {
                format!("{chunk}B")
            };
            bench(&format!("clean {rows} rows, {label}"), iterations, || {
                feed(&clean, chunk)
            });
            bench(&format!("mixed {rows} rows, {label}"), iterations, || {
                feed(&mixed, chunk)
            });
        }
        println!();
    }
}
