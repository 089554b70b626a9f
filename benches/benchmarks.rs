//! Performance benchmarks for shears

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use shears::scanner;

/// Build a diff that adds a commented function to `file_count` files.
fn synthetic_diff(file_count: usize) -> String {
    let mut diff = String::new();
    for i in 0..file_count {
        diff.push_str(&format!(
            "diff --git a/src/mod_{i}.rs b/src/mod_{i}.rs\n\
             index 83db48f..bf269f4 100644\n\
             --- a/src/mod_{i}.rs\n\
             +++ b/src/mod_{i}.rs\n\
             @@ -1,2 +1,10 @@\n \
             use std::fmt;\n\
             +\n\
             +// helper added in this commit\n\
             +fn helper_{i}(x: u32) -> u32 {{\n\
             +    let y = x * 2; // double it\n\
             +    /* block\n\
             +       comment */\n\
             +    y\n\
             +}}\n \
             fn existing() {{}}\n"
        ));
    }
    diff
}

/// A single large file with a long run of added lines, half of them comments.
fn long_file_diff(line_count: usize) -> String {
    let mut diff = String::from(
        "--- a/big.py\n\
         +++ b/big.py\n",
    );
    diff.push_str(&format!("@@ -1,0 +1,{line_count} @@\n"));
    for i in 0..line_count {
        if i % 2 == 0 {
            diff.push_str(&format!("+value_{i} = {i}  # computed\n"));
        } else {
            diff.push_str(&format!("+value_{i} = \"text with 'quote\"\n"));
        }
    }
    diff
}

fn bench_scan_many_files(c: &mut Criterion) {
    let diff = synthetic_diff(100);
    c.bench_function("scan_100_files", |b| {
        b.iter(|| scanner::scan(black_box(&diff)).unwrap())
    });
}

fn bench_scan_long_file(c: &mut Criterion) {
    let diff = long_file_diff(5_000);
    c.bench_function("scan_5k_line_file", |b| {
        b.iter(|| scanner::scan(black_box(&diff)).unwrap())
    });
}

criterion_group!(benches, bench_scan_many_files, bench_scan_long_file);
criterion_main!(benches);
