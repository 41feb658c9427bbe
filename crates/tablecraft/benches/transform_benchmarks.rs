//! Benchmarks for the hot transformation paths.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use tablecraft::{BinSpec, Dataset, NormalizedValue, RowFilter, discretize, remove_rows};

fn sample_dataset(rows: usize) -> Dataset {
    let columns = vec!["id".to_string(), "value".to_string(), "group".to_string()];
    let data = (0..rows)
        .map(|i| {
            vec![
                format!("r{i}"),
                if i % 13 == 0 {
                    String::new()
                } else {
                    format!("{}.{}", i % 500, i % 10)
                },
                format!("g{}", i % 4),
            ]
        })
        .collect();
    Dataset::new(columns, data).expect("aligned by construction")
}

fn bench_normalize(c: &mut Criterion) {
    let cells = ["", "  ", "007", "3.5000", "1e2", "hello world", "42kg"];
    c.bench_function("normalize_mixed_cells", |b| {
        b.iter(|| {
            for cell in &cells {
                black_box(NormalizedValue::from_raw(black_box(cell)));
            }
        })
    });
}

fn bench_discretize(c: &mut Criterion) {
    let dataset = sample_dataset(10_000);
    c.bench_function("discretize_size_10k_rows", |b| {
        b.iter(|| {
            black_box(
                discretize(
                    black_box(&dataset),
                    "value",
                    &BinSpec::Size { width: 25.0 },
                )
                .expect("column exists"),
            )
        })
    });
    c.bench_function("discretize_count_10k_rows", |b| {
        b.iter(|| {
            black_box(
                discretize(black_box(&dataset), "value", &BinSpec::Count { n: 8 })
                    .expect("column exists"),
            )
        })
    });
}

fn bench_row_filter(c: &mut Criterion) {
    let dataset = sample_dataset(10_000);
    let filter = RowFilter {
        columns: vec!["value".to_string()],
        remove: vec![NormalizedValue::missing()],
        project: false,
    };
    c.bench_function("remove_missing_10k_rows", |b| {
        b.iter(|| black_box(remove_rows(black_box(&dataset), &filter).expect("column exists")))
    });
}

criterion_group!(benches, bench_normalize, bench_discretize, bench_row_filter);
criterion_main!(benches);
