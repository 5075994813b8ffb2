/*!
# Decode Benchmarks

Benchmarks for query-string parsing and parameter decoding.

## Usage

```bash
# Run all benchmarks
cargo bench --bench decode_benchmarks

# Run a specific group
cargo bench --bench decode_benchmarks -- "Filter Coercion"

# Quick benchmark with fewer samples
cargo bench --bench decode_benchmarks -- --quick
```

HTML reports are generated in `target/criterion/report/index.html`.
*/

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use querycrate::filtering::coerce_filter_value;
use querycrate::{ParameterBag, QueryRequest, RawValue};
use std::hint::black_box;

const TYPICAL_QUERY: &str = "include=posts,comments.author&append=full_name\
    &fields[users]=id,name,email&fields[posts]=title\
    &sort=-created_at,name\
    &filter[status]=active,pending&filter[verified]=true&filter[range][min]=1&filter[range][max]=9";

fn wide_filter_query(filters: usize) -> String {
    (0..filters)
        .map(|index| format!("filter[field_{index}]=a,b,c"))
        .collect::<Vec<_>>()
        .join("&")
}

fn nested_value(depth: usize) -> RawValue {
    (0..depth).fold(RawValue::from("x,y"), |inner, _| {
        RawValue::Sequence(vec![RawValue::from("true"), inner])
    })
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Query Parsing");

    group.bench_function("typical query string", |b| {
        b.iter(|| ParameterBag::from_query_str(black_box(TYPICAL_QUERY)));
    });

    for filters in [1, 100, 10_000] {
        let query = wide_filter_query(filters);
        group.bench_with_input(BenchmarkId::new("filters", filters), &query, |b, query| {
            b.iter(|| ParameterBag::from_query_str(black_box(query)));
        });
    }

    group.finish();
}

fn bench_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decoding");
    let request = QueryRequest::from_query_str(TYPICAL_QUERY);

    group.bench_function("includes", |b| b.iter(|| black_box(&request).includes()));
    group.bench_function("fields", |b| b.iter(|| black_box(&request).fields()));
    group.bench_function("sort directives", |b| {
        b.iter(|| black_box(&request).sort_directives());
    });
    group.bench_function("filters", |b| b.iter(|| black_box(&request).filters()));

    group.finish();
}

fn bench_coercion(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filter Coercion");

    for depth in [1, 8, 32] {
        let value = nested_value(depth);
        group.bench_with_input(BenchmarkId::new("nested", depth), &value, |b, value| {
            b.iter(|| coerce_filter_value(black_box(value), ","));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_decoding, bench_coercion);
criterion_main!(benches);
