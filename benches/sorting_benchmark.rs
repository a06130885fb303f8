use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use keysort::prelude::*;
use rand::Rng;
use std::hint::black_box;

struct Record {
    name: String,
    size: u64,
}

impl FieldAccess for Record {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(self.name.as_str().into()),
            "size" => Some(Value::Int(self.size as i64)),
            _ => None,
        }
    }
}

fn bench_file_names(c: &mut Criterion) {
    let mut group = c.benchmark_group("File Names");
    group.sample_size(10);

    // Dataset generation
    let mut rng = rand::rng();
    let count = 10_000;

    let names: Vec<String> = (0..count)
        .map(|_| format!("file-{}.txt", rng.random_range(0..100_000)))
        .collect();

    group.bench_function("keysort natural", |b| {
        let sorter = Sorter::new().natural();
        b.iter_batched(
            || names.clone(),
            |mut data| sorter.sort(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("keysort version", |b| {
        let sorter = Sorter::new().version();
        b.iter_batched(
            || names.clone(),
            |mut data| sorter.sort(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("keysort string", |b| {
        let sorter = Sorter::new();
        b.iter_batched(
            || names.clone(),
            |mut data| sorter.sort(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    // Std Sort (Stable)
    group.bench_function("slice::sort (stable)", |b| {
        b.iter_batched(
            || names.clone(),
            |mut data| data.sort(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("Records By Field");
    group.sample_size(10);

    let count = 10_000;

    let make = |rng: &mut rand::rngs::ThreadRng| -> Vec<Record> {
        (0..count)
            .map(|i| Record {
                name: format!("user{i}"),
                size: rng.random_range(0..1_000_000),
            })
            .collect()
    };

    group.bench_function("by_field size", |b| {
        let sorter = Sorter::new().by_field("size").values();
        b.iter_batched(
            || make(&mut rand::rng()),
            |mut data| sorter.sort(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("closure size", |b| {
        let sorter = Sorter::new().by(|r: &Record| r.size).ordered();
        b.iter_batched(
            || make(&mut rand::rng()),
            |mut data| sorter.sort(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_file_names, bench_records);
criterion_main!(benches);
