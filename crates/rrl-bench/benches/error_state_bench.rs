//! Error-state store benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rrl_core::{ErrorStore, MAX_ERROR_MSG_LEN};

fn bench_record(c: &mut Criterion) {
    let lengths: &[usize] = &[16, 128, MAX_ERROR_MSG_LEN, 4 * MAX_ERROR_MSG_LEN];
    let mut group = c.benchmark_group("error_record");
    let store = ErrorStore::new();

    for &len in lengths {
        let msg = "e".repeat(len);
        group.bench_with_input(BenchmarkId::new("record", len), &msg, |b, msg| {
            b.iter(|| store.record(criterion::black_box(-3), criterion::black_box(msg)));
        });
    }
    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("error_read");
    let store = ErrorStore::new();
    store.record(-1, "rrl_poll: null handle");

    group.bench_function("code", |b| {
        b.iter(|| criterion::black_box(store.code()));
    });
    group.bench_function("snapshot", |b| {
        b.iter(|| criterion::black_box(store.snapshot()));
    });
    group.bench_function("copy_message_into", |b| {
        let mut buf = [0u8; MAX_ERROR_MSG_LEN + 1];
        b.iter(|| criterion::black_box(store.copy_message_into(&mut buf)));
    });
    group.finish();
}

criterion_group!(benches, bench_record, bench_read);
criterion_main!(benches);
