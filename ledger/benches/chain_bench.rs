// Chain benchmarks for the rollcall ledger.
//
// Covers block hashing, appends, and full-chain verification at a few
// chain lengths.

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rollcall_ledger::{Block, Chain, Fields, Payload};

fn staff_payload(i: u64) -> Payload {
    Fields::new()
        .with("staff_id", format!("{}", 100 + i % 50))
        .with("staff_name", "Your record")
        .with("date", "2024-03-01")
        .with("time", "08:30:00")
        .into()
}

fn build_chain(len: u64) -> Chain {
    let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let mut chain = Chain::with_genesis_at(t0);
    for i in 0..len {
        chain.append_at(staff_payload(i), t0 + chrono::Duration::seconds(i as i64 + 1));
    }
    chain
}

fn bench_block_hash(c: &mut Criterion) {
    let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let payload = staff_payload(1);
    let prev = "0".repeat(64);

    c.bench_function("block/new", |b| {
        b.iter(|| Block::new(1, t0, payload.clone(), prev.as_str()));
    });
}

fn bench_append(c: &mut Criterion) {
    c.bench_function("chain/append", |b| {
        let mut chain = Chain::create_genesis();
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            chain.append(staff_payload(i)).index()
        });
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain/verify");

    for &len in &[10u64, 100, 1_000] {
        let chain = build_chain(len);
        group.throughput(Throughput::Elements(len + 1));
        group.bench_with_input(BenchmarkId::from_parameter(len), &chain, |b, chain| {
            b.iter(|| chain.verify().is_ok());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_block_hash, bench_append, bench_verify);
criterion_main!(benches);
