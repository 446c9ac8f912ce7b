use criterion::{criterion_group, criterion_main, Criterion};
use tally_core::constants::GENESIS_PREV_HASH;
use tally_core::Block;

fn bench_seal(c: &mut Criterion) {
    c.bench_function("seal_block_difficulty_3", |b| {
        let txs: Vec<String> = (0..10).map(|i| format!("alice pays bob {i}")).collect();
        let block = Block::new(1, txs, GENESIS_PREV_HASH.to_string());

        b.iter(|| {
            let mut candidate = block.clone();
            candidate.seal();
            candidate
        });
    });
}

criterion_group!(benches, bench_seal);
criterion_main!(benches);
