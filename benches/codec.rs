//! Benchmarks for the card codec
//!
//! Run with: cargo bench --bench codec

mod support;

use floorplan::codec;
use support::make_card;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

#[divan::bench(args = [10, 100, 1000])]
fn parse(bencher: divan::Bencher, pairs: usize) {
    let text = make_card(pairs);
    bencher.bench(|| codec::parse(divan::black_box(&text)));
}

#[divan::bench(args = [10, 100, 1000])]
fn serialize(bencher: divan::Bencher, pairs: usize) {
    let document = codec::parse(&make_card(pairs)).unwrap();
    bencher.bench(|| codec::serialize(divan::black_box(&document)));
}

#[divan::bench(args = [10, 100])]
fn round_trip(bencher: divan::Bencher, pairs: usize) {
    let text = make_card(pairs);
    bencher.bench(|| {
        let document = codec::parse(divan::black_box(&text)).unwrap();
        codec::serialize(&document)
    });
}
