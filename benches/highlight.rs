//! Benchmarks for the highlight mapper
//!
//! Runs on every redraw while dragging, so it has to stay cheap on large cards.
//!
//! Run with: cargo bench --bench highlight

mod support;

use floorplan::highlight::{block_lines, element_lines};
use floorplan::model::ElementAddress;
use support::make_card;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

#[divan::bench(args = [10, 100, 1000])]
fn first_block(bencher: divan::Bencher, pairs: usize) {
    let text = make_card(pairs);
    bencher.bench(|| block_lines(divan::black_box(&text), 0));
}

#[divan::bench(args = [10, 100, 1000])]
fn last_block(bencher: divan::Bencher, pairs: usize) {
    let text = make_card(pairs);
    let last = pairs * 2 + 2;
    bencher.bench(|| block_lines(divan::black_box(&text), last));
}

#[divan::bench(args = [100, 1000])]
fn missing_block(bencher: divan::Bencher, pairs: usize) {
    let text = make_card(pairs);
    bencher.bench(|| element_lines(divan::black_box(&text), ElementAddress::nested(0, 3)));
}
