//! Benchmarks for semantic edits
//!
//! Every edit is a full parse/mutate/serialize pass, so these scale with card
//! size rather than with the edit.
//!
//! Run with: cargo bench --bench mutation

mod support;

use floorplan::config::EditorConfig;
use floorplan::model::ElementAddress;
use floorplan::mutation::{
    delete_element, insert_device_group, insert_sensor_pair, update_position, DeleteTarget,
};
use support::make_card;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

#[divan::bench(args = [10, 100, 1000])]
fn move_element(bencher: divan::Bencher, pairs: usize) {
    let text = make_card(pairs);
    let address = ElementAddress::top(pairs);
    bencher.bench(|| update_position(divan::black_box(&text), address, "12.5%", "40%"));
}

#[divan::bench(args = [10, 100, 1000])]
fn add_sensor(bencher: divan::Bencher, pairs: usize) {
    let text = make_card(pairs);
    bencher.bench(|| insert_sensor_pair(divan::black_box(&text), "1", "99"));
}

#[divan::bench(args = [10, 100])]
fn add_humidifier_group(bencher: divan::Bencher, pairs: usize) {
    let text = make_card(pairs);
    let positions = EditorConfig::default().humidifier_positions;
    bencher.bench(|| insert_device_group(divan::black_box(&text), "2", &positions));
}

#[divan::bench(args = [10, 100, 1000])]
fn delete_pair(bencher: divan::Bencher, pairs: usize) {
    let text = make_card(pairs);
    let target = DeleteTarget::At(ElementAddress::top(pairs));
    bencher.bench(|| delete_element(divan::black_box(&text), &target));
}
