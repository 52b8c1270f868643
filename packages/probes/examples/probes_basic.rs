//! Measures a few sleeping functions and blocks, then prints the aggregated report.
//!
//! Run with: `cargo run --example probes_basic`.

use std::thread;
use std::time::Duration;

use probes::{Store, probe};

fn foo1(store: &Store) {
    let _guard = store.measure("Foo1");
    thread::sleep(Duration::from_millis(10));
}

fn foo2(store: &Store) {
    let _guard = store.measure("Foo2");
    thread::sleep(Duration::from_millis(20));
}

fn foo2_units(store: &Store) {
    let _guard = store.start("Foo2Units").with_units(10).guard();
    thread::sleep(Duration::from_millis(20));
}

fn foo3(store: &Store) {
    let _guard = probe!(store).guard();
    thread::sleep(Duration::from_millis(30));
}

fn foo3_units(store: &Store) {
    let _guard = probe!(store).with_units(10).guard();
    thread::sleep(Duration::from_millis(30));
}

fn main() {
    let store = Store::new();

    foo1(&store);
    foo2(&store);
    foo2_units(&store);

    let block1 = store.start("Block1");
    thread::sleep(Duration::from_millis(30));
    block1.stop();

    let block2 = store.start("Block2-With-Very-Very-Very-Very-Very-Very-very-Long-Name");
    thread::sleep(Duration::from_millis(40));
    block2.stop();

    foo2(&store);
    foo2_units(&store);

    for _ in 0..3 {
        foo3(&store);
        foo3_units(&store);
    }

    store.print_report();
}
