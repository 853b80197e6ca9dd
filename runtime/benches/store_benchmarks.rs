//! Store Performance Benchmarks
//!
//! Measures the cost of each mutator against list size, and the
//! notification fan-out against listener count.
//!
//! Run with: `cargo bench`

#![allow(missing_docs)] // Benchmarks don't need extensive docs

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use item_store_core::{InitialState, Item, ItemAction, ItemCode, ItemEnvironment, ItemListReducer, ItemListState, Reducer, SelectionMode};
use item_store_runtime::Store;

const LIST_SIZES: [u64; 3] = [10, 100, 1000];

fn initial(size: u64) -> InitialState {
    InitialState::from_list(
        (1..=size)
            .map(|c| Item::new(ItemCode::new(c), format!("Item {c}")))
            .collect(),
    )
}

fn bench_reducer(c: &mut Criterion) {
    let mut group = c.benchmark_group("reducer");
    let reducer = ItemListReducer::new();
    let env = ItemEnvironment::default();

    for size in LIST_SIZES {
        let state = ItemListState::from_initial(initial(size));
        group.throughput(Throughput::Elements(size));

        group.bench_with_input(BenchmarkId::new("add", size), &state, |b, state| {
            b.iter(|| reducer.reduce(black_box(state), ItemAction::Add, &env));
        });
        group.bench_with_input(BenchmarkId::new("select_exclusive", size), &state, |b, state| {
            b.iter(|| {
                reducer.reduce(
                    black_box(state),
                    ItemAction::Select {
                        code: ItemCode::new(size / 2),
                        mode: SelectionMode::Exclusive,
                    },
                    &env,
                )
            });
        });
        group.bench_with_input(BenchmarkId::new("delete", size), &state, |b, state| {
            b.iter(|| {
                reducer.reduce(
                    black_box(state),
                    ItemAction::Delete {
                        code: ItemCode::new(size / 2),
                    },
                    &env,
                )
            });
        });
    }

    group.finish();
}

fn bench_notification(c: &mut Criterion) {
    let mut group = c.benchmark_group("notification");

    for listeners in [1usize, 16, 128] {
        let store = Store::new(initial(10));
        let handles: Vec<_> = (0..listeners).map(|_| store.subscribe(|| {})).collect();
        let snapshot = (*store.state()).clone();

        group.bench_with_input(BenchmarkId::new("set_state", listeners), &listeners, |b, _| {
            b.iter(|| store.set_state(black_box(snapshot.clone())));
        });

        for handle in handles {
            handle.unsubscribe();
        }
    }

    group.finish();
}

criterion_group!(benches, bench_reducer, bench_notification);
criterion_main!(benches);
