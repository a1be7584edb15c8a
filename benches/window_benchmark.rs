//! Window computation benchmarks.
//!
//! The window must stay cheap for very large row counts: a scroll tick should cost
//! O(log n + window) regardless of how many rows are loaded.
//!
//! Run with: cargo bench --bench window_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use gridwin::model::{RowDescriptor, RowId};
use gridwin::view_state::{RowKey, RowWindow, TableOptions, TableViewState, WindowOptions};

const ROW_HEIGHT: usize = 52;
const VIEWPORT: usize = 20 * ROW_HEIGHT;

fn window(rows: usize) -> RowWindow {
    let mut window = RowWindow::new(WindowOptions {
        estimate_size: ROW_HEIGHT,
        overscan: 5,
    });
    window.set_rows(
        (0..rows)
            .map(|i| RowKey::Row(RowId::positional(i, None)))
            .collect(),
    );
    window.set_viewport_height(VIEWPORT);
    window
}

fn bench_virtual_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_rows");
    for rows in [10_000usize, 100_000, 1_000_000] {
        let mut window = window(rows);
        window.set_scroll_offset(rows / 2 * ROW_HEIGHT);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| black_box(window.virtual_rows()))
        });
    }
    group.finish();
}

fn bench_scroll_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_tick");
    for rows in [10_000usize, 1_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter_batched(
                || window(rows),
                |mut window| {
                    for _ in 0..100 {
                        window.scroll_by(3 * ROW_HEIGHT as isize);
                        black_box(window.virtual_rows());
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_measure_above_viewport(c: &mut Criterion) {
    c.bench_function("measure_above_viewport_1m", |b| {
        b.iter_batched(
            || {
                let mut window = window(1_000_000);
                window.set_scroll_offset(500_000 * ROW_HEIGHT);
                window
            },
            |mut window| {
                for i in 0..100 {
                    black_box(window.measure(1_000 + i, 80.0));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_render_pass(c: &mut Criterion) {
    let mut state: TableViewState<usize> = TableViewState::new(TableOptions {
        virtualize_rows: true,
        window: WindowOptions {
            estimate_size: ROW_HEIGHT,
            overscan: 5,
        },
        ..TableOptions::default()
    });
    state.set_rows(
        (0..100_000)
            .map(|i| RowDescriptor::new(RowId::positional(i, None), i))
            .collect(),
    );
    state.set_viewport_height(VIEWPORT);

    c.bench_function("render_pass_100k", |b| {
        let mut offset = 0;
        b.iter(|| {
            offset = (offset + 7 * ROW_HEIGHT) % (90_000 * ROW_HEIGHT);
            state.set_scroll_offset(offset);
            black_box(state.render_pass(|slice| {
                black_box(slice);
            }))
        })
    });
}

criterion_group!(
    benches,
    bench_virtual_rows,
    bench_scroll_tick,
    bench_measure_above_viewport,
    bench_render_pass
);
criterion_main!(benches);
