//! Benchmarks for the Lonpos solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lonpos::boards::{self, Variant};
use lonpos::geometry::{orientations_2d, orientations_3d};
use lonpos::pieces::PIECES;

/// Benchmark finding the first rectangle solution.
fn bench_first_rectangle_solution(c: &mut Criterion) {
    c.bench_function("rectangle_first", |b| {
        b.iter(|| {
            let mut board = Variant::Rectangle.board();
            black_box(board.solve_all().next())
        })
    });
}

/// Benchmark finding the first three solutions on each 2D shape.
fn bench_2d_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_three");
    group.sample_size(10);
    for variant in [Variant::Triangle, Variant::Arrowhead, Variant::Butterfly] {
        group.bench_function(variant.name(), |b| {
            b.iter(|| {
                let mut board = variant.board();
                black_box(board.solve_all().take(3).count())
            })
        });
    }
    group.finish();
}

/// Benchmark completing the pyramid above a fixed bottom layer.
fn bench_pyramid_completion(c: &mut Criterion) {
    let mut group = c.benchmark_group("pyramid");
    group.sample_size(10);
    group.bench_function("complete_base", |b| {
        b.iter(|| {
            let mut board = Variant::Pyramid.board();
            let placements: [(&str, &[(i32, i32, i32)]); 5] = [
                ("C", &[(0, 3, 0), (0, 4, 0), (1, 4, 0), (2, 4, 0), (3, 4, 0)]),
                ("E", &[(0, 2, 0), (1, 2, 0), (1, 3, 0), (2, 3, 0), (3, 3, 0)]),
                ("I", &[(0, 0, 0), (0, 1, 0), (1, 0, 0), (2, 0, 0), (2, 1, 0)]),
                ("F", &[(3, 2, 0), (4, 2, 0), (4, 3, 0)]),
                ("K", &[(3, 0, 0), (3, 1, 0), (4, 0, 0), (4, 1, 0)]),
            ];
            for (name, cells) in placements {
                board.place(name, cells).unwrap();
            }
            black_box(board.solve_all().count())
        })
    });
    group.finish();
}

/// Benchmark solving one calendar date.
fn bench_calendar(c: &mut Criterion) {
    c.bench_function("calendar_first", |b| {
        b.iter(|| {
            let mut board = boards::calendar_board(black_box(3), black_box(15)).unwrap();
            black_box(board.solve_all().next())
        })
    });
}

/// Benchmark computing all orientations for a single piece.
fn bench_orientations(c: &mut Criterion) {
    let (_, _, definition) = PIECES[2];

    c.bench_function("orientations_2d", |b| {
        b.iter(|| orientations_2d(black_box(definition)))
    });
    c.bench_function("orientations_3d", |b| {
        b.iter(|| orientations_3d(black_box(definition)))
    });
}

criterion_group!(
    benches,
    bench_first_rectangle_solution,
    bench_2d_shapes,
    bench_pyramid_completion,
    bench_calendar,
    bench_orientations
);
criterion_main!(benches);
