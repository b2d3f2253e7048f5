use std::time::Duration;

use abalone_engine::board::{Board, PieceColor};
use abalone_engine::moves::generate_all_legal_moves;
use abalone_engine::search::find_best_move;
use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    let board = Board::default_layout();

    c.bench_function("generate legal moves, default layout", |b| {
        b.iter(|| generate_all_legal_moves(&board, PieceColor::Black))
    });

    c.bench_function("find best move, depth 2, default layout", |b| {
        b.iter(|| find_best_move(&board, PieceColor::Black, 2, Duration::from_secs(10)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
