//! Evaluation benchmark for profiling with cargo-flamegraph.
//!
//! Scores every piece of both colors on a spread of positions, aggregating
//! the per-piece scores with a sign per color the way a search layer would.
//!
//! Usage:
//!   cargo flamegraph --example eval_bench -p chess_rules

use chess_rules::{evaluate, Board, Cell, Color};
use std::time::Instant;

/// Positions covering different game phases and piece densities
const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Start",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "Sicilian",
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    (
        "Complex",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - -",
    ),
    ("Rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
];

const ITERATIONS: usize = 500;

fn main() {
    println!("=== Evaluation Benchmark ===");
    println!("Iterations per position: {ITERATIONS}");
    println!();

    let mut total_time = std::time::Duration::ZERO;

    for (name, fen) in TEST_POSITIONS {
        let board = Board::from_fen(fen).expect("valid FEN");
        let pieces: Vec<Cell> = Cell::all().filter(|&c| board.piece_at(c).is_some()).collect();

        print!("{name:.<20}");

        let start = Instant::now();
        let mut aggregate = 0.0f64;

        for _ in 0..ITERATIONS {
            aggregate = 0.0;
            for &cell in &pieces {
                let piece = board.piece_at(cell).expect("cell scanned as occupied");
                let score = evaluate(&board, cell).expect("occupied cell evaluates");
                match piece.color {
                    Color::White => aggregate += score,
                    Color::Black => aggregate -= score,
                }
            }
        }

        let elapsed = start.elapsed();
        total_time += elapsed;

        let evals_per_sec = if elapsed.as_secs_f64() > 0.0 {
            (ITERATIONS * pieces.len()) as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        println!(" balance {aggregate:>12.1}, {evals_per_sec:>9.0} evals/sec ({elapsed:>8.3?})");
    }

    println!();
    println!("{:=<70}", "");
    println!("TOTAL: {total_time:.3?}");
}
