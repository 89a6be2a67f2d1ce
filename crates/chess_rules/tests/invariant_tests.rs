use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use chess_rules::{
    evaluate, legal_cells, reachable_cells, Board, Cell, Color, Piece, PieceKind,
};

/// Sparse random position: two kings plus a scatter of other pieces.
fn random_board(rng: &mut StdRng, extra_pieces: usize) -> Board {
    let mut board = Board::empty();
    let mut free: Vec<Cell> = Cell::all().collect();

    for color in [Color::White, Color::Black] {
        let i = rng.gen_range(0..free.len());
        board.set_piece(free.swap_remove(i), Some(Piece::new(color, PieceKind::King)));
    }

    let kinds = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];
    for _ in 0..extra_pieces {
        let i = rng.gen_range(0..free.len());
        let kind = kinds[rng.gen_range(0..kinds.len())];
        let color = if rng.gen_bool(0.5) {
            Color::White
        } else {
            Color::Black
        };
        board.set_piece(free.swap_remove(i), Some(Piece::new(color, kind)));
    }
    board
}

fn occupied_cells(board: &Board) -> Vec<Cell> {
    Cell::all().filter(|&c| board.piece_at(c).is_some()).collect()
}

#[test]
fn legal_moves_are_reachable_and_leave_no_trace() {
    (0u64..64).into_par_iter().for_each(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let extra = rng.gen_range(2..10);
        let board = random_board(&mut rng, extra);
        let snapshot = board.clone();

        for from in occupied_cells(&board) {
            let reachable = reachable_cells(&board, from).unwrap();
            let legal = legal_cells(&board, from).unwrap();

            assert!(
                legal.iter().all(|c| reachable.contains(c)),
                "seed {seed}: legal cell outside the reachable set for {from}"
            );
            assert_eq!(board, snapshot, "seed {seed}: legality query moved a piece");

            evaluate(&board, from).unwrap();
            assert_eq!(board, snapshot, "seed {seed}: evaluation moved a piece");
        }
    });
}

/// Walks from `from` towards `to` and checks every intermediate cell is free.
fn path_clear(board: &Board, from: Cell, to: Cell) -> bool {
    let dr = (to.row() - from.row()).signum();
    let dc = (to.col() - from.col()).signum();
    let mut cur = from.offset(dr, dc);
    while let Some(c) = cur {
        if c == to {
            return true;
        }
        if board.piece_at(c).is_some() {
            return false;
        }
        cur = c.offset(dr, dc);
    }
    false
}

#[test]
fn sliders_never_jump_over_occupied_cells() {
    (0u64..256).into_par_iter().for_each(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let extra = rng.gen_range(4..16);
        let board = random_board(&mut rng, extra);

        for from in occupied_cells(&board) {
            let piece = board.piece_at(from).unwrap();
            if !matches!(
                piece.kind,
                PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen
            ) {
                continue;
            }
            for to in reachable_cells(&board, from).unwrap() {
                let dr = (to.row() - from.row()).abs();
                let dc = (to.col() - from.col()).abs();
                assert!(
                    dr == 0 || dc == 0 || dr == dc,
                    "seed {seed}: slider target {to} not on a ray from {from}"
                );
                assert!(
                    path_clear(&board, from, to),
                    "seed {seed}: slider jumped a blocker between {from} and {to}"
                );
            }
        }
    });
}

#[test]
fn step_pieces_stay_within_eight_cells() {
    (0u64..64).into_par_iter().for_each(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let extra = rng.gen_range(4..16);
        let board = random_board(&mut rng, extra);

        for from in occupied_cells(&board) {
            let piece = board.piece_at(from).unwrap();
            if matches!(piece.kind, PieceKind::Knight | PieceKind::King) {
                assert!(reachable_cells(&board, from).unwrap().len() <= 8);
            }
        }
    });
}

#[test]
fn checkmated_side_has_no_legal_moves() {
    // Fool's mate: the white king is checked by the h4 queen and nothing
    // can block, capture or step away.
    let board =
        Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR").unwrap();
    assert!(board.in_check(Color::White));

    let white_moves: usize = board
        .pieces_of(Color::White)
        .map(|(from, _)| legal_cells(&board, from).unwrap().len())
        .sum();
    assert_eq!(white_moves, 0);

    // Black, by contrast, is free to move.
    let black_moves: usize = board
        .pieces_of(Color::Black)
        .map(|(from, _)| legal_cells(&board, from).unwrap().len())
        .sum();
    assert!(black_moves > 0);
}
