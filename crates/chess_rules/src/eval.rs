//! Per-piece positional evaluation: material, safety, capture pressure and
//! mobility, scored independently of color so a caller can aggregate with a
//! sign per side.

use crate::board::{Board, NoPieceError};
use crate::movegen::legal_cells_into;
use crate::types::{Cell, Color};

/// Favorability score for the piece on `from`, higher meaning better for
/// that piece's own side. Inputs: material value, own legal-move count,
/// opposing pieces whose legal moves hit this cell, opposing pieces this
/// piece can legally capture, and friendly pieces covering this cell.
///
/// A pure query: works on a clone of the board, so the caller's board is
/// untouched.
pub fn evaluate(board: &Board, from: Cell) -> Result<f64, NoPieceError> {
    let mut work = board.clone();
    evaluate_on(&mut work, from)
}

fn evaluate_on(board: &mut Board, from: Cell) -> Result<f64, NoPieceError> {
    let pc = board.piece_at(from).ok_or(NoPieceError(from))?;
    let value = pc.kind.value();

    let mut moves = Vec::with_capacity(32);
    legal_cells_into(board, from, &mut moves)?;
    let mobility = moves.len();
    let capturable = moves
        .iter()
        .filter(|&&to| board.can_capture(pc.color, to))
        .count();

    let mut threats = 0usize;
    let opponents: Vec<Cell> = board.pieces_of(pc.color.other()).map(|(c, _)| c).collect();
    for cell in opponents {
        legal_cells_into(board, cell, &mut moves)?;
        if moves.contains(&from) {
            threats += 1;
        }
    }

    let defended = defended_count(board, from, pc.color)?;

    let mut score = value;
    let imbalance = threats as f64 - defended as f64;
    if imbalance > 0.0 {
        // outnumbered attackers price the piece's loss at its own value
        score -= value * imbalance;
    } else {
        // spare cover earns 0.3 of the rate a deficit costs
        score += value * (-imbalance) * 0.3;
    }
    score += capturable as f64;
    score += 0.1 * mobility as f64;
    Ok(score)
}

/// Friendly pieces whose legal moves cover `cell`, counted with the occupant
/// lifted off the board so it does not block its own defenders' lines
/// through the square.
fn defended_count(board: &mut Board, cell: Cell, color: Color) -> Result<usize, NoPieceError> {
    with_cell_vacated(board, cell, |b| {
        let friends: Vec<Cell> = b.pieces_of(color).map(|(c, _)| c).collect();
        let mut moves = Vec::with_capacity(32);
        let mut covered = 0usize;
        for friend in friends {
            legal_cells_into(b, friend, &mut moves)?;
            if moves.contains(&cell) {
                covered += 1;
            }
        }
        Ok(covered)
    })
}

/// Runs `probe` with `cell` emptied, then restores its previous occupant.
/// The restore does not depend on the probe's outcome.
fn with_cell_vacated<T>(board: &mut Board, cell: Cell, probe: impl FnOnce(&mut Board) -> T) -> T {
    let occupant = board.piece_at(cell);
    board.set_piece(cell, None);
    let out = probe(board);
    board.set_piece(cell, occupant);
    out
}
