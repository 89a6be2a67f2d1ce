use crate::board::{Board, NoPieceError};
use crate::types::{Cell, Color, Piece, PieceKind};

const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
const KING_STEPS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Cells the piece on `from` can move to by shape, blocking and target
/// occupancy alone, ignoring whether the move would expose its own king.
pub fn reachable_cells(board: &Board, from: Cell) -> Result<Vec<Cell>, NoPieceError> {
    let pc = board.piece_at(from).ok_or(NoPieceError(from))?;
    let mut out = Vec::with_capacity(16);
    reachable_for(board, from, pc, &mut out);
    Ok(out)
}

/// Raw generation for a known occupant, writing into `out` (cleared first).
pub(crate) fn reachable_for(board: &Board, from: Cell, pc: Piece, out: &mut Vec<Cell>) {
    out.clear();
    match pc.kind {
        PieceKind::Pawn => pawn_cells(board, from, pc.color, out),
        PieceKind::Knight => step_cells(board, from, pc.color, &KNIGHT_JUMPS, out),
        PieceKind::Bishop => ray_cells(board, from, pc.color, &DIAGONALS, out),
        PieceKind::Rook => ray_cells(board, from, pc.color, &ORTHOGONALS, out),
        PieceKind::Queen => {
            ray_cells(board, from, pc.color, &ORTHOGONALS, out);
            ray_cells(board, from, pc.color, &DIAGONALS, out);
        }
        PieceKind::King => step_cells(board, from, pc.color, &KING_STEPS, out),
    }
}

fn pawn_cells(board: &Board, from: Cell, c: Color, out: &mut Vec<Cell>) {
    let (dir, start_row): (i8, i8) = match c {
        Color::White => (1, 1),
        Color::Black => (-1, 6),
    };

    // single push, double push only from the start row through an empty cell
    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            out.push(one);
            if from.row() == start_row {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.is_empty(two) {
                        out.push(two);
                    }
                }
            }
        }
    }

    // the forward diagonals are reachable as captures only
    for dc in [-1, 1] {
        if let Some(to) = from.offset(dir, dc) {
            if board.can_capture(c, to) {
                out.push(to);
            }
        }
    }
}

fn ray_cells(board: &Board, from: Cell, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Cell>) {
    for &(dr, dc) in dirs {
        let mut cur = from.offset(dr, dc);
        while let Some(to) = cur {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.color != c => {
                    out.push(to);
                    break;
                }
                Some(_) => break,
            }
            cur = to.offset(dr, dc);
        }
    }
}

fn step_cells(board: &Board, from: Cell, c: Color, steps: &[(i8, i8)], out: &mut Vec<Cell>) {
    for &(dr, dc) in steps {
        if let Some(to) = from.offset(dr, dc) {
            if board.can_enter(c, to) {
                out.push(to);
            }
        }
    }
}

/// Reachable cells that do not leave the mover's own king in check,
/// returned as a freshly allocated vector.
/// Internally delegates to `legal_cells_into`, cloning the board only once.
pub fn legal_cells(board: &Board, from: Cell) -> Result<Vec<Cell>, NoPieceError> {
    let mut tmp = board.clone();
    let mut out = Vec::with_capacity(16);
    legal_cells_into(&mut tmp, from, &mut out)?;
    Ok(out)
}

/// Filter variant that reuses the caller's board and buffer across calls.
/// Every candidate is simulated and reverted in turn, so the board is back
/// in its input state when this returns.
pub fn legal_cells_into(
    board: &mut Board,
    from: Cell,
    out: &mut Vec<Cell>,
) -> Result<(), NoPieceError> {
    let pc = board.piece_at(from).ok_or(NoPieceError(from))?;
    reachable_for(board, from, pc, out);
    out.retain(|&to| !with_simulated_move(board, from, to, |b| b.in_check(pc.color)));
    Ok(())
}

/// Runs `probe` with the piece on `from` placed on `to` (displacing any
/// occupant), then restores the previous occupancy of both cells. The
/// restore does not depend on the probe's verdict.
fn with_simulated_move<T>(
    board: &mut Board,
    from: Cell,
    to: Cell,
    probe: impl FnOnce(&Board) -> T,
) -> T {
    let mover = board.piece_at(from);
    let displaced = board.piece_at(to);
    board.set_piece(to, mover);
    board.set_piece(from, None);
    let verdict = probe(board);
    board.set_piece(from, mover);
    board.set_piece(to, displaced);
    verdict
}
