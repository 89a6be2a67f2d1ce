use thiserror::Error;

use crate::movegen;
use crate::types::{Cell, Color, Piece, PieceKind};

/// Returned when a movement or evaluation query addresses a cell with no
/// piece on it. Querying a piece that was never placed (or was already
/// captured) is an orchestration bug, so it is surfaced eagerly instead of
/// being flattened into an empty result.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("no piece on cell {0}")]
pub struct NoPieceError(pub Cell);

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("empty FEN string")]
    Empty,
    #[error("expected 8 ranks in the placement field, got {0}")]
    RankCount(usize),
    #[error("rank {0:?} does not describe exactly 8 files")]
    RankWidth(String),
    #[error("invalid piece character {0:?}")]
    BadPiece(char),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    pub fn empty() -> Board {
        Board { cells: [None; 64] }
    }

    pub fn startpos() -> Board {
        let mut board = Board::empty();
        for col in 0..8 {
            board.cells[8 + col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board.cells[48 + col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, &kind) in back.iter().enumerate() {
            board.cells[col] = Some(Piece::new(Color::White, kind));
            board.cells[56 + col] = Some(Piece::new(Color::Black, kind));
        }
        board
    }

    /// Forsyth-Edwards placement parser used by tests and benches. Only the
    /// first field of a full FEN string is consumed; this board carries no
    /// side-to-move, castling or en-passant state.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let placement = fen.split_whitespace().next().ok_or(FenError::Empty)?;
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut board = Board::empty();
        for (i, rank) in ranks.iter().enumerate() {
            let row = 7 - i as i8; // FEN lists rank 8 first
            let mut col: i8 = 0;
            for ch in rank.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as i8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => return Err(FenError::BadPiece(ch)),
                    };
                    let cell = Cell::new(row, col)
                        .ok_or_else(|| FenError::RankWidth(rank.to_string()))?;
                    board.cells[cell.index()] = Some(Piece::new(color, kind));
                    col += 1;
                }
            }
            if col != 8 {
                return Err(FenError::RankWidth(rank.to_string()));
            }
        }
        Ok(board)
    }

    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        self.cells[cell.index()]
    }

    /// Unconditional placement, used for real setup and simulated moves
    /// alike. `None` clears the cell.
    pub fn set_piece(&mut self, cell: Cell, piece: Option<Piece>) {
        self.cells[cell.index()] = piece;
    }

    pub fn is_empty(&self, cell: Cell) -> bool {
        self.piece_at(cell).is_none()
    }

    /// True iff a piece of `color` may land on `cell`: empty or holding an
    /// opposing piece.
    pub fn can_enter(&self, color: Color, cell: Cell) -> bool {
        self.piece_at(cell).map_or(true, |pc| pc.color != color)
    }

    /// True iff `cell` holds a piece that `color` could capture.
    pub fn can_capture(&self, color: Color, cell: Cell) -> bool {
        self.piece_at(cell).is_some_and(|pc| pc.color != color)
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        Cell::all().filter_map(move |cell| match self.piece_at(cell) {
            Some(pc) if pc.color == color => Some((cell, pc)),
            _ => None,
        })
    }

    pub fn king_cell(&self, color: Color) -> Option<Cell> {
        self.pieces_of(color)
            .find(|(_, pc)| pc.kind == PieceKind::King)
            .map(|(cell, _)| cell)
    }

    /// True iff any piece of `by` reaches `target` by raw movement.
    ///
    /// Built on raw reachability only: routing this through the legality
    /// filter would recurse, since legality is itself defined in terms of
    /// check.
    pub fn is_attacked(&self, target: Cell, by: Color) -> bool {
        let mut reach = Vec::with_capacity(16);
        self.pieces_of(by).any(|(from, pc)| {
            movegen::reachable_for(self, from, pc, &mut reach);
            reach.contains(&target)
        })
    }

    /// A missing king reports not-in-check, which keeps sparse synthetic
    /// boards usable in tests.
    pub fn in_check(&self, color: Color) -> bool {
        match self.king_cell(color) {
            Some(king) => self.is_attacked(king, color.other()),
            None => false,
        }
    }
}
