// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::bitboard::Bitboard;
use crate::types::{Color, Piece, PieceKind, Square, TableIndex};
use crate::types::{FILES, RANKS};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 board. Every square holds at most one piece; the board also keeps
/// a handle to each king so that check detection does not have to search for
/// it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    kings: [Option<Square>; 2],
}

//
// Construction
//

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Board {
        Board {
            squares: [None; 64],
            kings: [None; 2],
        }
    }

    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for (&file, &kind) in FILES.iter().zip(BACK_RANK.iter()) {
            for &color in &[Color::White, Color::Black] {
                board.put(
                    Square::at(file, color.back_rank()),
                    Piece::new(kind, color),
                );
                board.put(
                    Square::at(file, color.pawn_rank()),
                    Piece::new(PieceKind::Pawn, color),
                );
            }
        }

        board
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

//
// Board state getters
//

impl Board {
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()]
    }

    /// Where the king of the given color stands, if it is on the board.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.kings[color.as_index()]
    }

    /// Where the king of the given color stands. Every reachable game
    /// position has both kings, so a missing king is a bug.
    pub fn king(&self, color: Color) -> Square {
        self.find_king(color)
            .unwrap_or_else(|| panic!("board invariant broken: no {} king", color.name()))
    }

    /// Iterates over occupied squares and their pieces, a1 first.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, piece)| piece.map(|p| (Square::from_index(idx), p)))
    }

    pub fn pieces(&self, color: Color) -> Bitboard {
        self.iter()
            .filter(|(_, piece)| piece.color == color)
            .map(|(sq, _)| sq)
            .collect()
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.iter()
            .filter(|(_, piece)| piece.is(kind, color))
            .map(|(sq, _)| sq)
            .collect()
    }

    pub fn occupancy(&self) -> Bitboard {
        self.iter().map(|(sq, _)| sq).collect()
    }
}

//
// Board manipulation
//

impl Board {
    /// Sets the contents of a square, returning what was there before. All
    /// other mutators go through here so the king handles stay current.
    pub fn replace(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        let old = self.squares[square.as_index()];
        if let Some(old_piece) = old {
            if old_piece.kind == PieceKind::King
                && self.kings[old_piece.color.as_index()] == Some(square)
            {
                self.kings[old_piece.color.as_index()] = None;
            }
        }

        if let Some(new_piece) = piece {
            if new_piece.kind == PieceKind::King {
                self.kings[new_piece.color.as_index()] = Some(square);
            }
        }

        self.squares[square.as_index()] = piece;
        old
    }

    pub fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.replace(square, Some(piece))
    }

    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.replace(square, None)
    }

    pub(crate) fn king_handles(&self) -> [Option<Square>; 2] {
        self.kings
    }

    pub(crate) fn restore_king_handles(&mut self, kings: [Option<Square>; 2]) {
        self.kings = kings;
    }
}

//
// Rendering
//

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                let sq = Square::at(file, rank);
                match self.piece_at(sq) {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None if sq.is_dark() => write!(f, "## ")?,
                    None => write!(f, "   ")?,
                }
            }

            writeln!(f, " {}", rank)?;
        }

        let legend: Vec<_> = FILES.iter().map(|file| file.to_string()).collect();
        writeln!(f, " {}", legend.join("  "))
    }
}

//
// Test helpers
//

#[cfg(test)]
impl Board {
    /// Builds a board from a piece-placement diagram: ranks 8 down to 1
    /// separated by `/`, uppercase for White, lowercase for Black, digits
    /// for runs of empty squares. Every piece starts without history.
    pub(crate) fn from_diagram(diagram: &str) -> Board {
        let mut board = Board::empty();
        let rows: Vec<_> = diagram.split('/').collect();
        assert_eq!(8, rows.len(), "diagram must have eight ranks");
        for (row, &rank) in rows.iter().zip(RANKS.iter().rev()) {
            let mut file = 0;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }

                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let kind = match c.to_ascii_lowercase() {
                    'p' => PieceKind::Pawn,
                    'n' => PieceKind::Knight,
                    'b' => PieceKind::Bishop,
                    'r' => PieceKind::Rook,
                    'q' => PieceKind::Queen,
                    'k' => PieceKind::King,
                    _ => panic!("unknown piece in diagram: {}", c),
                };
                let square = Square::at(crate::types::File::from_index(file), rank);
                board.put(square, Piece::new(kind, color));
                file += 1;
            }

            assert_eq!(8, file, "rank {} does not sum to eight", rank);
        }

        board
    }
}
