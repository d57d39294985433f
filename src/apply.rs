// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Board mutation. `apply_move` performs a move together with all of its
//! side effects and returns an `Undo` that puts the board back exactly as it
//! was.
use arrayvec::ArrayVec;

use crate::board::Board;
use crate::moves::Move;
use crate::types::{File, Piece, PieceFlags, PieceKind, Square};

/// A record of every square a move touched, in the order it touched them,
/// along with the king handles from before the move.
#[must_use]
#[derive(Clone, Debug)]
pub struct Undo {
    journal: ArrayVec<[(Square, Option<Piece>); 32]>,
    kings: [Option<Square>; 2],
}

impl Undo {
    fn new(board: &Board) -> Undo {
        Undo {
            journal: ArrayVec::new(),
            kings: board.king_handles(),
        }
    }

    /// Sets a square on the board, remembering what used to be there.
    fn set(&mut self, board: &mut Board, square: Square, piece: Option<Piece>) -> Option<Piece> {
        let old = board.replace(square, piece);
        self.journal.push((square, old));
        old
    }

    /// Restores the board to the state it was in before the move that
    /// produced this record.
    pub fn revert(mut self, board: &mut Board) {
        while let Some((square, old)) = self.journal.pop() {
            board.replace(square, old);
        }

        board.restore_king_handles(self.kings);
    }

    /// The number of squares the move wrote to.
    pub fn len(&self) -> usize {
        self.journal.len()
    }
}

/// Applies a move to the board. The move is assumed to be at least
/// pseudo-legal; a move without a piece on its source square is a bug in the
/// caller and panics.
pub fn apply_move(board: &mut Board, mov: Move) -> Undo {
    // Everything that can panic is looked up before the first write, so a
    // bad move never leaves a half-applied board behind.
    let mut moving_piece = board
        .piece_at(mov.source())
        .unwrap_or_else(|| panic!("invalid move: no piece at source square ({})", mov));

    // A pawn moving diagonally onto an empty square is capturing en passant.
    // The captured pawn stands beside the source square, on the destination's
    // file.
    let en_passant_victim = if moving_piece.kind == PieceKind::Pawn
        && mov.file_delta() != 0
        && board.piece_at(mov.destination()).is_none()
    {
        let victim_square = Square::at(mov.destination().file(), mov.source().rank());
        match board.piece_at(victim_square) {
            Some(victim) if victim.kind == PieceKind::Pawn => Some(victim_square),
            _ => panic!("invalid move: en-passant capture without a pawn to capture ({})", mov),
        }
    } else {
        None
    };

    // A king moving two files is castling. The rook hops over the king onto
    // the square the king crosses.
    let castle_rook = if moving_piece.kind == PieceKind::King && mov.file_delta().abs() == 2 {
        let step = mov.file_delta().signum();
        let rook_file = if step > 0 { File::H } else { File::A };
        let rook_square = Square::at(rook_file, mov.source().rank());
        let rook_target = mov
            .source()
            .offset(step, 0)
            .expect("castling king has a neighbor toward the rook");
        match board.piece_at(rook_square) {
            Some(rook) if rook.kind == PieceKind::Rook => Some((rook_square, rook_target)),
            _ => panic!("invalid move: castle without a rook ({})", mov),
        }
    } else {
        None
    };

    let mut undo = Undo::new(board);

    // En-passant rights last for exactly one ply. Whatever pawn was vulnerable
    // has now had its window, and none of the mover's own pawns can still be
    // flagged.
    let flagged: ArrayVec<[(Square, Piece); 16]> = board
        .iter()
        .filter(|(_, piece)| piece.is_en_passant_vulnerable())
        .collect();
    for (sq, mut pawn) in flagged {
        pawn.flags.remove(PieceFlags::EN_PASSANT);
        undo.set(board, sq, Some(pawn));
    }
    moving_piece.flags.remove(PieceFlags::EN_PASSANT);

    if let Some(victim_square) = en_passant_victim {
        undo.set(board, victim_square, None);
    }

    if let Some((rook_square, rook_target)) = castle_rook {
        if let Some(mut rook) = undo.set(board, rook_square, None) {
            rook.flags.insert(PieceFlags::HAS_MOVED);
            undo.set(board, rook_target, Some(rook));
        }
    }

    undo.set(board, mov.source(), None);
    moving_piece.flags.insert(PieceFlags::HAS_MOVED);
    if moving_piece.kind == PieceKind::Pawn {
        if mov.rank_delta().abs() == 2 {
            moving_piece.flags.insert(PieceFlags::EN_PASSANT);
        }

        if mov.destination().rank() == moving_piece.color.promotion_rank() {
            let kind = mov.promotion_piece().unwrap_or(PieceKind::Queen);
            moving_piece = Piece::new(kind, moving_piece.color);
            moving_piece.flags.insert(PieceFlags::HAS_MOVED);
        }
    }

    // Whatever stood on the destination, if anything, is captured.
    undo.set(board, mov.destination(), Some(moving_piece));
    debug!("applied {} ({} squares written)", mov, undo.len());
    undo
}
