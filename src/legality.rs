// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The legality filter. A pseudo-legal move is legal if, once played, it
//! does not leave the mover's king attacked. Moves are tried on the real
//! board through a `Probe`, which puts the board back when it goes out of
//! scope.
use hashbrown::HashSet;
use std::ops::{Deref, DerefMut};

use crate::apply::{apply_move, Undo};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::move_generator::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::types::{Color, PieceKind, Square};

/// A move tried on a board. The move is applied when the probe is created
/// and reverted when it is dropped, on every exit path including unwinding.
///
/// Mutating the board through a probe is allowed only if the mutation is
/// itself undone before the probe is dropped, e.g. by a nested probe.
pub struct Probe<'a> {
    board: &'a mut Board,
    undo: Option<Undo>,
}

impl<'a> Probe<'a> {
    pub fn new(board: &'a mut Board, mov: Move) -> Probe<'a> {
        let undo = apply_move(board, mov);
        Probe {
            board,
            undo: Some(undo),
        }
    }
}

impl<'a> Deref for Probe<'a> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl<'a> DerefMut for Probe<'a> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl<'a> Drop for Probe<'a> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            undo.revert(self.board);
        }
    }
}

//
// Attack queries
//

/// Whether any piece of the given color attacks the given square.
pub fn is_square_attacked_by(board: &Board, square: Square, color: Color) -> bool {
    MoveGenerator::new().is_square_attacked_by(board, square, color)
}

/// The set of squares attacked by the given color.
pub fn attacked_squares(board: &Board, color: Color) -> Bitboard {
    MoveGenerator::new().attacked_squares(board, color)
}

/// Whether the king of the given color is attacked by the other color.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    is_square_attacked_by(board, board.king(color), color.toggle())
}

//
// Legality
//

/// Whether a pseudo-legal move by `color` keeps that color's king safe. The
/// board is borrowed mutably to try the move, and is unchanged on return.
pub fn is_legal_given_pseudolegal(board: &mut Board, color: Color, mov: Move) -> bool {
    let is_castle = board
        .piece_at(mov.source())
        .map_or(false, |piece| piece.kind == PieceKind::King)
        && mov.file_delta().abs() == 2;

    if is_castle {
        // The king may not pass through an attacked square. Stepping it onto
        // the crossed square on its own tells us whether it would be attacked
        // there.
        let crossed = mov
            .source()
            .offset(mov.file_delta().signum(), 0)
            .expect("castling king has a neighbor toward the rook");
        let probe = Probe::new(board, Move::new(mov.source(), crossed));
        if is_in_check(&probe, color) {
            trace!("rejecting {}: castles through attacked square {}", mov, crossed);
            return false;
        }
    }

    let probe = Probe::new(board, mov);
    if is_in_check(&probe, color) {
        trace!("rejecting {}: leaves king attacked", mov);
        return false;
    }

    true
}

/// Every legal move available to the given color.
pub fn legal_moves(board: &mut Board, color: Color) -> HashSet<Move> {
    let mut moves = MoveVec::default();
    MoveGenerator::new().generate_moves(board, color, &mut moves);
    moves
        .into_iter()
        .filter(|&mov| is_legal_given_pseudolegal(board, color, mov))
        .collect()
}

/// Whether the given color has at least one legal move. Stops at the first
/// one found.
pub fn has_legal_move(board: &mut Board, color: Color) -> bool {
    let mut moves = MoveVec::default();
    MoveGenerator::new().generate_moves(board, color, &mut moves);
    moves
        .into_iter()
        .any(|mov| is_legal_given_pseudolegal(board, color, mov))
}

//
// Classification
//

/// The verdict on a move entered by a player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Validation {
    /// The move cannot be played.
    Invalid,
    /// The move is legal and does not attack the opposing king.
    Valid,
    /// The move is legal and leaves the opposing king attacked.
    Check,
    /// The move is legal, leaves the opposing king attacked and the opponent
    /// has no legal reply.
    Checkmate,
}

impl Validation {
    pub fn is_legal(self) -> bool {
        self != Validation::Invalid
    }
}

/// Fills in the promotion piece of a pawn move onto the last rank that
/// does not name one. Queen is the default.
pub fn with_default_promotion(board: &Board, mov: Move) -> Move {
    match board.piece_at(mov.source()) {
        Some(piece)
            if piece.kind == PieceKind::Pawn
                && mov.destination().rank() == piece.color.promotion_rank()
                && !mov.is_promotion() =>
        {
            mov.with_promotion(Some(PieceKind::Queen))
        }
        _ => mov,
    }
}

/// Classifies a move entered for the given color. The board is unchanged on
/// return.
pub fn classify(board: &mut Board, color: Color, mov: Move) -> Validation {
    let mov = with_default_promotion(board, mov);
    match board.piece_at(mov.source()) {
        Some(piece) if piece.color == color => {}
        _ => {
            debug!("{} is invalid: no {} piece on {}", mov, color.name(), mov.source());
            return Validation::Invalid;
        }
    }

    let mut moves = MoveVec::default();
    MoveGenerator::new().generate_moves(board, color, &mut moves);
    if !moves.contains(&mov) {
        debug!("{} is invalid: not a pseudo-legal move", mov);
        return Validation::Invalid;
    }

    if !is_legal_given_pseudolegal(board, color, mov) {
        debug!("{} is invalid: leaves the king attacked", mov);
        return Validation::Invalid;
    }

    let mut probe = Probe::new(board, mov);
    let opponent = color.toggle();
    let verdict = if !is_in_check(&probe, opponent) {
        Validation::Valid
    } else if has_legal_move(&mut probe, opponent) {
        Validation::Check
    } else {
        Validation::Checkmate
    };

    debug!("{} classified as {:?}", mov, verdict);
    verdict
}
