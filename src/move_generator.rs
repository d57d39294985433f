// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal move generation. The moves produced here respect piece
//! geometry and board occupancy, but may still leave the mover's own king
//! attacked; `legality` filters those out.
use arrayvec::ArrayVec;

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::Move;
use crate::types::{Color, File, Piece, PieceKind, Square};
use crate::types::PROMOTION_KINDS;

/// Fixed-capacity move list. No chess position has more than 218 moves for
/// one side, promotions counted separately.
pub type MoveVec = ArrayVec<[Move; 256]>;

#[derive(Copy, Clone, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Generates every pseudo-legal move of the given color, including
    /// castles and en-passant captures.
    pub fn generate_moves(&self, board: &Board, color: Color, moves: &mut MoveVec) {
        for (sq, piece) in board.iter() {
            if piece.color != color {
                continue;
            }

            match piece.kind {
                PieceKind::Pawn => self.pawn_moves(board, sq, piece, moves),
                PieceKind::King => {
                    self.moves_to_targets(board, sq, attacks::king_attacks(sq), color, moves);
                    self.castle_moves(board, sq, piece, moves);
                }
                PieceKind::Knight => {
                    self.moves_to_targets(board, sq, attacks::knight_attacks(sq), color, moves);
                }
                _ => {
                    let targets = attacks::piece_attacks(piece, sq, board.occupancy());
                    self.moves_to_targets(board, sq, targets, color, moves);
                }
            }
        }
    }

    /// Pushes a move to every target square that is not occupied by one of
    /// the mover's own pieces.
    fn moves_to_targets(
        &self,
        board: &Board,
        sq: Square,
        targets: Bitboard,
        color: Color,
        moves: &mut MoveVec,
    ) {
        let own = board.pieces(color);
        for target in targets {
            if !own.test(target) {
                moves.push(Move::new(sq, target));
            }
        }
    }

    fn pawn_moves(&self, board: &Board, sq: Square, pawn: Piece, moves: &mut MoveVec) {
        let color = pawn.color;
        let forward = color.forward();
        debug_assert!(
            sq.rank() != color.promotion_rank(),
            "pawn on its promotion rank"
        );

        let push = |target: Square, moves: &mut MoveVec| {
            if target.rank() == color.promotion_rank() {
                for &kind in &PROMOTION_KINDS {
                    moves.push(Move::promotion(sq, target, kind));
                }
            } else {
                moves.push(Move::new(sq, target));
            }
        };

        // Pushes. The double step is only available from the starting rank,
        // over an empty square onto an empty square.
        if let Some(one) = sq.offset(0, forward) {
            if board.piece_at(one).is_none() {
                push(one, moves);
                if sq.rank() == color.pawn_rank() {
                    if let Some(two) = one.offset(0, forward) {
                        if board.piece_at(two).is_none() {
                            moves.push(Move::new(sq, two));
                        }
                    }
                }
            }
        }

        // Ordinary captures.
        for target in attacks::pawn_attacks(sq, color) {
            match board.piece_at(target) {
                Some(victim) if victim.color != color => push(target, moves),
                _ => {}
            }
        }

        // En passant: the victim stands beside us on our rank and has just
        // double-stepped; we land behind it.
        for &df in &[-1, 1] {
            let beside = match sq.offset(df, 0) {
                Some(beside) => beside,
                None => continue,
            };

            let victim = match board.piece_at(beside) {
                Some(victim) => victim,
                None => continue,
            };

            if victim.is(PieceKind::Pawn, color.toggle()) && victim.is_en_passant_vulnerable() {
                if let Some(target) = sq.offset(df, forward) {
                    if board.piece_at(target).is_none() {
                        moves.push(Move::new(sq, target));
                    }
                }
            }
        }
    }

    /// Castles whose legality can be decided without trying the move: the
    /// king and the chosen rook have never moved, nothing stands between
    /// them and the king is not in check. Whether the king crosses or lands
    /// on an attacked square is left to the legality filter.
    fn castle_moves(&self, board: &Board, sq: Square, king: Piece, moves: &mut MoveVec) {
        let color = king.color;
        if king.has_moved() || sq != Square::at(File::E, color.back_rank()) {
            return;
        }

        if self.is_square_attacked_by(board, sq, color.toggle()) {
            return;
        }

        for &(rook_file, step) in &[(File::H, 1), (File::A, -1)] {
            let rook_sq = Square::at(rook_file, color.back_rank());
            match board.piece_at(rook_sq) {
                Some(rook) if rook.is(PieceKind::Rook, color) && !rook.has_moved() => {}
                _ => continue,
            }

            let mut between = sq.offset(step, 0);
            let mut clear = true;
            while let Some(cursor) = between {
                if cursor == rook_sq {
                    break;
                }

                if board.piece_at(cursor).is_some() {
                    clear = false;
                    break;
                }

                between = cursor.offset(step, 0);
            }

            if clear {
                if let Some(target) = sq.offset(2 * step, 0) {
                    moves.push(Move::new(sq, target));
                }
            }
        }
    }
}

//
// Attack queries
//
// A square is attacked by a color if some piece of that color has a
// pseudo-legal, non-castling move ending there. Pawns attack only their two
// capture squares, never the square in front of them.
//

impl MoveGenerator {
    /// The set of squares attacked by the given color.
    pub fn attacked_squares(&self, board: &Board, color: Color) -> Bitboard {
        let occupancy = board.occupancy();
        let mut attacked = Bitboard::none();
        for (sq, piece) in board.iter() {
            if piece.color == color {
                attacked |= attacks::piece_attacks(piece, sq, occupancy);
            }
        }

        attacked & !board.pieces(color)
    }

    /// Whether any piece of the given color attacks the target square.
    ///
    /// Rather than generating every attack of `color`, this pretends a
    /// "super-piece" of each kind stands on the target and checks whether it
    /// would see a matching attacker.
    pub fn is_square_attacked_by(&self, board: &Board, target: Square, color: Color) -> bool {
        if let Some(occupant) = board.piece_at(target) {
            if occupant.color == color {
                return false;
            }
        }

        let occupancy = board.occupancy();
        let attacker_of = |sq: Square, kinds: &[PieceKind]| match board.piece_at(sq) {
            Some(piece) => piece.color == color && kinds.contains(&piece.kind),
            None => false,
        };

        let sliders = attacks::rook_attacks(target, occupancy)
            .iter()
            .any(|sq| attacker_of(sq, &[PieceKind::Rook, PieceKind::Queen]))
            || attacks::bishop_attacks(target, occupancy)
                .iter()
                .any(|sq| attacker_of(sq, &[PieceKind::Bishop, PieceKind::Queen]));
        if sliders {
            return true;
        }

        if attacks::knight_attacks(target)
            .iter()
            .any(|sq| attacker_of(sq, &[PieceKind::Knight]))
        {
            return true;
        }

        if attacks::king_attacks(target)
            .iter()
            .any(|sq| attacker_of(sq, &[PieceKind::King]))
        {
            return true;
        }

        // A pawn of `color` attacks the target from exactly the squares a pawn
        // of the other color would capture on from the target.
        attacks::pawn_attacks(target, color.toggle())
            .iter()
            .any(|sq| attacker_of(sq, &[PieceKind::Pawn]))
    }
}
