// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module contains the definition of a `Move`.
//!
//! A move is nothing more than a source square, a destination square and,
//! for pawns reaching the last rank, the kind of piece the pawn becomes.
//! Special moves are recognized from the shape of the move and the piece
//! making it:
//!
//!  * a king moving two files is a castle; the rook's hop is implied,
//!  * a pawn moving diagonally onto an empty square is an en-passant capture,
//!  * a pawn moving two ranks is a double push.
use std::fmt;

use crate::types::{PieceKind, Square, TableIndex};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
}

impl Move {
    /// Constructs a move that does not promote.
    pub fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Constructs a pawn move onto the last rank, promoting to the given
    /// piece kind. Panics if the kind is not one a pawn may become.
    pub fn promotion(from: Square, to: Square, promoted: PieceKind) -> Move {
        assert!(promoted.is_promotion_target(), "invalid promotion piece");
        Move {
            from,
            to,
            promotion: Some(promoted),
        }
    }

    /// Returns this move with its promotion piece replaced.
    pub fn with_promotion(self, promoted: Option<PieceKind>) -> Move {
        Move {
            promotion: promoted,
            ..self
        }
    }

    pub fn source(self) -> Square {
        self.from
    }

    pub fn destination(self) -> Square {
        self.to
    }

    pub fn promotion_piece(self) -> Option<PieceKind> {
        self.promotion
    }

    pub fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Signed number of files this move travels.
    pub fn file_delta(self) -> i32 {
        self.to.file().as_index() as i32 - self.from.file().as_index() as i32
    }

    /// Signed number of ranks this move travels.
    pub fn rank_delta(self) -> i32 {
        self.to.rank().as_index() as i32 - self.from.rank().as_index() as i32
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, " {}", kind)?;
        }

        Ok(())
    }
}
