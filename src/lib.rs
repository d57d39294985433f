// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A rules engine for two-player chess, with a text interface for two humans
//! sharing a terminal.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate pest_derive;

pub mod apply;
pub mod attacks;
mod bitboard;
mod board;
pub mod game;
pub mod legality;
mod move_generator;
mod moves;
pub mod notation;
mod perft;
pub mod session;
mod types;

pub use apply::{apply_move, Undo};
pub use bitboard::{Bitboard, BitboardIterator};
pub use board::Board;
pub use game::{Game, GameError, GameState, Outcome};
pub use legality::{classify, is_in_check, is_square_attacked_by, legal_moves, Probe, Validation};
pub use move_generator::{MoveGenerator, MoveVec};
pub use moves::Move;
pub use notation::{parse_command, Command, ParseError};
pub use perft::perft;
pub use session::Session;
pub use types::{Color, File, Piece, PieceFlags, PieceKind, Rank, Square};
