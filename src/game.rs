// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The game driver: one board, whose turn it is, and how the game ended.
use std::fmt;

use crate::apply::apply_move;
use crate::board::Board;
use crate::legality::{self, Validation};
use crate::moves::Move;
use crate::types::Color;

/// How a game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
}

impl Outcome {
    pub fn win_for(color: Color) -> Outcome {
        match color {
            Color::White => Outcome::WhiteWins,
            Color::Black => Outcome::BlackWins,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::WhiteWins => write!(f, "White wins"),
            Outcome::BlackWins => write!(f, "Black wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    InProgress { side_to_move: Color, in_check: bool },
    /// The side to move has offered a draw alongside a move and the opponent
    /// has yet to answer.
    AwaitingDrawReply { side_to_move: Color, offered: Move },
    Terminated(Outcome),
}

/// Requests the driver refuses in its current state. Illegal moves are not
/// errors; they are reported as `Validation::Invalid`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// The game has already ended.
    GameOver,
    /// A draw offer is pending and must be answered first.
    DrawOfferPending,
    /// A draw reply was given with no offer on the table.
    NoDrawOffer,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            GameError::GameOver => "the game is over",
            GameError::DrawOfferPending => "a draw offer is waiting for a reply",
            GameError::NoDrawOffer => "no draw has been offered",
        };
        f.write_str(msg)
    }
}

pub struct Game {
    board: Board,
    side_to_move: Color,
    in_check: bool,
    pending_draw: Option<Move>,
    outcome: Option<Outcome>,
    history: Vec<Move>,
}

impl Game {
    /// A new game from the standard starting position, White to move.
    pub fn new() -> Game {
        Game::from_board(Board::new(), Color::White)
    }

    /// A game continuing from an arbitrary board. Both kings must be on it.
    pub fn from_board(board: Board, side_to_move: Color) -> Game {
        let in_check = legality::is_in_check(&board, side_to_move);
        Game {
            board,
            side_to_move,
            in_check,
            pending_draw: None,
            outcome: None,
            history: vec![],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Every move applied so far, in order, with promotion pieces filled in.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn state(&self) -> GameState {
        if let Some(outcome) = self.outcome {
            return GameState::Terminated(outcome);
        }

        match self.pending_draw {
            Some(offered) => GameState::AwaitingDrawReply {
                side_to_move: self.side_to_move,
                offered,
            },
            None => GameState::InProgress {
                side_to_move: self.side_to_move,
                in_check: self.in_check,
            },
        }
    }

    fn ensure_accepting_moves(&self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        if self.pending_draw.is_some() {
            return Err(GameError::DrawOfferPending);
        }

        Ok(())
    }

    /// Plays a move for the side to move. Legal moves are applied and pass
    /// the turn; an `Invalid` verdict leaves the game untouched.
    pub fn make_move(&mut self, mov: Move) -> Result<Validation, GameError> {
        self.ensure_accepting_moves()?;
        let mover = self.side_to_move;
        let verdict = legality::classify(&mut self.board, mover, mov);
        if !verdict.is_legal() {
            return Ok(verdict);
        }

        let mov = legality::with_default_promotion(&self.board, mov);
        let _ = apply_move(&mut self.board, mov);
        self.history.push(mov);
        self.side_to_move = mover.toggle();
        self.in_check = verdict != Validation::Valid;
        debug!("{} played {}, {:?}", mover.name(), mov, verdict);
        if verdict == Validation::Checkmate {
            self.finish(Outcome::win_for(mover));
        }

        Ok(verdict)
    }

    /// The side to move resigns.
    pub fn resign(&mut self) -> Result<Outcome, GameError> {
        self.ensure_accepting_moves()?;
        let outcome = Outcome::win_for(self.side_to_move.toggle());
        self.finish(outcome);
        Ok(outcome)
    }

    /// The side to move offers a draw, to be followed by `mov` if the offer
    /// is declined. Nothing is played until the opponent answers.
    pub fn offer_draw(&mut self, mov: Move) -> Result<(), GameError> {
        self.ensure_accepting_moves()?;
        self.pending_draw = Some(mov);
        Ok(())
    }

    /// The opponent answers a pending draw offer. Accepting ends the game
    /// without playing the offered move and returns `None`. Declining
    /// discards the offer and plays the move that accompanied it, returning
    /// its verdict.
    pub fn answer_draw(&mut self, accepted: bool) -> Result<Option<Validation>, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let offered = self.pending_draw.take().ok_or(GameError::NoDrawOffer)?;
        if accepted {
            self.finish(Outcome::Draw);
            return Ok(None);
        }

        debug!("draw declined, playing {}", offered);
        self.make_move(offered).map(Some)
    }

    fn finish(&mut self, outcome: Outcome) {
        info!("game over after {} plies: {}", self.history.len(), outcome);
        self.outcome = Some(outcome);
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
