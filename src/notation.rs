// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsing of the lines a player types. The accepted shapes are:
//!
//! ```text
//! <from> <to>            a move, e.g. "e2 e4"
//! <from> <to> <promo>    a pawn move onto the last rank, promo in {Q, N, B, R}
//! <from> <to> draw?      a move accompanied by a draw offer
//! resign
//! draw                   acceptance of a pending draw offer
//! ```
//!
//! The grammar itself lives in `input.pest`.
use pest::iterators::Pair;
use pest::Parser;
use std::fmt;

use crate::moves::Move;
use crate::types::{PieceKind, Square};

#[derive(Parser)]
#[grammar = "input.pest"]
struct InputParser;

/// Possible errors that can arise when parsing a line of input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    NotUtf8,
    UnexpectedToken,
    InvalidSquare,
    InvalidPromotion,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            ParseError::Empty => "empty input",
            ParseError::NotUtf8 => "input is not valid utf-8",
            ParseError::UnexpectedToken => "input does not match any command",
            ParseError::InvalidSquare => "invalid square",
            ParseError::InvalidPromotion => "invalid promotion piece",
        };
        f.write_str(msg)
    }
}

/// A parsed line of input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// A move, possibly carrying an explicit promotion piece and possibly
    /// offering a draw.
    Move { mov: Move, offers_draw: bool },
    Resign,
    AcceptDraw,
}

/// Parses one line of input. A trailing line terminator is ignored; any
/// other deviation from the grammar is an error.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim_end_matches(|c| c == '\n' || c == '\r');
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let command = InputParser::parse(Rule::command, line)
        .map_err(|_| ParseError::UnexpectedToken)?
        .next()
        .ok_or(ParseError::UnexpectedToken)?;

    for part in command.into_inner() {
        match part.as_rule() {
            Rule::resign => return Ok(Command::Resign),
            Rule::draw_reply => return Ok(Command::AcceptDraw),
            Rule::move_command => return parse_move(part),
            _ => {}
        }
    }

    Err(ParseError::UnexpectedToken)
}

fn parse_move(pair: Pair<Rule>) -> Result<Command, ParseError> {
    let mut squares = Vec::with_capacity(2);
    let mut promotion = None;
    let mut offers_draw = false;
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::square => squares.push(part.as_str().parse::<Square>()?),
            Rule::promotion => {
                let letter = part.as_str().chars().next();
                let kind = letter
                    .and_then(PieceKind::from_promotion_char)
                    .ok_or(ParseError::InvalidPromotion)?;
                promotion = Some(kind);
            }
            Rule::draw_offer => offers_draw = true,
            _ => return Err(ParseError::UnexpectedToken),
        }
    }

    match squares.as_slice() {
        &[from, to] => Ok(Command::Move {
            mov: Move::new(from, to).with_promotion(promotion),
            offers_draw,
        }),
        _ => Err(ParseError::UnexpectedToken),
    }
}
