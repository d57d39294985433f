// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The text session: two players sharing one terminal, entering moves in
//! turn.
use std::io::{self, BufRead, Write};
use std::str;

use crate::game::{Game, Outcome};
use crate::legality::Validation;
use crate::notation::{self, Command, ParseError};

const ILLEGAL_MOVE: &str = "illegal move, try again";

pub struct Session {
    game: Game,
    show_board: bool,
}

impl Session {
    pub fn new() -> Session {
        Session::with_game(Game::new())
    }

    pub fn with_game(game: Game) -> Session {
        Session {
            game,
            show_board: true,
        }
    }

    /// Whether the board is printed before each turn and after checkmate.
    pub fn show_board(mut self, show: bool) -> Session {
        self.show_board = show;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs the game until it ends or the input runs dry, whichever comes
    /// first. Returns the outcome, if the game reached one.
    pub fn run<R, W>(&mut self, mut reader: R, mut writer: W) -> io::Result<Option<Outcome>>
    where
        R: BufRead,
        W: Write,
    {
        while !self.game.is_over() {
            self.write_board(&mut writer)?;
            if self.game.in_check() {
                writeln!(&mut writer, "Check")?;
            }

            // Keep asking the same side until it produces a legal move or
            // ends the game.
            loop {
                write!(&mut writer, "{}'s move: ", self.game.side_to_move().name())?;
                writer.flush()?;
                let command = match read_command(&mut reader)? {
                    Some(command) => command,
                    None => {
                        debug!("input closed, leaving the game unfinished");
                        return Ok(None);
                    }
                };

                let verdict = match command {
                    Ok(Command::Resign) => {
                        let outcome = self.game.resign().map_err(game_error)?;
                        write!(&mut writer, "{}", outcome)?;
                        writer.flush()?;
                        return Ok(Some(outcome));
                    }
                    Ok(Command::Move {
                        mov,
                        offers_draw: true,
                    }) => {
                        self.game.offer_draw(mov).map_err(game_error)?;
                        write!(&mut writer, "draw?: ")?;
                        writer.flush()?;
                        let reply = match read_command(&mut reader)? {
                            Some(reply) => reply,
                            None => return Ok(None),
                        };

                        let accepted = reply == Ok(Command::AcceptDraw);
                        match self.game.answer_draw(accepted).map_err(game_error)? {
                            Some(verdict) => verdict,
                            None => return Ok(self.game.outcome()),
                        }
                    }
                    Ok(Command::Move { mov, .. }) => self.game.make_move(mov).map_err(game_error)?,
                    Ok(Command::AcceptDraw) | Err(_) => Validation::Invalid,
                };

                match verdict {
                    Validation::Invalid => writeln!(&mut writer, "{}", ILLEGAL_MOVE)?,
                    Validation::Checkmate => {
                        writeln!(&mut writer)?;
                        self.write_board(&mut writer)?;
                        writeln!(&mut writer, "Checkmate")?;
                        if let Some(outcome) = self.game.outcome() {
                            write!(&mut writer, "{}", outcome)?;
                        }
                        writer.flush()?;
                        return Ok(self.game.outcome());
                    }
                    Validation::Valid | Validation::Check => break,
                }
            }

            writeln!(&mut writer)?;
        }

        Ok(self.game.outcome())
    }

    fn write_board<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.show_board {
            writeln!(writer, "{}", self.game.board())?;
        }

        Ok(())
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}

/// Reads and parses one line of input, or returns `None` at end of input.
/// Bytes that are not UTF-8 are a parse error like any other bad input.
fn read_command<R: BufRead>(reader: &mut R) -> io::Result<Option<Result<Command, ParseError>>> {
    let mut line = vec![];
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }

    let command = match str::from_utf8(&line) {
        Ok(text) => notation::parse_command(text),
        Err(_) => Err(ParseError::NotUtf8),
    };

    if let Err(err) = command {
        debug!("could not parse {:?}: {}", String::from_utf8_lossy(&line), err);
    }

    Ok(Some(command))
}

fn game_error(err: crate::game::GameError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}
