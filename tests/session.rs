// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::io::Cursor;

use hotseat::{Board, Outcome, Session};

fn play(input: &str, show_board: bool) -> (Option<Outcome>, String) {
    let mut session = Session::new().show_board(show_board);
    let mut output = vec![];
    let outcome = session
        .run(Cursor::new(input), &mut output)
        .expect("in-memory session cannot fail");
    (outcome, String::from_utf8(output).expect("transcript is utf-8"))
}

#[test]
fn scholars_mate() {
    let input = "e2 e4\ne7 e5\nf1 c4\nb8 c6\nd1 h5\ng8 f6\nh5 f7\n";
    let (outcome, output) = play(input, false);
    assert_eq!(Some(Outcome::WhiteWins), outcome);
    assert_eq!(
        concat!(
            "White's move: \n",
            "Black's move: \n",
            "White's move: \n",
            "Black's move: \n",
            "White's move: \n",
            "Black's move: \n",
            "White's move: \n",
            "Checkmate\n",
            "White wins",
        ),
        output
    );
}

#[test]
fn fools_mate_prints_final_board() {
    let input = "f2 f3\ne7 e5\ng2 g4\nd8 h4\n";
    let (outcome, output) = play(input, true);
    assert_eq!(Some(Outcome::BlackWins), outcome);
    let final_board = concat!(
        "bR bN bB ## bK bB bN bR  8\n",
        "bP bP bP bP ## bP bP bP  7\n",
        "   ##    ##    ##    ##  6\n",
        "##    ##    bP    ##     5\n",
        "   ##    ##    ## wP bQ  4\n",
        "##    ##    ## wP ##     3\n",
        "wP wP wP wP wP ##    wP  2\n",
        "wR wN wB wQ wK wB wN wR  1\n",
        " a  b  c  d  e  f  g  h\n",
    );
    let expected_tail = format!("Black's move: \n{}\nCheckmate\nBlack wins", final_board);
    assert!(
        output.ends_with(&expected_tail),
        "unexpected transcript:\n{}",
        output
    );
}

#[test]
fn check_is_announced_after_the_board() {
    let (_, output) = play("e2 e4\nf7 f6\nd1 h5\n", true);
    let board_then_check = format!("{}\nCheck\nBlack's move: ", {
        let mut game = hotseat::Game::new();
        for &(from, to) in &[
            (hotseat::Square::E2, hotseat::Square::E4),
            (hotseat::Square::F7, hotseat::Square::F6),
            (hotseat::Square::D1, hotseat::Square::H5),
        ] {
            game.make_move(hotseat::Move::new(from, to)).unwrap();
        }
        game.board().to_string()
    });
    assert!(output.ends_with(&board_then_check), "{}", output);
}

#[test]
fn illegal_move_does_not_reprint_board() {
    let (_, output) = play("e2 e5\n", true);
    let expected = format!(
        "{}\nWhite's move: illegal move, try again\nWhite's move: ",
        Board::new()
    );
    assert_eq!(expected, output);
}

#[test]
fn resign_mid_game() {
    let (outcome, output) = play("e2 e4\ne7 e5\nresign\n", false);
    assert_eq!(Some(Outcome::BlackWins), outcome);
    assert!(output.ends_with("White's move: Black wins"));
}

#[test]
fn draw_offer_accepted() {
    let (outcome, output) = play("e2 e4\ne7 e5\ng1 f3 draw?\ndraw\ne7 e6\n", false);
    assert_eq!(Some(Outcome::Draw), outcome);
    assert!(output.ends_with("White's move: draw?: "));
}

#[test]
fn draw_offer_declined_with_illegal_move() {
    let (outcome, output) = play("e2 e5 draw?\nno thanks\ne2 e4\n", false);
    assert_eq!(None, outcome);
    assert_eq!(
        concat!(
            "White's move: draw?: illegal move, try again\n",
            "White's move: \n",
            "Black's move: ",
        ),
        output
    );
}

#[test]
fn castling_through_the_session() {
    let input = "g1 f3\na7 a6\ne2 e3\nb7 b6\nf1 e2\nc7 c6\ne1 g1\n";
    let mut session = Session::new().show_board(false);
    let mut output = vec![];
    session.run(Cursor::new(input), &mut output).unwrap();
    let board = session.game().board();
    assert!(board.piece_at(hotseat::Square::G1).is_some());
    assert!(board.piece_at(hotseat::Square::F1).is_some());
    assert!(board.piece_at(hotseat::Square::H1).is_none());
    assert!(!String::from_utf8(output).unwrap().contains("illegal"));
}

#[test]
fn end_of_input_leaves_game_unfinished() {
    let (outcome, output) = play("", false);
    assert_eq!(None, outcome);
    assert_eq!("White's move: ", output);
}
