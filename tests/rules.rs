// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use hotseat::{apply_move, is_in_check, legal_moves, perft};
use hotseat::{Board, Color, Game, Move, Piece, PieceKind, Rank, Square, Validation};

fn play(game: &mut Game, moves: &[(Square, Square)]) {
    for &(from, to) in moves {
        let verdict = game.make_move(Move::new(from, to)).unwrap();
        assert!(verdict.is_legal(), "{} {} was rejected", from, to);
    }
}

#[test]
fn en_passant_capture_on_next_ply() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::A7, Square::A6),
            (Square::E4, Square::E5),
            (Square::D7, Square::D5),
        ],
    );
    assert_eq!(
        Ok(Validation::Valid),
        game.make_move(Move::new(Square::E5, Square::D6))
    );
    assert!(game.board().piece_at(Square::D5).is_none());
    assert!(game
        .board()
        .piece_at(Square::D6)
        .unwrap()
        .is(PieceKind::Pawn, Color::White));
}

#[test]
fn en_passant_window_closes() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::A7, Square::A6),
            (Square::E4, Square::E5),
            (Square::D7, Square::D5),
            (Square::A2, Square::A3),
            (Square::H7, Square::H6),
        ],
    );
    assert_eq!(
        Ok(Validation::Invalid),
        game.make_move(Move::new(Square::E5, Square::D6))
    );
    assert!(!game
        .board()
        .piece_at(Square::D5)
        .unwrap()
        .is_en_passant_vulnerable());
}

#[test]
fn kingside_castle() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            (Square::G1, Square::F3),
            (Square::A7, Square::A6),
            (Square::E2, Square::E3),
            (Square::A6, Square::A5),
            (Square::F1, Square::E2),
            (Square::A5, Square::A4),
        ],
    );
    assert_eq!(
        Ok(Validation::Valid),
        game.make_move(Move::new(Square::E1, Square::G1))
    );
    let rook = game.board().piece_at(Square::F1).unwrap();
    assert!(rook.is(PieceKind::Rook, Color::White));
    assert!(rook.has_moved());
    assert_eq!(Square::G1, game.board().king(Color::White));
}

#[test]
fn castling_refused_after_king_returns_home() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            (Square::G1, Square::F3),
            (Square::A7, Square::A6),
            (Square::E2, Square::E3),
            (Square::A6, Square::A5),
            (Square::F1, Square::E2),
            (Square::A5, Square::A4),
            (Square::E1, Square::F1),
            (Square::B7, Square::B6),
            (Square::F1, Square::E1),
            (Square::B6, Square::B5),
        ],
    );
    assert_eq!(
        Ok(Validation::Invalid),
        game.make_move(Move::new(Square::E1, Square::G1))
    );
}

#[test]
fn promotion_defaults_to_queen() {
    let mut board = Board::empty();
    board.put(Square::A1, Piece::new(PieceKind::King, Color::White));
    board.put(Square::B4, Piece::new(PieceKind::King, Color::Black));
    board.put(Square::G7, Piece::new(PieceKind::Pawn, Color::White));
    let mut game = Game::from_board(board, Color::White);
    assert_eq!(
        Ok(Validation::Valid),
        game.make_move(Move::new(Square::G7, Square::G8))
    );
    assert!(game
        .board()
        .piece_at(Square::G8)
        .unwrap()
        .is(PieceKind::Queen, Color::White));
}

#[test]
fn legality_probe_leaves_board_untouched() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::D7, Square::D5),
            (Square::E4, Square::E5),
            (Square::F7, Square::F5),
        ],
    );
    let mut board = game.board().clone();
    let before = board.clone();
    let moves = legal_moves(&mut board, Color::White);
    assert!(moves.contains(&Move::new(Square::E5, Square::F6)));
    assert_eq!(before, board);
}

#[test]
fn perft_from_start() {
    let board = Board::new();
    assert_eq!(20, perft(&board, Color::White, 1));
    assert_eq!(400, perft(&board, Color::White, 2));
    assert_eq!(8902, perft(&board, Color::White, 3));
}

/// Walks a long deterministic game and checks the invariants that must
/// hold between any two plies.
#[test]
fn invariants_hold_at_every_ply() {
    let mut game = Game::new();
    for ply in 0..120usize {
        if game.is_over() {
            break;
        }

        let side = game.side_to_move();
        let mut scratch = game.board().clone();
        let mut moves: Vec<Move> = legal_moves(&mut scratch, side).into_iter().collect();
        if moves.is_empty() {
            break;
        }

        moves.sort_by_key(|mov| {
            (
                mov.source(),
                mov.destination(),
                mov.promotion_piece().map(|kind| kind as u8),
            )
        });
        let mov = moves[(ply * 7 + 3) % moves.len()];

        let verdict = game.make_move(mov).unwrap();
        assert!(verdict.is_legal());
        assert_ne!(verdict == Validation::Valid, game.in_check());

        let board = game.board();
        let mut kings = [0, 0];
        let mut flagged = vec![];
        for sq in Square::all() {
            if let Some(piece) = board.piece_at(sq) {
                match piece.kind {
                    PieceKind::King => kings[piece.color as usize] += 1,
                    PieceKind::Pawn => {
                        assert!(sq.rank() != Rank::One && sq.rank() != Rank::Eight);
                    }
                    _ => {}
                }

                if piece.is_en_passant_vulnerable() {
                    flagged.push(piece);
                }
            }
        }

        assert_eq!([1, 1], kings);
        assert!(flagged.len() <= 1);
        for pawn in flagged {
            assert_eq!(side, pawn.color);
        }

        assert!(!is_in_check(board, side));
    }
}

#[test]
fn undo_restores_every_candidate() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::D7, Square::D5),
            (Square::E4, Square::E5),
            (Square::B8, Square::C6),
            (Square::G1, Square::F3),
            (Square::C8, Square::E6),
            (Square::F1, Square::C4),
            (Square::F7, Square::F5),
        ],
    );

    let mut board = game.board().clone();
    let before = board.clone();
    let moves = legal_moves(&mut board, Color::White);
    assert!(moves.contains(&Move::new(Square::E1, Square::G1)));
    assert!(moves.contains(&Move::new(Square::E5, Square::F6)));
    for mov in moves {
        let undo = apply_move(&mut board, mov);
        undo.revert(&mut board);
        assert_eq!(before, board, "{} was not reverted", mov);
    }
}

fn assert_no_legal_reply(game: &Game) {
    let loser = game.side_to_move();
    let mut board = game.board().clone();
    assert!(is_in_check(&board, loser));
    assert!(legal_moves(&mut board, loser).is_empty());
}

#[test]
fn mated_side_has_no_legal_reply() {
    let mut fools = Game::new();
    play(
        &mut fools,
        &[
            (Square::F2, Square::F3),
            (Square::E7, Square::E5),
            (Square::G2, Square::G4),
        ],
    );
    assert_eq!(
        Ok(Validation::Checkmate),
        fools.make_move(Move::new(Square::D8, Square::H4))
    );
    assert_no_legal_reply(&fools);

    let mut scholars = Game::new();
    play(
        &mut scholars,
        &[
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::F1, Square::C4),
            (Square::B8, Square::C6),
            (Square::D1, Square::H5),
            (Square::G8, Square::F6),
        ],
    );
    assert_eq!(
        Ok(Validation::Checkmate),
        scholars.make_move(Move::new(Square::H5, Square::F7))
    );
    assert_no_legal_reply(&scholars);

    let mut board = Board::empty();
    board.put(Square::G1, Piece::new(PieceKind::King, Color::White));
    board.put(Square::A1, Piece::new(PieceKind::Rook, Color::White));
    board.put(Square::G8, Piece::new(PieceKind::King, Color::Black));
    for &sq in &[Square::F7, Square::G7, Square::H7] {
        board.put(sq, Piece::new(PieceKind::Pawn, Color::Black));
    }
    let mut back_rank = Game::from_board(board, Color::White);
    assert_eq!(
        Ok(Validation::Checkmate),
        back_rank.make_move(Move::new(Square::A1, Square::A8))
    );
    assert_no_legal_reply(&back_rank);
}

#[test]
fn checked_side_still_has_replies() {
    let mut board = Board::empty();
    board.put(Square::G1, Piece::new(PieceKind::King, Color::White));
    board.put(Square::A1, Piece::new(PieceKind::Rook, Color::White));
    board.put(Square::E8, Piece::new(PieceKind::King, Color::Black));
    let mut game = Game::from_board(board, Color::White);
    assert_eq!(
        Ok(Validation::Check),
        game.make_move(Move::new(Square::A1, Square::E1))
    );

    let mut board = game.board().clone();
    assert!(is_in_check(&board, Color::Black));
    let replies = legal_moves(&mut board, Color::Black);
    assert!(!replies.is_empty());
    assert!(replies.contains(&Move::new(Square::E8, Square::D7)));
    assert!(!replies.contains(&Move::new(Square::E8, Square::E7)));
}

#[test]
fn legal_moves_do_not_depend_on_placement_order() {
    let pieces = [
        (Square::E1, PieceKind::King, Color::White),
        (Square::A1, PieceKind::Rook, Color::White),
        (Square::H1, PieceKind::Rook, Color::White),
        (Square::D4, PieceKind::Queen, Color::White),
        (Square::E5, PieceKind::Pawn, Color::White),
        (Square::C3, PieceKind::Knight, Color::White),
        (Square::E8, PieceKind::King, Color::Black),
        (Square::A8, PieceKind::Rook, Color::Black),
        (Square::B4, PieceKind::Bishop, Color::Black),
        (Square::F6, PieceKind::Knight, Color::Black),
        (Square::D7, PieceKind::Pawn, Color::Black),
        (Square::G7, PieceKind::Pawn, Color::Black),
    ];

    let mut forward = Board::empty();
    for &(sq, kind, color) in pieces.iter() {
        forward.put(sq, Piece::new(kind, color));
    }

    let mut backward = Board::empty();
    for &(sq, kind, color) in pieces.iter().rev() {
        backward.put(sq, Piece::new(kind, color));
    }

    for &color in &[Color::White, Color::Black] {
        let forward_moves = legal_moves(&mut forward, color);
        let backward_moves = legal_moves(&mut backward, color);
        assert!(!forward_moves.is_empty());
        assert_eq!(forward_moves, backward_moves);
    }
}
