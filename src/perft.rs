// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::board::Board;
use crate::legality::{self, Probe};
use crate::move_generator::{MoveGenerator, MoveVec};
use crate::types::Color;

/// Counts the leaves of the legal move tree of the given depth, with `color`
/// to move at the root. Root moves are searched in parallel, each on its own
/// copy of the board.
pub fn perft(board: &Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveVec::default();
    MoveGenerator::new().generate_moves(board, color, &mut moves);
    moves
        .par_iter()
        .map(|&mov| {
            let mut board = board.clone();
            if !legality::is_legal_given_pseudolegal(&mut board, color, mov) {
                return 0;
            }

            let mut probe = Probe::new(&mut board, mov);
            perft_serial(&mut probe, color.toggle(), depth - 1)
        })
        .sum()
}

fn perft_serial(board: &mut Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveVec::default();
    MoveGenerator::new().generate_moves(board, color, &mut moves);
    let mut nodes = 0;
    for mov in moves {
        if !legality::is_legal_given_pseudolegal(board, color, mov) {
            continue;
        }

        let mut probe = Probe::new(board, mov);
        nodes += perft_serial(&mut probe, color.toggle(), depth - 1);
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::perft;
    use crate::board::Board;
    use crate::types::Color;

    fn perft_test(diagram: &'static str, color: Color, depth: u32, count: u64) {
        let board = Board::from_diagram(diagram);
        let before = board.clone();
        assert_eq!(count, perft(&board, color, depth));
        assert_eq!(before, board);
    }

    macro_rules! perft_tests {
        () => {};
        ($name:ident ($depth:expr): $diagram:expr, $color:expr => $count:expr; $($tail:tt)*) => {
            #[test]
            fn $name() {
                perft_test($diagram, $color, $depth, $count)
            }

            perft_tests!($($tail)*);
        };

        (skip $name:ident ($depth:expr): $diagram:expr, $color:expr => $count:expr; $($tail:tt)*) => {
            #[test]
            #[ignore]
            fn $name() {
                perft_test($diagram, $color, $depth, $count)
            }

            perft_tests!($($tail)*);
        };
    }

    perft_tests! {
        start_1 (1): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", Color::White => 20;
        start_2 (2): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", Color::White => 400;
        start_3 (3): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", Color::White => 8902;
        skip start_4 (4): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", Color::White => 197281;

        kiwipete_1 (1): "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R", Color::White => 48;
        kiwipete_2 (2): "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R", Color::White => 2039;
        skip kiwipete_3 (3): "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R", Color::White => 97862;

        position_3_1 (1): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White => 14;
        position_3_2 (2): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White => 191;
        position_3_3 (3): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White => 2812;
        skip position_3_4 (4): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White => 43238;

        position_4_1 (1): "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R", Color::Black => 6;
        position_4_2 (2): "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R", Color::Black => 264;
        skip position_4_3 (3): "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R", Color::Black => 9467;
    }
}
