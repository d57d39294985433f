// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack geometry for every piece kind. Leaping pieces (knights, kings) and
//! pawn captures are looked up in per-square tables built once; sliding
//! pieces walk their rays against an occupancy set, stopping at (and
//! including) the first occupied square.
use crate::bitboard::Bitboard;
use crate::types::{Color, Direction, Piece, PieceKind, Square, TableIndex, COLORS};
use crate::types::{DIAGONALS, ORTHOGONALS};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

struct LeaperTable {
    table: [Bitboard; 64],
}

impl LeaperTable {
    fn new(offsets: &[(i32, i32)]) -> LeaperTable {
        let mut lt = LeaperTable {
            table: [Bitboard::none(); 64],
        };

        for sq in Square::all() {
            lt.table[sq.as_index()] = offsets
                .iter()
                .filter_map(|&(df, dr)| sq.offset(df, dr))
                .collect();
        }

        lt
    }

    fn attacks(&self, sq: Square) -> Bitboard {
        self.table[sq.as_index()]
    }
}

struct PawnTable {
    table: [[Bitboard; 2]; 64],
}

impl PawnTable {
    fn new() -> PawnTable {
        let mut pt = PawnTable {
            table: [[Bitboard::none(); 2]; 64],
        };

        for sq in Square::all() {
            for &color in COLORS.iter() {
                if sq.rank() == color.promotion_rank() {
                    // Pawns never stand on their promotion rank between plies, so
                    // there is nothing to attack from here.
                    continue;
                }

                let forward = color.forward();
                pt.table[sq.as_index()][color.as_index()] = [-1, 1]
                    .iter()
                    .filter_map(|&df| sq.offset(df, forward))
                    .collect();
            }
        }

        pt
    }

    fn attacks(&self, sq: Square, color: Color) -> Bitboard {
        self.table[sq.as_index()][color.as_index()]
    }
}

lazy_static! {
    static ref KING_TABLE: LeaperTable = LeaperTable::new(&KING_OFFSETS);
    static ref KNIGHT_TABLE: LeaperTable = LeaperTable::new(&KNIGHT_OFFSETS);
    static ref PAWN_TABLE: PawnTable = PawnTable::new();
}

fn ray_attacks(sq: Square, occupancy: Bitboard, dirs: &[Direction]) -> Bitboard {
    let mut attacks = Bitboard::none();
    for &dir in dirs {
        let mut cursor = sq;
        while let Some(next) = cursor.towards(dir) {
            attacks.set(next);
            if occupancy.test(next) {
                break;
            }

            cursor = next;
        }
    }

    attacks
}

pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_TABLE.attacks(sq, color)
}

pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_TABLE.attacks(sq)
}

pub fn king_attacks(sq: Square) -> Bitboard {
    KING_TABLE.attacks(sq)
}

pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    ray_attacks(sq, occupancy, &DIAGONALS)
}

pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    ray_attacks(sq, occupancy, &ORTHOGONALS)
}

pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

/// The squares a piece standing on `sq` attacks, given the occupancy of the
/// board. Attack sets ignore the color of whatever stands on the attacked
/// square; callers mask out their own pieces.
pub fn piece_attacks(piece: Piece, sq: Square, occupancy: Bitboard) -> Bitboard {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(sq, piece.color),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => bishop_attacks(sq, occupancy),
        PieceKind::Rook => rook_attacks(sq, occupancy),
        PieceKind::Queen => queen_attacks(sq, occupancy),
        PieceKind::King => king_attacks(sq),
    }
}
