//! Zobrist hashing for board layouts.
//!
//! Provides incrementally-updatable 64-bit hashes used to recognise a board
//! configuration that has been seen before. Keys depend only on the board
//! size, so two boards of the same size and contents always hash equally.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rand::prelude::*;

use crate::board::{Coord, PieceKind};

const ZOBRIST_SEED: u64 = 1234567890;

pub(crate) struct ZobristKeys {
    size: usize,
    // piece_keys[square_index][kind_index], placeholders hash to nothing
    piece_keys: Vec<[u64; 6]>,
}

impl ZobristKeys {
    fn new(size: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED ^ size as u64);
        let piece_keys = (0..size * size)
            .map(|_| {
                let mut keys = [0u64; 6];
                for key in &mut keys {
                    *key = rng.gen();
                }
                keys
            })
            .collect();
        ZobristKeys { size, piece_keys }
    }

    /// Shared keys for boards of side `size`.
    pub(crate) fn for_size(size: usize) -> Arc<ZobristKeys> {
        KEY_CACHE
            .lock()
            .entry(size)
            .or_insert_with(|| Arc::new(ZobristKeys::new(size)))
            .clone()
    }

    #[inline]
    pub(crate) fn piece_key(&self, coord: Coord, kind: PieceKind) -> u64 {
        if kind.is_empty() {
            return 0;
        }
        self.piece_keys[coord.index(self.size)][kind.index()]
    }
}

static KEY_CACHE: Lazy<Mutex<HashMap<usize, Arc<ZobristKeys>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_shared_per_size() {
        let a = ZobristKeys::for_size(6);
        let b = ZobristKeys::for_size(6);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_empty_contributes_nothing() {
        let keys = ZobristKeys::for_size(4);
        assert_eq!(keys.piece_key(Coord::new(1, 1), PieceKind::Empty), 0);
        assert_ne!(keys.piece_key(Coord::new(1, 1), PieceKind::Queen), 0);
    }

    #[test]
    fn test_kinds_hash_differently() {
        let keys = ZobristKeys::for_size(4);
        let c = Coord::new(2, 3);
        assert_ne!(
            keys.piece_key(c, PieceKind::Queen),
            keys.piece_key(c, PieceKind::Rook)
        );
    }
}
