//! Two-way symbol table for the textual board format.
//!
//! The table is built once from a literal list. Construction refuses any
//! list in which a symbol or an entry appears twice, so a lookup in either
//! direction always has exactly one answer.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::error::SymbolError;
use super::PieceKind;

/// One entry of the textual format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    Piece(PieceKind),
    /// Display-only marker for an empty square; loads as `PieceKind::Empty`.
    Marker,
}

impl Glyph {
    /// Kind stored on the board when this glyph is loaded.
    #[must_use]
    pub const fn kind(self) -> PieceKind {
        match self {
            Glyph::Piece(kind) => kind,
            Glyph::Marker => PieceKind::Empty,
        }
    }
}

/// Rendered for kinds with no symbol of their own.
pub const UNMAPPED_SYMBOL: char = '?';

// No knight entry: `K` belongs to the king and the knight has no other
// established letter.
const DEFAULT_SYMBOLS: [(Glyph, char); 7] = [
    (Glyph::Piece(PieceKind::King), 'K'),
    (Glyph::Piece(PieceKind::Queen), 'Q'),
    (Glyph::Piece(PieceKind::Rook), 'R'),
    (Glyph::Piece(PieceKind::Bishop), 'B'),
    (Glyph::Piece(PieceKind::Pawn), 'P'),
    (Glyph::Piece(PieceKind::Empty), '-'),
    (Glyph::Marker, '!'),
];

#[derive(Clone, Debug)]
pub struct SymbolTable {
    by_symbol: HashMap<char, Glyph>,
    by_glyph: HashMap<Glyph, char>,
}

impl SymbolTable {
    /// Build a table, rejecting duplicate symbols and duplicate glyphs.
    pub fn from_pairs(pairs: &[(Glyph, char)]) -> Result<Self, SymbolError> {
        let mut by_symbol = HashMap::with_capacity(pairs.len());
        let mut by_glyph = HashMap::with_capacity(pairs.len());
        for &(glyph, symbol) in pairs {
            if by_symbol.insert(symbol, glyph).is_some() {
                return Err(SymbolError::Collision { symbol });
            }
            if by_glyph.insert(glyph, symbol).is_some() {
                return Err(SymbolError::Collision { symbol });
            }
        }
        Ok(SymbolTable {
            by_symbol,
            by_glyph,
        })
    }

    #[must_use]
    pub fn glyph(&self, symbol: char) -> Option<Glyph> {
        self.by_symbol.get(&symbol).copied()
    }

    #[must_use]
    pub fn symbol(&self, glyph: Glyph) -> Option<char> {
        self.by_glyph.get(&glyph).copied()
    }

    /// Symbol for a piece kind, or `UNMAPPED_SYMBOL` when it has none.
    #[must_use]
    pub fn symbol_for(&self, kind: PieceKind) -> char {
        self.symbol(Glyph::Piece(kind)).unwrap_or(UNMAPPED_SYMBOL)
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}

/// The process-wide table used by the layout codec and `Display`.
pub static SYMBOLS: Lazy<SymbolTable> = Lazy::new(|| {
    SymbolTable::from_pairs(&DEFAULT_SYMBOLS).expect("default symbol table has a collision")
});
