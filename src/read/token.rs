use bitflags::bitflags;

use crate::feature::{BondOrder, Stereo};

bitflags! {
    /// Categories a token can belong to. A token may carry several at once:
    /// the bracket symbol `H`, for example, is `ELEMENT | HYDROGEN`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct Category: u32 {
        const ALIPHATIC_ORGANIC = 1 << 0;
        const AROMATIC = 1 << 1;
        const AROMATIC_ORGANIC = 1 << 2;
        const BOND = 1 << 3;
        const BRACKET_CLOSE = 1 << 4;
        const BRACKET_OPEN = 1 << 5;
        const CHIRALITY = 1 << 6;
        const COLON = 1 << 7;
        const DIGIT = 1 << 8;
        const DOT = 1 << 9;
        const ELEMENT = 1 << 10;
        const HYDROGEN = 1 << 11;
        const MINUS = 1 << 12;
        const PAREN_CLOSE = 1 << 13;
        const PAREN_OPEN = 1 << 14;
        const PERCENT = 1 << 15;
        const PLUS = 1 << 16;
        const WILDCARD = 1 << 17;
    }
}

/// One lexed token, borrowing its text from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub category: Category,
    /// Byte offset of the token in the source.
    pub pos: usize,
    pub text: &'a str,
    /// Digit value, atomic number, or charge sign, depending on category.
    pub value: i32,
    /// Order payload of a `BOND` token.
    pub order: BondOrder,
    /// Direction payload of a `/` or `\` bond token.
    pub stereo: Stereo,
}

impl Token<'_> {
    pub fn len(&self) -> usize {
        self.text.len()
    }
}
