use mendeleev::Element;

use super::token::{Category, Token};
use crate::feature::{BondOrder, ElementExt, Stereo};

/// Reads the token starting at byte `pos`, or returns `None` at end of
/// input and on a byte that starts no token. `inbracket` selects between
/// the open-chain vocabulary (organic subset, bond `-`, bond `:`) and the
/// bracket-atom vocabulary (full element table, charge `-`, atom-class
/// `:`). The lexer itself holds no state.
pub(crate) fn lex(smi: &str, pos: usize, inbracket: bool) -> Option<Token<'_>> {
    let bytes = smi.as_bytes();
    let c0 = *bytes.get(pos)?;
    let c1 = bytes.get(pos + 1).copied().unwrap_or(0);

    match c0 {
        b'a' => {
            (inbracket && c1 == b's').then(|| token(smi, pos, 2, Category::AROMATIC, 33))
        }
        b'b' => Some(lower_organic(smi, pos, inbracket, 5)),
        b'c' => Some(lower_organic(smi, pos, inbracket, 6)),
        b'n' => Some(lower_organic(smi, pos, inbracket, 7)),
        b'o' => Some(lower_organic(smi, pos, inbracket, 8)),
        b'p' => Some(lower_organic(smi, pos, inbracket, 15)),
        b's' if inbracket && c1 == b'e' => Some(token(smi, pos, 2, Category::AROMATIC, 34)),
        b's' => Some(lower_organic(smi, pos, inbracket, 16)),
        b'A'..=b'Z' => symbol(smi, pos, inbracket, c0, c1),
        b'0'..=b'9' => Some(token(smi, pos, 1, Category::DIGIT, i32::from(c0 - b'0'))),
        b'*' => Some(token(smi, pos, 1, Category::WILDCARD, 0)),
        b'[' => Some(token(smi, pos, 1, Category::BRACKET_OPEN, -1)),
        b']' => Some(token(smi, pos, 1, Category::BRACKET_CLOSE, -1)),
        b'(' => Some(token(smi, pos, 1, Category::PAREN_OPEN, -1)),
        b')' => Some(token(smi, pos, 1, Category::PAREN_CLOSE, -1)),
        b'+' => Some(token(smi, pos, 1, Category::PLUS, 1)),
        b'-' if inbracket => Some(token(smi, pos, 1, Category::MINUS, -1)),
        b'-' => Some(bond(smi, pos, BondOrder::Single, Stereo::Unspecified)),
        b'%' => Some(token(smi, pos, 1, Category::PERCENT, -1)),
        b'=' => Some(bond(smi, pos, BondOrder::Double, Stereo::Unspecified)),
        b'#' => Some(bond(smi, pos, BondOrder::Triple, Stereo::Unspecified)),
        b'$' => Some(bond(smi, pos, BondOrder::Quadruple, Stereo::Unspecified)),
        b':' if inbracket => Some(token(smi, pos, 1, Category::COLON, -1)),
        b':' => Some(bond(smi, pos, BondOrder::Aromatic, Stereo::Unspecified)),
        b'/' => Some(bond(smi, pos, BondOrder::Single, Stereo::Up)),
        b'\\' => Some(bond(smi, pos, BondOrder::Single, Stereo::Down)),
        b'.' => Some(token(smi, pos, 1, Category::DOT, -1)),
        b'@' => {
            let len = if c1 == b'@' { 2 } else { 1 };
            Some(token(smi, pos, len, Category::CHIRALITY, -1))
        }
        _ => None,
    }
}

fn token(smi: &str, pos: usize, len: usize, category: Category, value: i32) -> Token<'_> {
    Token {
        category,
        pos,
        text: &smi[pos..pos + len],
        value,
        order: BondOrder::Unspecified,
        stereo: Stereo::Unspecified,
    }
}

fn bond(smi: &str, pos: usize, order: BondOrder, stereo: Stereo) -> Token<'_> {
    Token {
        order,
        stereo,
        ..token(smi, pos, 1, Category::BOND, -1)
    }
}

fn lower_organic(smi: &str, pos: usize, inbracket: bool, atomic_number: i32) -> Token<'_> {
    let category = if inbracket {
        Category::AROMATIC
    } else {
        Category::AROMATIC_ORGANIC
    };

    token(smi, pos, 1, category, atomic_number)
}

// Uppercase letters lex as elements even outside brackets, where only the
// organic subset is shortened; the grammar refuses the rest there.
fn symbol(smi: &str, pos: usize, inbracket: bool, c0: u8, c1: u8) -> Option<Token<'_>> {
    if !inbracket {
        if let Some(organic) = organic(smi, pos, c0, c1) {
            return Some(organic);
        }
    }

    element(smi, pos, c1)
}

fn organic(smi: &str, pos: usize, c0: u8, c1: u8) -> Option<Token<'_>> {
    let (atomic_number, len) = match (c0, c1) {
        (b'B', b'r') => (35, 2),
        (b'C', b'l') => (17, 2),
        (b'B', _) => (5, 1),
        (b'C', _) => (6, 1),
        (b'N', _) => (7, 1),
        (b'O', _) => (8, 1),
        (b'P', _) => (15, 1),
        (b'S', _) => (16, 1),
        (b'F', _) => (9, 1),
        (b'I', _) => (53, 1),
        _ => return None,
    };

    Some(token(smi, pos, len, Category::ALIPHATIC_ORGANIC, atomic_number))
}

// Two-letter symbols win over one-letter ones whenever the next byte
// completes a known symbol, so `Sc` is scandium, never sulfur-carbon.
fn element(smi: &str, pos: usize, c1: u8) -> Option<Token<'_>> {
    if c1.is_ascii_lowercase() {
        if let Some(element) = Element::from_symbol(&smi[pos..pos + 2]) {
            return Some(token(
                smi,
                pos,
                2,
                Category::ELEMENT,
                element.atomic_number() as i32,
            ));
        }
    }

    let element = Element::from_symbol(&smi[pos..pos + 1])?;
    let category = if element == Element::H {
        Category::ELEMENT | Category::HYDROGEN
    } else {
        Category::ELEMENT
    };

    Some(token(smi, pos, 1, category, element.atomic_number() as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn category(smi: &str, inbracket: bool) -> Option<Category> {
        lex(smi, 0, inbracket).map(|token| token.category)
    }

    #[test]
    fn end_of_input() {
        assert_eq!(lex("C", 1, false), None)
    }

    #[test]
    fn unrecognized() {
        assert_eq!(lex("?", 0, false), None);
        assert_eq!(lex(",", 0, true), None)
    }

    #[test]
    fn aliphatic_organic() {
        let token = lex("C", 0, false).unwrap();

        assert_eq!(token.category, Category::ALIPHATIC_ORGANIC);
        assert_eq!(token.value, 6);
        assert_eq!(token.text, "C")
    }

    #[test]
    fn two_letter_organic() {
        let token = lex("Cl", 0, false).unwrap();

        assert_eq!(token.category, Category::ALIPHATIC_ORGANIC);
        assert_eq!(token.value, 17);
        assert_eq!(token.len(), 2);

        let token = lex("Br", 0, false).unwrap();

        assert_eq!(token.value, 35);
        assert_eq!(token.len(), 2)
    }

    #[test]
    fn organic_without_suffix() {
        let token = lex("Cx", 0, false).unwrap();

        assert_eq!(token.value, 6);
        assert_eq!(token.len(), 1)
    }

    #[test]
    fn aromatic_organic() {
        let token = lex("c", 0, false).unwrap();

        assert_eq!(token.category, Category::AROMATIC_ORGANIC);
        assert_eq!(token.value, 6)
    }

    #[test]
    fn aromatic_in_bracket() {
        let token = lex("c", 0, true).unwrap();

        assert_eq!(token.category, Category::AROMATIC);
        assert_eq!(token.value, 6)
    }

    #[test]
    fn aromatic_arsenic_in_bracket_only() {
        let token = lex("as", 0, true).unwrap();

        assert_eq!(token.category, Category::AROMATIC);
        assert_eq!(token.value, 33);
        assert_eq!(token.len(), 2);
        assert_eq!(lex("as", 0, false), None)
    }

    #[test]
    fn aromatic_selenium_in_bracket_only() {
        let token = lex("se", 0, true).unwrap();

        assert_eq!(token.value, 34);
        assert_eq!(token.len(), 2);

        // Outside a bracket the `s` lexes alone.
        let token = lex("se", 0, false).unwrap();

        assert_eq!(token.category, Category::AROMATIC_ORGANIC);
        assert_eq!(token.len(), 1)
    }

    #[test]
    fn aromatic_sulfur_in_bracket() {
        let token = lex("s", 0, true).unwrap();

        assert_eq!(token.category, Category::AROMATIC);
        assert_eq!(token.value, 16)
    }

    #[test]
    fn element_two_letter() {
        let token = lex("Fe", 0, true).unwrap();

        assert_eq!(token.category, Category::ELEMENT);
        assert_eq!(token.value, 26);
        assert_eq!(token.text, "Fe")
    }

    #[test]
    fn element_one_letter() {
        let token = lex("U", 0, true).unwrap();

        assert_eq!(token.category, Category::ELEMENT);
        assert_eq!(token.value, 92)
    }

    #[test]
    fn element_prefers_two_letters() {
        let token = lex("Sc", 0, true).unwrap();

        assert_eq!(token.value, 21);
        assert_eq!(token.len(), 2)
    }

    #[test]
    fn element_unknown_pair() {
        assert_eq!(lex("Ax", 0, true), None)
    }

    #[test]
    fn hydrogen_is_composite() {
        let token = lex("H", 0, true).unwrap();

        assert_eq!(token.category, Category::ELEMENT | Category::HYDROGEN);
        assert_eq!(token.value, 1)
    }

    #[test]
    fn mercury_is_not_hydrogen() {
        let token = lex("Hg", 0, true).unwrap();

        assert_eq!(token.category, Category::ELEMENT);
        assert_eq!(token.value, 80)
    }

    #[test]
    fn digit() {
        let token = lex("7", 0, false).unwrap();

        assert_eq!(token.category, Category::DIGIT);
        assert_eq!(token.value, 7)
    }

    #[test]
    fn wildcard() {
        let token = lex("*", 0, false).unwrap();

        assert_eq!(token.category, Category::WILDCARD);
        assert_eq!(token.value, 0)
    }

    #[test]
    fn minus_is_context_sensitive() {
        let token = lex("-", 0, false).unwrap();

        assert_eq!(token.category, Category::BOND);
        assert_eq!(token.order, BondOrder::Single);

        let token = lex("-", 0, true).unwrap();

        assert_eq!(token.category, Category::MINUS);
        assert_eq!(token.value, -1)
    }

    #[test]
    fn colon_is_context_sensitive() {
        let token = lex(":", 0, false).unwrap();

        assert_eq!(token.category, Category::BOND);
        assert_eq!(token.order, BondOrder::Aromatic);
        assert_eq!(category(":", true), Some(Category::COLON))
    }

    #[test]
    fn plus() {
        let token = lex("+", 0, true).unwrap();

        assert_eq!(token.category, Category::PLUS);
        assert_eq!(token.value, 1)
    }

    #[test]
    fn bond_orders() {
        assert_eq!(lex("=", 0, false).unwrap().order, BondOrder::Double);
        assert_eq!(lex("#", 0, false).unwrap().order, BondOrder::Triple);
        assert_eq!(lex("$", 0, false).unwrap().order, BondOrder::Quadruple)
    }

    #[test]
    fn directional_bonds() {
        let up = lex("/", 0, false).unwrap();

        assert_eq!(up.order, BondOrder::Single);
        assert_eq!(up.stereo, Stereo::Up);

        let down = lex("\\", 0, false).unwrap();

        assert_eq!(down.order, BondOrder::Single);
        assert_eq!(down.stereo, Stereo::Down)
    }

    #[test]
    fn punctuation() {
        assert_eq!(category("[", false), Some(Category::BRACKET_OPEN));
        assert_eq!(category("]", false), Some(Category::BRACKET_CLOSE));
        assert_eq!(category("(", false), Some(Category::PAREN_OPEN));
        assert_eq!(category(")", false), Some(Category::PAREN_CLOSE));
        assert_eq!(category("%", false), Some(Category::PERCENT));
        assert_eq!(category(".", false), Some(Category::DOT))
    }

    #[test]
    fn chirality() {
        let token = lex("@", 0, true).unwrap();

        assert_eq!(token.category, Category::CHIRALITY);
        assert_eq!(token.len(), 1)
    }

    #[test]
    fn chirality_double() {
        let token = lex("@@", 0, true).unwrap();

        assert_eq!(token.category, Category::CHIRALITY);
        assert_eq!(token.text, "@@")
    }

    #[test]
    fn position_is_carried() {
        let token = lex("C[N]", 2, true).unwrap();

        assert_eq!(token.pos, 2);
        assert_eq!(token.value, 7)
    }
}
