use mendeleev::Element;

/// Symbol lookup over the full periodic table.
pub trait ElementExt: Sized {
    /// Resolves a case-sensitive atomic symbol such as `C` or `Cl`.
    fn from_symbol(symbol: &str) -> Option<Self>;
}

impl ElementExt for Element {
    fn from_symbol(symbol: &str) -> Option<Self> {
        Element::list().iter().copied().find(|element| element.symbol() == symbol)
    }
}
