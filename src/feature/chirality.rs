use std::fmt;

/// Chirality marker recorded exactly as written. Only the bare `@` and `@@`
/// forms are recognized; the extended OpenSMILES markers (`@TH1`, `@AL2`,
/// ...) are not parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chirality {
    /// `@`
    Anticlockwise,
    /// `@@`
    Clockwise,
}

impl Chirality {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anticlockwise => "@",
            Self::Clockwise => "@@",
        }
    }
}

impl fmt::Display for Chirality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
