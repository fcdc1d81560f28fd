/// Bond direction written with `/` (up) or `\` (down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stereo {
    #[default]
    Unspecified,
    Up,
    Down,
}

impl Stereo {
    /// Returns the direction seen from the other end of the bond.
    pub const fn flipped(&self) -> Self {
        match self {
            Self::Unspecified => Self::Unspecified,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}
