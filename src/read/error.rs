use thiserror::Error;

/// An error that occurs when reading a SMILES string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Malformed input, with the byte offset where parsing halted. The
    /// offset may lie before the current read position when the problem was
    /// discovered retroactively, such as the `(` of an unbalanced branch.
    #[error("{message} (byte {pos})")]
    Syntax { message: &'static str, pos: usize },
    /// Input longer than the parser's position counter can address.
    #[error("SMILES too long")]
    TooLong,
    /// A growable array could not be extended.
    #[error("out of memory")]
    OutOfMemory,
}

impl ReadError {
    pub(crate) fn syntax(message: &'static str, pos: usize) -> Self {
        Self::Syntax { message, pos }
    }

    /// The byte offset of a syntax error, if this is one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Syntax { pos, .. } => Some(*pos),
            Self::TooLong | Self::OutOfMemory => None,
        }
    }
}
