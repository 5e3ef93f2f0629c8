use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HuffError>;

#[derive(Error, Debug)]
pub enum HuffError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("truncated header: expected 1024 bytes, got {got}")]
    TruncatedHeader { got: usize },

    #[error("truncated payload: decoded {decoded} of {expected} symbols")]
    TruncatedPayload { decoded: u64, expected: u64 },

    #[error("corrupt stream: no tree edge for bit at offset {bit_offset}")]
    CorruptStream { bit_offset: u64 },

    /// No symbol has a nonzero count, so there is no tree to build.
    #[error("cannot build a Huffman tree from an empty frequency table")]
    EmptyInput,

    #[error("symbol {symbol:#04x} occurs more than u32::MAX times")]
    CountOverflow { symbol: u8 },
}

impl HuffError {
    /// True for errors caused by a malformed container rather than the I/O layer.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            HuffError::TruncatedHeader { .. }
                | HuffError::TruncatedPayload { .. }
                | HuffError::CorruptStream { .. }
        )
    }
}
