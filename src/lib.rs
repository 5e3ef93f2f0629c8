//! # huffpack
//!
//! Static, whole-file Huffman compression over byte streams.
//!
//! A container is 256 big-endian `u32` symbol counts followed by the
//! MSB-first bit-packed codes of every input byte. The tree is never
//! stored; both directions rebuild it from the counts.
//!
//! ```
//! let packed = huffpack::encode_bytes(b"aaab")?;
//! assert_eq!(packed.len(), 1024 + 1);
//! assert_eq!(huffpack::decode_bytes(&packed)?, b"aaab");
//! # Ok::<(), huffpack::HuffError>(())
//! ```

pub mod bitio;
pub mod codec;
pub mod codes;
pub mod error;
pub mod freq;
pub mod stats;
pub mod tree;

pub use codec::{decode, decode_bytes, encode, encode_bytes};
pub use codes::CodeTable;
pub use error::{HuffError, Result};
pub use freq::{FrequencyTable, HEADER_LEN};
pub use stats::{CodecStats, Direction};
pub use tree::HuffmanTree;
