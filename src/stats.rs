use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Encode,
    Decode,
}

/// What a single encode or decode pass did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodecStats {
    pub direction: Direction,
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub distinct_symbols: usize,
    pub payload_bits: u64,
    pub max_code_len: usize,
}

impl CodecStats {
    pub fn original_bytes(&self) -> u64 {
        match self.direction {
            Direction::Encode => self.input_bytes,
            Direction::Decode => self.output_bytes,
        }
    }

    pub fn container_bytes(&self) -> u64 {
        match self.direction {
            Direction::Encode => self.output_bytes,
            Direction::Decode => self.input_bytes,
        }
    }

    /// Container size over original size; `None` for an empty original.
    pub fn ratio(&self) -> Option<f64> {
        match self.original_bytes() {
            0 => None,
            n => Some(self.container_bytes() as f64 / n as f64),
        }
    }
}

impl fmt::Display for CodecStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.direction {
            Direction::Encode => "encoded",
            Direction::Decode => "decoded",
        };
        write!(
            f,
            "{verb} {} -> {} bytes, {} symbols, max code length {} bits",
            self.input_bytes, self.output_bytes, self.distinct_symbols, self.max_code_len
        )?;
        if let Some(ratio) = self.ratio() {
            write!(f, " ({:.1}% of original)", ratio * 100.0)?;
        }
        Ok(())
    }
}
