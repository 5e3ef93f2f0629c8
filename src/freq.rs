use crate::error::{HuffError, Result};
use std::io::{self, Read, Write};

pub const SYMBOLS: usize = 256;
/// 256 big-endian u32 counts.
pub const HEADER_LEN: usize = SYMBOLS * 4;

const CHUNK: usize = 8 * 1024;

/// Occurrence count of every byte value in a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOLS],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; SYMBOLS],
        }
    }
}

impl FrequencyTable {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::default();
        table.update(data);
        table
    }

    /// Single pass over `reader` until end of stream.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut table = Self::default();
        let mut buf = [0u8; CHUNK];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            table.update(&buf[..n]);
        }
        Ok(table)
    }

    pub fn from_counts(counts: [u64; SYMBOLS]) -> Self {
        Self { counts }
    }

    fn update(&mut self, data: &[u8]) {
        for &b in data {
            self.counts[b as usize] += 1;
        }
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn counts(&self) -> &[u64; SYMBOLS] {
        &self.counts
    }

    /// Sum of all counts, i.e. the source length in bytes.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// `(symbol, count)` for every symbol that occurs, in symbol order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(s, &c)| (s as u8, c))
    }

    pub fn write_header<W: Write>(&self, mut writer: W) -> Result<()> {
        let mut header = [0u8; HEADER_LEN];
        for (symbol, &count) in self.counts.iter().enumerate() {
            let count = u32::try_from(count).map_err(|_| HuffError::CountOverflow {
                symbol: symbol as u8,
            })?;
            header[symbol * 4..symbol * 4 + 4].copy_from_slice(&count.to_be_bytes());
        }
        writer.write_all(&header)?;
        Ok(())
    }

    /// Reads exactly [`HEADER_LEN`] bytes; a short stream is a format error.
    pub fn read_header<R: Read>(mut reader: R) -> Result<Self> {
        let mut header = [0u8; HEADER_LEN];
        let mut got = 0;
        while got < HEADER_LEN {
            match reader.read(&mut header[got..]) {
                Ok(0) => return Err(HuffError::TruncatedHeader { got }),
                Ok(n) => got += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        let mut counts = [0u64; SYMBOLS];
        for (count, field) in counts.iter_mut().zip(header.chunks_exact(4)) {
            *count = u32::from_be_bytes([field[0], field[1], field[2], field[3]]) as u64;
        }
        Ok(Self { counts })
    }
}
