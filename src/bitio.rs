//! MSB-first bit streams layered over byte-oriented readers and writers.

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use std::io::{self, Read, Write};

/// Buffers bits into bytes, most significant bit first.
pub struct BitSink<W: Write> {
    inner: BitWriter<W, BigEndian>,
    bits_written: u64,
}

impl<W: Write> BitSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: BitWriter::endian(writer, BigEndian),
            bits_written: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.inner.write_bit(bit)?;
        self.bits_written += 1;
        Ok(())
    }

    pub fn write_bits(&mut self, bits: &[bool]) -> io::Result<()> {
        for &bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Bits sitting in the partial byte that has not reached the writer yet.
    pub fn pending_bits(&self) -> u8 {
        (self.bits_written % 8) as u8
    }

    /// Zero-pads the low end of a trailing partial byte, writes it, and
    /// hands back the underlying writer. Emits nothing extra when aligned.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.byte_align()?;
        let mut writer = self.inner.into_writer();
        writer.flush()?;
        Ok(writer)
    }
}

/// Lazily yields at most `limit` bits, one byte pulled from the reader at a time.
///
/// Iteration ends when the limit is reached or the reader runs dry; the
/// latter sets [`BitSource::is_exhausted`]. Other read errors are yielded
/// once and then the source stops.
pub struct BitSource<R: Read> {
    inner: BitReader<R, BigEndian>,
    limit: u64,
    bits_read: u64,
    exhausted: bool,
}

impl<R: Read> BitSource<R> {
    pub fn new(reader: R, limit: u64) -> Self {
        Self {
            inner: BitReader::endian(reader, BigEndian),
            limit,
            bits_read: 0,
            exhausted: false,
        }
    }

    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl<R: Read> Iterator for BitSource<R> {
    type Item = io::Result<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted || self.bits_read >= self.limit {
            return None;
        }
        match self.inner.read_bit() {
            Ok(bit) => {
                self.bits_read += 1;
                Some(Ok(bit))
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                self.exhausted = true;
                None
            }
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn bits(pattern: &str) -> Vec<bool> {
        pattern.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn partial_byte_is_padded_on_the_low_end() {
        let mut sink = BitSink::new(Vec::new());
        sink.write_bits(&bits("101")).unwrap();
        assert_eq!(sink.pending_bits(), 3);
        let out = sink.finish().unwrap();
        assert_eq!(out, vec![0b1010_0000]);
    }

    #[test]
    fn aligned_output_gets_no_trailing_byte() {
        let mut sink = BitSink::new(Vec::new());
        sink.write_bits(&bits("1100101011110000")).unwrap();
        assert_eq!(sink.pending_bits(), 0);
        assert_eq!(sink.bits_written(), 16);
        let out = sink.finish().unwrap();
        assert_eq!(out, vec![0b1100_1010, 0b1111_0000]);
    }

    #[test]
    fn nothing_written_means_nothing_emitted() {
        let sink = BitSink::new(Vec::new());
        assert!(sink.finish().unwrap().is_empty());
    }

    #[test]
    fn reader_yields_msb_first_and_honours_limit() {
        let source = BitSource::new(Cursor::new(vec![0b1000_0001, 0xff]), 10);
        let read: Vec<bool> = source.map(|b| b.unwrap()).collect();
        assert_eq!(read, bits("1000000111"));
    }

    #[test]
    fn reader_stops_at_end_of_stream() {
        let mut source = BitSource::new(Cursor::new(vec![0x0f]), 64);
        let count = source.by_ref().map(|b| b.unwrap()).count();
        assert_eq!(count, 8);
        assert_eq!(source.bits_read(), 8);
        assert!(source.is_exhausted());
        assert!(source.next().is_none());
    }

    #[test]
    fn reader_consumes_only_the_bytes_it_needs() {
        let mut cursor = Cursor::new(vec![0xaa, 0xbb, 0xcc]);
        let taken = BitSource::new(&mut cursor, 8).count();
        assert_eq!(taken, 8);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn sink_and_source_agree_on_bit_order() {
        let pattern = bits("0110100111010");
        let mut sink = BitSink::new(Vec::new());
        sink.write_bits(&pattern).unwrap();
        let bytes = sink.finish().unwrap();
        let back: Vec<bool> = BitSource::new(Cursor::new(bytes), pattern.len() as u64)
            .map(|b| b.unwrap())
            .collect();
        assert_eq!(back, pattern);
    }
}
