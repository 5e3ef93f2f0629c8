//! The container codec: a 1024-byte frequency header followed by the
//! bit-packed codes of every input byte.

use crate::bitio::{BitSink, BitSource};
use crate::codes::CodeTable;
use crate::error::{HuffError, Result};
use crate::freq::{FrequencyTable, HEADER_LEN};
use crate::stats::{CodecStats, Direction};
use crate::tree::HuffmanTree;
use std::io::{self, BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};
use tracing::{debug, info};

const CHUNK: usize = 8 * 1024;

/// Compresses `input` into `output`.
///
/// The input is read twice: once to count frequencies and once, after
/// seeking back to where it started, to emit the codes. Both passes must
/// see the same bytes.
pub fn encode<R: Read + Seek, W: Write>(mut input: R, output: W) -> Result<CodecStats> {
    let span = tracing::debug_span!("encode");
    let _enter = span.enter();

    let start = input.stream_position()?;
    let freqs = FrequencyTable::from_reader(BufReader::new(&mut input))?;
    input.seek(SeekFrom::Start(start))?;

    let total = freqs.total();
    debug!(total, distinct = freqs.distinct(), "counted frequencies");

    let mut writer = BufWriter::new(output);
    freqs.write_header(&mut writer)?;

    if freqs.is_empty() {
        writer.flush()?;
        info!("empty input, wrote header-only container");
        return Ok(CodecStats {
            direction: Direction::Encode,
            input_bytes: 0,
            output_bytes: HEADER_LEN as u64,
            distinct_symbols: 0,
            payload_bits: 0,
            max_code_len: 0,
        });
    }

    let tree = HuffmanTree::build(&freqs)?;
    let codes = CodeTable::from_tree(&tree);
    debug!(nodes = tree.len(), depth = tree.depth(), "built tree");

    let mut sink = BitSink::new(writer);
    let mut reader = BufReader::new(input);
    let mut buf = [0u8; CHUNK];
    let mut seen: u64 = 0;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &byte in &buf[..n] {
            let code = codes.get(byte).ok_or_else(input_changed)?;
            sink.write_bits(code)?;
        }
        seen += n as u64;
    }
    if seen != total {
        return Err(input_changed());
    }

    let payload_bits = sink.bits_written();
    sink.finish()?;

    let stats = CodecStats {
        direction: Direction::Encode,
        input_bytes: total,
        output_bytes: HEADER_LEN as u64 + payload_bits.div_ceil(8),
        distinct_symbols: codes.len(),
        payload_bits,
        max_code_len: codes.max_len(),
    };
    info!(
        input = stats.input_bytes,
        output = stats.output_bytes,
        "encode finished"
    );
    Ok(stats)
}

/// Restores the original bytes of a container read from `input`.
///
/// Stops after as many symbols as the header's counts add up to; pad bits
/// and anything after the payload are left unread.
pub fn decode<R: Read, W: Write>(input: R, output: W) -> Result<CodecStats> {
    let span = tracing::debug_span!("decode");
    let _enter = span.enter();

    let mut reader = BufReader::new(input);
    let freqs = FrequencyTable::read_header(&mut reader)?;
    let total = freqs.total();
    debug!(total, distinct = freqs.distinct(), "read header");

    let mut writer = BufWriter::new(output);
    if total == 0 {
        writer.flush()?;
        info!("header declares an empty original");
        return Ok(CodecStats {
            direction: Direction::Decode,
            input_bytes: HEADER_LEN as u64,
            output_bytes: 0,
            distinct_symbols: 0,
            payload_bits: 0,
            max_code_len: 0,
        });
    }

    let tree = HuffmanTree::build(&freqs)?;
    let codes = CodeTable::from_tree(&tree);
    let payload_bits = codes.payload_bits(&freqs);
    debug!(payload_bits, depth = tree.depth(), "rebuilt tree");

    let mut bits = BitSource::new(&mut reader, payload_bits);
    let mut decoded: u64 = 0;
    let mut current = tree.root();
    while decoded < total {
        let Some(bit) = bits.next() else {
            return Err(HuffError::TruncatedPayload {
                decoded,
                expected: total,
            });
        };
        let bit = bit?;
        current = tree
            .child(current, bit)
            .ok_or(HuffError::CorruptStream {
                bit_offset: bits.bits_read() - 1,
            })?;
        if let Some(symbol) = tree.node(current).symbol() {
            writer.write_all(&[symbol])?;
            decoded += 1;
            current = tree.root();
        }
    }
    writer.flush()?;

    let stats = CodecStats {
        direction: Direction::Decode,
        input_bytes: HEADER_LEN as u64 + bits.bits_read().div_ceil(8),
        output_bytes: total,
        distinct_symbols: codes.len(),
        payload_bits,
        max_code_len: codes.max_len(),
    };
    info!(
        input = stats.input_bytes,
        output = stats.output_bytes,
        "decode finished"
    );
    Ok(stats)
}

/// In-memory [`encode`].
pub fn encode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_LEN + data.len() / 2);
    encode(Cursor::new(data), &mut out)?;
    Ok(out)
}

/// In-memory [`decode`].
pub fn decode_bytes(container: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decode(container, &mut out)?;
    Ok(out)
}

fn input_changed() -> HuffError {
    HuffError::Io(io::Error::new(
        io::ErrorKind::InvalidData,
        "input changed between the counting and encoding passes",
    ))
}
