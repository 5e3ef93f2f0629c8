use huffpack::{
    CodeTable, FrequencyTable, HEADER_LEN, HuffError, HuffmanTree, decode, decode_bytes, encode,
    encode_bytes,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Cursor;

fn roundtrip(data: &[u8]) -> Vec<u8> {
    let packed = encode_bytes(data).unwrap();
    let restored = decode_bytes(&packed).unwrap();
    assert_eq!(restored, data);
    packed
}

fn header_counts(packed: &[u8]) -> Vec<u64> {
    packed[..HEADER_LEN]
        .chunks_exact(4)
        .map(|f| u32::from_be_bytes([f[0], f[1], f[2], f[3]]) as u64)
        .collect()
}

#[test]
fn empty_input() {
    let packed = roundtrip(b"");
    assert_eq!(packed.len(), HEADER_LEN);
    assert!(packed.iter().all(|&b| b == 0));
}

#[test]
fn single_repeated_byte() {
    for n in [1usize, 7, 8, 9, 4096] {
        let data = vec![0x41u8; n];
        let packed = roundtrip(&data);
        // one bit per symbol
        assert_eq!(packed.len(), HEADER_LEN + n.div_ceil(8));
    }
}

#[test]
fn aaab_scenario() {
    let packed = roundtrip(b"aaab");
    let counts = header_counts(&packed);
    assert_eq!(counts[b'a' as usize], 3);
    assert_eq!(counts[b'b' as usize], 1);
    assert_eq!(counts.iter().sum::<u64>(), 4);
    assert_eq!(packed.len(), HEADER_LEN + 1);
}

#[test]
fn header_sums_to_input_length() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..20 {
        let len = rng.gen_range(0..5000);
        let data: Vec<u8> = (0..len).map(|_| rng.r#gen()).collect();
        let packed = encode_bytes(&data).unwrap();
        assert_eq!(header_counts(&packed).iter().sum::<u64>(), len as u64);
    }
}

#[test]
fn random_inputs_round_trip() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let len = rng.gen_range(0..10_000);
        // A narrow alphabet exercises skewed trees, a wide one flat trees.
        let alphabet: u8 = rng.gen_range(1..=255);
        let data: Vec<u8> = (0..len).map(|_| rng.gen_range(0..=alphabet)).collect();
        roundtrip(&data);
    }
}

#[test]
fn skewed_text_compresses() {
    let text = "the quick brown fox jumps over the lazy dog. ".repeat(500);
    let packed = roundtrip(text.as_bytes());
    assert!(packed.len() < text.len());
}

#[test]
fn every_byte_value_round_trips() {
    let data: Vec<u8> = (0..=255u8).cycle().take(256 * 13 + 5).collect();
    roundtrip(&data);
}

#[test]
fn encoding_is_deterministic() {
    let data = b"she sells sea shells by the sea shore".repeat(20);
    assert_eq!(encode_bytes(&data).unwrap(), encode_bytes(&data).unwrap());
}

#[test]
fn streaming_api_matches_in_memory_api() {
    let data = b"streams and slices should agree".to_vec();
    let mut packed = Vec::new();
    encode(Cursor::new(&data), &mut packed).unwrap();
    assert_eq!(packed, encode_bytes(&data).unwrap());

    let mut restored = Vec::new();
    decode(Cursor::new(&packed), &mut restored).unwrap();
    assert_eq!(restored, data);
}

#[test]
fn derived_codes_are_prefix_free_for_random_tables() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..25 {
        let mut counts = [0u64; 256];
        for c in counts.iter_mut() {
            if rng.gen_bool(0.3) {
                *c = rng.gen_range(1..1000);
            }
        }
        counts[0] = counts[0].max(1);
        let freqs = FrequencyTable::from_counts(counts);
        let codes = CodeTable::from_tree(&HuffmanTree::build(&freqs).unwrap());
        assert_eq!(codes.len(), freqs.distinct());

        let all: Vec<&[bool]> = codes.iter().map(|(_, c)| c).collect();
        for (i, a) in all.iter().enumerate() {
            assert!(!a.is_empty());
            for b in all.iter().skip(i + 1) {
                assert!(!a.starts_with(b) && !b.starts_with(a));
            }
        }
    }
}

#[test]
fn truncated_container_is_rejected() {
    let packed = encode_bytes(b"abcdefghijklmnopqrstuvwxyz").unwrap();

    let err = decode_bytes(&packed[..HEADER_LEN - 1]).unwrap_err();
    assert!(matches!(err, HuffError::TruncatedHeader { .. }));

    let err = decode_bytes(&packed[..HEADER_LEN + 3]).unwrap_err();
    assert!(matches!(err, HuffError::TruncatedPayload { expected: 26, .. }));
    assert!(err.is_format_error());
}
