use super::*;
use crate::bits::parse_bit_string;
use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::kernels::elias_gamma::EliasGamma;
use crate::kernels::fibonacci::Fibonacci;
use crate::kernels::golomb_rice::GolombRice;
use crate::kernels::Method;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random text over code points 1..=255 (0 is not encodable by every method).
fn random_byte_text(rng: &mut StdRng, len: usize) -> String {
    (0..len)
        .map(|_| char::from(rng.random_range(1..=255u8)))
        .collect()
}

#[test]
fn test_text_roundtrip_all_methods_random() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut session = Session::default();
    for _ in 0..25 {
        let len = rng.random_range(0..200);
        let text = random_byte_text(&mut rng, len);
        for method in Method::ALL {
            let report = session.encode(method.name(), &text).unwrap();
            let decoded = session.decode(method.name(), &report.bits).unwrap();
            assert_eq!(decoded.text, text, "method {}", method);
            assert_eq!(decoded.symbol_count, report.symbol_count);
        }
    }
}

#[test]
fn test_integer_roundtrip_representative_range() {
    let golomb = GolombRice::default();
    let gamma = EliasGamma::new();
    let fib = Fibonacci::default();
    for n in 1..=1_114_111u64 {
        if n % 997 != 1 && n > 300 {
            continue;
        }
        assert_eq!(golomb.decode(&golomb.encode(n).unwrap()).unwrap(), n);
        assert_eq!(gamma.decode(&gamma.encode(n).unwrap()).unwrap(), n);
        assert_eq!(fib.decode(&fib.encode(n).unwrap()).unwrap(), n);
    }
    assert_eq!(golomb.decode(&golomb.encode(0).unwrap()).unwrap(), 0);
}

#[test]
fn test_two_codeword_segmentation() {
    let golomb = GolombRice::default();
    let gamma = EliasGamma::new();
    let fib = Fibonacci::default();
    for (n1, n2) in [(1u64, 1u64), (7, 8), (65, 1), (1000, 3), (12345, 54321)] {
        let mut stream = golomb.encode(n1).unwrap();
        stream.extend_from_bitslice(&golomb.encode(n2).unwrap());
        assert_eq!(golomb.decode_all(&stream).unwrap(), vec![n1, n2]);

        let mut stream = gamma.encode(n1).unwrap();
        stream.extend_from_bitslice(&gamma.encode(n2).unwrap());
        assert_eq!(gamma.decode_all(&stream).unwrap(), vec![n1, n2]);

        let mut stream = fib.encode(n1).unwrap();
        stream.extend_from_bitslice(&fib.encode(n2).unwrap());
        assert_eq!(fib.decode_all(&stream).unwrap(), vec![n1, n2]);
    }
}

#[test]
fn test_every_truncation_terminates() {
    let config = CodecConfig::default();
    let text = "truncate me";
    for method in Method::ALL {
        let (report, table) = encode_text(method.name(), text, &config).unwrap();
        for cut in 0..report.bits.len() {
            // Any prefix either decodes to a prefix of the text or is rejected.
            match decode_text(method.name(), &report.bits[..cut], &config, table.as_ref()) {
                Ok(decoded) => assert!(text.starts_with(&decoded.text), "{} cut {}", method, cut),
                Err(e) => assert!(matches!(e, CodecError::MalformedStream(_)), "{}: {}", method, e),
            }
        }
    }
}

#[test]
fn test_garbage_streams_are_rejected_not_looped() {
    let config = CodecConfig::default();
    let zeros = "0".repeat(4096);
    for method in [Method::Golomb, Method::Elias, Method::Fibonacci] {
        let result = decode_text(method.name(), &zeros, &config, None);
        assert!(matches!(result, Err(CodecError::MalformedStream(_))), "method {}", method);
    }
}

#[test]
fn test_huffman_single_symbol_repeated() {
    let mut session = Session::default();
    for k in [1usize, 2, 17] {
        let text = "q".repeat(k);
        let report = session.encode("huffman", &text).unwrap();
        assert_eq!(report.bit_len, k);
        assert_eq!(session.decode("huffman", &report.bits).unwrap().text, text);
    }
}

#[test]
fn test_huffman_prefix_free_on_skewed_input() {
    let config = CodecConfig::default();
    // Fibonacci-like weights give the deepest possible tree.
    let mut text = String::new();
    let (mut a, mut b) = (1usize, 1usize);
    for c in 'a'..='m' {
        text.push_str(&c.to_string().repeat(a));
        let next = a + b;
        a = b;
        b = next;
    }
    let (report, table) = encode_text("huffman", &text, &config).unwrap();
    let table = table.unwrap();
    assert!(table.is_prefix_free());
    assert_eq!(table.max_codeword_len(), 12);
    let bits = parse_bit_string(&report.bits).unwrap();
    assert_eq!(crate::kernels::huffman::Huffman::new().decode(&bits, &table).unwrap(), text);
}

#[test]
fn test_reports_serialize_for_presentation() {
    let config = CodecConfig::default();
    let (report, _) = encode_text("golomb", "A", &config).unwrap();
    assert_eq!(report.bits, "000000001001");
    assert!((report.bits_per_symbol() - 12.0).abs() < f64::EPSILON);

    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["method"], "golomb");
    assert_eq!(value["bit_len"], 12);
    assert!(value.get("tree").is_none());

    let decoded = decode_text("golomb", &report.bits, &config, None).unwrap();
    let value: serde_json::Value = serde_json::from_str(&decoded.to_json().unwrap()).unwrap();
    assert_eq!(value["text"], "A");
}

#[test]
fn test_error_messages_are_presentable() {
    let mut session = Session::default();
    let err = session.encode("elias", "\0").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid input: Elias-Gamma can only encode integers greater than zero"
    );
}
