//! Argument codec encodings for every value kind.

use interact_core::codec::encode;
use interact_core::error::EncodingError;
use interact_core::value::{Address, TypedValue, UintWidth};
use num_bigint::BigUint;

fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

fn hex_of(value: &TypedValue) -> String {
    encode(value).unwrap().to_hex()
}

const GIVEAWAY_ADDR: &str = "erd1085h6wdckzfkvfftq837mwt2a780dv0p8wcjjpauku7at0dlqswszewvjn";
const GIVEAWAY_HEX: &str = "79e97d39b8b09366252b01e3edb96aef8ef6b1e13bb12907bcb73dd5bdbf041d";

#[test]
fn test_encoding_is_deterministic() {
    let value = TypedValue::Tuple(vec![
        TypedValue::str("JEET-dda037"),
        TypedValue::u64(0),
        TypedValue::biguint(BigUint::from(696969u32) * pow10(18)),
        TypedValue::List(vec![TypedValue::address(GIVEAWAY_ADDR)]),
        TypedValue::some(TypedValue::Bool(true)),
    ]);
    let first = encode(&value).unwrap();
    let second = encode(&value.clone()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_u8_bounds() {
    assert_eq!(encode(&TypedValue::u8(255)).unwrap().as_bytes(), &[0xff]);

    let err = encode(&TypedValue::uint(UintWidth::U8, 256u32)).unwrap_err();
    match err {
        EncodingError::Range { width, value, .. } => {
            assert_eq!(width, UintWidth::U8);
            assert_eq!(value, BigUint::from(256u32));
        }
        other => panic!("expected Range, got {:?}", other),
    }
}

#[test]
fn test_fixed_widths_are_not_inferred() {
    // Same number, different declared widths, different bytes.
    assert_eq!(hex_of(&TypedValue::u32(5)), "00000005");
    assert_eq!(hex_of(&TypedValue::u64(5)), "0000000000000005");
    assert_eq!(hex_of(&TypedValue::biguint(5u32)), "05");
}

#[test]
fn test_biguint_zero_is_single_byte() {
    assert_eq!(encode(&TypedValue::biguint(0u32)).unwrap().as_bytes(), &[0x00]);
}

#[test]
fn test_biguint_large_exact() {
    let value = BigUint::from(696969u32) * pow10(18);
    let encoded = encode(&TypedValue::biguint(value.clone())).unwrap();
    assert_eq!(encoded.to_hex(), "9396c3e3fff9dc840000");
    assert_eq!(BigUint::from_bytes_be(encoded.as_bytes()), value);
}

#[test]
fn test_option_encodings() {
    assert!(encode(&TypedValue::none()).unwrap().is_empty());
    assert_eq!(
        encode(&TypedValue::some(TypedValue::Bool(true))).unwrap().as_bytes(),
        &[0x01, 0x01]
    );
}

#[test]
fn test_string_is_verbatim() {
    assert_eq!(encode(&TypedValue::str(".png")).unwrap().as_bytes(), b".png");
    assert!(encode(&TypedValue::str("")).unwrap().is_empty());
}

#[test]
fn test_tuple_concatenates_in_order() {
    let token = TypedValue::str("RIDE-05b1bb");
    let nonce = TypedValue::u64(0);
    let amount = TypedValue::biguint(BigUint::from(5u32) * pow10(18));

    let tuple = TypedValue::Tuple(vec![token.clone(), nonce.clone(), amount.clone()]);
    let expected = format!("{}{}{}", hex_of(&token), hex_of(&nonce), hex_of(&amount));
    assert_eq!(hex_of(&tuple), expected);
    assert_eq!(expected, "524944452d30356231626200000000000000004563918244f40000");

    let reordered = TypedValue::Tuple(vec![nonce, token, amount]);
    assert_ne!(hex_of(&reordered), expected);
}

#[test]
fn test_empty_list() {
    assert!(encode(&TypedValue::List(vec![])).unwrap().is_empty());
}

#[test]
fn test_address_list() {
    let other = Address::new([0x42; 32]);
    let list = TypedValue::List(vec![TypedValue::address(GIVEAWAY_ADDR), other.into()]);
    let encoded = encode(&list).unwrap();
    assert_eq!(encoded.len(), 64);
    assert_eq!(encoded.to_hex(), format!("{}{}", GIVEAWAY_HEX, "42".repeat(32)));
}

#[test]
fn test_heterogeneous_list_rejected() {
    let list = TypedValue::List(vec![TypedValue::u32(1), TypedValue::u64(2)]);
    match encode(&list).unwrap_err() {
        EncodingError::TypeMismatch { position, .. } => assert_eq!(position.indices(), &[1]),
        other => panic!("expected TypeMismatch, got {:?}", other),
    }
}

#[test]
fn test_list_of_options_with_different_widths_rejected() {
    let list = TypedValue::List(vec![
        TypedValue::some(TypedValue::u8(1)),
        TypedValue::some(TypedValue::u32(1)),
    ]);
    match encode(&list).unwrap_err() {
        EncodingError::TypeMismatch { position, expected, found } => {
            assert_eq!(position.indices(), &[1]);
            assert_eq!(expected.to_string(), "Option<u8>");
            assert_eq!(found.to_string(), "Option<u32>");
        }
        other => panic!("expected TypeMismatch, got {:?}", other),
    }
}

#[test]
fn test_list_of_tuples_with_different_arity_rejected() {
    let list = TypedValue::List(vec![
        TypedValue::Tuple(vec![TypedValue::str("A"), TypedValue::u64(0)]),
        TypedValue::Tuple(vec![TypedValue::u8(7)]),
    ]);
    let err = encode(&list).unwrap_err();
    assert!(matches!(err, EncodingError::TypeMismatch { .. }), "got {:?}", err);
    assert_eq!(err.position().indices(), &[1]);
}

#[test]
fn test_list_of_lists_with_different_elements_rejected() {
    let list = TypedValue::List(vec![
        TypedValue::List(vec![TypedValue::u8(1)]),
        TypedValue::List(vec![]),
        TypedValue::List(vec![TypedValue::str("x")]),
    ]);
    let err = encode(&list).unwrap_err();
    assert!(matches!(err, EncodingError::TypeMismatch { .. }), "got {:?}", err);
    assert_eq!(err.position().indices(), &[2]);
}

#[test]
fn test_absent_option_matches_present_sibling() {
    let list = TypedValue::List(vec![
        TypedValue::none(),
        TypedValue::some(TypedValue::u8(5)),
        TypedValue::none(),
    ]);
    assert_eq!(encode(&list).unwrap().to_hex(), "0105");

    // The first present payload fixes the inner shape for later items.
    let list = TypedValue::List(vec![
        TypedValue::none(),
        TypedValue::some(TypedValue::u8(5)),
        TypedValue::some(TypedValue::Bool(true)),
    ]);
    assert_eq!(encode(&list).unwrap_err().position().indices(), &[2]);
}

#[test]
fn test_bad_address_checksum() {
    // Last character altered, so the checksum no longer matches.
    let bad = "erd1085h6wdckzfkvfftq837mwt2a780dv0p8wcjjpauku7at0dlqswszewvjq";
    let err = encode(&TypedValue::address(bad)).unwrap_err();
    assert!(matches!(err, EncodingError::AddressFormat { .. }), "got {:?}", err);
}
