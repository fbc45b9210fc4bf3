//! Property-based tests using proptest
//!
//! These tests validate wire-format invariants across randomly generated
//! packets and byte strings.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use dhcp6::core::options::Options;
use dhcp6::core::packet::Packet;
use dhcp6::{MessageType, OptionCode};
use proptest::prelude::*;

fn arb_options() -> impl Strategy<Value = Options> {
    prop::collection::vec(
        (any::<u16>(), prop::collection::vec(any::<u8>(), 0..64)),
        0..16,
    )
    .prop_map(|entries| {
        let mut options = Options::new();
        for (code, payload) in entries {
            options.add(OptionCode(code), payload);
        }
        options
    })
}

fn arb_packet() -> impl Strategy<Value = Packet> {
    (any::<u8>(), any::<[u8; 3]>(), arb_options()).prop_map(|(mt, txid, options)| {
        Packet::new(MessageType(mt), &txid, Some(options)).expect("3-byte transaction id")
    })
}

// Property: decode(encode(p)) == p
proptest! {
    #[test]
    fn prop_packet_roundtrip(packet in arb_packet()) {
        let bytes = packet.encode().expect("Encoding should not fail");
        let decoded = Packet::decode(&bytes).expect("Decoding should not fail");

        prop_assert_eq!(decoded, packet);
    }
}

// Property: encoded size is header + sum of (4 + payload) per option
proptest! {
    #[test]
    fn prop_packet_size_accurate(packet in arb_packet()) {
        let expected: usize = 4 + packet
            .options
            .iter()
            .map(|(_, payload)| 4 + payload.len())
            .sum::<usize>();

        prop_assert_eq!(packet.encoded_len(), expected);
        prop_assert_eq!(packet.encode().unwrap().len(), expected);
    }
}

// Property: repeated codes keep every payload, in order
proptest! {
    #[test]
    fn prop_option_multiplicity(
        code in any::<u16>(),
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 1..8)
    ) {
        let mut options = Options::new();
        for payload in &payloads {
            options.add(OptionCode(code), payload.clone());
        }

        let decoded = Options::decode(&options.encode().unwrap()).unwrap();
        let got: Vec<Vec<u8>> = decoded
            .get(OptionCode(code))
            .into_iter()
            .map(|b| b.to_vec())
            .collect();
        prop_assert_eq!(got, payloads);
    }
}

// Property: anything shorter than the header is rejected
proptest! {
    #[test]
    fn prop_short_input_rejected(data in prop::collection::vec(any::<u8>(), 0..4)) {
        let err = Packet::decode(&data).unwrap_err();
        prop_assert!(err.is_format());
    }
}

// Property: cutting a valid packet inside its last option is always an error
proptest! {
    #[test]
    fn prop_truncated_last_option_rejected(
        packet in arb_packet(),
        payload in prop::collection::vec(any::<u8>(), 1..64),
        cut in 1usize..64
    ) {
        let mut packet = packet;
        packet.options.add(OptionCode::VENDOR_OPTS, payload.clone());
        let bytes = packet.encode().unwrap();

        let cut = cut.min(payload.len() + 3);
        let truncated = &bytes[..bytes.len() - cut];
        prop_assert!(Packet::decode(truncated).unwrap_err().is_format());
    }
}

// Property: decoding is deterministic and never panics on arbitrary input
proptest! {
    #[test]
    fn prop_decode_idempotent(data in prop::collection::vec(any::<u8>(), 0..512)) {
        match (Packet::decode(&data), Packet::decode(&data)) {
            (Ok(first), Ok(second)) => {
                prop_assert_eq!(&first, &second);
                // Successful decodes consume every byte
                let encoded = first.encode().unwrap();
                prop_assert_eq!(encoded.as_ref(), &data[..]);
            }
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "decode results differ"),
        }
    }
}
