#![no_main]

use dhcp6::Packet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding must never panic; whatever decodes must re-encode byte for byte
    if let Ok(packet) = Packet::decode(data) {
        let encoded = packet.encode().expect("decoded packet re-encodes");
        assert_eq!(encoded.as_ref(), data);
    }
});
