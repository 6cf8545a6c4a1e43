#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use memory_packets::PacketCodec;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    // Fuzz frame splitting with arbitrary stream contents
    let mut codec = PacketCodec::new();
    let mut buf = BytesMut::from(data);
    while let Ok(Some(mut packet)) = codec.decode(&mut buf) {
        let _ = packet.read_cstring();
    }
});
