#![no_main]

use libfuzzer_sys::fuzz_target;
use memory_packets::{Packet, StringEncoding};

fuzz_target!(|data: &[u8]| {
    // Fuzz packet reads - test for panics, runaway allocations, infinite loops
    let mut packet = Packet::from_slice(data);
    let _ = packet.read_string(false, StringEncoding::SizeEncoded);
    let _ = packet.read_string(false, StringEncoding::NullTerminated);

    packet.set_position(0);
    while packet.read_u32().is_ok() {}
    let _ = packet.read_u16();
    let _ = packet.read_i8();
});
