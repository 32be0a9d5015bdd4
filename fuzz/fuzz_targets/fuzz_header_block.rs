#![no_main]

use libfuzzer_sys::fuzz_target;
use spdy_frame::parser::spdy::decode_header_block;

fuzz_target!(|data: &[u8]| {
    if let Ok(block) = decode_header_block(data) {
        assert!(block.len() <= usize::from(block.declared_count()));
    }
});
