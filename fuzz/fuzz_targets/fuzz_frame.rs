#![no_main]

use libfuzzer_sys::fuzz_target;
use spdy_frame::parser::spdy::{Frame, FrameParser};

fuzz_target!(|data: &[u8]| {
    let parser = FrameParser::default();
    let mut buf = data;
    while let Ok((frame, consumed)) = parser.parse(buf) {
        if let Frame::SynStream(syn) | Frame::SynReply(syn) = frame {
            let _ = parser.header_block(syn.header_block);
        }
        buf = &buf[consumed..];
    }
});
