//! Fuzz target: `FrameReader::push` and command decoding
//!
//! Drives arbitrary byte sequences through the streaming frame reader and
//! decodes every completed frame.  The reader must never panic, never
//! yield a frame longer than its header declared, and must be idle again
//! after every completed frame.
//!
//! cargo fuzz run fuzz_frame_reader

#![no_main]

use libfuzzer_sys::fuzz_target;
use rcsnitch::app::commands::BridgeCommand;
use rcsnitch::protocol::MAX_PAYLOAD;
use rcsnitch::protocol::frame::{Feed, FrameReader};

fuzz_target!(|data: &[u8]| {
    let mut reader = FrameReader::new();
    let mut declared = 0u8;

    for &byte in data {
        match reader.push(byte) {
            Feed::Header(len) => declared = len,
            Feed::Complete(frame) => {
                assert_eq!(frame.len(), usize::from(declared));
                assert!(frame.len() <= MAX_PAYLOAD);
                assert!(reader.is_idle());

                // Decoding must accept or reject, never panic; accepted
                // commands re-encode to a frame the reader accepts again.
                if let Ok(cmd) = BridgeCommand::decode(&frame) {
                    let again = reader.push_all(&cmd.to_wire());
                    assert_eq!(again.len(), 1);
                    assert_eq!(BridgeCommand::decode(&again[0]), Ok(cmd));
                }
            }
            Feed::Discarded | Feed::Buffered => {}
        }
    }
});
