//! Fuzz target: `ReportDecoder::push`
//!
//! Arbitrary bytes must never panic the host-side report decoder, and a
//! well-formed report fed after a reset must always decode.
//!
//! cargo fuzz run fuzz_report_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use rcsnitch::protocol::report::{ReportDecoder, encode_report};

fuzz_target!(|data: &[u8]| {
    let mut decoder = ReportDecoder::new();
    let _ = decoder.push_all(data);

    decoder.reset();
    let value = data
        .iter()
        .fold(0u32, |acc, &b| acc.rotate_left(8) ^ u32::from(b));
    assert_eq!(decoder.push_all(&encode_report(value)), vec![value]);
});
