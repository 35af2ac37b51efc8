//! Fuzzes the CarDash row encoder with arbitrary capture lines.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_frame_encode
#![no_main]
use dashcast_wire::{Schema, encode_row};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary text — errors are expected, panics are not.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(schema) = Schema::car_dash() else {
        return;
    };
    let row: Vec<&str> = text.split(',').collect();
    if let Ok(frame) = encode_row(&schema, &row) {
        assert_eq!(frame.len(), schema.total_len());
    }
});
