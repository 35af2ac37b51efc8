//! Fuzzes per-type value coercion with arbitrary text.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_value_coerce
#![no_main]
use dashcast_wire::FieldType;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary text — errors are expected, panics are not.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for ty in [
        FieldType::Bool32,
        FieldType::UInt32,
        FieldType::Float32,
        FieldType::Int32,
        FieldType::UInt16,
        FieldType::UInt8,
        FieldType::Int8,
    ] {
        if let Ok(value) = ty.coerce("field", text) {
            let mut out = Vec::new();
            value.write_le(&mut out);
            assert_eq!(out.len(), ty.width());
        }
    }
});
