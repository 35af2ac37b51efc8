//! CarDash telemetry wire format: schema, value coercion, frame encoding.
//!
//! The CarDash datagram is the fixed 311-byte little-endian frame that
//! Forza-style "Data Out" producers emit once per simulation tick and that
//! downstream dashboards decode by hard-coded offset. This crate is the
//! producer half of that contract:
//!
//! - [`Schema`] — the ordered, immutable 85-field table, validated at
//!   construction so its widths provably sum to [`CAR_DASH_FRAME_LEN`].
//! - [`FieldType`] / [`FieldValue`] — per-field coercion from raw textual
//!   sample values into strict fixed-width representations.
//! - [`encode_row`] — one row in, one exactly-311-byte frame out.
//!
//! Encoding is synchronous, deterministic, and allocation-light; transport
//! and pacing live in `dashcast-replay`.
#![deny(static_mut_refs)]

mod encode;
mod error;
mod schema;
mod value;

pub use encode::encode_row;
pub use error::WireError;
pub use schema::{CAR_DASH_FIELD_COUNT, CAR_DASH_FRAME_LEN, FieldSpec, FieldType, Schema};
pub use value::FieldValue;
