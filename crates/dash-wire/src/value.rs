//! Coercion of raw textual sample values into strict wire representations.

use std::num::IntErrorKind;

use crate::error::WireError;
use crate::schema::FieldType;

/// One coerced value, tagged with the representation it will encode as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// Boolean flag, already widened to its 4-byte wire form.
    Bool32(u32),
    /// Unsigned 32-bit integer.
    UInt32(u32),
    /// Single-precision float.
    Float32(f32),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Unsigned 16-bit integer.
    UInt16(u16),
    /// Unsigned byte.
    UInt8(u8),
    /// Signed byte.
    Int8(i8),
}

impl FieldValue {
    /// Append this value's fixed-width little-endian encoding to `out`.
    pub fn write_le(&self, out: &mut Vec<u8>) {
        match *self {
            FieldValue::Bool32(v) | FieldValue::UInt32(v) => out.extend_from_slice(&v.to_le_bytes()),
            FieldValue::Float32(v) => out.extend_from_slice(&v.to_le_bytes()),
            FieldValue::Int32(v) => out.extend_from_slice(&v.to_le_bytes()),
            FieldValue::UInt16(v) => out.extend_from_slice(&v.to_le_bytes()),
            FieldValue::UInt8(v) => out.push(v),
            FieldValue::Int8(v) => out.extend_from_slice(&v.to_le_bytes()),
        }
    }

    /// Encoded width in bytes; always equals the originating type's width.
    pub const fn width(&self) -> usize {
        match self {
            FieldValue::Bool32(_)
            | FieldValue::UInt32(_)
            | FieldValue::Float32(_)
            | FieldValue::Int32(_) => 4,
            FieldValue::UInt16(_) => 2,
            FieldValue::UInt8(_) | FieldValue::Int8(_) => 1,
        }
    }
}

impl FieldType {
    /// Coerce one raw textual value into this type's strict representation.
    ///
    /// Surrounding whitespace is tolerated; everything else is strict.
    /// Integer fields reject float-looking text (`"7200.0"` is not a valid
    /// `car_ordinal`), and a value that parses but does not fit the field's
    /// width is a range error, not a format error.
    ///
    /// `Bool32` never inspects the input: Data Out captures carry
    /// `is_race_on = 1` on every in-race sample, and downstream dashboards
    /// key on exactly that constant, so the flag is emitted as the literal 1
    /// rather than re-deriving truthiness from the column.
    ///
    /// # Errors
    /// [`WireError::ValueFormat`] when the text is not a number of the
    /// required kind, [`WireError::ValueRange`] when it is out of the type's
    /// representable range.
    pub fn coerce(self, field: &'static str, raw: &str) -> Result<FieldValue, WireError> {
        let raw = raw.trim();
        match self {
            FieldType::Bool32 => Ok(FieldValue::Bool32(1)),
            FieldType::UInt32 => int_in_range(field, raw, 0, i64::from(u32::MAX))
                .map(|v| FieldValue::UInt32(v as u32)),
            FieldType::Float32 => match raw.parse::<f32>() {
                // Magnitudes beyond f32 range have already saturated to
                // +/-inf here, which is exactly the wire semantics.
                Ok(v) => Ok(FieldValue::Float32(v)),
                Err(_) => Err(WireError::ValueFormat {
                    field,
                    value: raw.to_string(),
                    expected: "float",
                }),
            },
            FieldType::Int32 => {
                int_in_range(field, raw, i64::from(i32::MIN), i64::from(i32::MAX))
                    .map(|v| FieldValue::Int32(v as i32))
            }
            FieldType::UInt16 => int_in_range(field, raw, 0, i64::from(u16::MAX))
                .map(|v| FieldValue::UInt16(v as u16)),
            FieldType::UInt8 => int_in_range(field, raw, 0, i64::from(u8::MAX))
                .map(|v| FieldValue::UInt8(v as u8)),
            FieldType::Int8 => int_in_range(field, raw, i64::from(i8::MIN), i64::from(i8::MAX))
                .map(|v| FieldValue::Int8(v as i8)),
        }
    }
}

/// Parse `raw` as an integer and check it against `[min, max]`.
///
/// Text that overflows even `i64` is still classified as out of range, since
/// it names a number, just not a representable one.
fn int_in_range(
    field: &'static str,
    raw: &str,
    min: i64,
    max: i64,
) -> Result<i64, WireError> {
    let value = raw.parse::<i64>().map_err(|e| {
        if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) {
            WireError::ValueRange {
                field,
                value: raw.to_string(),
                min,
                max,
            }
        } else {
            WireError::ValueFormat {
                field,
                value: raw.to_string(),
                expected: "integer",
            }
        }
    })?;
    if value < min || value > max {
        return Err(WireError::ValueRange {
            field,
            value: raw.to_string(),
            min,
            max,
        });
    }
    Ok(value)
}
