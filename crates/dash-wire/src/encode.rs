//! Row-to-frame encoding against the wire schema.

use crate::error::WireError;
use crate::schema::Schema;

/// Encode one row of raw textual values into a wire frame.
///
/// Walks the schema in order, coerces the positionally matching raw value,
/// and appends its fixed-width little-endian encoding. The produced buffer is
/// always exactly [`Schema::total_len`] bytes; that is re-checked before the
/// frame is handed back so a broken coercer can never leak a short frame to
/// the transport.
///
/// Encoding is pure and deterministic. Any failure aborts the whole row; no
/// partial frame is ever returned, and the caller decides whether to skip the
/// row or stop the run.
///
/// # Errors
/// [`WireError::RowLengthMismatch`] when the value count does not match the
/// schema, a coercion error for the first offending field otherwise, and
/// [`WireError::FrameLengthInvariant`] if the finished buffer disagrees with
/// the schema total (an internal defect, not an input condition).
pub fn encode_row<S: AsRef<str>>(schema: &Schema, row: &[S]) -> Result<Vec<u8>, WireError> {
    if row.len() != schema.len() {
        return Err(WireError::RowLengthMismatch {
            expected: schema.len(),
            actual: row.len(),
        });
    }

    let mut frame = Vec::with_capacity(schema.total_len());
    for (spec, raw) in schema.fields().iter().zip(row) {
        let value = spec.ty.coerce(spec.name, raw.as_ref())?;
        value.write_le(&mut frame);
    }

    if frame.len() != schema.total_len() {
        return Err(WireError::FrameLengthInvariant {
            expected: schema.total_len(),
            actual: frame.len(),
        });
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CAR_DASH_FIELD_COUNT, CAR_DASH_FRAME_LEN, FieldType};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    /// A row of all-zero columns, the simplest well-formed sample.
    fn zero_row() -> Vec<String> {
        vec!["0".to_string(); CAR_DASH_FIELD_COUNT]
    }

    fn read_f32_le(frame: &[u8], offset: usize) -> Option<f32> {
        frame
            .get(offset..offset + 4)
            .and_then(|b| b.try_into().ok())
            .map(f32::from_le_bytes)
    }

    fn read_u32_le(frame: &[u8], offset: usize) -> Option<u32> {
        frame
            .get(offset..offset + 4)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes)
    }

    #[test]
    fn zero_row_encodes_to_exact_frame_len() -> TestResult {
        let schema = Schema::car_dash()?;
        let frame = encode_row(&schema, &zero_row())?;
        assert_eq!(frame.len(), CAR_DASH_FRAME_LEN);
        Ok(())
    }

    #[test]
    fn encoding_is_deterministic() -> TestResult {
        let schema = Schema::car_dash()?;
        let row = zero_row();
        assert_eq!(encode_row(&schema, &row)?, encode_row(&schema, &row)?);
        Ok(())
    }

    #[test]
    fn race_start_sample_layout() -> TestResult {
        // Race on, 120 s into the session, 7200 rpm redline, 900 rpm idle,
        // 4500 rpm current; everything else zeroed.
        let schema = Schema::car_dash()?;
        let mut row = zero_row();
        for (i, v) in ["1", "120000", "7200.0", "900.0", "4500.0"].iter().enumerate() {
            if let Some(slot) = row.get_mut(i) {
                *slot = (*v).to_string();
            }
        }
        let frame = encode_row(&schema, &row)?;

        assert_eq!(frame.len(), CAR_DASH_FRAME_LEN);
        // The race flag encodes as the fixed constant 1, not input truthiness.
        assert_eq!(read_u32_le(&frame, 0), Some(1));
        assert_eq!(read_u32_le(&frame, 4), Some(120_000));
        assert_eq!(read_f32_le(&frame, 8), Some(7200.0));
        assert_eq!(read_f32_le(&frame, 12), Some(900.0));
        assert_eq!(read_f32_le(&frame, 16), Some(4500.0));
        Ok(())
    }

    #[test]
    fn race_flag_zero_column_still_encodes_one() -> TestResult {
        // Known producer quirk kept for wire compatibility: the is_race_on
        // column is never consulted, so a "0" sample still emits 1.
        let schema = Schema::car_dash()?;
        let frame = encode_row(&schema, &zero_row())?;
        assert_eq!(read_u32_le(&frame, 0), Some(1));
        Ok(())
    }

    #[test]
    fn short_row_is_rejected_without_a_frame() -> TestResult {
        let schema = Schema::car_dash()?;
        let mut row = zero_row();
        row.pop();
        assert_eq!(
            encode_row(&schema, &row),
            Err(WireError::RowLengthMismatch {
                expected: CAR_DASH_FIELD_COUNT,
                actual: CAR_DASH_FIELD_COUNT - 1,
            })
        );
        Ok(())
    }

    #[test]
    fn long_row_is_rejected_without_a_frame() -> TestResult {
        let schema = Schema::car_dash()?;
        let mut row = zero_row();
        row.push("0".to_string());
        assert_eq!(
            encode_row(&schema, &row),
            Err(WireError::RowLengthMismatch {
                expected: CAR_DASH_FIELD_COUNT,
                actual: CAR_DASH_FIELD_COUNT + 1,
            })
        );
        Ok(())
    }

    #[test]
    fn bad_column_aborts_the_whole_row() -> TestResult {
        let schema = Schema::car_dash()?;
        let mut row = zero_row();
        // car_ordinal is the first Int32 field (index 53).
        if let Some(slot) = row.get_mut(53) {
            *slot = "abc".to_string();
        }
        assert!(matches!(
            encode_row(&schema, &row),
            Err(WireError::ValueFormat { field: "car_ordinal", .. })
        ));
        Ok(())
    }

    #[test]
    fn per_field_round_trip_through_declared_offsets() -> TestResult {
        let schema = Schema::car_dash()?;
        let mut row = zero_row();
        // lap = 513 (0x0201), steer = -2: the u16 and i8 fields.
        let lap_index = schema
            .fields()
            .iter()
            .position(|f| f.name == "lap")
            .ok_or("lap missing")?;
        let steer_index = schema
            .fields()
            .iter()
            .position(|f| f.name == "steer")
            .ok_or("steer missing")?;
        if let Some(slot) = row.get_mut(lap_index) {
            *slot = "513".to_string();
        }
        if let Some(slot) = row.get_mut(steer_index) {
            *slot = "-2".to_string();
        }
        let frame = encode_row(&schema, &row)?;

        let lap_offset: usize = schema
            .fields()
            .iter()
            .take(lap_index)
            .map(|f| f.ty.width())
            .sum();
        let steer_offset: usize = schema
            .fields()
            .iter()
            .take(steer_index)
            .map(|f| f.ty.width())
            .sum();
        assert_eq!(lap_offset, 300);
        assert_eq!(steer_offset, 308);
        let lap_bytes = frame.get(lap_offset..lap_offset + 2).ok_or("short frame")?;
        assert_eq!(u16::from_le_bytes(lap_bytes.try_into()?), 513);
        let steer_byte = frame.get(steer_offset).copied().ok_or("short frame")?;
        assert_eq!(steer_byte as i8, -2);
        Ok(())
    }

    #[test]
    fn driver_input_bytes_land_at_dash_offsets() -> TestResult {
        // Offsets a CarDash consumer hard-codes: race_position 302,
        // accelerator 303, brake 304, gear 307.
        let schema = Schema::car_dash()?;
        let mut row = zero_row();
        for (name, v) in [
            ("race_position", "3"),
            ("accelerator", "255"),
            ("brake", "128"),
            ("gear", "4"),
        ] {
            let index = schema
                .fields()
                .iter()
                .position(|f| f.name == name)
                .ok_or("field missing")?;
            if let Some(slot) = row.get_mut(index) {
                *slot = v.to_string();
            }
        }
        let frame = encode_row(&schema, &row)?;
        assert_eq!(frame.get(302).copied(), Some(3));
        assert_eq!(frame.get(303).copied(), Some(255));
        assert_eq!(frame.get(304).copied(), Some(128));
        assert_eq!(frame.get(307).copied(), Some(4));
        Ok(())
    }

    #[test]
    fn float_columns_accept_scientific_notation() -> TestResult {
        let schema = Schema::car_dash()?;
        let mut row = zero_row();
        let speed_index = schema
            .fields()
            .iter()
            .position(|f| f.name == "speed")
            .ok_or("speed missing")?;
        if let Some(slot) = row.get_mut(speed_index) {
            *slot = "8.333e1".to_string();
        }
        let frame = encode_row(&schema, &row)?;
        let offset: usize = schema
            .fields()
            .iter()
            .take(speed_index)
            .map(|f| f.ty.width())
            .sum();
        assert_eq!(read_f32_le(&frame, offset), Some(83.33));
        Ok(())
    }

    #[test]
    fn integer_field_count_sanity() -> TestResult {
        // 68 floats, 5 signed ints, and 12 assorted flag/count/input fields.
        let schema = Schema::car_dash()?;
        let floats = schema
            .fields()
            .iter()
            .filter(|f| f.ty == FieldType::Float32)
            .count();
        assert_eq!(floats, 68);
        Ok(())
    }
}
