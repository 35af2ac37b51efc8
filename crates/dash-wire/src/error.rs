//! Error types for schema validation, value coercion, and frame encoding.

/// Errors produced while validating the schema or encoding a row.
///
/// All variants are local to one row: the encoder never retries and never
/// emits a partial frame. `SchemaIntegrity` and `FrameLengthInvariant` signal
/// an internally inconsistent build and should abort the process rather than
/// be skipped over.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WireError {
    /// The schema's declared field widths do not sum to the frame length the
    /// wire format mandates. Checked once at construction, never per frame.
    #[error("schema widths sum to {actual} bytes, wire format requires {expected}")]
    SchemaIntegrity {
        /// Frame length the wire format mandates
        expected: usize,
        /// Sum of the declared field widths
        actual: usize,
    },

    /// A row's value count does not match the schema's field count.
    #[error("row has {actual} values, schema defines {expected} fields")]
    RowLengthMismatch {
        /// Number of fields in the schema
        expected: usize,
        /// Number of values in the rejected row
        actual: usize,
    },

    /// A raw value could not be parsed as the field's numeric kind at all.
    #[error("field '{field}' value '{value}' is not a valid {expected}")]
    ValueFormat {
        /// Schema name of the offending field
        field: &'static str,
        /// The raw text that failed to parse
        value: String,
        /// Human name of the numeric kind that was expected
        expected: &'static str,
    },

    /// A raw value parsed as a number but does not fit the field's width.
    #[error("field '{field}' value {value} is out of range [{min}, {max}]")]
    ValueRange {
        /// Schema name of the offending field
        field: &'static str,
        /// The raw text holding the out-of-range number
        value: String,
        /// Minimum representable value for the field type
        min: i64,
        /// Maximum representable value for the field type
        max: i64,
    },

    /// The encoded buffer length disagrees with the schema total. This is a
    /// defect in the schema or coercer, not a recoverable input condition.
    #[error("encoded frame is {actual} bytes, schema total is {expected}")]
    FrameLengthInvariant {
        /// Schema total frame length
        expected: usize,
        /// Length of the buffer actually produced
        actual: usize,
    },
}
