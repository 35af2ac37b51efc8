//! CarDash wire schema: the ordered field table and its per-field types.
//!
//! The CarDash datagram is the 311-byte "Data Out" format understood by
//! Forza Motorsport / Forza Horizon dashboards: the Sled physics block
//! followed by dashboard and driver-input fields. Field order is the wire
//! order; no field may be reordered, inserted, or dropped without breaking
//! every existing consumer.

use serde::Serialize;

use crate::error::WireError;

/// Total length of one encoded CarDash frame in bytes.
pub const CAR_DASH_FRAME_LEN: usize = 311;

/// Number of fields in the CarDash schema.
pub const CAR_DASH_FIELD_COUNT: usize = 85;

/// Primitive wire type of one schema field. All multi-byte types are
/// little-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// Four-byte boolean flag (see [`FieldType::coerce`] for its quirk).
    Bool32,
    /// Unsigned 32-bit integer.
    UInt32,
    /// IEEE-754 single-precision float.
    Float32,
    /// Two's-complement signed 32-bit integer.
    Int32,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Unsigned byte.
    UInt8,
    /// Two's-complement signed byte.
    Int8,
}

impl FieldType {
    /// Encoded width in bytes.
    pub const fn width(self) -> usize {
        match self {
            FieldType::Bool32 | FieldType::UInt32 | FieldType::Float32 | FieldType::Int32 => 4,
            FieldType::UInt16 => 2,
            FieldType::UInt8 | FieldType::Int8 => 1,
        }
    }

    /// Lowercase tag used in diagnostics and schema listings.
    pub const fn tag(self) -> &'static str {
        match self {
            FieldType::Bool32 => "bool32",
            FieldType::UInt32 => "u32",
            FieldType::Float32 => "f32",
            FieldType::Int32 => "i32",
            FieldType::UInt16 => "u16",
            FieldType::UInt8 => "u8",
            FieldType::Int8 => "i8",
        }
    }
}

/// One named, positionally-ordered, fixed-width element of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Channel name, unique within the schema.
    pub name: &'static str,
    /// Wire type of the encoded value.
    #[serde(rename = "type")]
    pub ty: FieldType,
}

const fn field(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec { name, ty }
}

// Wire order of the CarDash frame. The first 58 fields are the Sled physics
// block (232 bytes); the rest is the dashboard extension.
static CAR_DASH_FIELDS: [FieldSpec; CAR_DASH_FIELD_COUNT] = [
    field("is_race_on", FieldType::Bool32),
    field("timestamp_ms", FieldType::UInt32), // wraps to 0 in long sessions
    field("engine_max_rpm", FieldType::Float32),
    field("engine_idle_rpm", FieldType::Float32),
    field("current_engine_rpm", FieldType::Float32),
    // Car-local space: X = right, Y = up, Z = forward
    field("acceleration_x", FieldType::Float32),
    field("acceleration_y", FieldType::Float32),
    field("acceleration_z", FieldType::Float32),
    field("velocity_x", FieldType::Float32),
    field("velocity_y", FieldType::Float32),
    field("velocity_z", FieldType::Float32),
    // Car-local space: X = pitch, Y = yaw, Z = roll
    field("angular_velocity_x", FieldType::Float32),
    field("angular_velocity_y", FieldType::Float32),
    field("angular_velocity_z", FieldType::Float32),
    field("yaw", FieldType::Float32),
    field("pitch", FieldType::Float32),
    field("roll", FieldType::Float32),
    // Suspension travel normalized: 0.0 = max stretch, 1.0 = max compression
    field("normalized_suspension_travel_front_left", FieldType::Float32),
    field("normalized_suspension_travel_front_right", FieldType::Float32),
    field("normalized_suspension_travel_rear_left", FieldType::Float32),
    field("normalized_suspension_travel_rear_right", FieldType::Float32),
    // Normalized slip ratio: 0 = full grip, |ratio| > 1.0 = loss of grip
    field("tire_slip_ratio_front_left", FieldType::Float32),
    field("tire_slip_ratio_front_right", FieldType::Float32),
    field("tire_slip_ratio_rear_left", FieldType::Float32),
    field("tire_slip_ratio_rear_right", FieldType::Float32),
    // Wheel rotation speed in radians/sec
    field("wheel_rotation_speed_front_left", FieldType::Float32),
    field("wheel_rotation_speed_front_right", FieldType::Float32),
    field("wheel_rotation_speed_rear_left", FieldType::Float32),
    field("wheel_rotation_speed_rear_right", FieldType::Float32),
    // 1 when the wheel is on a rumble strip, 0 when off
    field("wheel_on_rumble_strip_front_left", FieldType::Float32),
    field("wheel_on_rumble_strip_front_right", FieldType::Float32),
    field("wheel_on_rumble_strip_rear_left", FieldType::Float32),
    field("wheel_on_rumble_strip_rear_right", FieldType::Float32),
    // 0 to 1, where 1 is the deepest puddle
    field("wheel_in_puddle_depth_front_left", FieldType::Float32),
    field("wheel_in_puddle_depth_front_right", FieldType::Float32),
    field("wheel_in_puddle_depth_rear_left", FieldType::Float32),
    field("wheel_in_puddle_depth_rear_right", FieldType::Float32),
    // Non-dimensional surface rumble fed to controller force feedback
    field("surface_rumble_front_left", FieldType::Float32),
    field("surface_rumble_front_right", FieldType::Float32),
    field("surface_rumble_rear_left", FieldType::Float32),
    field("surface_rumble_rear_right", FieldType::Float32),
    // Normalized slip angle: 0 = full grip, |angle| > 1.0 = loss of grip
    field("tire_slip_angle_front_left", FieldType::Float32),
    field("tire_slip_angle_front_right", FieldType::Float32),
    field("tire_slip_angle_rear_left", FieldType::Float32),
    field("tire_slip_angle_rear_right", FieldType::Float32),
    // Normalized combined slip: 0 = full grip, |slip| > 1.0 = loss of grip
    field("tire_combined_slip_front_left", FieldType::Float32),
    field("tire_combined_slip_front_right", FieldType::Float32),
    field("tire_combined_slip_rear_left", FieldType::Float32),
    field("tire_combined_slip_rear_right", FieldType::Float32),
    // Actual suspension travel in meters
    field("suspension_travel_meters_front_left", FieldType::Float32),
    field("suspension_travel_meters_front_right", FieldType::Float32),
    field("suspension_travel_meters_rear_left", FieldType::Float32),
    field("suspension_travel_meters_rear_right", FieldType::Float32),
    field("car_ordinal", FieldType::Int32), // unique ID of the car make/model
    field("car_class", FieldType::Int32),   // 0 (D class) through 7 (X class)
    field("car_performance_index", FieldType::Int32), // 100 (slowest) to 999 (fastest)
    field("drivetrain_type", FieldType::Int32), // 0 = FWD, 1 = RWD, 2 = AWD
    field("num_cylinders", FieldType::Int32),
    field("position_x", FieldType::Float32),
    field("position_y", FieldType::Float32),
    field("position_z", FieldType::Float32),
    field("speed", FieldType::Float32),
    field("power", FieldType::Float32),
    field("torque", FieldType::Float32),
    field("tire_temp_front_left", FieldType::Float32),
    field("tire_temp_front_right", FieldType::Float32),
    field("tire_temp_rear_left", FieldType::Float32),
    field("tire_temp_rear_right", FieldType::Float32),
    field("boost", FieldType::Float32),
    field("fuel", FieldType::Float32),
    field("distance", FieldType::Float32),
    field("best_lap_time", FieldType::Float32),
    field("last_lap_time", FieldType::Float32),
    field("current_lap_time", FieldType::Float32),
    field("current_race_time", FieldType::Float32),
    field("lap", FieldType::UInt16),
    field("race_position", FieldType::UInt8),
    field("accelerator", FieldType::UInt8),
    field("brake", FieldType::UInt8),
    field("clutch", FieldType::UInt8),
    field("handbrake", FieldType::UInt8),
    field("gear", FieldType::UInt8),
    field("steer", FieldType::Int8),
    field("normal_driving_line", FieldType::UInt8),
    field("normal_ai_brake_difference", FieldType::UInt8),
];

/// Ordered, immutable field table with its precomputed frame length.
///
/// Constructed once at startup and read-only afterwards; construction fails
/// if the declared widths do not reproduce the mandated frame length, so a
/// `Schema` in hand is always internally consistent.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [FieldSpec],
    total_len: usize,
}

impl Schema {
    /// The canonical CarDash schema.
    ///
    /// # Errors
    /// Returns [`WireError::SchemaIntegrity`] if the field table's widths do
    /// not sum to [`CAR_DASH_FRAME_LEN`]. That means the build itself is
    /// broken and the process must not go on to encode anything.
    pub fn car_dash() -> Result<Self, WireError> {
        Self::validated(&CAR_DASH_FIELDS, CAR_DASH_FRAME_LEN)
    }

    fn validated(fields: &'static [FieldSpec], expected: usize) -> Result<Self, WireError> {
        let total_len: usize = fields.iter().map(|f| f.ty.width()).sum();
        if total_len != expected {
            return Err(WireError::SchemaIntegrity {
                expected,
                actual: total_len,
            });
        }
        Ok(Self { fields, total_len })
    }

    /// Fields in wire order.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Number of fields (equals the value count of a well-formed row).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True for an empty field table. The canonical schema never is.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encoded frame length in bytes, precomputed at construction.
    pub fn total_len(&self) -> usize {
        self.total_len
    }
}
