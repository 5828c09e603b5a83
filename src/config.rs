// Board-level electrical and control-loop configuration

// Control loop frequency
pub const LOOP_HZ: u64 = 200;

// Control cycle period [s], derived from LOOP_HZ
pub const CONTROL_DT: f32 = 1.0 / LOOP_HZ as f32;

// Nominal bus voltage feeding the motor driver chips [V]
// Duty percentages are normalized against this value.
pub const SUPPLY_VOLTAGE: f32 = 24.0;
