// Drivetrain actuation layer for a four-wheel omnidirectional robot base
//
// Provides:
// - Calibrated wheel/robot constants with validation
// - An abstraction over the PWM motor driver chip (direction pin + duty)
// - Per-wheel command translation (torque/speed/voltage -> direction + duty)
//   with slip-voltage limiting
// - Whole-robot motion fan-out with robot-level kinematic limits

pub mod config;
pub mod constants;
pub mod drivetrain;
pub mod hal;
pub mod messages;
pub mod motor;

pub use constants::{ConstantsError, RobotConstants, WheelConstants};
pub use drivetrain::{CycleState, Drivetrain};
pub use messages::{MotionCommand, WheelActuation};
pub use motor::{Direction, MotorDriver, WheelCommandTranslator};
