// Motor actuation for the omniwheel base
//
// Provides:
// - An abstraction over the PWM motor driver chip (direction pin + duty)
// - Per-wheel command translation with slip-voltage limiting
// - Omniwheel inverse kinematics (body velocity -> wheel speeds)

mod driver;
pub mod kinematics;
mod translator;

pub use driver::{Direction, MotorDriver};
pub use kinematics::{WheelSpeeds, body_to_wheel_speeds};
pub use translator::WheelCommandTranslator;
