// Command types supplied by the motion controller, one per control tick

use serde::{Deserialize, Serialize};

/// Whole-robot motion request in the body frame.
///
/// `x_vel` is forward [m/s], `y_vel` is toward the robot's left [m/s],
/// `theta_vel` is counter-clockwise [rad/s].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionCommand {
    pub x_vel: f32,
    pub y_vel: f32,
    pub theta_vel: f32,
}

impl MotionCommand {
    pub fn new(x_vel: f32, y_vel: f32, theta_vel: f32) -> Self {
        Self {
            x_vel,
            y_vel,
            theta_vel,
        }
    }

    /// The stop command.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Requested actuation for a single wheel.
///
/// Whichever form the motion controller produces, the translator reduces it
/// to a terminal voltage before the slip limit and duty mapping apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelActuation {
    /// Terminal voltage [V], signed
    Voltage(f32),
    /// Torque at the wheel [N·m], with the current wheel speed [rad/s] if a
    /// measurement is available (`None` is treated as standstill)
    Torque {
        torque_nm: f32,
        wheel_speed_rad_s: Option<f32>,
    },
    /// Target wheel angular speed [rad/s], signed
    Speed(f32),
}
