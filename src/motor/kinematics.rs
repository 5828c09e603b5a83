// Omniwheel inverse kinematics for the four-wheel base
// Converts body-frame velocities (x, y, omega) to per-wheel surface speeds.

use serde::{Deserialize, Serialize};

use crate::constants::RobotConstants;

/// Surface speed [m/s] at each wheel's contact patch, signed along the
/// wheel's rolling direction (positive = the wheel's counter-clockwise
/// tangent when seen from above).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelSpeeds {
    pub front_left: f32,
    pub front_right: f32,
    pub back_left: f32,
    pub back_right: f32,
}

impl WheelSpeeds {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Speeds as array [front_left, front_right, back_left, back_right]
    pub fn as_array(&self) -> [f32; 4] {
        [
            self.front_left,
            self.front_right,
            self.back_left,
            self.back_right,
        ]
    }
}

/// Convert body-frame velocities to per-wheel surface speeds.
///
/// # Arguments
/// * `x` - Forward velocity in m/s (positive = forward)
/// * `y` - Lateral velocity in m/s (positive = left)
/// * `omega` - Rotational velocity in rad/s (positive = counter-clockwise)
///
/// Wheel mounting angles come from the robot constants, measured from the
/// forward axis with positive angles toward the robot's left; each wheel
/// rolls along the chassis tangent at its mounting point.
pub fn body_to_wheel_speeds(x: f32, y: f32, omega: f32, robot: &RobotConstants) -> WheelSpeeds {
    let chassis_radius = robot.chassis_radius();

    // [front_left, front_right, back_left, back_right]
    let angles_deg = [
        robot.front_wheel_angle_deg,
        -robot.front_wheel_angle_deg,
        robot.back_wheel_angle_deg,
        -robot.back_wheel_angle_deg,
    ];

    let mut speeds = [0.0f32; 4];
    for (i, &angle_deg) in angles_deg.iter().enumerate() {
        let angle_rad = angle_deg.to_radians();
        // Tangent direction at the wheel is (-sin(a), cos(a)); rotation adds
        // the rim speed chassis_radius * omega uniformly
        speeds[i] = -angle_rad.sin() * x + angle_rad.cos() * y + chassis_radius * omega;
    }

    WheelSpeeds {
        front_left: speeds[0],
        front_right: speeds[1],
        back_left: speeds[2],
        back_right: speeds[3],
    }
}
