// Calibrated wheel and robot constants
//
// These records are populated once at startup from board calibration data and
// are immutable afterwards. They may be shared freely across threads.

use serde::{Deserialize, Serialize};

/// Validation failure for a calibration record.
#[derive(Debug, thiserror::Error)]
pub enum ConstantsError {
    #[error("{field} must be strictly positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be in [0, 360), got {value}")]
    AngleOutOfRange { field: &'static str, value: f32 },
}

fn positive(field: &'static str, value: f32) -> Result<(), ConstantsError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConstantsError::NonPositive { field, value })
    }
}

fn angle(field: &'static str, value: f32) -> Result<(), ConstantsError> {
    if (0.0..360.0).contains(&value) {
        Ok(())
    } else {
        Err(ConstantsError::AngleOutOfRange { field, value })
    }
}

/// Per-wheel motor and gearing constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelConstants {
    /// Current draw per unit torque for the motor attached to this wheel
    /// [A/(N·m)]
    pub motor_current_per_unit_torque: f32,

    /// Phase resistance of the motor attached to this wheel [Ω]
    pub motor_phase_resistance: f32,

    /// Back-EMF per motor rpm [V/rpm]
    pub motor_back_emf_per_rpm: f32,

    /// Largest voltage that can be applied to this motor before the wheel
    /// loses traction [V]
    pub motor_max_voltage_before_wheel_slip: f32,

    /// Wheel radius [m]
    pub wheel_radius: f32,

    /// Gear ratio between motor shaft and wheel shaft
    /// [wheel rotations per motor rotation]
    pub wheel_rotations_per_motor_rotation: f32,
}

impl WheelConstants {
    /// Check that every constant is strictly positive.
    pub fn validated(self) -> Result<Self, ConstantsError> {
        positive(
            "motor_current_per_unit_torque",
            self.motor_current_per_unit_torque,
        )?;
        positive("motor_phase_resistance", self.motor_phase_resistance)?;
        positive("motor_back_emf_per_rpm", self.motor_back_emf_per_rpm)?;
        positive(
            "motor_max_voltage_before_wheel_slip",
            self.motor_max_voltage_before_wheel_slip,
        )?;
        positive("wheel_radius", self.wheel_radius)?;
        positive(
            "wheel_rotations_per_motor_rotation",
            self.wheel_rotations_per_motor_rotation,
        )?;
        Ok(self)
    }
}

impl Default for WheelConstants {
    /// Calibration for the current drive motor/wheel assembly.
    fn default() -> Self {
        Self {
            motor_current_per_unit_torque: 39.2,
            motor_phase_resistance: 1.2,
            motor_back_emf_per_rpm: 0.0021,
            motor_max_voltage_before_wheel_slip: 6.4,
            wheel_radius: 0.0274,
            wheel_rotations_per_motor_rotation: 0.5,
        }
    }
}

/// Whole-robot physical constants.
///
/// The wheel mounting angles are measured from the robot's forward axis,
/// positive toward the robot's left; the layout is left/right symmetrical, so
/// a single front angle and a single back angle describe all four wheels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotConstants {
    /// Mass of the entire robot including batteries [kg]
    pub mass: f32,

    /// Moment of inertia of the entire robot [kg·m²]
    pub moment_of_inertia: f32,

    /// Maximum jerk the robot may safely undergo [m/s³]
    pub jerk_limit: f32,

    /// Angle between each front wheel and the forward axis [deg]
    pub front_wheel_angle_deg: f32,

    /// Angle between each back wheel and the forward axis [deg]
    pub back_wheel_angle_deg: f32,

    /// Width of the flat face on the front of the robot [m]
    pub front_of_robot_width_meters: f32,

    /// Distance from one end of the dribbler to the other [m]
    pub dribbler_width_meters: f32,

    /// Maximum linear speed [m/s]
    pub robot_max_speed_meters_per_second: f32,

    /// Maximum angular speed [rad/s]
    pub robot_max_ang_speed_rad_per_second: f32,

    /// Maximum linear acceleration [m/s²]
    pub robot_max_acceleration_meters_per_second_squared: f32,

    /// Maximum angular acceleration [rad/s²]
    pub robot_max_ang_acceleration_rad_per_second_squared: f32,

    /// Dribbler speed that can be held indefinitely without overheating
    pub indefinite_dribbler_speed: f32,

    /// Dribbler speed that applies maximum force on the ball
    pub max_force_dribbler_speed: f32,
}

impl RobotConstants {
    /// Check magnitude bounds (strictly positive) and angle ranges.
    pub fn validated(self) -> Result<Self, ConstantsError> {
        positive("mass", self.mass)?;
        positive("moment_of_inertia", self.moment_of_inertia)?;
        positive("jerk_limit", self.jerk_limit)?;
        angle("front_wheel_angle_deg", self.front_wheel_angle_deg)?;
        angle("back_wheel_angle_deg", self.back_wheel_angle_deg)?;
        positive(
            "front_of_robot_width_meters",
            self.front_of_robot_width_meters,
        )?;
        positive("dribbler_width_meters", self.dribbler_width_meters)?;
        positive(
            "robot_max_speed_meters_per_second",
            self.robot_max_speed_meters_per_second,
        )?;
        positive(
            "robot_max_ang_speed_rad_per_second",
            self.robot_max_ang_speed_rad_per_second,
        )?;
        positive(
            "robot_max_acceleration_meters_per_second_squared",
            self.robot_max_acceleration_meters_per_second_squared,
        )?;
        positive(
            "robot_max_ang_acceleration_rad_per_second_squared",
            self.robot_max_ang_acceleration_rad_per_second_squared,
        )?;
        positive("indefinite_dribbler_speed", self.indefinite_dribbler_speed)?;
        positive("max_force_dribbler_speed", self.max_force_dribbler_speed)?;
        Ok(self)
    }

    /// Radial distance from the chassis center to each wheel contact point,
    /// derived from the front-face width and the front wheel angle (the front
    /// wheels sit at the edges of the flat front face).
    pub fn chassis_radius(&self) -> f32 {
        0.5 * self.front_of_robot_width_meters / self.front_wheel_angle_deg.to_radians().sin()
    }
}

impl Default for RobotConstants {
    /// Calibration for the current competition chassis.
    fn default() -> Self {
        Self {
            mass: 2.5,
            moment_of_inertia: 0.0205,
            jerk_limit: 40.0,
            front_wheel_angle_deg: 57.95,
            back_wheel_angle_deg: 136.04,
            front_of_robot_width_meters: 0.11,
            dribbler_width_meters: 0.088,
            robot_max_speed_meters_per_second: 2.0,
            robot_max_ang_speed_rad_per_second: 4.0 * std::f32::consts::PI,
            robot_max_acceleration_meters_per_second_squared: 3.0,
            robot_max_ang_acceleration_rad_per_second_squared: 10.0,
            indefinite_dribbler_speed: 0.55,
            max_force_dribbler_speed: 0.75,
        }
    }
}
