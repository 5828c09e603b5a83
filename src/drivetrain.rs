// Drivetrain coordinator
//
// Fans a whole-robot motion request out to the four wheel translators.
// Robot-level kinematic limits (max speed, max acceleration, jerk) clamp the
// request before decomposition; the per-wheel slip-voltage limit applies
// second, inside each translator.

use tracing::debug;

use crate::constants::RobotConstants;
use crate::hal::{DigitalOutput, PwmOutput};
use crate::messages::MotionCommand;
use crate::motor::WheelCommandTranslator;
use crate::motor::kinematics::{WheelSpeeds, body_to_wheel_speeds};

/// Per-cycle limiter state, owned by the control-loop component and passed
/// `&mut` into every [`Drivetrain::drive`] call.
///
/// Carries the previously commanded body velocity and the previously applied
/// acceleration (x, y, angular); the acceleration snapshot is what the jerk
/// limiter differentiates against on the next tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleState {
    velocity: [f32; 3],
    acceleration: [f32; 3],
}

impl CycleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body velocity commanded on the last cycle [x m/s, y m/s, rad/s].
    pub fn velocity(&self) -> [f32; 3] {
        self.velocity
    }

    /// Acceleration applied on the last cycle [x m/s², y m/s², rad/s²].
    pub fn acceleration(&self) -> [f32; 3] {
        self.acceleration
    }
}

/// Four wheel translators bound to their mounting positions.
pub struct Drivetrain<'a, P: PwmOutput, D: DigitalOutput> {
    robot: RobotConstants,
    front_left: WheelCommandTranslator<'a, P, D>,
    front_right: WheelCommandTranslator<'a, P, D>,
    back_left: WheelCommandTranslator<'a, P, D>,
    back_right: WheelCommandTranslator<'a, P, D>,
}

impl<'a, P: PwmOutput, D: DigitalOutput> Drivetrain<'a, P, D> {
    pub fn new(
        robot: RobotConstants,
        front_left: WheelCommandTranslator<'a, P, D>,
        front_right: WheelCommandTranslator<'a, P, D>,
        back_left: WheelCommandTranslator<'a, P, D>,
        back_right: WheelCommandTranslator<'a, P, D>,
    ) -> Self {
        Self {
            robot,
            front_left,
            front_right,
            back_left,
            back_right,
        }
    }

    /// Apply one control tick.
    ///
    /// The request is clamped against the robot-level limits using `state`
    /// as the previous cycle's reference, decomposed into per-wheel surface
    /// speeds, and committed to the wheel translators. Returns the limited
    /// wheel speeds that were actuated.
    pub fn drive(
        &mut self,
        cmd: &MotionCommand,
        state: &mut CycleState,
        dt: f32,
    ) -> WheelSpeeds {
        debug_assert!(dt > 0.0, "control period must be positive");
        let dt = dt.max(f32::EPSILON);

        let [x, y, omega] = self.limit_motion(cmd, state, dt);
        let wheels = body_to_wheel_speeds(x, y, omega, &self.robot);
        debug!(x, y, omega, ?wheels, "drive tick");

        self.front_left.apply_surface_speed(wheels.front_left);
        self.front_right.apply_surface_speed(wheels.front_right);
        self.back_left.apply_surface_speed(wheels.back_left);
        self.back_right.apply_surface_speed(wheels.back_right);
        wheels
    }

    /// Cut drive to every wheel immediately, bypassing the limiter.
    /// Directions are left as previously committed.
    pub fn stop(&mut self) {
        self.front_left.apply_voltage(0.0);
        self.front_right.apply_voltage(0.0);
        self.back_left.apply_voltage(0.0);
        self.back_right.apply_voltage(0.0);
    }

    /// Last commanded duty per wheel
    /// [front_left, front_right, back_left, back_right].
    pub fn commanded_duties(&self) -> [f32; 4] {
        [
            self.front_left.duty(),
            self.front_right.duty(),
            self.back_left.duty(),
            self.back_right.duty(),
        ]
    }

    /// Clamp the request to the robot-level limits and advance the cycle
    /// state. Order: speed caps, then acceleration caps, then the jerk cap
    /// on the linear components.
    fn limit_motion(&self, cmd: &MotionCommand, state: &mut CycleState, dt: f32) -> [f32; 3] {
        let robot = &self.robot;
        let mut target = [cmd.x_vel, cmd.y_vel, cmd.theta_vel];

        // Speed caps; linear speed scales proportionally to preserve heading
        let speed = (target[0] * target[0] + target[1] * target[1]).sqrt();
        if speed > robot.robot_max_speed_meters_per_second {
            let scale = robot.robot_max_speed_meters_per_second / speed;
            target[0] *= scale;
            target[1] *= scale;
        }
        target[2] = target[2].clamp(
            -robot.robot_max_ang_speed_rad_per_second,
            robot.robot_max_ang_speed_rad_per_second,
        );

        // Acceleration toward the capped target
        let mut accel = [0.0f32; 3];
        for i in 0..3 {
            accel[i] = (target[i] - state.velocity[i]) / dt;
        }
        let linear_accel = (accel[0] * accel[0] + accel[1] * accel[1]).sqrt();
        if linear_accel > robot.robot_max_acceleration_meters_per_second_squared {
            let scale = robot.robot_max_acceleration_meters_per_second_squared / linear_accel;
            accel[0] *= scale;
            accel[1] *= scale;
        }
        accel[2] = accel[2].clamp(
            -robot.robot_max_ang_acceleration_rad_per_second_squared,
            robot.robot_max_ang_acceleration_rad_per_second_squared,
        );

        // Jerk cap on the linear components, against last cycle's applied
        // acceleration
        let max_delta = robot.jerk_limit * dt;
        for i in 0..2 {
            accel[i] = accel[i].clamp(
                state.acceleration[i] - max_delta,
                state.acceleration[i] + max_delta,
            );
        }

        let mut velocity = [0.0f32; 3];
        for i in 0..3 {
            velocity[i] = state.velocity[i] + accel[i] * dt;
        }
        state.velocity = velocity;
        state.acceleration = accel;
        velocity
    }
}
