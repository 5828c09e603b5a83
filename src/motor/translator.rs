// Per-wheel command translation
//
// Reduces a requested wheel actuation (torque, speed, or voltage) to a
// terminal voltage, applies the slip-voltage limit, and commits the
// resulting (direction, duty) pair to the motor driver.

use std::f32::consts::TAU;

use tracing::debug;

use crate::constants::WheelConstants;
use crate::hal::{DigitalOutput, PwmOutput};
use crate::messages::WheelActuation;
use crate::motor::driver::{Direction, MotorDriver};

/// Translates signed wheel actuation requests into drive signals for one
/// wheel's motor driver.
pub struct WheelCommandTranslator<'a, P: PwmOutput, D: DigitalOutput> {
    constants: WheelConstants,
    supply_voltage: f32,
    driver: MotorDriver<'a, P, D>,
}

impl<'a, P: PwmOutput, D: DigitalOutput> WheelCommandTranslator<'a, P, D> {
    /// `supply_voltage` is the board-level bus voltage the duty percentage
    /// is normalized against (see [`crate::config::SUPPLY_VOLTAGE`]).
    pub fn new(
        constants: WheelConstants,
        supply_voltage: f32,
        driver: MotorDriver<'a, P, D>,
    ) -> Self {
        debug_assert!(supply_voltage > 0.0, "supply voltage must be positive");
        Self {
            constants,
            supply_voltage,
            driver,
        }
    }

    /// Apply a wheel actuation request in whichever form the motion
    /// controller produced it.
    pub fn apply(&mut self, actuation: WheelActuation) {
        match actuation {
            WheelActuation::Voltage(volts) => self.apply_voltage(volts),
            WheelActuation::Torque {
                torque_nm,
                wheel_speed_rad_s,
            } => self.apply_torque(torque_nm, wheel_speed_rad_s),
            WheelActuation::Speed(wheel_speed_rad_s) => self.apply_wheel_speed(wheel_speed_rad_s),
        }
    }

    /// Drive the wheel with a signed terminal voltage.
    ///
    /// The magnitude is saturated at the slip limit (always, silently - slip
    /// protection is a hard physical constraint) and then normalized to a
    /// duty by the supply voltage. Positive voltage drives clockwise.
    ///
    /// A request of exactly zero sets duty 0.0 and leaves the direction pin
    /// untouched; toggling the direction of an idle wheel only causes wear.
    pub fn apply_voltage(&mut self, volts: f32) {
        if volts == 0.0 {
            self.driver.set_pwm_percentage(0.0);
            return;
        }

        let limit = self.constants.motor_max_voltage_before_wheel_slip;
        let limited = volts.clamp(-limit, limit);
        if limited != volts {
            debug!(requested = volts, limit, "slip voltage limit engaged");
        }

        let direction = if limited > 0.0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };
        // Clamp absorbs floating-point rounding at the supply boundary
        let duty = (limited.abs() / self.supply_voltage).clamp(0.0, 1.0);

        // Direction is committed before duty so the wheel never drives the
        // wrong way for a PWM cycle.
        self.driver.set_direction(direction);
        self.driver.set_pwm_percentage(duty);
    }

    /// Drive the wheel with a torque request [N·m].
    ///
    /// `wheel_speed_rad_s` is the current wheel speed used for the back-EMF
    /// term; without a measurement pass `None`, which treats the wheel as
    /// stationary (documented open-loop approximation, not a failure).
    pub fn apply_torque(&mut self, torque_nm: f32, wheel_speed_rad_s: Option<f32>) {
        let volts = self.voltage_for_torque(torque_nm, wheel_speed_rad_s.unwrap_or(0.0));
        self.apply_voltage(volts);
    }

    /// Drive the wheel toward a target angular speed [rad/s] by applying the
    /// steady-state voltage the motor settles at when spinning that fast.
    pub fn apply_wheel_speed(&mut self, wheel_speed_rad_s: f32) {
        let volts = self.constants.motor_back_emf_per_rpm * self.motor_rpm(wheel_speed_rad_s);
        self.apply_voltage(volts);
    }

    /// Drive the wheel toward a target surface speed [m/s] at the contact
    /// patch.
    pub fn apply_surface_speed(&mut self, meters_per_second: f32) {
        self.apply_wheel_speed(meters_per_second / self.constants.wheel_radius);
    }

    /// Terminal voltage needed for a torque at a given wheel speed:
    /// V = τ·(A per N·m)·R_phase + (V per rpm)·motor_rpm.
    pub fn voltage_for_torque(&self, torque_nm: f32, wheel_speed_rad_s: f32) -> f32 {
        let current = torque_nm * self.constants.motor_current_per_unit_torque;
        current * self.constants.motor_phase_resistance
            + self.constants.motor_back_emf_per_rpm * self.motor_rpm(wheel_speed_rad_s)
    }

    /// Motor shaft speed [rpm] for a wheel speed [rad/s], through the gear
    /// ratio.
    fn motor_rpm(&self, wheel_speed_rad_s: f32) -> f32 {
        let wheel_rpm = wheel_speed_rad_s * 60.0 / TAU;
        wheel_rpm / self.constants.wheel_rotations_per_motor_rotation
    }

    pub fn constants(&self) -> &WheelConstants {
        &self.constants
    }

    /// Last commanded duty of the underlying driver.
    pub fn duty(&self) -> f32 {
        self.driver.duty()
    }

    /// Last commanded direction of the underlying driver.
    pub fn direction(&self) -> Option<Direction> {
        self.driver.direction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{SimDigitalOutput, SimPwmOutput};

    const SUPPLY: f32 = 24.0;

    fn test_constants() -> WheelConstants {
        WheelConstants {
            motor_current_per_unit_torque: 2.0,
            motor_phase_resistance: 1.0,
            motor_back_emf_per_rpm: 0.01,
            motor_max_voltage_before_wheel_slip: 6.0,
            wheel_radius: 0.03,
            wheel_rotations_per_motor_rotation: 0.5,
        }
    }

    #[test]
    fn torque_request_clamps_at_slip_voltage() {
        let mut pwm = SimPwmOutput::new();
        let mut pin = SimDigitalOutput::new();
        let driver = MotorDriver::new(&mut pwm, &mut pin);
        let mut translator = WheelCommandTranslator::new(test_constants(), SUPPLY, driver);

        // 5 N·m at standstill: I = 10 A, V = 10 V, clamps to the 6 V slip
        // limit, duty = 6/24, clockwise
        translator.apply_torque(5.0, None);
        assert!((translator.duty() - 6.0 / SUPPLY).abs() < 1e-6);
        assert_eq!(translator.direction(), Some(Direction::Clockwise));
    }

    #[test]
    fn over_limit_voltages_all_actuate_the_slip_limit() {
        let mut pwm = SimPwmOutput::new();
        let mut pin = SimDigitalOutput::new();
        let driver = MotorDriver::new(&mut pwm, &mut pin);
        let mut translator = WheelCommandTranslator::new(test_constants(), SUPPLY, driver);

        let slip_duty = 6.0 / SUPPLY;
        for volts in [6.1, 8.0, 12.0, 100.0, f32::MAX] {
            translator.apply_voltage(volts);
            assert!(
                (translator.duty() - slip_duty).abs() < 1e-6,
                "{volts} V should actuate exactly the slip limit"
            );
        }
    }

    #[test]
    fn within_limit_voltage_passes_through() {
        let mut pwm = SimPwmOutput::new();
        let mut pin = SimDigitalOutput::new();
        let driver = MotorDriver::new(&mut pwm, &mut pin);
        let mut translator = WheelCommandTranslator::new(test_constants(), SUPPLY, driver);

        translator.apply_voltage(3.0);
        assert!((translator.duty() - 3.0 / SUPPLY).abs() < 1e-6);
    }

    #[test]
    fn negative_voltage_drives_counter_clockwise() {
        let mut pwm = SimPwmOutput::new();
        let mut pin = SimDigitalOutput::new();
        let driver = MotorDriver::new(&mut pwm, &mut pin);
        let mut translator = WheelCommandTranslator::new(test_constants(), SUPPLY, driver);

        translator.apply_voltage(-4.0);
        assert_eq!(translator.direction(), Some(Direction::CounterClockwise));
        assert!((translator.duty() - 4.0 / SUPPLY).abs() < 1e-6);
    }

    #[test]
    fn zero_torque_preserves_direction() {
        let mut pwm = SimPwmOutput::new();
        let mut pin = SimDigitalOutput::new();
        let driver = MotorDriver::new(&mut pwm, &mut pin);
        let mut translator = WheelCommandTranslator::new(test_constants(), SUPPLY, driver);

        translator.apply_voltage(2.0);
        assert_eq!(translator.direction(), Some(Direction::Clockwise));
        translator.apply_torque(0.0, None);
        assert_eq!(translator.duty(), 0.0);
        assert_eq!(translator.direction(), Some(Direction::Clockwise));
        drop(translator);
        assert_eq!(pin.writes, 1, "zero request must not rewrite the pin");
    }

    #[test]
    fn back_emf_raises_required_voltage_with_speed() {
        let mut pwm = SimPwmOutput::new();
        let mut pin = SimDigitalOutput::new();
        let driver = MotorDriver::new(&mut pwm, &mut pin);
        let translator = WheelCommandTranslator::new(test_constants(), SUPPLY, driver);

        let at_rest = translator.voltage_for_torque(1.0, 0.0);
        let spinning = translator.voltage_for_torque(1.0, 30.0);
        assert!((at_rest - 2.0).abs() < 1e-6, "I·R term: 2 A × 1 Ω");
        // 30 rad/s wheel = 286.48 wheel rpm = 572.96 motor rpm at 0.5 gear
        // ratio, adding 5.7296 V of back-EMF
        assert!((spinning - at_rest - 5.7296).abs() < 1e-3);
    }

    #[test]
    fn speed_request_applies_steady_state_voltage() {
        let mut pwm = SimPwmOutput::new();
        let mut pin = SimDigitalOutput::new();
        let driver = MotorDriver::new(&mut pwm, &mut pin);
        let mut translator = WheelCommandTranslator::new(test_constants(), SUPPLY, driver);

        // 10 rad/s wheel = 95.49 wheel rpm = 190.99 motor rpm -> 1.9099 V
        translator.apply_wheel_speed(10.0);
        assert!((translator.duty() - 1.9099 / SUPPLY).abs() < 1e-4);
        assert_eq!(translator.direction(), Some(Direction::Clockwise));
    }

    #[test]
    fn surface_speed_divides_by_wheel_radius() {
        let mut pwm_a = SimPwmOutput::new();
        let mut pin_a = SimDigitalOutput::new();
        let mut pwm_b = SimPwmOutput::new();
        let mut pin_b = SimDigitalOutput::new();

        let mut by_surface = WheelCommandTranslator::new(
            test_constants(),
            SUPPLY,
            MotorDriver::new(&mut pwm_a, &mut pin_a),
        );
        let mut by_angular = WheelCommandTranslator::new(
            test_constants(),
            SUPPLY,
            MotorDriver::new(&mut pwm_b, &mut pin_b),
        );

        by_surface.apply_surface_speed(0.6);
        by_angular.apply_wheel_speed(0.6 / 0.03);
        assert!((by_surface.duty() - by_angular.duty()).abs() < 1e-6);
    }

    #[test]
    fn duty_never_exceeds_one_even_with_high_slip_limit() {
        let constants = WheelConstants {
            motor_max_voltage_before_wheel_slip: 30.0,
            ..test_constants()
        };
        let mut pwm = SimPwmOutput::new();
        let mut pin = SimDigitalOutput::new();
        let driver = MotorDriver::new(&mut pwm, &mut pin);
        let mut translator = WheelCommandTranslator::new(constants, SUPPLY, driver);

        translator.apply_voltage(28.0);
        assert_eq!(translator.duty(), 1.0);
    }

    #[test]
    fn actuation_enum_routes_to_the_same_paths() {
        let mut pwm_a = SimPwmOutput::new();
        let mut pin_a = SimDigitalOutput::new();
        let mut pwm_b = SimPwmOutput::new();
        let mut pin_b = SimDigitalOutput::new();

        let mut by_enum = WheelCommandTranslator::new(
            test_constants(),
            SUPPLY,
            MotorDriver::new(&mut pwm_a, &mut pin_a),
        );
        let mut by_method = WheelCommandTranslator::new(
            test_constants(),
            SUPPLY,
            MotorDriver::new(&mut pwm_b, &mut pin_b),
        );

        by_enum.apply(WheelActuation::Torque {
            torque_nm: 1.5,
            wheel_speed_rad_s: None,
        });
        by_method.apply_torque(1.5, None);
        assert!((by_enum.duty() - by_method.duty()).abs() < 1e-6);
        assert_eq!(by_enum.direction(), by_method.direction());
    }
}
