// Abstraction around the drivetrain's PWM motor driver chip
//
// One driver instance is wired to exactly one PWM output and one direction
// pin. The chip enables its output stage whenever a duty cycle is written;
// there is no separate disable, so the only way to stop the motor is a duty
// of 0.0.

use tracing::debug;

use crate::hal::{DigitalOutput, PwmOutput};

/// Rotation direction, from the perspective of looking down the shaft from
/// the motor body toward the rear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// Driver over one PWM output and one direction pin.
///
/// The handles are borrowed: the board layer keeps ownership of the
/// peripherals and they outlive the driver. Direction and duty are
/// independent pieces of state and may be set in any order.
pub struct MotorDriver<'a, P: PwmOutput, D: DigitalOutput> {
    pwm: &'a mut P,
    direction_pin: &'a mut D,
    duty: f32,
    direction: Option<Direction>,
}

impl<'a, P: PwmOutput, D: DigitalOutput> MotorDriver<'a, P, D> {
    /// Create a driver over an already-configured PWM output and a direction
    /// pin. The PWM output must be set up for the chip's required frequency
    /// range (a board calibration constant, not owned by this layer).
    ///
    /// The duty cycle is driven to 0.0 immediately; the direction stays
    /// unset until the first [`set_direction`](Self::set_direction) call.
    pub fn new(pwm: &'a mut P, direction_pin: &'a mut D) -> Self {
        pwm.set_duty_cycle(0.0);
        Self {
            pwm,
            direction_pin,
            duty: 0.0,
            direction: None,
        }
    }

    /// Set the rotation direction.
    ///
    /// Takes effect on the chip's next PWM cycle; the previously commanded
    /// duty stays valid.
    pub fn set_direction(&mut self, direction: Direction) {
        // Clockwise drives the direction pin high; must match the wheel
        // wiring convention.
        self.direction_pin.set_level(direction == Direction::Clockwise);
        self.direction = Some(direction);
        debug!(?direction, "direction pin updated");
    }

    /// Set the PWM duty cycle, a value in [0.0, 1.0].
    ///
    /// Writing a duty also enables the chip's output stage as a hardware
    /// side effect.
    ///
    /// Out-of-range input is a caller bug: debug builds assert, release
    /// builds clamp so the hardware is never left in an undefined state.
    pub fn set_pwm_percentage(&mut self, pct: f32) {
        debug_assert!(
            (0.0..=1.0).contains(&pct),
            "pwm percentage {pct} outside [0, 1]"
        );
        let pct = pct.clamp(0.0, 1.0);
        self.pwm.set_duty_cycle(pct);
        self.duty = pct;
        debug!(pct, "pwm duty updated");
    }

    /// Last commanded duty cycle.
    pub fn duty(&self) -> f32 {
        self.duty
    }

    /// Last commanded direction, `None` until the first set.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }
}

impl<P: PwmOutput, D: DigitalOutput> Drop for MotorDriver<'_, P, D> {
    fn drop(&mut self) {
        // Stop the motor when the driver goes away (safety measure); the
        // peripheral handles themselves belong to the board layer.
        self.pwm.set_duty_cycle(0.0);
    }
}
