// Peripheral output interfaces consumed by the motor driver
//
// The board layer owns the underlying peripherals and injects non-owning
// handles at construction time. Every write is a bounded-time register update
// with no failure path; hardware faults are handled outside this layer.

use tracing::trace;

/// A PWM output channel, already configured for the frequency range the
/// attached driver chip requires.
pub trait PwmOutput {
    /// Write the duty cycle as a fraction in [0.0, 1.0].
    fn set_duty_cycle(&mut self, duty: f32);
}

/// A push-pull digital output pin.
pub trait DigitalOutput {
    /// Drive the pin to the given logic level.
    fn set_level(&mut self, high: bool);
}

/// Simulated PWM output for bench testing without hardware.
///
/// Records the last written duty cycle and the number of writes so tests and
/// demos can read back what was commanded.
#[derive(Debug, Default)]
pub struct SimPwmOutput {
    pub duty: f32,
    pub writes: u32,
}

impl SimPwmOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PwmOutput for SimPwmOutput {
    fn set_duty_cycle(&mut self, duty: f32) {
        trace!(duty, "sim pwm write");
        self.duty = duty;
        self.writes += 1;
    }
}

/// Simulated digital output for bench testing without hardware.
///
/// `level` stays `None` until the first write, matching a real pin whose
/// state is undefined before the driver commits a direction.
#[derive(Debug, Default)]
pub struct SimDigitalOutput {
    pub level: Option<bool>,
    pub writes: u32,
}

impl SimDigitalOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DigitalOutput for SimDigitalOutput {
    fn set_level(&mut self, high: bool) {
        trace!(high, "sim pin write");
        self.level = Some(high);
        self.writes += 1;
    }
}
