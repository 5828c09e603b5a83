// Fixed-rate control loop demo against a simulated drivetrain
//
// Runs a scripted motion profile (accelerate forward, strafe, spin, stop)
// through the drivetrain coordinator at the real control rate, logging the
// limited wheel speeds and duties so the kinematic limits can be observed.
//
// Usage: cargo run --example control_loop

use std::time::Duration;

use tokio::time::interval;
use tracing::info;

use omnibase_drive::config::{CONTROL_DT, LOOP_HZ, SUPPLY_VOLTAGE};
use omnibase_drive::constants::{RobotConstants, WheelConstants};
use omnibase_drive::drivetrain::{CycleState, Drivetrain};
use omnibase_drive::hal::{SimDigitalOutput, SimPwmOutput};
use omnibase_drive::messages::MotionCommand;
use omnibase_drive::motor::{MotorDriver, WheelCommandTranslator};

// (command, duration in ticks)
fn profile() -> Vec<(MotionCommand, u64)> {
    vec![
        (MotionCommand::new(1.0, 0.0, 0.0), 2 * LOOP_HZ),
        (MotionCommand::new(0.0, 0.8, 0.0), 2 * LOOP_HZ),
        (MotionCommand::new(0.0, 0.0, 3.0), 2 * LOOP_HZ),
        (MotionCommand::zero(), 2 * LOOP_HZ),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().unwrap()),
        )
        .init();

    let robot = RobotConstants::default().validated()?;
    let wheel = WheelConstants::default().validated()?;

    let mut pwm_fl = SimPwmOutput::new();
    let mut pwm_fr = SimPwmOutput::new();
    let mut pwm_bl = SimPwmOutput::new();
    let mut pwm_br = SimPwmOutput::new();
    let mut pin_fl = SimDigitalOutput::new();
    let mut pin_fr = SimDigitalOutput::new();
    let mut pin_bl = SimDigitalOutput::new();
    let mut pin_br = SimDigitalOutput::new();

    let mut drivetrain = Drivetrain::new(
        robot,
        WheelCommandTranslator::new(wheel, SUPPLY_VOLTAGE, MotorDriver::new(&mut pwm_fl, &mut pin_fl)),
        WheelCommandTranslator::new(wheel, SUPPLY_VOLTAGE, MotorDriver::new(&mut pwm_fr, &mut pin_fr)),
        WheelCommandTranslator::new(wheel, SUPPLY_VOLTAGE, MotorDriver::new(&mut pwm_bl, &mut pin_bl)),
        WheelCommandTranslator::new(wheel, SUPPLY_VOLTAGE, MotorDriver::new(&mut pwm_br, &mut pin_br)),
    );
    let mut state = CycleState::new();
    let mut tick = interval(Duration::from_millis(1000 / LOOP_HZ));

    info!(
        "Control loop started: {} Hz, supply {} V, simulated outputs",
        LOOP_HZ, SUPPLY_VOLTAGE
    );

    for (cmd, ticks) in profile() {
        info!(?cmd, "profile phase");
        for n in 0..ticks {
            tick.tick().await;
            let wheels = drivetrain.drive(&cmd, &mut state, CONTROL_DT);
            if n % (LOOP_HZ / 4) == 0 {
                info!(
                    "v = {:?}  wheels = [{:+.3} {:+.3} {:+.3} {:+.3}] m/s  duties = {:?}",
                    state.velocity(),
                    wheels.front_left,
                    wheels.front_right,
                    wheels.back_left,
                    wheels.back_right,
                    drivetrain.commanded_duties()
                );
            }
        }
    }

    drivetrain.stop();
    info!("Profile complete, drive cut: duties = {:?}", drivetrain.commanded_duties());
    Ok(())
}
