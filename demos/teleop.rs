// Keyboard teleop against the simulated drivetrain: WASD move, Z/X rotate,
// R/F speed, Q quit
//
// Drives the coordinator directly at ~50 Hz so the limiter and per-wheel
// duties can be watched live without any hardware attached.

use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tracing::info;

use omnibase_drive::config::SUPPLY_VOLTAGE;
use omnibase_drive::constants::{RobotConstants, WheelConstants};
use omnibase_drive::drivetrain::{CycleState, Drivetrain};
use omnibase_drive::hal::{SimDigitalOutput, SimPwmOutput};
use omnibase_drive::messages::MotionCommand;
use omnibase_drive::motor::{MotorDriver, WheelCommandTranslator};

const SPEEDS: [f32; 3] = [0.3, 0.8, 1.5]; // m/s
const THETA_SPEEDS: [f32; 3] = [0.5, 1.5, 3.0]; // rad/s
const INPUT_TIMEOUT_MS: u64 = 100; // Reset velocities after this much time with no input
const TICK_MS: u64 = 20;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    info!("Controls: WASD=move, Z/X=rotate, R/F=speed, Q=quit");
    info!("Speed: LOW");

    enable_raw_mode()?;
    let result = run_teleop();
    disable_raw_mode()?;

    result
}

fn run_teleop() -> Result<(), Box<dyn std::error::Error>> {
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

    let mut speed_idx: usize = 0;

    // Persistent velocity state
    let mut x_vel = 0.0;
    let mut y_vel = 0.0;
    let mut theta_vel = 0.0;
    let mut last_movement_input = Instant::now();
    let mut last_log = Instant::now();

    loop {
        // Poll for key with 20ms timeout (50Hz effective rate)
        if event::poll(Duration::from_millis(TICK_MS))? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                let pressed = kind == KeyEventKind::Press || kind == KeyEventKind::Repeat;

                match code {
                    // Movement - update velocity and refresh timestamp
                    KeyCode::Char('w') if pressed => {
                        x_vel = SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('s') if pressed => {
                        x_vel = -SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('a') if pressed => {
                        y_vel = SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('d') if pressed => {
                        y_vel = -SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }

                    // Rotation
                    KeyCode::Char('z') if pressed => {
                        theta_vel = THETA_SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('x') if pressed => {
                        theta_vel = -THETA_SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }

                    // Speed control
                    KeyCode::Char('r') if pressed => {
                        speed_idx = (speed_idx + 1).min(2);
                        print_speed(speed_idx);
                    }
                    KeyCode::Char('f') if pressed => {
                        speed_idx = speed_idx.saturating_sub(1);
                        print_speed(speed_idx);
                    }

                    // Quit
                    KeyCode::Char('q') | KeyCode::Esc if pressed => break,

                    _ => {}
                }
            }
        }

        // Reset velocities if no movement input for INPUT_TIMEOUT_MS
        if last_movement_input.elapsed() > Duration::from_millis(INPUT_TIMEOUT_MS) {
            x_vel = 0.0;
            y_vel = 0.0;
            theta_vel = 0.0;
        }

        // Always drive at ~50Hz
        let cmd = MotionCommand::new(x_vel, y_vel, theta_vel);
        drivetrain.drive(&cmd, &mut state, TICK_MS as f32 / 1000.0);

        if last_log.elapsed() > Duration::from_millis(250) {
            info!(
                "v = {:?}  duties = {:?}",
                state.velocity(),
                drivetrain.commanded_duties()
            );
            last_log = Instant::now();
        }
    }

    drivetrain.stop();
    Ok(())
}

fn print_speed(idx: usize) {
    let label = ["LOW", "MED", "HIGH"][idx];
    info!("Speed: {}", label);
}
