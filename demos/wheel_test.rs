// Wheel bench test: careful, step-by-step exercise of one wheel translator
//
// Runs entirely against simulated outputs - no hardware is touched, so it is
// safe to run anywhere. Use it to sanity-check a calibration file before
// flashing it to the robot.
//
// Usage: cargo run --example wheel_test -- [--calibration wheel.json]

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use omnibase_drive::config::SUPPLY_VOLTAGE;
use omnibase_drive::constants::WheelConstants;
use omnibase_drive::hal::{SimDigitalOutput, SimPwmOutput};
use omnibase_drive::motor::{MotorDriver, WheelCommandTranslator};

#[derive(Parser)]
struct Args {
    /// Path to a JSON wheel calibration file (defaults to the built-in set)
    #[arg(long)]
    calibration: Option<PathBuf>,

    /// Supply voltage the duty is normalized against [V]
    #[arg(long, default_value_t = SUPPLY_VOLTAGE)]
    supply_voltage: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Wheel Translator Bench Test (SIMULATED)           ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║  All outputs are simulated - nothing moves, nothing writes   ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    // ========== STEP 1: Load calibration ==========
    println!("Step 1: Loading wheel calibration...");
    let constants = match &args.calibration {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            let constants: WheelConstants = serde_json::from_str(&raw)?;
            println!("  ✓ Loaded {}", path.display());
            constants
        }
        None => {
            println!("  ✓ Using built-in calibration");
            WheelConstants::default()
        }
    };
    let constants = constants.validated()?;
    println!("  ✓ Calibration valid: {:?}", constants);
    println!();

    // ========== STEP 2: Create the wheel ==========
    println!("Step 2: Creating simulated driver and translator...");
    let mut pwm = SimPwmOutput::new();
    let mut pin = SimDigitalOutput::new();
    let driver = MotorDriver::new(&mut pwm, &mut pin);
    let mut wheel = WheelCommandTranslator::new(constants, args.supply_voltage, driver);
    println!(
        "  ✓ Translator ready (supply = {} V, duty = {})",
        args.supply_voltage,
        wheel.duty()
    );
    println!();

    // ========== STEP 3: Voltage sweep ==========
    println!("Step 3: Voltage sweep...");
    for volts in [1.0, 3.0, -3.0, 10.0, -10.0] {
        wheel.apply_voltage(volts);
        println!(
            "  {:>6.1} V  ->  duty {:.4}, direction {:?}",
            volts,
            wheel.duty(),
            wheel.direction()
        );
    }
    println!(
        "  ✓ Over-limit requests saturated at the {} V slip limit",
        constants.motor_max_voltage_before_wheel_slip
    );
    println!();

    // ========== STEP 4: Torque and speed requests ==========
    println!("Step 4: Torque and speed requests...");
    wheel.apply_torque(0.5, None);
    println!(
        "  0.5 N·m at standstill  ->  duty {:.4}, direction {:?}",
        wheel.duty(),
        wheel.direction()
    );
    wheel.apply_torque(0.5, Some(20.0));
    println!(
        "  0.5 N·m at 20 rad/s    ->  duty {:.4} (back-EMF included)",
        wheel.duty()
    );
    wheel.apply_wheel_speed(-15.0);
    println!(
        "  -15 rad/s target       ->  duty {:.4}, direction {:?}",
        wheel.duty(),
        wheel.direction()
    );
    println!();

    // ========== STEP 5: Zero request ==========
    println!("Step 5: Zero request...");
    let direction_before = wheel.direction();
    wheel.apply_torque(0.0, None);
    assert_eq!(wheel.duty(), 0.0);
    assert_eq!(wheel.direction(), direction_before);
    println!("  ✓ Duty is 0.0 and the direction pin was left untouched");
    println!();

    drop(wheel);
    println!(
        "Done. Final simulated pin state: duty = {}, level = {:?}",
        pwm.duty, pin.level
    );
    Ok(())
}
