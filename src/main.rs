mod logging;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use servo_controller::{
    encode_blink_base_number, encode_configure_servo, encode_set_base_number, encode_set_neutral,
    encode_set_position, encode_set_position_7bit, encode_set_position_absolute, encode_set_speed,
    open_serial, ByteSink, Controller, Frame, RecordingSink, ServoConfig, ServoError,
    DEFAULT_ABSOLUTE_POSITION, DEFAULT_BASE_NUMBER, DEFAULT_BAUD_RATE, DEFAULT_NEUTRAL,
    DEFAULT_POSITION, DEFAULT_RANGE, DEFAULT_SPEED,
};
use tracing::info;

use crate::logging::LoggingArgs;

const TRANSPORT_ERROR: u8 = 3;
const DATA_INVALID: u8 = 60;

#[derive(Parser, Debug)]
#[command(name = "servo_controller", version, about = "Pololu serial servo controller CLI")]
struct Cli {
    /// Serial port the controller's RX line is wired to.
    #[arg(long, env = "SERVO_PORT", required_unless_present = "dry_run")]
    port: Option<String>,

    /// Link speed. The controller misbehaves above 40000.
    #[arg(long, env = "SERVO_BAUD", default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Print the frame instead of opening a port.
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    logging: LoggingArgs,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Action {
    /// Set movement speed (0 = unlimited, 1 slowest, 127 fastest).
    Speed {
        servo: u8,
        #[arg(default_value_t = DEFAULT_SPEED)]
        speed: u8,
    },
    /// Move to an 8-bit position relative to neutral.
    Position {
        servo: u8,
        #[arg(default_value_t = DEFAULT_POSITION)]
        position: u8,
    },
    /// Move to a 7-bit position relative to neutral.
    Position7 { servo: u8, position: u8 },
    /// Move to an absolute pulse width (500-5500).
    Absolute {
        servo: u8,
        #[arg(default_value_t = DEFAULT_ABSOLUTE_POSITION)]
        position: u16,
    },
    /// Store a neutral pulse width (500-5500).
    Neutral {
        servo: u8,
        #[arg(default_value_t = DEFAULT_NEUTRAL)]
        position: u16,
    },
    /// Turn a servo on or off, set its direction and range.
    Configure {
        servo: u8,
        #[arg(long)]
        disable: bool,
        #[arg(long)]
        reverse: bool,
        #[arg(long, default_value_t = DEFAULT_RANGE)]
        range: u8,
    },
    /// Reprogram the servo-number base. Attach a single controller and
    /// power-cycle it afterwards.
    SetBase {
        #[arg(default_value_t = DEFAULT_BASE_NUMBER)]
        base: u8,
    },
    /// Blink the base number on every attached controller.
    Blink,
}

impl Action {
    fn frame(&self) -> Result<Frame, ServoError> {
        match *self {
            Action::Speed { servo, speed } => encode_set_speed(servo, speed),
            Action::Position { servo, position } => encode_set_position(servo, position),
            Action::Position7 { servo, position } => encode_set_position_7bit(servo, position),
            Action::Absolute { servo, position } => encode_set_position_absolute(servo, position),
            Action::Neutral { servo, position } => encode_set_neutral(servo, position),
            Action::Configure {
                servo,
                disable,
                reverse,
                range,
            } => encode_configure_servo(
                servo,
                ServoConfig {
                    enabled: !disable,
                    forward_direction: !reverse,
                    range,
                },
            ),
            Action::SetBase { base } => encode_set_base_number(base),
            Action::Blink => Ok(encode_blink_base_number()),
        }
    }
}

fn exit_code(err: &ServoError) -> u8 {
    if err.is_validation() {
        DATA_INVALID
    } else {
        TRANSPORT_ERROR
    }
}

fn send<T: ByteSink + ?Sized>(
    transport: &mut T,
    baud: u32,
    frame: Frame,
) -> Result<(), ServoError> {
    let mut controller = Controller::with_baud_rate(transport, baud)?;
    controller.send_frame(frame)
}

fn run(cli: &Cli) -> Result<Frame, ServoError> {
    let frame = cli.action.frame()?;
    if cli.dry_run {
        send(&mut RecordingSink::new(), cli.baud, frame)?;
        return Ok(frame);
    }

    // clap guarantees a port when not in dry-run mode.
    let port_name = cli.port.as_deref().unwrap_or_default();
    let mut port = open_serial(port_name, cli.baud).map_err(std::io::Error::from)?;
    send(&mut port, cli.baud, frame)?;
    info!(port = port_name, action = ?cli.action, "command sent");
    Ok(frame)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.logging.init();

    match run(&cli) {
        Ok(frame) => {
            println!("{frame}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err} (status {})", err.code());
            ExitCode::from(exit_code(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;

    #[test]
    fn parses_absolute_with_default_position() {
        let cli = Cli::try_parse_from(["servo_controller", "--dry-run", "absolute", "4"])
            .expect("absolute args should parse");
        assert_eq!(
            cli.action,
            Action::Absolute {
                servo: 4,
                position: 500
            }
        );
        assert_eq!(cli.baud, 40_000);
    }

    #[test]
    fn requires_port_without_dry_run() {
        let err = Cli::try_parse_from(["servo_controller", "blink"])
            .expect_err("missing port should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parses_configure_flags() {
        let cli = Cli::try_parse_from([
            "servo_controller",
            "--port",
            "/dev/ttyUSB0",
            "configure",
            "10",
            "--reverse",
            "--range",
            "20",
        ])
        .expect("configure args should parse");
        assert_eq!(cli.port.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(
            cli.action,
            Action::Configure {
                servo: 10,
                disable: false,
                reverse: true,
                range: 20
            }
        );
    }

    #[test]
    fn dry_run_prints_the_sent_frame() {
        let cli = Cli::try_parse_from(["servo_controller", "--dry-run", "speed", "5"])
            .expect("speed args should parse");
        let frame = run(&cli).expect("dry run should succeed");
        assert_eq!(frame.to_string(), "80 01 01 05 00");
    }

    #[test]
    fn configure_action_packs_flags() {
        let frame = Action::Configure {
            servo: 10,
            disable: true,
            reverse: true,
            range: 15,
        }
        .frame()
        .unwrap();
        assert_eq!(frame.as_bytes(), &[0x80, 0x01, 0x00, 0x0a, 0x2f]);
    }

    #[test]
    fn invalid_range_maps_to_data_invalid() {
        let err = Action::Configure {
            servo: 10,
            disable: false,
            reverse: true,
            range: 40,
        }
        .frame()
        .unwrap_err();
        assert_eq!(exit_code(&err), DATA_INVALID);
    }

    #[test]
    fn parses_log_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "servo_controller",
            "--dry-run",
            "blink",
            "--log-level",
            "trace",
            "--log-format",
            "json",
        ])
        .expect("global log flags should parse");
        assert_eq!(cli.action, Action::Blink);
        assert!(matches!(cli.logging.level, LogLevel::Trace));
    }
}
