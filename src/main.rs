//! Twister
//!
//! An interactive 3x3x3 twisty cube. Face turns are animated as a slice of
//! nine cubelets rotating about a shared pivot; the cube can be turned in a
//! 3D viewer or driven headlessly from the command line.

mod visualization;

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use twister::animation::{AnimationConfig, Easing};
use twister::controller::{NamedMove, RotationController, RotationRequest};
use twister::facelets::{format_faces, is_solved};

/// Tick length used when turning the cube without a window (60 Hz).
const HEADLESS_FRAME: Duration = Duration::from_micros(16_667);

/// Turns a 3x3x3 cube, in a 3D viewer or headlessly.
#[derive(Parser)]
#[command(name = "twister")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Duration of one quarter turn, in milliseconds.
    #[arg(long, global = true, default_value_t = 250)]
    duration_ms: u64,

    /// Easing curve of the turn animation (linear, cubic, cosine).
    #[arg(long, global = true, default_value_t = Easing::CubicInOut)]
    easing: Easing,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive 3D viewer.
    Display,
    /// Apply named moves in order and print the resulting faces.
    Run {
        /// Moves such as `right-cw` or `top-ccw`.
        #[arg(required = true)]
        moves: Vec<NamedMove>,
    },
    /// List the available moves.
    Moves,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = AnimationConfig {
        duration: Duration::from_millis(cli.duration_ms),
        easing: cli.easing,
    };

    match cli.command {
        Some(Command::Run { moves }) => match run_moves(config, &moves) {
            Ok(output) => print!("{output}"),
            Err(message) => {
                eprintln!("{message}");
                return ExitCode::FAILURE;
            }
        },
        Some(Command::Moves) => print!("{}", format_move_table()),
        Some(Command::Display) | None => {
            println!("Controls: R/L/U/D/F/B turn clockwise, hold Shift for counter-clockwise");
            visualization::display(RotationController::new(config));
        }
    }
    ExitCode::SUCCESS
}

/// Applies each move to completion and returns the final faces.
fn run_moves(config: AnimationConfig, moves: &[NamedMove]) -> Result<String, String> {
    let mut controller = RotationController::new(config);

    for &named in moves {
        if controller.request_move(named) == RotationRequest::Ignored {
            return Err(format!("{named} was dropped by a rotation still in flight"));
        }
        controller.tick_until_idle(HEADLESS_FRAME);
    }

    let mut output = format_faces(controller.store());
    if is_solved(controller.store()) {
        output.push_str("solved\n");
    }
    Ok(output)
}

/// Formats the move table as `name: axis sign direction` lines.
fn format_move_table() -> String {
    NamedMove::ALL
        .iter()
        .map(|named| format!("{named:<11}{}\n", named.command()))
        .collect()
}
