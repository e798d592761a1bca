#![deny(unsafe_code)]
//! Headless flowfield runner.
//!
//! Subcommands:
//! - `render`: run the simulation N ticks with a scripted pointer, write a PNG
//! - `params`: print every option with its default and description

mod args;
mod error;

use std::ops::Range;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use error::CliError;
use flowfield_core::vector::Vector2;
use flowfield_core::Engine;
use flowfield_raster::{write_png, RasterCanvas};
use flowfield_sim::{Driver, FlowConfig, LogSink, ScriptedInput, Simulation};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flowfield", about = "Flow-field particle simulation")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation for N ticks and write the accumulated canvas as a PNG.
    Render {
        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 640)]
        width: u32,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 480)]
        height: u32,

        /// Number of ticks.
        #[arg(short, long, default_value_t = 600)]
        steps: u64,

        /// PRNG seed for spawn positions, glow radii and the noise field.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Simulation options as a JSON object (see `flowfield params`).
        #[arg(long, default_value = "{}")]
        params: String,

        /// Hover the pointer at X,Y for the whole run.
        #[arg(long, value_parser = args::parse_point)]
        pointer: Option<Vector2>,

        /// Hold the button during ticks A..B (reverses the pointer force).
        #[arg(long, value_parser = args::parse_ticks)]
        press: Option<Range<u64>>,

        /// Toggle an attractor at X,Y on tick TICK. Repeatable.
        #[arg(long = "toggle", value_parser = args::parse_toggle)]
        toggles: Vec<(u64, Vector2)>,
    },
    /// Print every simulation option with its default.
    Params,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params => {
            let schema = FlowConfig::schema();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else if let Some(options) = schema.as_object() {
                for (name, entry) in options {
                    println!(
                        "{name:<20} {:<24} {}",
                        entry["default"].to_string(),
                        entry["description"].as_str().unwrap_or_default()
                    );
                }
            }
        }
        Command::Render {
            width,
            height,
            steps,
            seed,
            output,
            params,
            pointer,
            press,
            toggles,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let sim = Simulation::from_json(f64::from(width), f64::from(height), seed, &params)?;
            let mut canvas = RasterCanvas::new(width, height)?;

            let mut input = ScriptedInput::new();
            if let Some(position) = pointer {
                input = input.hovering_at(position);
            }
            if let Some(ticks) = press {
                input = input.pressed_during(ticks);
            }
            for (tick, position) in toggles {
                input = input.toggle_at(tick, position);
            }

            info!(width, height, steps, seed, "rendering");
            let mut driver = Driver::new(sim, input, LogSink);
            driver.run(&mut canvas, steps);
            write_png(&canvas, &output)?;

            let (sim, _, _) = driver.into_parts();
            let particles = sim.particle_count();
            let attractors = sim.attractors().len();

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "steps": steps,
                    "seed": seed,
                    "particles": particles,
                    "attractors": attractors,
                    "params": sim.params(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {width}x{height}, {steps} ticks, seed {seed}: \
                     {particles} particles, {attractors} attractors -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
