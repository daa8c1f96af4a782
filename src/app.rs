//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves run defaults from the environment
//! - runs the overlay pipeline
//! - prints reports/plots and writes exports

use clap::Parser;
use log::info;

use crate::cli::{BatchArgs, Cli, Command, DataArgs, InputArgs, PlotArgs};
use crate::error::{AppError, EXIT_IO};

pub mod batch;
pub mod pipeline;

use pipeline::RunDefaults;

/// Entry point for the `zth` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let defaults = RunDefaults::from_env()?;

    match cli.command {
        Command::Data(args) => handle_data(args, defaults),
        Command::Plot(args) => handle_plot(args, defaults),
        Command::Report(args) => handle_report(args, defaults),
        Command::Tui(args) => handle_tui(args, defaults),
        Command::Batch(args) => handle_batch(args, defaults),
    }
}

/// `RUST_LOG` wins; otherwise `-v` / `-vv` raise the default `warn` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).try_init();
}

fn handle_data(args: DataArgs, defaults: RunDefaults) -> Result<(), AppError> {
    let overlay = pipeline::run_overlay(&args.input, defaults)?;

    match &args.out {
        Some(path) => {
            crate::io::write_payload_json(path, &overlay)?;
            info!("wrote overlay JSON to {}", path.display());
        }
        None => println!("{}", crate::io::payload_json(&overlay)?),
    }

    if let Some(path) = &args.csv {
        crate::io::write_curves_csv(path, &overlay.bundle)?;
        info!("wrote curve CSV to {}", path.display());
    }

    Ok(())
}

fn handle_plot(args: PlotArgs, defaults: RunDefaults) -> Result<(), AppError> {
    let overlay = pipeline::run_overlay(&args.input, defaults)?;

    if args.ascii {
        println!("{}", crate::plot::render_ascii_overlay(&overlay.bundle, args.width, args.height));
        return Ok(());
    }

    let svg = crate::plot::render_overlay_svg(&overlay.bundle, (args.svg_width, args.svg_height))?;
    std::fs::write(&args.out, svg)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write SVG '{}': {e}", args.out.display())))?;
    info!("wrote overlay chart to {}", args.out.display());
    println!("{}", args.out.display());
    Ok(())
}

fn handle_report(args: InputArgs, defaults: RunDefaults) -> Result<(), AppError> {
    let overlay = pipeline::run_overlay(&args, defaults)?;
    println!("{}", crate::report::format_report(&overlay));
    Ok(())
}

fn handle_tui(args: InputArgs, defaults: RunDefaults) -> Result<(), AppError> {
    let inputs = pipeline::resolve_inputs(&args, defaults)?;
    crate::tui::run(inputs)
}

fn handle_batch(args: BatchArgs, defaults: RunDefaults) -> Result<(), AppError> {
    let defaults = defaults.with_overrides(args.order, args.n_grid);
    let entries = batch::run_batch(&args.files, defaults);
    print!("{}", batch::to_json_lines(&entries)?);

    let failed = entries.iter().filter(|e| !e.is_ok()).count();
    info!("batch finished: {} ok, {failed} failed", entries.len() - failed);
    Ok(())
}
