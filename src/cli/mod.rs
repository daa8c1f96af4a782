//! Command-line parsing for the Zth overlay tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! numeric code. Every subcommand takes the same request inputs (`InputArgs`).

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::plot::SVG_SIZE;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "zth", version, about = "Foster/Cauer thermal impedance overlay")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` also works.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the overlay and print (or write) its JSON payload.
    Data(DataArgs),
    /// Render the overlay chart to SVG, or to the terminal with `--ascii`.
    Plot(PlotArgs),
    /// Print the stage tables of both networks and the curve comparison.
    Report(InputArgs),
    /// Launch the interactive TUI.
    Tui(InputArgs),
    /// Evaluate several request files in parallel, one JSON line per file.
    Batch(BatchArgs),
}

/// Request inputs shared by all single-request commands.
///
/// Field flags override the corresponding fields of `--request`.
#[derive(Debug, Args, Clone, Default)]
pub struct InputArgs {
    /// Request JSON file with fields tp, zth, foster_r, foster_c, cauer_r, cauer_c, order, n_grid.
    #[arg(long, value_name = "JSON")]
    pub request: Option<PathBuf>,

    /// Measured pulse times in seconds (comma/semicolon/tab/newline separated).
    #[arg(long, value_name = "LIST")]
    pub tp: Option<String>,

    /// Measured Zth values in K/W, paired with `--tp`.
    #[arg(long, value_name = "LIST")]
    pub zth: Option<String>,

    /// Foster stage resistances.
    #[arg(long = "foster-r", value_name = "LIST")]
    pub foster_r: Option<String>,

    /// Foster stage capacitances.
    #[arg(long = "foster-c", value_name = "LIST")]
    pub foster_c: Option<String>,

    /// Cauer ladder resistances, heat source first.
    #[arg(long = "cauer-r", value_name = "LIST")]
    pub cauer_r: Option<String>,

    /// Cauer ladder capacitances, heat source first.
    #[arg(long = "cauer-c", value_name = "LIST")]
    pub cauer_c: Option<String>,

    /// Number of stages to use from each network [env: ZTH_ORDER, default 1].
    #[arg(long, allow_negative_numbers = true)]
    pub order: Option<i64>,

    /// Grid resolution for the model curves [env: ZTH_N_GRID, default 450].
    #[arg(long)]
    pub n_grid: Option<usize>,
}

/// Options for `zth data`.
#[derive(Debug, Args)]
pub struct DataArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the JSON payload to this file instead of stdout.
    #[arg(long, value_name = "JSON")]
    pub out: Option<PathBuf>,

    /// Also write the grid and both curves as CSV.
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,
}

/// Options for `zth plot`.
#[derive(Debug, Args)]
pub struct PlotArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output SVG file.
    #[arg(long, default_value = "zth_overlay.svg")]
    pub out: PathBuf,

    /// SVG width (pixels).
    #[arg(long, default_value_t = SVG_SIZE.0)]
    pub svg_width: u32,

    /// SVG height (pixels).
    #[arg(long, default_value_t = SVG_SIZE.1)]
    pub svg_height: u32,

    /// Print an ASCII plot instead of writing SVG.
    #[arg(long)]
    pub ascii: bool,

    /// ASCII plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for `zth batch`.
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Request JSON files.
    #[arg(required = true, value_name = "JSON")]
    pub files: Vec<PathBuf>,

    /// Order for requests that do not set one.
    #[arg(long, allow_negative_numbers = true)]
    pub order: Option<i64>,

    /// Grid resolution for requests that do not set one.
    #[arg(long)]
    pub n_grid: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_field_flags() {
        let cli = Cli::parse_from([
            "zth", "-vv", "data", "--tp", "1,2", "--zth", "0.1,0.2", "--foster-r", "1", "--order", "-1",
        ]);
        assert_eq!(cli.verbose, 2);
        let Command::Data(args) = cli.command else {
            panic!("expected data subcommand");
        };
        assert_eq!(args.input.tp.as_deref(), Some("1,2"));
        assert_eq!(args.input.foster_r.as_deref(), Some("1"));
        assert_eq!(args.input.order, Some(-1));
        assert_eq!(args.out, None);
    }

    #[test]
    fn batch_requires_files() {
        assert!(Cli::try_parse_from(["zth", "batch"]).is_err());
        let cli = Cli::try_parse_from(["zth", "batch", "a.json", "b.json"]).unwrap();
        let Command::Batch(args) = cli.command else {
            panic!("expected batch subcommand");
        };
        assert_eq!(args.files.len(), 2);
    }
}
