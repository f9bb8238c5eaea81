//! hitomezashi - render hitomezashi stitch patterns
//!
//! Usage:
//!   hitomezashi render <recipe.yaml>   Render a cloth described by a recipe
//!   hitomezashi square                 Render the square preset
//!   hitomezashi triangle               Render the triangle preset
//!   hitomezashi shapes                 List supported shapes
//!   hitomezashi example                Print an example recipe
//!
//! Logging goes to stderr. `RUST_LOG` directives are honoured alongside `-v`.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{RenderArgs, SquareArgs, TriangleArgs};

#[derive(Debug, Parser)]
#[command(name = "hitomezashi", version, about = "Render hitomezashi stitch patterns")]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a cloth from a YAML recipe
    Render(RenderArgs),
    /// Render a single square block
    Square(SquareArgs),
    /// Render a single triangular block
    Triangle(TriangleArgs),
    /// List supported shapes and their axes
    Shapes,
    /// Print an example recipe
    Example,
}

fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    // The binary and the library share the `hitomezashi` target prefix
    let filter = EnvFilter::from_default_env().add_directive(format!("hitomezashi={level}").parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match &cli.command {
        Command::Render(args) => cli::cmd_render(args),
        Command::Square(args) => cli::cmd_square(args),
        Command::Triangle(args) => cli::cmd_triangle(args),
        Command::Shapes => {
            cli::cmd_shapes();
            Ok(())
        }
        Command::Example => {
            cli::cmd_example();
            Ok(())
        }
    }
}
