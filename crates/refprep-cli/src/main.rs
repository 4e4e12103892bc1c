//! # `refprep` Command Line
use clap::Parser;

mod commands;
mod logging;

/// Referring-expression dataset preprocessor.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The subcommand.
    #[command(subcommand)]
    pub command: commands::Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.command.run()
}
