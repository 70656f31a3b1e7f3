//! CLI entry point for the tile layout solver

use clap::Parser;
use tileforge::io::cli::{Cli, CommandRunner};

fn main() -> tileforge::Result<()> {
    let cli = Cli::parse();
    let runner = CommandRunner::new(cli);
    runner.run()
}
