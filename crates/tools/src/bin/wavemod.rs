//! Wavemod - plot and export keyed carrier waveforms

use anyhow::Result;
use clap::Parser;
use wavemod_tools::{init_logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    cli.execute()
}
