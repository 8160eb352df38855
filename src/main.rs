use anyhow::Context;
use clap::Parser;
use energy_dashboard::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).context("energy dashboard run failed")
}
