use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "energy-dashboard")]
#[command(about = "Clean building energy CSV exports and render a consumption dashboard")]
#[command(version)]
pub struct Cli {
    #[arg(
        short,
        long,
        help = "Directory holding data/, output/ and logs/ [default: executable directory]"
    )]
    pub base_dir: Option<PathBuf>,

    #[arg(short, long, help = "Configuration file [default: <base-dir>/energy-dashboard.toml]")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(short, long, help = "Hide the progress bar and console log output")]
    pub quiet: bool,
}
