use crate::cli::args::Cli;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::pipeline::{Pipeline, RunOutcome};
use crate::utils::logging::build_subscriber;

/// Resolve the run configuration: file and environment first, then flags.
pub fn resolve_config(cli: &Cli) -> Result<PipelineConfig> {
    let base_dir = match &cli.base_dir {
        Some(dir) => dir.clone(),
        None => PipelineConfig::executable_dir()?,
    };

    let mut config = PipelineConfig::load(&base_dir, cli.config.as_deref())?;
    if cli.verbose {
        config.verbose = true;
    }
    if cli.quiet {
        config.quiet = true;
    }
    Ok(config)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let subscriber = build_subscriber(&config)?;

    println!("=== ENERGY DASHBOARD ===");
    let outcome = tracing::subscriber::with_default(subscriber, || {
        Pipeline::new(config.clone()).run()
    })?;

    match outcome {
        RunOutcome::NoData(report) => {
            if report.files_found > 0 {
                println!("\n{}", report.generate_summary());
            }
            println!(
                "No data loaded. Please put CSV files inside {}",
                config.data_dir.display()
            );
        }
        RunOutcome::Completed(report) => {
            println!("\n{}", report.generate_summary());
            println!("Done. Check {}", config.output_dir.display());
        }
    }

    Ok(())
}
