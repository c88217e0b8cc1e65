//! CLI entry point for the tile assembly solver

use clap::Parser;
use tilestitch::io::cli::{Cli, FileProcessor};
use tilestitch::io::logging::init_logging;

#[allow(clippy::print_stdout)]
fn main() -> tilestitch::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level())?;

    let mut processor = FileProcessor::new(cli);
    let reports = processor.process()?;

    let prefix_names = reports.len() > 1;
    for report in &reports {
        if prefix_names {
            println!("{}:", report.path.display());
        }
        println!("{}", report.corner_product);
        println!("{}", report.roughness);
    }
    Ok(())
}
