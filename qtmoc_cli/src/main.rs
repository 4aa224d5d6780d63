//! qtmoc CLI
//!
//! Scans a directory of Go sources for types that declare Qt signals and
//! slots through struct tags, and generates the C++ and cgo glue for them.

mod args;

use clap::Parser;
use qtmoc_driver::Driver;
use tracing::info;

use args::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = args.to_config()?;
    let driver = Driver::new(config);

    info!("Target directory: {}", driver.config().target_dir().display());

    if args.dry_run {
        let model = driver.build_model()?;
        let classes: Vec<_> = model.classes().collect();
        println!("{}", serde_json::to_string_pretty(&classes)?);
        info!(
            "{} classes, {} pruned, {} unmapped types",
            classes.len(),
            model.resolution.pruned.len(),
            model.unmapped
        );
        return Ok(());
    }

    let report = driver.generate().inspect_err(|err| {
        tracing::error!("Generation failed ({:?}): {}", err.kind(), err);
        if let Some(output) = err.diagnostics() {
            eprintln!("{output}");
        }
    })?;

    for path in &report.written {
        println!("{}", path.display());
    }
    Ok(())
}
