use std::path::PathBuf;

use clap::Parser;
use qtmoc_common::MocConfig;

/// Generate Qt meta-object glue for Go types that declare signals and slots
#[derive(Parser, Debug)]
#[command(name = "qtmoc")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the Go sources (defaults to the current directory)
    pub target_dir: Option<PathBuf>,

    /// Path to the moc binary, overriding platform detection
    #[arg(long = "moc", value_name = "PATH")]
    pub moc_path: Option<PathBuf>,

    /// Directory of additional library modules (*.json)
    #[arg(short = 'l', long, value_name = "DIR")]
    pub library_dir: Option<PathBuf>,

    /// pkg-config package for the cgo preamble; repeatable
    #[arg(long = "pkg-config", value_name = "PACKAGE")]
    pub pkg_config: Vec<String>,

    /// Write the artifacts but do not run moc
    #[arg(long, default_value_t = false)]
    pub skip_moc: bool,

    /// Do not run go fmt over the generated Go file
    #[arg(long, default_value_t = false)]
    pub skip_fmt: bool,

    /// Print the class model and write nothing
    #[arg(short = 'n', long, default_value_t = false)]
    pub dry_run: bool,
}

impl Args {
    /// Convert command-line arguments into a generation config
    pub fn to_config(&self) -> std::io::Result<MocConfig> {
        let target = match &self.target_dir {
            Some(dir) => std::path::absolute(dir)?,
            None => std::env::current_dir()?,
        };

        let mut config = MocConfig::new()
            .with_target_dir(target)
            .with_skip_moc(self.skip_moc)
            .with_skip_fmt(self.skip_fmt)
            .with_dry_run(self.dry_run);
        if let Some(moc) = &self.moc_path {
            config = config.with_moc_path(moc);
        }
        if let Some(dir) = &self.library_dir {
            config = config.with_library_dir(std::path::absolute(dir)?);
        }
        for package in &self.pkg_config {
            config = config.with_pkg_config(package);
        }
        Ok(config)
    }
}
