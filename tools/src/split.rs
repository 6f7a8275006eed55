//! The `split` subcommand

use anyhow::{Context, Result};
use clap::Args;
use compendium::split_path;
use std::path::PathBuf;

/// Arguments for the `split` subcommand
#[derive(Args)]
#[clap(
    author,
    version,
    about = "Split a compendium into one file per //! marker",
    long_about = "Split goes through a compendium line by line. Every line starting with //! marks the start of a segment, named by the rest of that line.\n\nEach segment is written to <DESTINATION>/<name>.kdl (folders in the name are created), after which the compendium is overwritten with whatever came before the first marker."
)]
pub struct SplitArgs {
    /// The compendium to split
    compendium: PathBuf,

    /// The folder the segment files are written to
    destination: PathBuf,
}

/// Split a compendium into one file per marker
pub fn split(args: SplitArgs) -> Result<()> {
    let split = split_path(&args.compendium, &args.destination).context(format!(
        "Could not split {}",
        args.compendium.to_string_lossy()
    ))?;

    for (name, path) in &split.segments {
        println!("{} => {}", name, path.to_string_lossy());
    }

    println!(
        "Left {} bytes in {}",
        split.remainder,
        args.compendium.to_string_lossy()
    );

    Ok(())
}
