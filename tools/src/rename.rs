//! The `rename` subcommand

use anyhow::{Context, Result};
use clap::Args;
use compendium::marker::rename_path;
use std::path::PathBuf;

/// Arguments for the `rename` subcommand
#[derive(Args)]
#[clap(author, version, about = "Rename all //! markers in a compendium to camelCase", long_about = None)]
pub struct RenameArgs {
    /// The compendium whose markers should be renamed
    compendium: PathBuf,
}

/// Rename all markers in a compendium to camelCase
pub fn rename(args: RenameArgs) -> Result<()> {
    rename_path(&args.compendium).context(format!(
        "Could not rename the markers in {}",
        args.compendium.to_string_lossy()
    ))?;

    println!("Wrote {}", args.compendium.to_string_lossy());

    Ok(())
}
