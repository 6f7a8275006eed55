//! The `variants` subcommand

use anyhow::{Context, Result};
use clap::Args;
use compendium::variants::generate;
use std::path::PathBuf;

/// Arguments for the `variants` subcommand
#[derive(Args)]
#[clap(
    author,
    version,
    about = "Expand a template into one file per variant",
    long_about = "The template folder <ROOT>/<TEMPLATE> should contain a _base.kdl_template with {key} placeholders, and a _variants.json mapping every variant name to its replacements.\n\nAll .kdl files in the template folder are removed before the variants are written."
)]
pub struct VariantsArgs {
    /// The folder containing the template folder
    root: PathBuf,

    /// The name of the template folder
    template: String,
}

/// Expand a template into one file per variant
pub fn variants(args: VariantsArgs) -> Result<()> {
    let dir = args.root.join(&args.template);

    let written = generate(&dir).context(format!(
        "Could not generate the variants of {}",
        dir.to_string_lossy()
    ))?;

    for (name, path) in written {
        println!("{} => {}", name, path.to_string_lossy());
    }

    Ok(())
}
