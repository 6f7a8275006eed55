//! The `tags` subcommand

use crate::utils::iter_files;
use anyhow::{Context, Result};
use clap::Args;
use compendium::tags::TagList;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the `tags` subcommand
#[derive(Args)]
#[clap(
    author,
    version,
    about = "Tag spells with the classes that can cast them",
    long_about = "The tag list names a class on every line starting with '# ', followed by the spells of that class on lines starting with a tab.\n\nEvery file in the spell folder starting with spell name=\"...\" for a listed spell gets a tag \"<class>\" line per class, right before its rank."
)]
pub struct TagsArgs {
    /// The tag list
    tag_list: PathBuf,

    /// The folder containing the spell files, searched recursively
    spells: PathBuf,
}

/// Tag spells with the classes that can cast them
pub fn tags(args: TagsArgs) -> Result<()> {
    let list = TagList::from_path(&args.tag_list).context(format!(
        "Could not read the tag list at {}",
        args.tag_list.to_string_lossy()
    ))?;

    info!(spells = list.len(), "loaded tag list");

    for entry in iter_files([&args.spells], true, &[]) {
        let path = entry.path();

        if let Some(name) = list.inject_path(path)? {
            println!("{} => {}", name, path.to_string_lossy());
        }
    }

    Ok(())
}
