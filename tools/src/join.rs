//! The `join` subcommand

use crate::utils::{iter_files, segment_name};
use anyhow::{Context, Error, Result};
use clap::Args;
use compendium::{split::EXTENSION, Compendium};
use std::{
    collections::BTreeSet,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Arguments for the `join` subcommand
#[derive(Args)]
#[clap(
    author,
    version,
    about = "Join a folder of segment files into a compendium",
    long_about = "Join is the inverse of split. Every .kdl file in the source folder (recursively) is appended to the compendium behind a //! marker named after its path relative to the source folder.\n\nSegments already in the compendium are replaced by files with the same name. A compendium that doesn't exist yet is created."
)]
pub struct JoinArgs {
    /// The compendium to join the segments into
    compendium: PathBuf,

    /// The folder containing the segment files
    source: PathBuf,

    /// Remove the segment files once they're joined
    #[clap(short, long)]
    remove: bool,
}

/// Join a folder of segment files into a compendium
pub fn join(args: JoinArgs) -> Result<()> {
    let mut compendium = match Compendium::from_path(&args.compendium) {
        Ok(compendium) => compendium,
        Err(compendium::split::FromPathError::Read(err)) if err.kind() == ErrorKind::NotFound => {
            Compendium::default()
        }
        Err(err) => {
            return Err(Error::new(err).context(format!(
                "Could not load {}",
                args.compendium.to_string_lossy()
            )))
        }
    };

    // Never join the compendium into itself, however its path was spelled
    let own_path = fs::canonicalize(&args.compendium).ok();

    let mut joined = Vec::new();
    for entry in iter_files([&args.source], true, &[EXTENSION]) {
        let path = entry.path();

        if own_path.is_some() && fs::canonicalize(path).ok() == own_path {
            continue;
        }

        let name = segment_name(&args.source, path).context(format!(
            "{} is not a valid segment name",
            path.to_string_lossy()
        ))?;

        let body = fs::read_to_string(path)
            .context(format!("Could not read {}", path.to_string_lossy()))?;

        if compendium.insert_segment(name.clone(), body).is_some() {
            debug!(name = name.as_str(), "replaced existing segment");
        }

        println!("{} => {}", name, path.to_string_lossy());
        joined.push(path.to_owned());
    }

    let text = compendium.join().context(format!(
        "Could not join {} into a compendium",
        args.source.to_string_lossy()
    ))?;

    fs::write(&args.compendium, text).context(format!(
        "Could not write {}",
        args.compendium.to_string_lossy()
    ))?;

    println!("Wrote {}", args.compendium.to_string_lossy());

    if args.remove {
        remove_segments(&args.source, joined)?;
    }

    Ok(())
}

/// Remove joined segment files, along with the folders they leave empty
fn remove_segments(source: &Path, paths: Vec<PathBuf>) -> Result<()> {
    let mut folders = BTreeSet::new();

    for path in paths {
        fs::remove_file(&path).context(format!("Could not remove {}", path.to_string_lossy()))?;

        folders.extend(
            path.ancestors()
                .skip(1)
                .take_while(|folder| *folder != source)
                .map(Path::to_owned),
        );
    }

    // Nested folders sort after their parents
    for folder in folders.into_iter().rev() {
        if fs::remove_dir(&folder).is_ok() {
            debug!(folder = %folder.display(), "removed empty folder");
        }
    }

    Ok(())
}
