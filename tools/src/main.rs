use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use compendium_tools::join::{join, JoinArgs};
use compendium_tools::rename::{rename, RenameArgs};
use compendium_tools::split::{split, SplitArgs};
use compendium_tools::tags::{tags, TagsArgs};
use compendium_tools::variants::{variants, VariantsArgs};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Log what is being done to stderr
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Split(SplitArgs),
    Join(JoinArgs),
    Rename(RenameArgs),
    Variants(VariantsArgs),
    Tags(TagsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(wild::args());
    init_logging(cli.verbose);

    match cli.command {
        Command::Split(args) => split(args),
        Command::Join(args) => join(args),
        Command::Rename(args) => rename(args),
        Command::Variants(args) => variants(args),
        Command::Tags(args) => tags(args),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
