//! lessonkit preset tool
//!
//! Inspects and edits the field-visibility presets of a lessonkit install.
//!
//! Usage:
//!   lessonkit --catalog fields.json show quiz-slide
//!   lessonkit --catalog fields.json hide default internalNotes

use anyhow::Result;
use clap::Parser;
use lessonkit_cli::{Command, open_editor, run};
use lessonkit_store::HostSettings;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "lessonkit")]
#[command(about = "Inspect and edit lessonkit field presets")]
struct Args {
    /// Path to the field catalog (JSON array of field descriptors)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Path to the settings file (defaults to ~/.lessonkit/lessonkit.toml)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Directory holding the preset blob, overriding the settings file
    #[arg(long)]
    store: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let settings = match &args.settings {
        Some(path) => HostSettings::load_from(path),
        None => HostSettings::load(),
    };
    let editor = open_editor(&args.catalog, &settings, args.store)?;

    let stdout = std::io::stdout();
    run(&args.command, &editor, &mut stdout.lock())
}
