//! Command handling for the `lessonkit` binary.

use anyhow::{Context, Result};
use clap::Subcommand;
use lessonkit_fields::FieldCatalog;
use lessonkit_store::{FsBlobStore, HostSettings, PresetEditor, PresetStore, encode};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the resolved field visibility for a content type
    Show {
        /// Content type key ("default" for the global preset)
        type_key: String,
    },
    /// Hide a field for a content type
    Hide { type_key: String, field_key: String },
    /// Show a previously hidden field for a content type
    Unhide { type_key: String, field_key: String },
    /// Drop the preset of one content type
    ResetType { type_key: String },
    /// Remove all stored presets
    Reset,
    /// Remove field keys the catalog no longer defines
    Prune,
    /// Rewrite stored presets in their canonical shape
    Migrate,
    /// Print the stored preset config
    Dump,
}

/// Opens an editor over the filesystem store described by `settings`.
///
/// `store_dir` overrides the settings' store directory.
pub fn open_editor(
    catalog_path: &Path,
    settings: &HostSettings,
    store_dir: Option<PathBuf>,
) -> Result<PresetEditor<FsBlobStore>> {
    let json = std::fs::read_to_string(catalog_path)
        .with_context(|| format!("Failed to read field catalog {}", catalog_path.display()))?;
    let catalog = FieldCatalog::from_json(&json).context("Failed to parse field catalog")?;
    let catalog = settings.apply_type_defaults(catalog);

    let directory = store_dir.unwrap_or_else(|| settings.store_directory());
    info!("Using preset store at {:?}", directory);
    let store = PresetStore::new(FsBlobStore::new(directory), settings.default_config())
        .with_blob_name(&settings.store.blob);

    Ok(PresetEditor::new(store, catalog))
}

/// Runs one command, writing its report to `out`.
///
/// A rejected toggle is returned as an error carrying the
/// [`lessonkit_presets::Rejection`].
pub fn run(command: &Command, editor: &PresetEditor<FsBlobStore>, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Show { type_key } => print_visibility(editor, type_key, out),
        Command::Hide {
            type_key,
            field_key,
        } => set_visible(editor, type_key, field_key, false, out),
        Command::Unhide {
            type_key,
            field_key,
        } => set_visible(editor, type_key, field_key, true, out),
        Command::ResetType { type_key } => {
            editor.reset_type(type_key);
            writeln!(out, "Reset preset for {type_key}")?;
            Ok(())
        }
        Command::Reset => {
            let config = editor.reset();
            out.write_all(&encode(&config)?)?;
            writeln!(out)?;
            Ok(())
        }
        Command::Prune => {
            let removed = editor.prune();
            writeln!(out, "Removed {removed} unknown field key(s)")?;
            Ok(())
        }
        Command::Migrate => {
            let config = editor.migrate();
            out.write_all(&encode(&config)?)?;
            writeln!(out)?;
            Ok(())
        }
        Command::Dump => {
            out.write_all(&encode(&editor.current())?)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn set_visible(
    editor: &PresetEditor<FsBlobStore>,
    type_key: &str,
    field_key: &str,
    show: bool,
    out: &mut impl Write,
) -> Result<()> {
    editor.toggle(type_key, field_key, show).into_result()?;
    print_visibility(editor, type_key, out)
}

fn print_visibility(
    editor: &PresetEditor<FsBlobStore>,
    type_key: &str,
    out: &mut impl Write,
) -> Result<()> {
    let result = editor.visibility(type_key);
    serde_json::to_writer_pretty(&mut *out, &result)?;
    writeln!(out)?;
    Ok(())
}
