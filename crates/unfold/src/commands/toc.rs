//! `unfold toc` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use unfold_config::Config;
use unfold_outline::{Outline, index_document};

use super::{load_page, outline_options, write_output};
use crate::error::CliError;

/// Table of contents output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum TocFormat {
    /// Nested `<ul class="toc">` lists.
    #[default]
    Html,
    /// Flat list of entries.
    Json,
}

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Page markup (XHTML fragment) to index.
    input: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = TocFormat::Html)]
    format: TocFormat,

    /// Path to configuration file (default: auto-discover unfold.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl TocArgs {
    /// Execute the toc command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading or parsing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let mut doc = load_page(&self.input)?;
        let outline = index_document(&mut doc, &outline_options(&config));
        write_output(None, &render(&outline, self.format)?)
    }
}

/// Render the outline in the requested format.
pub(crate) fn render(outline: &Outline, format: TocFormat) -> Result<String, CliError> {
    Ok(match format {
        TocFormat::Html => outline.render_toc_html(),
        TocFormat::Json => serde_json::to_string_pretty(&outline.toc_entries())?,
    })
}
