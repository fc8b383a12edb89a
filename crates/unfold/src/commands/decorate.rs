//! `unfold decorate` command implementation.

use std::path::PathBuf;

use clap::Args;
use unfold_config::{CliSettings, Config};
use unfold_disclosure::DisclosureRegistry;
use unfold_dom::{Document, serialize};
use unfold_nav::{AddressBar, NavigationResolver, NavigationTarget};
use unfold_outline::{Outline, index_document};

use super::{load_page, outline_options, registry_options, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the decorate command.
#[derive(Args)]
pub(crate) struct DecorateArgs {
    /// Page markup (XHTML fragment) to decorate.
    input: PathBuf,

    /// Output file for the decorated markup (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fragment to resolve on load (e.g. `#install`).
    #[arg(long)]
    fragment: Option<String>,

    /// Path to configuration file (default: auto-discover unfold.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not prefix headings with their number.
    #[arg(long)]
    no_numbering: bool,

    /// Keep one accordion section open at all times.
    #[arg(long)]
    no_collapsible: bool,

    /// Write the table of contents as JSON to this file.
    #[arg(long)]
    toc_json: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Result of decorating one page.
pub(crate) struct Decorated {
    pub(crate) outline: Outline,
    pub(crate) target: Option<NavigationTarget>,
    pub(crate) markup: String,
}

impl DecorateArgs {
    /// Execute the decorate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading, parsing or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Using configuration");
        }

        let doc = load_page(&self.input)?;
        let decorated = decorate(doc, &config, self.fragment.as_deref());

        if let Some(fragment) = &self.fragment {
            match &decorated.target {
                Some(target) => output.info(&format!(
                    "Resolved {fragment}: opened {} of {} enclosing containers",
                    target.opened.len(),
                    target.chain.len()
                )),
                None => output.warning(&format!("Fragment {fragment} not found")),
            }
        }

        if let Some(path) = &self.toc_json {
            let json = serde_json::to_string_pretty(&decorated.outline.toc_entries())?;
            std::fs::write(path, json)?;
            output.info(&format!("TOC: {}", path.display()));
        }

        write_output(self.output.as_deref(), &decorated.markup)?;
        if let Some(path) = &self.output {
            output.success(&format!(
                "Decorated {} headings into {}",
                decorated.outline.len(),
                path.display()
            ));
        }
        Ok(())
    }

    /// Config overrides from the command line flags.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            number_headings: self.no_numbering.then_some(false),
            collapsible: self.no_collapsible.then_some(false),
        }
    }
}

/// Index headings, register containers, resolve `fragment` and write the
/// resulting state back into the markup.
pub(crate) fn decorate(mut doc: Document, config: &Config, fragment: Option<&str>) -> Decorated {
    let outline = index_document(&mut doc, &outline_options(config));
    let mut registry = DisclosureRegistry::decorate(&doc, &registry_options(config));

    let target = fragment.and_then(|fragment| {
        let resolver = NavigationResolver::new(AddressBar::with_fragment(fragment));
        resolver.attach(&mut registry);
        resolver.load(&doc, &mut registry)
    });

    registry.apply(&mut doc);
    Decorated {
        outline,
        target,
        markup: serialize(&doc),
    }
}
