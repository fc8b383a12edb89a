//! CLI command implementations.

pub(crate) mod decorate;
pub(crate) mod toc;

pub(crate) use decorate::DecorateArgs;
pub(crate) use toc::TocArgs;

use std::io::Write;
use std::path::Path;

use unfold_config::Config;
use unfold_disclosure::RegistryOptions;
use unfold_dom::{Document, parse_fragment};
use unfold_outline::OutlineOptions;

use crate::error::CliError;

/// Outline options from the `[outline]` section.
pub(crate) fn outline_options(config: &Config) -> OutlineOptions {
    OutlineOptions {
        min_level: config.outline.min_level,
        max_level: config.outline.max_level,
        number_headings: config.outline.number_headings,
        anchor_prefix: config.outline.anchor_prefix.clone(),
    }
}

/// Registry options from the `[disclosure]` section.
pub(crate) fn registry_options(config: &Config) -> RegistryOptions {
    RegistryOptions {
        collapsible: config.disclosure.collapsible,
        accordion_class: config.disclosure.accordion_class.clone(),
        tabs_class: config.disclosure.tabs_class.clone(),
    }
}

/// Read and parse a page.
pub(crate) fn load_page(path: &Path) -> Result<Document, CliError> {
    let markup = std::fs::read_to_string(path)?;
    let doc = parse_fragment(&markup)?;
    tracing::info!(path = %path.display(), nodes = doc.len(), "Page loaded");
    Ok(doc)
}

/// Write `content` to `path`, or to stdout when no path is given.
pub(crate) fn write_output(path: Option<&Path>, content: &str) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, content)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_options_follow_config() {
        let mut config = Config::default();
        config.outline.min_level = 2;
        config.disclosure.collapsible = false;

        let outline = outline_options(&config);
        let registry = registry_options(&config);

        assert_eq!(outline.min_level, 2);
        assert_eq!(outline.max_level, 6);
        assert_eq!(outline.anchor_prefix, "heading_");
        assert!(!registry.collapsible);
        assert_eq!(registry.accordion_class, "accordion");
    }

    #[test]
    fn test_load_page_and_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.html");
        std::fs::write(&input, "<h1>Title</h1>").unwrap();

        let doc = load_page(&input).unwrap();
        let out = dir.path().join("out.html");
        write_output(Some(&out), &unfold_dom::serialize(&doc)).unwrap();

        assert_eq!(std::fs::read_to_string(out).unwrap(), "<h1>Title</h1>");
    }

    #[test]
    fn test_load_page_reports_malformed_markup() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.html");
        std::fs::write(&input, "<div><p></div>").unwrap();

        assert!(matches!(load_page(&input), Err(CliError::Parse(_))));
    }
}
