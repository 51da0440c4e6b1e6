//! `quire build` command implementation.

use std::fs;
use std::path::{Component, Path, PathBuf};

use clap::Args;
use quire_config::OutputConfig;
use quire_site::{RenderedPage, SearchDocument};

use super::site::{SiteArgs, open_site, render_all};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Output directory for the generated pages (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config(self.output_dir)?;

        output.field("Bundle", config.input_resolved.bundle.display());
        output.field("Output", config.output_resolved.dir.display());

        let (site, pages) = open_site(&config, &output)?;
        if config.render.debug {
            output.warn("Debug mode: unresolved page links render as placeholders");
        }
        output.step(&format!("Rendering {} pages", pages.len()));

        let rendered = render_all(&site, &pages, &output)?;
        let indexed = write_site(&config.output_resolved, &rendered)?;

        output.done(&format!(
            "Built {} pages ({indexed} searchable) to {}",
            rendered.len(),
            config.output_resolved.dir.display()
        ));
        Ok(())
    }
}

/// Write page documents and the search index. Returns the number of search
/// records written.
pub(crate) fn write_site(out: &OutputConfig, pages: &[RenderedPage]) -> Result<usize, CliError> {
    fs::create_dir_all(&out.dir)?;

    for page in pages {
        let path = page_path(&out.dir, &page.url)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &page.html)?;
        tracing::debug!(page = %page.id, path = %path.display(), "wrote page");
    }

    let search: Vec<&SearchDocument> = pages.iter().filter_map(|page| page.search.as_ref()).collect();
    let json = serde_json::to_string(&search)?;
    fs::write(out.search_index_path(), json)?;

    Ok(search.len())
}

/// `{dir}/{url}/index.html`, refusing URLs that leave `dir`.
fn page_path(dir: &Path, url: &str) -> Result<PathBuf, CliError> {
    let relative = Path::new(url.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(CliError::Validation(format!("invalid page URL `{url}`")));
    }
    Ok(dir.join(relative).join("index.html"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(id: &str, url: &str, searchable: bool) -> RenderedPage {
        RenderedPage {
            id: id.to_owned(),
            lang: "en".to_owned(),
            url: url.to_owned(),
            title: id.to_owned(),
            html: format!("<!DOCTYPE html><p>{id}</p>"),
            search: searchable.then(|| SearchDocument {
                lang: "en".to_owned(),
                text: id.to_owned(),
                path: url.to_owned(),
                title: id.to_owned(),
                keywords: Vec::new(),
            }),
        }
    }

    #[test]
    fn test_page_path() {
        let dir = Path::new("/out");
        assert_eq!(page_path(dir, "/").unwrap(), PathBuf::from("/out/index.html"));
        assert_eq!(
            page_path(dir, "/es/h1/tags").unwrap(),
            PathBuf::from("/out/es/h1/tags/index.html")
        );
        assert!(page_path(dir, "/h1/../../etc").is_err());
    }

    #[test]
    fn test_write_site() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputConfig {
            dir: dir.path().join("dist"),
            search_index: "search-index.json".to_owned(),
        };
        let pages = vec![page("/h1", "/h1", true), page("/h1/hidden", "/h1/hidden", false)];

        let indexed = write_site(&out, &pages).unwrap();
        assert_eq!(indexed, 1);

        let html = fs::read_to_string(out.dir.join("h1/index.html")).unwrap();
        assert_eq!(html, "<!DOCTYPE html><p>/h1</p>");
        assert!(out.dir.join("h1/hidden/index.html").exists());

        let index: Vec<SearchDocument> =
            serde_json::from_str(&fs::read_to_string(out.search_index_path()).unwrap()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].path, "/h1");
    }
}
