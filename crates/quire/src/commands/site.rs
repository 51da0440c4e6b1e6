//! Shared site loading for all commands.

use std::path::{Path, PathBuf};

use clap::Args;
use quire_config::{CliSettings, Config};
use quire_site::{PageInput, RenderSettings, RenderedPage, Site, SiteBundle};
use rayon::prelude::*;

use crate::error::CliError;
use crate::output::Output;

/// Arguments shared by every command that loads a site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site bundle, JSON or YAML (overrides config).
    #[arg(short, long)]
    bundle: Option<PathBuf>,

    /// Render unresolved page links as placeholders instead of failing.
    #[arg(long)]
    debug: bool,

    /// Prefix for canonical URLs (overrides config).
    #[arg(long, env = "QUIRE_BASE_URL")]
    base_url: Option<String>,
}

impl SiteArgs {
    /// Load configuration with these arguments applied.
    pub(crate) fn load_config(&self, output_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            bundle: self.bundle.clone(),
            output_dir,
            debug: self.debug.then_some(true),
            base_url: self.base_url.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Render options derived from configuration.
pub(crate) fn render_settings(config: &Config) -> RenderSettings {
    RenderSettings {
        default_lang: config.site.default_lang.clone(),
        debug: config.render.debug,
        tag_group: config.render.tag_group.clone(),
        base_url: config.site.base_url.clone(),
    }
}

/// Read a site bundle. `.yaml`/`.yml` files are YAML, anything else JSON.
pub(crate) fn load_bundle(path: &Path) -> Result<SiteBundle, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::Bundle {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let parsed: Result<SiteBundle, String> = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| CliError::Bundle {
        path: path.to_path_buf(),
        message,
    })
}

/// Load the bundle named by `config` and build the site.
pub(crate) fn open_site(config: &Config, output: &Output) -> Result<(Site, Vec<PageInput>), CliError> {
    let path = &config.input_resolved.bundle;
    let bundle = load_bundle(path)?;
    tracing::info!(bundle = %path.display(), pages = bundle.pages.len(), "loaded site bundle");

    let languages = &config.site.languages;
    for page in &bundle.pages {
        if let Some(lang) = &page.lang
            && !languages.is_empty()
            && !languages.contains(lang)
        {
            output.warn(&format!(
                "Page {} uses language `{lang}` not listed in site.languages",
                page.id
            ));
        }
    }

    Ok(Site::from_bundle(bundle, render_settings(config)))
}

/// Render every page in parallel.
///
/// Each failure is reported; any failure fails the whole run.
pub(crate) fn render_all(
    site: &Site,
    pages: &[PageInput],
    output: &Output,
) -> Result<Vec<RenderedPage>, CliError> {
    let results: Vec<_> = pages.par_iter().map(|page| site.render_page(page)).collect();

    let mut rendered = Vec::with_capacity(results.len());
    let mut failed = 0;
    for result in results {
        match result {
            Ok(page) => rendered.push(page),
            Err(err) => {
                output.page_failed(err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::PagesFailed(failed, pages.len()));
    }
    tracing::info!(pages = rendered.len(), "rendered pages");
    Ok(rendered)
}
