//! `quire render` command implementation.

use std::io::Write;

use clap::Args;

use super::site::{SiteArgs, open_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Page id, e.g. `/h1/tags/bitmap`.
    id: String,

    /// Page language (default: site default language).
    #[arg(short, long)]
    lang: Option<String>,

    /// Print the search record as JSON instead of the HTML document.
    #[arg(long)]
    search: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config(None)?;
        let (site, pages) = open_site(&config, &output)?;

        let default_lang = &config.site.default_lang;
        let wanted = self.lang.as_deref().unwrap_or(default_lang);
        let page = pages
            .iter()
            .find(|page| {
                page.id == self.id && page.lang.as_deref().unwrap_or(default_lang) == wanted
            })
            .ok_or_else(|| {
                CliError::Validation(format!("no page `{}` in language `{wanted}`", self.id))
            })?;

        let rendered = site.render_page(page)?;
        let body = if self.search {
            match &rendered.search {
                Some(doc) => serde_json::to_string_pretty(doc)?,
                None => {
                    output.warn(&format!("Page {} is excluded from search", rendered.id));
                    return Ok(());
                }
            }
        } else {
            rendered.html
        };

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(body.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
