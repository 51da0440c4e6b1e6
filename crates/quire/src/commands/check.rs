//! `quire check` command implementation.

use clap::Args;

use super::site::{SiteArgs, open_site, render_all};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    site: SiteArgs,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config(None)?;
        let (site, pages) = open_site(&config, &output)?;

        let rendered = render_all(&site, &pages, &output)?;
        output.done(&format!("All {} pages render", rendered.len()));
        Ok(())
    }
}
