//! `datatable` fenced block processor.

use std::sync::Arc;

use quire_renderer::{
    BoxError, CodeBlockProcessor, FencedBlock, LinkResolver, OutputMode, ProcessResult,
};
use serde_json::Value;

use crate::render::DataTable;

/// Fence language handled by [`DataTableProcessor`].
pub const DATATABLE_LANGUAGE: &str = "datatable";

/// Replaces ` ```datatable ` blocks with rendered tables.
///
/// The block body is the YAML table definition. Rows are drawn from the page
/// data tree given at construction.
pub struct DataTableProcessor {
    data: Arc<Value>,
    resolver: Option<Arc<dyn LinkResolver>>,
}

impl DataTableProcessor {
    #[must_use]
    pub fn new(data: Arc<Value>) -> Self {
        Self {
            data,
            resolver: None,
        }
    }

    /// Resolve `pageLink` and `text` cell references with `resolver`.
    #[must_use]
    pub fn with_link_resolver(mut self, resolver: Arc<dyn LinkResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }
}

impl CodeBlockProcessor for DataTableProcessor {
    fn process(
        &mut self,
        block: &FencedBlock<'_>,
        mode: OutputMode,
    ) -> Result<ProcessResult, BoxError> {
        if block.language != DATATABLE_LANGUAGE {
            return Ok(ProcessResult::PassThrough);
        }
        let table = DataTable::from_yaml(block.source)?;
        let output = match mode {
            OutputMode::Html => table.render_html(&self.data, self.resolver.as_ref())?,
            OutputMode::Plain => table.render_plain(&self.data, self.resolver.as_ref())? + "\n",
        };
        Ok(ProcessResult::Inline(output))
    }
}
