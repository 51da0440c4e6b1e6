use quire_renderer::RenderError;

use crate::metabox::MetaboxError;

/// Error returned when a page cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The page body failed to render.
    #[error("page `{page}`: {source}")]
    Render {
        page: String,
        #[source]
        source: RenderError,
    },
    /// The metabox could not be built.
    #[error("page `{page}`: {source}")]
    Metabox {
        page: String,
        #[source]
        source: MetaboxError,
    },
}
