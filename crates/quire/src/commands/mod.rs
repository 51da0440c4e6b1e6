//! CLI command implementations.

mod build;
mod check;
mod render;
mod site;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;
