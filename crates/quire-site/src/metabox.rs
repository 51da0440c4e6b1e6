//! Metabox selection from the `about` front matter directive.
//!
//! `about: tag:h1/bitmap` picks the tag style, looks the tag up at
//! `tags.h1.bitmap` in the page data and lists the workflows that produce or
//! consume it. Explicit front matter (`metaboxTitle`, `img`, `caption`,
//! `info`) always wins over derived values.

use std::fmt::Write;
use std::str::FromStr;
use std::sync::Arc;

use quire_data::{display, get_path, lookup};
use quire_renderer::{LinkResolver, OutputMode, RenderError, escape_html, render_inline};
use quire_table::{CellFormat, TableError, format_cell};
use serde::Serialize;
use serde_json::Value;

use crate::i18n::Label;
use crate::model::FrontMatter;

/// Error returned when a metabox cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum MetaboxError {
    #[error("unknown about type `{0}`")]
    UnknownAbout(String),
    #[error("failed to render metabox text: {0}")]
    Markdown(#[from] RenderError),
    #[error("failed to render metabox link: {0}")]
    Link(#[from] TableError),
}

/// Content types an `about` directive can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AboutKind {
    Tool,
    Resource,
    Tag,
    Guide,
}

impl FromStr for AboutKind {
    type Err = MetaboxError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "tool" => Ok(Self::Tool),
            "resource" => Ok(Self::Resource),
            "tag" => Ok(Self::Tag),
            "guide" => Ok(Self::Guide),
            other => Err(MetaboxError::UnknownAbout(other.to_owned())),
        }
    }
}

impl AboutKind {
    fn icon(self) -> &'static str {
        match self {
            Self::Tool => "wrench",
            Self::Resource => "file",
            Self::Tag => "tag",
            Self::Guide => "book",
        }
    }

    fn label(self) -> Label {
        match self {
            Self::Tool => Label::Tool,
            Self::Resource => Label::Resource,
            Self::Tag => Label::Tag,
            Self::Guide => Label::Guide,
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Tool => "metabox-tool",
            Self::Resource => "metabox-resource",
            Self::Tag => "metabox-tag",
            Self::Guide => "metabox-guide",
        }
    }
}

/// One block of metabox content. `body` is HTML.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetaboxSection {
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
}

/// Display descriptor for the metabox panel.
///
/// `caption` and `info` are rendered HTML.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetaboxProps {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_title: Option<String>,
    pub class: String,
    pub sections: Vec<MetaboxSection>,
}

/// A selected metabox plus the search keywords it contributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metabox {
    pub props: MetaboxProps,
    pub keywords: Vec<String>,
}

/// Inputs shared by every metabox lookup of one page.
pub struct MetaboxContext<'a> {
    pub lang: &'a str,
    /// Game used for tags named without one.
    pub tag_group: &'a str,
    /// Merged page data.
    pub data: &'a Value,
    pub resolver: Option<&'a Arc<dyn LinkResolver>>,
}

/// Build the metabox for a page.
///
/// Returns `None` when the front matter neither names an `about` type nor
/// sets any metabox field.
///
/// # Errors
///
/// Unknown `about` types are configuration errors.
pub fn select_metabox(
    front: &FrontMatter,
    page_title: &str,
    ctx: &MetaboxContext<'_>,
) -> Result<Option<Metabox>, MetaboxError> {
    let has_overrides = front.img.is_some()
        || front.caption.is_some()
        || front.info.is_some()
        || front.metabox_title.is_some();
    let Some(about) = front.about.as_deref() else {
        if !has_overrides {
            return Ok(None);
        }
        return base_metabox(front, page_title, ctx).map(Some);
    };

    let (kind, arg) = match about.split_once(':') {
        Some((kind, arg)) => (kind, Some(arg).filter(|a| !a.is_empty())),
        None => (about, None),
    };
    let kind: AboutKind = kind.parse()?;

    let mut metabox = base_metabox(front, page_title, ctx)?;
    metabox.props.icon = Some(kind.icon().to_owned());
    metabox.props.icon_title = Some(kind.label().text(ctx.lang).to_owned());
    metabox.props.class = format!("metabox {}", kind.class());

    let Some(arg) = arg else {
        return Ok(Some(metabox));
    };

    // Workflows refer to tags by bare name.
    let mut workflow_key = arg;
    if kind == AboutKind::Tag {
        let (game, name) = arg.split_once('/').unwrap_or((ctx.tag_group, arg));
        add_tag(&mut metabox, front, game, name, ctx)?;
        workflow_key = name;
    }
    if matches!(kind, AboutKind::Tag | AboutKind::Tool | AboutKind::Resource) {
        add_workflows(&mut metabox, workflow_key, ctx)?;
    }
    Ok(Some(metabox))
}

fn base_metabox(
    front: &FrontMatter,
    page_title: &str,
    ctx: &MetaboxContext<'_>,
) -> Result<Metabox, MetaboxError> {
    let inline = |text: &Option<String>| -> Result<Option<String>, MetaboxError> {
        text.as_deref()
            .map(|text| render_inline(text, ctx.resolver.cloned()))
            .transpose()
            .map_err(MetaboxError::from)
    };
    Ok(Metabox {
        props: MetaboxProps {
            title: front
                .metabox_title
                .clone()
                .unwrap_or_else(|| page_title.to_owned()),
            img: front.img.clone(),
            caption: inline(&front.caption)?,
            info: inline(&front.info)?,
            class: "metabox".to_owned(),
            ..MetaboxProps::default()
        },
        keywords: Vec::new(),
    })
}

fn add_tag(
    metabox: &mut Metabox,
    front: &FrontMatter,
    game: &str,
    name: &str,
    ctx: &MetaboxContext<'_>,
) -> Result<(), MetaboxError> {
    let Some(tag) = get_path(ctx.data, &["tags", game, name]) else {
        tracing::debug!(game, tag = name, "tag not found in page data");
        return Ok(());
    };

    let id = lookup(tag, "id").map(display).unwrap_or_default();
    if !id.is_empty() {
        if front.metabox_title.is_none() {
            metabox.props.title = format!("{name} ({id})");
        }
        metabox.keywords.push(id.clone());
    }

    let mut body = String::new();
    if !id.is_empty() {
        let _ = write!(
            body,
            "<p>{}: <code>{}</code></p>",
            Label::TagId.text(ctx.lang),
            escape_html(&id)
        );
    }
    let parent = format_cell(
        &CellFormat::PageLink,
        lookup(tag, "parent"),
        OutputMode::Html,
        ctx.resolver,
    )?;
    if !parent.is_empty() {
        let _ = write!(body, "<p>{}: {parent}</p>", Label::ParentTag.text(ctx.lang));
    }
    if !body.is_empty() {
        metabox.props.sections.push(MetaboxSection {
            class: "tag-info".to_owned(),
            title: None,
            body,
        });
    }
    Ok(())
}

fn add_workflows(
    metabox: &mut Metabox,
    arg: &str,
    ctx: &MetaboxContext<'_>,
) -> Result<(), MetaboxError> {
    let Some(Value::Array(workflows)) = lookup(ctx.data, "workflows") else {
        return Ok(());
    };

    let mut created_from: Vec<String> = Vec::new();
    let mut used_to_create: Vec<String> = Vec::new();
    let mut used_in: Vec<String> = Vec::new();

    for workflow in workflows {
        let from = lookup(workflow, "from");
        let to = lookup(workflow, "to");
        if mentions(to, arg) {
            for item in items(from) {
                push_unique(&mut created_from, link(item, ctx)?);
            }
        }
        if mentions(from, arg) {
            for item in items(to) {
                push_unique(&mut used_to_create, link(item, ctx)?);
            }
        }
        if mentions(lookup(workflow, "using"), arg) {
            let sources = items(from)
                .map(|item| link(item, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            let targets = items(to)
                .map(|item| link(item, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            push_unique(
                &mut used_in,
                format!("{} → {}", sources.join(", "), targets.join(", ")),
            );
        }
    }

    for (label, entries) in [
        (Label::CreatedFrom, created_from),
        (Label::UsedToCreate, used_to_create),
        (Label::UsedInWorkflows, used_in),
    ] {
        if entries.is_empty() {
            continue;
        }
        let mut body = String::from("<ul>");
        for entry in &entries {
            let _ = write!(body, "<li>{entry}</li>");
        }
        body.push_str("</ul>");
        metabox.props.sections.push(MetaboxSection {
            class: "workflows".to_owned(),
            title: Some(label.text(ctx.lang).to_owned()),
            body,
        });
    }
    Ok(())
}

/// Whether a workflow field names `arg` directly or in a list.
fn mentions(field: Option<&Value>, arg: &str) -> bool {
    items(field).any(|item| item.as_str() == Some(arg))
}

fn items(field: Option<&Value>) -> impl Iterator<Item = &Value> {
    let list: &[Value] = match field {
        Some(Value::Array(list)) => list,
        Some(value) => std::slice::from_ref(value),
        None => &[],
    };
    list.iter()
}

fn link(item: &Value, ctx: &MetaboxContext<'_>) -> Result<String, TableError> {
    format_cell(&CellFormat::PageLink, Some(item), OutputMode::Html, ctx.resolver)
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}
