//! HTML document template.

use std::fmt::Write;

use quire_renderer::escape_html as escape;

use crate::i18n::Label;
use crate::metabox::MetaboxProps;
use crate::nav::{NavLink, PageNav};
use crate::outline::NavHeading;

/// All data needed to render a page document.
pub(crate) struct DocumentData<'a> {
    pub lang: &'a str,
    pub title: &'a str,
    /// Plaintext summary for the meta description.
    pub description: &'a str,
    pub canonical_url: Option<&'a str>,
    pub nav: &'a PageNav,
    pub metabox: Option<&'a MetaboxProps>,
    pub body_html: &'a str,
    pub thanks_html: &'a str,
    pub outline: &'a NavHeading,
    pub stub: bool,
}

/// Render a complete HTML document.
pub(crate) fn render_document(doc: &DocumentData<'_>) -> String {
    let mut html = String::with_capacity(doc.body_html.len() + 4096);

    let _ = writeln!(html, "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>", escape(doc.lang));
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(doc.title));
    if !doc.description.is_empty() {
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape(doc.description)
        );
    }
    if let Some(url) = doc.canonical_url {
        let _ = writeln!(html, "<link rel=\"canonical\" href=\"{}\">", escape(url));
    }
    for other in &doc.nav.languages {
        let _ = writeln!(
            html,
            "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">",
            escape(&other.lang),
            escape(&other.url)
        );
    }
    html.push_str("</head>\n<body>\n");

    render_breadcrumbs(&mut html, &doc.nav.parents, doc.lang);

    html.push_str("<div class=\"layout\">\n<main>\n");
    if doc.stub {
        html.push_str("<article class=\"stub\">\n");
    } else {
        html.push_str("<article>\n");
    }
    let _ = writeln!(html, "<h1 class=\"page-title\">{}</h1>", escape(doc.title));
    if let Some(metabox) = doc.metabox {
        render_metabox(&mut html, metabox);
    }
    html.push_str(doc.body_html);
    html.push_str(doc.thanks_html);
    html.push_str("\n</article>\n");

    render_link_list(&mut html, "children", Label::Children.text(doc.lang), &doc.nav.children);
    render_link_list(&mut html, "related", Label::Related.text(doc.lang), &doc.nav.related);
    html.push_str("</main>\n");

    render_outline(&mut html, doc.outline, doc.lang);
    html.push_str("</div>\n");

    if !doc.nav.languages.is_empty() {
        let _ = write!(
            html,
            "<footer class=\"languages\"><span>{}</span><ul>",
            Label::OtherLanguages.text(doc.lang)
        );
        for other in &doc.nav.languages {
            let _ = write!(
                html,
                "<li><a href=\"{}\" hreflang=\"{}\">{}</a></li>",
                escape(&other.url),
                escape(&other.lang),
                escape(&other.title)
            );
        }
        html.push_str("</ul></footer>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

fn render_breadcrumbs(html: &mut String, parents: &[NavLink], lang: &str) {
    if parents.is_empty() {
        return;
    }
    let _ = writeln!(
        html,
        "<nav class=\"breadcrumbs\" aria-label=\"{}\">\n<ol>",
        Label::Breadcrumbs.text(lang)
    );
    for crumb in parents {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape(&crumb.url),
            escape(&crumb.title)
        );
    }
    html.push_str("</ol>\n</nav>\n");
}

fn render_metabox(html: &mut String, metabox: &MetaboxProps) {
    let _ = writeln!(html, "<aside class=\"{}\">", escape(&metabox.class));
    html.push_str("<header>");
    if let Some(icon) = &metabox.icon {
        let title = metabox.icon_title.as_deref().unwrap_or_default();
        let _ = write!(
            html,
            "<span class=\"icon icon-{}\" title=\"{}\"></span>",
            escape(icon),
            escape(title)
        );
    }
    let _ = writeln!(html, "<strong>{}</strong></header>", escape(&metabox.title));
    if let Some(img) = &metabox.img {
        html.push_str("<figure>");
        let _ = write!(html, "<img src=\"{}\" alt=\"\">", escape(img));
        if let Some(caption) = &metabox.caption {
            let _ = write!(html, "<figcaption>{caption}</figcaption>");
        }
        html.push_str("</figure>\n");
    }
    if let Some(info) = &metabox.info {
        let _ = writeln!(html, "<div class=\"info\">{info}</div>");
    }
    for section in &metabox.sections {
        let _ = write!(html, "<section class=\"{}\">", escape(&section.class));
        if let Some(title) = &section.title {
            let _ = write!(html, "<h2>{}</h2>", escape(title));
        }
        html.push_str(&section.body);
        html.push_str("</section>\n");
    }
    html.push_str("</aside>\n");
}

fn render_link_list(html: &mut String, class: &str, heading: &str, links: &[NavLink]) {
    if links.is_empty() {
        return;
    }
    let _ = write!(html, "<nav class=\"{class}\"><h2>{}</h2><ul>", escape(heading));
    for link in links {
        let _ = write!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape(&link.url),
            escape(&link.title)
        );
    }
    html.push_str("</ul></nav>\n");
}

fn render_outline(html: &mut String, outline: &NavHeading, lang: &str) {
    if outline.children.is_empty() {
        return;
    }
    let _ = write!(
        html,
        "<aside class=\"outline\"><h2>{}</h2>",
        Label::OnThisPage.text(lang)
    );
    render_outline_items(html, &outline.children);
    html.push_str("</aside>\n");
}

fn render_outline_items(html: &mut String, items: &[NavHeading]) {
    html.push_str("<ul>");
    for item in items {
        let _ = write!(
            html,
            "<li><a href=\"#{}\">{}</a>",
            escape(&item.id),
            escape(&item.title)
        );
        if !item.children.is_empty() {
            render_outline_items(html, &item.children);
        }
        html.push_str("</li>");
    }
    html.push_str("</ul>");
}
