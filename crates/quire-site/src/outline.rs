//! Heading outline.

use quire_renderer::TocEntry;
use serde::Serialize;

/// A node of the page outline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NavHeading {
    pub level: u8,
    pub title: String,
    pub id: String,
    pub children: Vec<NavHeading>,
}

impl NavHeading {
    fn from_entry(entry: &TocEntry) -> Self {
        Self {
            level: entry.level,
            title: entry.title.clone(),
            id: entry.id.clone(),
            children: Vec::new(),
        }
    }
}

/// Nest a flat heading list under a synthetic level-0 root.
///
/// Each heading becomes a child of the nearest preceding heading with a
/// strictly lower level. Skipped levels are not filled in.
#[must_use]
pub fn build_outline(headings: &[TocEntry]) -> NavHeading {
    // Open path from the root to the last inserted heading.
    let mut open = vec![NavHeading::default()];

    for heading in headings {
        while open.len() > 1 && open.last().is_some_and(|node| node.level >= heading.level) {
            close_last(&mut open);
        }
        open.push(NavHeading::from_entry(heading));
    }
    while open.len() > 1 {
        close_last(&mut open);
    }
    open.pop().unwrap_or_default()
}

fn close_last(open: &mut Vec<NavHeading>) {
    if let Some(node) = open.pop()
        && let Some(parent) = open.last_mut()
    {
        parent.children.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(level: u8, title: &str) -> TocEntry {
        TocEntry {
            level,
            title: title.to_owned(),
            id: title.to_lowercase(),
        }
    }

    fn node(level: u8, title: &str, children: Vec<NavHeading>) -> NavHeading {
        NavHeading {
            level,
            title: title.to_owned(),
            id: title.to_lowercase(),
            children,
        }
    }

    #[test]
    fn test_nests_by_level() {
        let root = build_outline(&[entry(1, "A"), entry(2, "B"), entry(1, "C")]);
        assert_eq!(root.level, 0);
        assert_eq!(
            root.children,
            vec![node(1, "A", vec![node(2, "B", vec![])]), node(1, "C", vec![])]
        );
    }

    #[test]
    fn test_skipped_levels_nest_under_nearest_shallower() {
        let root = build_outline(&[entry(1, "A"), entry(3, "B"), entry(2, "C"), entry(3, "D")]);
        assert_eq!(
            root.children,
            vec![node(
                1,
                "A",
                vec![node(3, "B", vec![]), node(2, "C", vec![node(3, "D", vec![])])]
            )]
        );
    }

    #[test]
    fn test_deeper_first_heading() {
        let root = build_outline(&[entry(3, "A"), entry(2, "B")]);
        assert_eq!(root.children, vec![node(3, "A", vec![]), node(2, "B", vec![])]);
    }

    #[test]
    fn test_empty() {
        assert_eq!(build_outline(&[]), NavHeading::default());
    }
}
