use std::collections::HashMap;

use serde::Serialize;

use crate::block::{Block, HeadingLevel};
use crate::error::ComposeError;
use crate::slug::slugify;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub anchor: String,
    pub label: String,
}

/// Table of contents for a page, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

impl Outline {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutlineEntry> {
        self.entries.iter()
    }
}

/// Build the outline from the top-level headings eligible for navigation.
///
/// Headings nested in conditional blocks are not listed, since the outline
/// is shared by every variant of the page.
pub fn build_outline(blocks: &[Block], nav_level: HeadingLevel) -> Result<Outline, ComposeError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut entries = Vec::new();

    for block in blocks {
        let Block::Heading(heading) = block else {
            continue;
        };
        if !heading.in_outline(nav_level) {
            continue;
        }
        let anchor = slugify(&heading.text);
        if let Some(first) = seen.insert(anchor.clone(), &heading.text) {
            return Err(ComposeError::DuplicateAnchor {
                anchor,
                first: first.to_string(),
                second: heading.text.clone(),
            });
        }
        entries.push(OutlineEntry {
            anchor,
            label: heading.text.clone(),
        });
    }

    log::debug!("built outline with {} entries", entries.len());
    Ok(Outline { entries })
}
