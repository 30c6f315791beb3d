use std::collections::{HashMap, HashSet};

use crate::block::{Block, HeadingLevel, Span};
use crate::error::ComposeError;
use crate::outline::{Outline, build_outline};
use crate::slug::slugify;
use crate::variant::{Variant, VariantKey};

/// A validated documentation page.
///
/// Construction checks every content rule, so an existing `Page` can
/// always be rendered for any variant it declares.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    title: String,
    variants: Vec<Variant>,
    blocks: Vec<Block>,
    outline: Outline,
}

impl Page {
    /// Compose a page that supports every variant, listing `H2` headings.
    pub fn new(title: impl Into<String>, blocks: Vec<Block>) -> Result<Self, ComposeError> {
        Self::compose(title, blocks, &Variant::ALL, HeadingLevel::H2)
    }

    /// Compose a page restricted to `variants`. An empty list means all.
    pub fn compose(
        title: impl Into<String>,
        blocks: Vec<Block>,
        variants: &[Variant],
        nav_level: HeadingLevel,
    ) -> Result<Self, ComposeError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ComposeError::malformed("title", "page title is empty"));
        }

        let mut declared = Vec::new();
        for &variant in if variants.is_empty() { &Variant::ALL[..] } else { variants } {
            if !declared.contains(&variant) {
                declared.push(variant);
            }
        }

        let mut validator = Validator {
            variants: &declared,
            anchors: HashMap::new(),
        };
        validator.blocks(&blocks, "blocks")?;

        let outline = build_outline(&blocks, nav_level)?;
        log::debug!(
            "composed page {:?}: {} blocks, {} outline entries",
            title,
            blocks.len(),
            outline.len()
        );

        Ok(Self {
            title,
            variants: declared,
            blocks,
            outline,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn declares(&self, variant: Variant) -> bool {
        self.variants.contains(&variant)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }
}

struct Validator<'a> {
    variants: &'a [Variant],
    anchors: HashMap<String, String>,
}

impl Validator<'_> {
    fn blocks(&mut self, blocks: &[Block], path: &str) -> Result<(), ComposeError> {
        for (i, block) in blocks.iter().enumerate() {
            self.block(block, &format!("{path}[{i}]"))?;
        }
        Ok(())
    }

    fn block(&mut self, block: &Block, path: &str) -> Result<(), ComposeError> {
        match block {
            Block::Heading(heading) => {
                if heading.id.is_empty() {
                    return Err(ComposeError::malformed(
                        path,
                        format!("heading {:?} has no characters to build an anchor from", heading.text),
                    ));
                }
                if heading.id != slugify(&heading.text) {
                    return Err(ComposeError::malformed(
                        path,
                        format!("heading anchor {:?} does not match its text {:?}", heading.id, heading.text),
                    ));
                }
                if let Some(first) = self.anchors.get(&heading.id) {
                    return Err(ComposeError::DuplicateAnchor {
                        anchor: heading.id.clone(),
                        first: first.clone(),
                        second: heading.text.clone(),
                    });
                }
                self.anchors.insert(heading.id.clone(), heading.text.clone());
            }
            Block::Paragraph { content } | Block::Notice { content } => self.spans(content)?,
            Block::CodeBlock(code) => {
                if code.language.trim().is_empty() {
                    return Err(ComposeError::malformed(path, "code language is empty"));
                }
            }
            Block::TabbedCode { examples } => {
                if examples.is_empty() {
                    return Err(ComposeError::malformed(path, "tab group has no examples"));
                }
                for (i, example) in examples.iter().enumerate() {
                    let reason = if example.label.trim().is_empty() {
                        "tab label is empty"
                    } else if example.code.language.trim().is_empty() {
                        "code language is empty"
                    } else {
                        continue;
                    };
                    return Err(ComposeError::malformed(format!("{path}.examples[{i}]"), reason));
                }
                check_tab_labels(examples.iter().map(|e| e.label.as_str()))?;
            }
            Block::Conditional { key, blocks } => {
                self.key(*key)?;
                self.blocks(blocks, &format!("{path}.blocks"))?;
            }
        }
        Ok(())
    }

    fn spans(&self, spans: &[Span]) -> Result<(), ComposeError> {
        for span in spans {
            match span {
                Span::Bold(inner) | Span::Italic(inner) => self.spans(inner)?,
                Span::Link { content, .. } => self.spans(content)?,
                Span::Variant { key, content } => {
                    self.key(*key)?;
                    self.spans(content)?;
                }
                Span::Text(_) | Span::Code(_) | Span::LineBreak => {}
            }
        }
        Ok(())
    }

    /// A key that selects none of the declared variants could never render.
    fn key(&self, key: VariantKey) -> Result<(), ComposeError> {
        if self.variants.iter().any(|v| key.matches(*v)) {
            Ok(())
        } else {
            Err(ComposeError::UnknownVariant {
                key: key.to_string(),
            })
        }
    }
}

fn check_tab_labels<'a>(
    labels: impl IntoIterator<Item = &'a str>,
) -> Result<(), ComposeError> {
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label) {
            return Err(ComposeError::DuplicateTabLabel {
                label: label.to_string(),
            });
        }
    }
    Ok(())
}
