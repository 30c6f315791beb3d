//! Authored page content.
//!
//! Content files are deserialised into a loose tree first, with every field
//! optional, so that a block missing a field can be reported with its
//! location instead of as a generic deserialisation error.

use serde::Deserialize;

use crate::block::{Block, CodeBlock, Example, Heading, HeadingLevel, Span};
use crate::config::{CodeConfig, Config};
use crate::error::{ComposeError, LoadError};
use crate::page::Page;
use crate::parser::parse_inline;
use crate::variant::{Variant, VariantKey};

#[derive(Debug, Deserialize)]
struct RawPage {
    title: Option<String>,
    #[serde(default)]
    variants: Vec<String>,
    #[serde(default)]
    blocks: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawBlock {
    Heading {
        level: Option<u8>,
        text: Option<String>,
        nav: Option<bool>,
    },
    Paragraph {
        text: Option<String>,
    },
    Notice {
        text: Option<String>,
    },
    Code {
        language: Option<String>,
        source: Option<String>,
        diff: Option<bool>,
    },
    TabbedCode {
        #[serde(default)]
        examples: Vec<RawExample>,
    },
    Conditional {
        variant: Option<String>,
        #[serde(default)]
        blocks: Vec<RawBlock>,
    },
}

#[derive(Debug, Deserialize)]
struct RawExample {
    label: Option<String>,
    language: Option<String>,
    source: Option<String>,
}

pub fn page_from_toml(content: &str, config: &Config) -> Result<Page, LoadError> {
    let raw: RawPage = toml::from_str(content).map_err(|source| LoadError::Toml { source })?;
    Ok(build_page(raw, config)?)
}

pub fn page_from_json(content: &str, config: &Config) -> Result<Page, LoadError> {
    let raw: RawPage =
        serde_json::from_str(content).map_err(|source| LoadError::Json { source })?;
    Ok(build_page(raw, config)?)
}

fn build_page(raw: RawPage, config: &Config) -> Result<Page, ComposeError> {
    let title = raw
        .title
        .ok_or_else(|| ComposeError::malformed("title", "page has no title"))?;

    let variants = raw
        .variants
        .iter()
        .map(|key| key.parse::<Variant>())
        .collect::<Result<Vec<_>, _>>()?;

    let blocks = convert_blocks(raw.blocks, "blocks", &config.code)?;
    Page::compose(title, blocks, &variants, config.outline.nav_level())
}

fn convert_blocks(
    raw: Vec<RawBlock>,
    path: &str,
    code: &CodeConfig,
) -> Result<Vec<Block>, ComposeError> {
    raw.into_iter()
        .enumerate()
        .map(|(i, block)| convert_block(block, &format!("{path}[{i}]"), code))
        .collect()
}

fn convert_block(raw: RawBlock, path: &str, code: &CodeConfig) -> Result<Block, ComposeError> {
    let missing = |field: &str| ComposeError::malformed(path, format!("missing `{field}`"));

    let block = match raw {
        RawBlock::Heading { level, text, nav } => {
            let level = level.ok_or_else(|| missing("level"))?;
            let level = HeadingLevel::from_u8(level).ok_or_else(|| {
                ComposeError::malformed(path, format!("heading level {level} is not 1 or 2"))
            })?;
            let mut heading = Heading::new(level, text.ok_or_else(|| missing("text"))?);
            heading.nav = nav;
            Block::Heading(heading)
        }
        RawBlock::Paragraph { text } => Block::Paragraph {
            content: inline(&text.ok_or_else(|| missing("text"))?, path)?,
        },
        RawBlock::Notice { text } => Block::Notice {
            content: inline(&text.ok_or_else(|| missing("text"))?, path)?,
        },
        RawBlock::Code {
            language,
            source,
            diff,
        } => Block::CodeBlock(code_block(
            language.ok_or_else(|| missing("language"))?,
            source.ok_or_else(|| missing("source"))?,
            diff,
            code,
        )),
        RawBlock::TabbedCode { examples } => {
            let examples = examples
                .into_iter()
                .enumerate()
                .map(|(i, example)| {
                    let path = format!("{path}.examples[{i}]");
                    let missing = |field: &str| {
                        ComposeError::malformed(path.as_str(), format!("missing `{field}`"))
                    };
                    let label = example.label.ok_or_else(|| missing("label"))?;
                    let language = example.language.ok_or_else(|| missing("language"))?;
                    let source = example.source.ok_or_else(|| missing("source"))?;
                    Ok(Example::new(label, code_block(language, source, None, code)))
                })
                .collect::<Result<Vec<_>, ComposeError>>()?;
            Block::TabbedCode { examples }
        }
        RawBlock::Conditional { variant, blocks } => {
            let key: VariantKey = variant.ok_or_else(|| missing("variant"))?.parse()?;
            Block::Conditional {
                key,
                blocks: convert_blocks(blocks, &format!("{path}.blocks"), code)?,
            }
        }
    };
    Ok(block)
}

fn inline(text: &str, path: &str) -> Result<Vec<Span>, ComposeError> {
    parse_inline(text).map_err(|reason| ComposeError::malformed(path, reason))
}

fn code_block(
    language: String,
    source: String,
    diff: Option<bool>,
    config: &CodeConfig,
) -> CodeBlock {
    let diff = diff.unwrap_or_else(|| config.is_diff(&language));
    let source = if config.dedent && !diff {
        dedent(&source)
    } else {
        source
    };
    CodeBlock::new(language, source).with_diff(diff)
}

/// Remove the indentation common to every non-blank line.
///
/// One leading and one trailing blank line are dropped as well, so that
/// sources written as indented multi-line strings come out flush left.
pub fn dedent(source: &str) -> String {
    let mut lines: Vec<&str> = source.lines().collect();
    if lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| if l.trim().is_empty() { "" } else { &l[indent..] })
        .collect::<Vec<_>>()
        .join("\n")
}
