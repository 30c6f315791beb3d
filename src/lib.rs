mod block;
mod config;
mod content;
mod document;
mod error;
mod html;
mod outline;
mod page;
mod parser;
mod render;
mod slug;
mod variant;

pub use block::{Block, CodeBlock, Example, Heading, HeadingLevel, Span};
pub use config::{CodeConfig, Config, ConfigError, OutlineConfig, VariantsConfig};
pub use content::dedent;
pub use document::{Document, Element, Node};
pub use error::{ComposeError, LoadError};
pub use html::{document_to_html, outline_to_html};
pub use outline::{Outline, OutlineEntry, build_outline};
pub use page::Page;
pub use parser::parse_inline;
pub use render::render;
pub use slug::slugify;
pub use variant::{Variant, VariantKey};

use std::fs;
use std::path::Path;

/// Parse TOML page content using default config.
pub fn page_from_toml(content: &str) -> Result<Page, LoadError> {
    content::page_from_toml(content, &Config::compiled_default())
}

/// Parse TOML page content with custom config.
pub fn page_from_toml_with_config(content: &str, config: &Config) -> Result<Page, LoadError> {
    content::page_from_toml(content, config)
}

/// Parse JSON page content using default config.
pub fn page_from_json(content: &str) -> Result<Page, LoadError> {
    content::page_from_json(content, &Config::compiled_default())
}

/// Parse JSON page content with custom config.
pub fn page_from_json_with_config(content: &str, config: &Config) -> Result<Page, LoadError> {
    content::page_from_json(content, config)
}

/// Load a `.toml` or `.json` content file using default config.
pub fn load_page(path: &Path) -> Result<Page, LoadError> {
    load_page_with_config(path, &Config::compiled_default())
}

/// Load a `.toml` or `.json` content file with custom config.
pub fn load_page_with_config(path: &Path, config: &Config) -> Result<Page, LoadError> {
    let extension = path.extension().and_then(|ext| ext.to_str());
    if !matches!(extension, Some("toml" | "json")) {
        return Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} ({} bytes)", path.display(), content.len());

    match extension {
        Some("json") => content::page_from_json(&content, config),
        _ => content::page_from_toml(&content, config),
    }
}

/// Render a page for the variant named `key`, e.g. `"vue3"` or `"React"`.
pub fn render_for(page: &Page, key: &str) -> Result<Document, ComposeError> {
    render(page, key.parse()?)
}

/// Render a page straight to HTML.
pub fn page_to_html(page: &Page, active: Variant) -> Result<String, ComposeError> {
    let doc = render(page, active)?;
    Ok(document_to_html(&doc))
}
