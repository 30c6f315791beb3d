use std::path::PathBuf;

use thiserror::Error;

/// Content errors found while composing or rendering a page.
///
/// All of these mean the content itself is wrong; there is no partial
/// output for a page that produced one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("headings {first:?} and {second:?} both produce the anchor #{anchor}")]
    DuplicateAnchor {
        anchor: String,
        first: String,
        second: String,
    },

    #[error("tab label {label:?} is used more than once in the same tab group")]
    DuplicateTabLabel { label: String },

    #[error("unknown variant {key:?}")]
    UnknownVariant { key: String },

    #[error("malformed block at {path}: {reason}")]
    MalformedBlock { path: String, reason: String },
}

impl ComposeError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ComposeError::MalformedBlock {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from reading a content file into a [`crate::Page`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML content: {source}")]
    Toml { source: toml::de::Error },

    #[error("invalid JSON content: {source}")]
    Json { source: serde_json::Error },

    #[error("unsupported content format for {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    #[error(transparent)]
    Compose(#[from] ComposeError),
}
