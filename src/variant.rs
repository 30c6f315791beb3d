use std::fmt;
use std::str::FromStr;

use crate::error::ComposeError;

/// The front-end framework a reader is viewing the page for.
///
/// The set is closed: pages select among these and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    Vue2,
    Vue3,
    React,
    Svelte,
}

impl Variant {
    pub const ALL: [Variant; 4] = [Variant::Vue2, Variant::Vue3, Variant::React, Variant::Svelte];

    pub fn key(self) -> &'static str {
        match self {
            Variant::Vue2 => "vue2",
            Variant::Vue3 => "vue3",
            Variant::React => "react",
            Variant::Svelte => "svelte",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Variant {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match VariantKey::from_str(s)? {
            VariantKey::Only(variant) => Ok(variant),
            // A family is a selector, never an active variant
            VariantKey::Vue => Err(ComposeError::UnknownVariant { key: s.to_string() }),
        }
    }
}

/// What a conditional block or inline span is keyed on.
///
/// Either a single variant, or the `vue` family which covers both Vue
/// major versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKey {
    Only(Variant),
    Vue,
}

impl VariantKey {
    pub fn matches(self, active: Variant) -> bool {
        match self {
            VariantKey::Only(variant) => variant == active,
            VariantKey::Vue => matches!(active, Variant::Vue2 | Variant::Vue3),
        }
    }

    /// Parse a key, returning `None` instead of an error for unknown names.
    ///
    /// Case, spaces, hyphens, underscores and dots are ignored, so tab
    /// labels such as `"Vue 3"` resolve to the same key as `"vue3"`.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_' | '.'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "vue" => Some(VariantKey::Vue),
            "vue2" => Some(VariantKey::Only(Variant::Vue2)),
            "vue3" => Some(VariantKey::Only(Variant::Vue3)),
            "react" => Some(VariantKey::Only(Variant::React)),
            "svelte" => Some(VariantKey::Only(Variant::Svelte)),
            _ => None,
        }
    }
}

impl From<Variant> for VariantKey {
    fn from(variant: Variant) -> Self {
        VariantKey::Only(variant)
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantKey::Only(variant) => variant.fmt(f),
            VariantKey::Vue => f.write_str("vue"),
        }
    }
}

impl FromStr for VariantKey {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariantKey::parse(s).ok_or_else(|| ComposeError::UnknownVariant { key: s.to_string() })
    }
}
