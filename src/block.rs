use crate::slug::slugify;
use crate::variant::VariantKey;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    Text(String),
    Bold(Vec<Span>),
    Italic(Vec<Span>),
    Code(String),
    Link { url: String, content: Vec<Span> },
    LineBreak,
    /// Only shown to readers whose active variant matches `key`
    Variant { key: VariantKey, content: Vec<Span> },
}

/// Heading depth. Pages use `H1` for the title heading and `H2` for sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
}

impl HeadingLevel {
    pub fn from_u8(level: u8) -> Option<Self> {
        match level {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: HeadingLevel,
    /// Anchor id, always `slugify(text)`
    pub id: String,
    pub text: String,
    /// Overrides outline eligibility by level when set
    pub nav: Option<bool>,
}

impl Heading {
    pub fn new(level: HeadingLevel, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            level,
            id: slugify(&text),
            text,
            nav: None,
        }
    }

    pub fn with_nav(mut self, nav: bool) -> Self {
        self.nav = Some(nav);
        self
    }

    pub fn in_outline(&self, nav_level: HeadingLevel) -> bool {
        self.nav.unwrap_or(self.level == nav_level)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub language: String,
    pub source: String,
    /// Render line by line, keeping `+`/`-` markers as written
    pub diff: bool,
}

impl CodeBlock {
    pub fn new(language: impl Into<String>, source: impl Into<String>) -> Self {
        let language = language.into();
        Self {
            diff: language == "diff",
            language,
            source: source.into(),
        }
    }

    pub fn with_diff(mut self, diff: bool) -> Self {
        self.diff = diff;
        self
    }
}

/// One labelled tab of a tabbed code group
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub label: String,
    pub code: CodeBlock,
}

impl Example {
    pub fn new(label: impl Into<String>, code: CodeBlock) -> Self {
        Self {
            label: label.into(),
            code,
        }
    }

    /// The variant this tab is written for, if its label names one.
    pub fn variant_key(&self) -> Option<VariantKey> {
        VariantKey::parse(&self.label)
    }
}

/// Block-level page content
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(Heading),
    Paragraph { content: Vec<Span> },
    Notice { content: Vec<Span> },
    CodeBlock(CodeBlock),
    TabbedCode { examples: Vec<Example> },
    Conditional { key: VariantKey, blocks: Vec<Block> },
}

impl Block {
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading(_) => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::Notice { .. } => "notice",
            Block::CodeBlock(_) => "code",
            Block::TabbedCode { .. } => "tabbed_code",
            Block::Conditional { .. } => "conditional",
        }
    }
}
