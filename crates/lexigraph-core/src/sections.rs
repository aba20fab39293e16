//! Splitting input documents into sections.
//!
//! A section is the unit of locality for co-occurrence: words in different
//! sections are never connected. Plain text is split by line; Markdown is
//! split by block using pulldown-cmark, so each paragraph, heading, list
//! item, or table cell becomes its own section.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

/// How to turn a document into sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SectionSource {
    /// One section per non-blank line.
    #[default]
    Plain,
    /// One section per Markdown block.
    Markdown,
}

impl SectionSource {
    /// Pick a source from a file extension (`md`/`markdown` → Markdown).
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext.map(str::to_ascii_lowercase).as_deref() {
            Some("md" | "markdown") => Self::Markdown,
            _ => Self::Plain,
        }
    }

    /// Split `text` into sections.
    pub fn split(self, text: &str) -> Vec<String> {
        match self {
            Self::Plain => split_plain(text),
            Self::Markdown => split_markdown(text),
        }
    }
}

/// One section per line, trimmed, blank lines dropped.
pub fn split_plain(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// One section per Markdown text block.
///
/// Code blocks, inline code, HTML and YAML frontmatter are skipped. Line
/// breaks inside a block become spaces.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn split_markdown(text: &str) -> Vec<String> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS;
    let parser = Parser::new_ext(text, options);

    let mut sections = Vec::new();
    let mut current = String::new();
    let mut in_code = false;
    let mut in_metadata = false;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code = true,
            Event::End(TagEnd::CodeBlock) => in_code = false,
            Event::Start(Tag::MetadataBlock(_)) => in_metadata = true,
            Event::End(TagEnd::MetadataBlock(_)) => in_metadata = false,

            // Block boundaries close the current section
            Event::Start(
                Tag::Paragraph | Tag::Heading { .. } | Tag::Item | Tag::TableCell,
            )
            | Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::TableCell,
            ) => flush(&mut current, &mut sections),

            Event::Text(t) if !in_code && !in_metadata => current.push_str(&t),
            Event::SoftBreak | Event::HardBreak if !in_code && !in_metadata => {
                current.push(' ');
            }

            _ => {}
        }
    }
    flush(&mut current, &mut sections);

    sections
}

fn flush(current: &mut String, sections: &mut Vec<String>) {
    let section = current.trim();
    if !section.is_empty() {
        sections.push(section.to_string());
    }
    current.clear();
}
