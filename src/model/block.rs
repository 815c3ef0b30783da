//! Block and text-level types.

use super::document::{DigitalAttestation, PurchaseItem, Signature, MISSING_FIELD};
use serde::{Deserialize, Serialize};

/// An atomic, placeable unit of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph or paragraph fragment
    TextLine(TextLine),

    /// A preserved blank line
    EmptyLine,

    /// An embedded image
    Image {
        /// Image id (token id or generated exhibit id)
        id: String,
        /// Image location, when known
        url: Option<String>,
        /// Intrinsic width in pixels
        width: Option<f32>,
        /// Caption printed under the image
        caption: Option<String>,
    },

    /// A rendered name/role/sector signature
    SignatureStamp(SignatureStamp),

    /// A section title
    SectionHeader {
        /// Header text
        text: String,
    },

    /// A purchase table row
    ItemRow {
        /// 1-based row number
        number: usize,
        /// The item
        item: PurchaseItem,
    },

    /// A raw rich-text fragment
    Markup {
        /// HTML fragment
        html: String,
    },
}

impl Block {
    /// Create a whole-paragraph text block from plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Block::TextLine(TextLine::plain(text))
    }

    /// Create an image block with no known location.
    pub fn image(id: impl Into<String>) -> Self {
        Block::Image {
            id: id.into(),
            url: None,
            width: None,
            caption: None,
        }
    }

    /// Create a section header block.
    pub fn header(text: impl Into<String>) -> Self {
        Block::SectionHeader { text: text.into() }
    }

    /// Create a markup block.
    pub fn markup(html: impl Into<String>) -> Self {
        Block::Markup { html: html.into() }
    }

    /// Check if this block is a text line.
    pub fn is_text(&self) -> bool {
        matches!(self, Block::TextLine(_))
    }

    /// Check if this block is a signature stamp.
    pub fn is_signature(&self) -> bool {
        matches!(self, Block::SignatureStamp(_))
    }

    /// Check if this block is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Block::Image { .. })
    }

    /// Get the text line if this is one.
    pub fn as_text_line(&self) -> Option<&TextLine> {
        match self {
            Block::TextLine(line) => Some(line),
            _ => None,
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::TextLine(line) => line.plain_text(),
            Block::EmptyLine => String::new(),
            Block::Image { caption, .. } => caption.clone().unwrap_or_default(),
            Block::SignatureStamp(stamp) => {
                format!("{}\n{}\n{}", stamp.name, stamp.role, stamp.sector)
            }
            Block::SectionHeader { text } => text.clone(),
            Block::ItemRow { number, item } => {
                format!("{}. {} ({} {})", number, item.name, item.quantity, item.unit)
            }
            Block::Markup { html } => html.clone(),
        }
    }
}

/// Whether a text line is a full paragraph or a piece of one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinePart {
    /// A full paragraph, carrying its bottom margin
    #[default]
    Whole,
    /// A piece produced by splitting a paragraph across pages
    Fragment,
}

/// A paragraph of styled runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Styled runs
    pub runs: Vec<TextRun>,

    /// Index of the source paragraph within its stream
    pub paragraph: usize,

    /// Full paragraph or fragment
    pub part: LinePart,
}

impl TextLine {
    /// Create a line from runs.
    pub fn new(runs: Vec<TextRun>, paragraph: usize) -> Self {
        Self {
            runs,
            paragraph,
            part: LinePart::Whole,
        }
    }

    /// Create an unstyled line.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![TextRun::new(text)], 0)
    }

    /// Get plain text content of the line.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Number of characters across all runs.
    pub fn char_count(&self) -> usize {
        self.runs.iter().map(|run| run.text.chars().count()).sum()
    }

    /// Check if the line has no text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.is_empty())
    }

    /// Check if this is a whole paragraph.
    pub fn is_whole(&self) -> bool {
        self.part == LinePart::Whole
    }

    /// Split at a character index, dropping `skip` characters at the cut.
    ///
    /// Both halves are fragments of the same paragraph and keep their run
    /// styling. Empty runs are not carried over.
    pub fn split_at(&self, at: usize, skip: usize) -> (TextLine, TextLine) {
        let mut head = Vec::new();
        let mut tail = Vec::new();
        let tail_from = at + skip;
        let mut seen = 0;

        for run in &self.runs {
            let len = run.text.chars().count();
            let start = seen;
            let end = seen + len;
            seen = end;

            if start < at {
                let take = at.min(end) - start;
                push_run(&mut head, run.slice(0, take));
            }
            if end > tail_from {
                let from = tail_from.max(start) - start;
                push_run(&mut tail, run.slice(from, len));
            }
        }

        let fragment = |runs: Vec<TextRun>| TextLine {
            runs,
            paragraph: self.paragraph,
            part: LinePart::Fragment,
        };
        (fragment(head), fragment(tail))
    }
}

fn push_run(runs: &mut Vec<TextRun>, run: TextRun) {
    if !run.is_empty() {
        runs.push(run);
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default, skip_serializing_if = "TextStyle::is_plain")]
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: true,
                ..Default::default()
            },
        )
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Copy of the characters in `[from, to)`, same style.
    fn slice(&self, from: usize, to: usize) -> TextRun {
        let text: String = self.text.chars().skip(from).take(to - from).collect();
        TextRun::styled(text, self.style)
    }
}

/// Inline text styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text (`<b>`, `<strong>`)
    pub bold: bool,

    /// Italic text (`<i>`, `<em>`)
    pub italic: bool,

    /// Underlined text (`<u>`)
    pub underline: bool,
}

impl TextStyle {
    /// Check if no styling is applied.
    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.underline)
    }
}

/// A rendered signature block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureStamp {
    /// Signer name
    pub name: String,

    /// Signer role
    pub role: String,

    /// Signer sector
    pub sector: String,

    /// Digital attestation, if signed electronically
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attestation: Option<DigitalAttestation>,
}

impl SignatureStamp {
    /// Create a stamp, rendering empty fields as `---`.
    pub fn new(name: &str, role: &str, sector: &str) -> Self {
        Self {
            name: or_missing(name),
            role: or_missing(role),
            sector: or_missing(sector),
            attestation: None,
        }
    }
}

impl From<&Signature> for SignatureStamp {
    fn from(signature: &Signature) -> Self {
        let mut stamp = SignatureStamp::new(&signature.name, &signature.role, &signature.sector);
        stamp.attestation = signature.digital.clone();
        stamp
    }
}

fn or_missing(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        MISSING_FIELD.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled_line() -> TextLine {
        TextLine::new(
            vec![
                TextRun::new("Hello "),
                TextRun::bold("brave"),
                TextRun::new(" world"),
            ],
            3,
        )
    }

    #[test]
    fn test_plain_text_and_count() {
        let line = styled_line();
        assert_eq!(line.plain_text(), "Hello brave world");
        assert_eq!(line.char_count(), 17);
        assert!(line.is_whole());
    }

    #[test]
    fn test_split_drops_break_space() {
        let line = styled_line();
        let (head, tail) = line.split_at(11, 1);
        assert_eq!(head.plain_text(), "Hello brave");
        assert_eq!(tail.plain_text(), "world");
        assert_eq!(head.part, LinePart::Fragment);
        assert_eq!(tail.paragraph, 3);
        assert!(head.runs[1].style.bold);
        assert_eq!(tail.runs.len(), 1);
    }

    #[test]
    fn test_split_inside_run() {
        let line = styled_line();
        let (head, tail) = line.split_at(8, 0);
        assert_eq!(head.plain_text(), "Hello br");
        assert_eq!(tail.plain_text(), "ave world");
        assert!(tail.runs[0].style.bold);
    }

    #[test]
    fn test_split_multibyte() {
        let line = TextLine::plain("ação pública");
        let (head, tail) = line.split_at(4, 1);
        assert_eq!(head.plain_text(), "ação");
        assert_eq!(tail.plain_text(), "pública");
    }

    #[test]
    fn test_stamp_missing_fields() {
        let stamp = SignatureStamp::new("  Maria ", "", " ");
        assert_eq!(stamp.name, "Maria");
        assert_eq!(stamp.role, "---");
        assert_eq!(stamp.sector, "---");
    }

    #[test]
    fn test_block_variants() {
        assert!(Block::text("x").is_text());
        assert!(!Block::header("Início").is_text());
        assert!(!Block::markup("<p>x</p>").is_text());
        assert!(Block::image("a").is_image());
    }
}
