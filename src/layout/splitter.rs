//! Block splitter: raw content streams into ordered atomic blocks.
//!
//! Two input shapes exist. Letter bodies are a token stream of plain text
//! with inline spans and `{{IMG::<id>}}` tokens. Dossier stage bodies are
//! rich markup split at structural boundaries after signature markers have
//! been resolved.

use super::inline::resolve_spans;
use super::markers::{resolve_markers, RichSegment};
use crate::model::{Block, ImageRef, TextLine};
use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

fn image_token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\{\{IMG::([^}]*)\}\}").expect("valid image token pattern"))
}

fn boundary_regex() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"(?i)</p>|</div>|<br\s*/?>").expect("valid boundary pattern"))
}

/// Split a plain body with image tokens into blocks.
///
/// A whitespace-only body yields no blocks. Empty lines are preserved as
/// `EmptyLine`, except the single newline separating text from an image
/// token, which belongs to the token.
pub fn split_token_stream(body: &str, images: &[ImageRef]) -> Vec<Block> {
    let text: String = body.nfc().collect();
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut blocks = Vec::new();
    let mut paragraph = 0;
    let mut last = 0;
    let mut after_image = false;

    for caps in image_token_regex().captures_iter(&text) {
        let Some(token) = caps.get(0) else { continue };
        let mut segment = &text[last..token.start()];
        if after_image {
            segment = strip_leading_newline(segment);
        }
        segment = strip_trailing_newline(segment);
        push_paragraphs(segment, &mut blocks, &mut paragraph);

        blocks.push(image_block(caps[1].trim(), images));
        after_image = true;
        last = token.end();
    }

    let mut segment = &text[last..];
    if after_image {
        segment = strip_leading_newline(segment);
    }
    push_paragraphs(segment, &mut blocks, &mut paragraph);

    blocks
}

/// Split newline-separated plain text into paragraph blocks.
pub fn split_paragraphs(text: &str) -> Vec<Block> {
    let text: String = text.nfc().collect();
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut blocks = Vec::new();
    let mut paragraph = 0;
    push_paragraphs(&text, &mut blocks, &mut paragraph);
    blocks
}

/// Split a rich stage body into markup and signature blocks.
pub fn split_rich_fragments(html: &str) -> Vec<Block> {
    let html: String = html.nfc().collect();
    let mut blocks = Vec::new();

    for segment in resolve_markers(&html) {
        match segment {
            RichSegment::Signature(stamp) => blocks.push(Block::SignatureStamp(stamp)),
            RichSegment::Markup(markup) => blocks.extend(
                split_after_boundaries(&markup)
                    .into_iter()
                    .map(|html| Block::Markup { html }),
            ),
        }
    }

    blocks
}

/// Split markup after each `</p>`, `</div>` or `<br>`.
///
/// The boundary stays with the fragment on its left, so a trailing line
/// break belongs to the line it ends. Whitespace-only fragments are dropped.
pub fn split_after_boundaries(html: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut last = 0;

    for boundary in boundary_regex().find_iter(html) {
        push_fragment(&mut fragments, &html[last..boundary.end()]);
        last = boundary.end();
    }
    push_fragment(&mut fragments, &html[last..]);

    fragments
}

fn strip_leading_newline(segment: &str) -> &str {
    segment
        .strip_prefix("\r\n")
        .or_else(|| segment.strip_prefix('\n'))
        .unwrap_or(segment)
}

fn strip_trailing_newline(segment: &str) -> &str {
    segment
        .strip_suffix("\r\n")
        .or_else(|| segment.strip_suffix('\n'))
        .unwrap_or(segment)
}

fn push_fragment(fragments: &mut Vec<String>, fragment: &str) {
    if !fragment.trim().is_empty() {
        fragments.push(fragment.to_string());
    }
}

fn push_paragraphs(segment: &str, blocks: &mut Vec<Block>, paragraph: &mut usize) {
    if segment.is_empty() {
        return;
    }
    for line in segment.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let runs = resolve_spans(line);
        if runs.iter().all(|run| run.text.trim().is_empty()) {
            blocks.push(Block::EmptyLine);
        } else {
            blocks.push(Block::TextLine(TextLine::new(runs, *paragraph)));
            *paragraph += 1;
        }
    }
}

fn image_block(id: &str, images: &[ImageRef]) -> Block {
    let known = images.iter().find(|img| img.id == id);
    Block::Image {
        id: id.to_string(),
        url: known.map(|img| img.url.clone()),
        width: known.and_then(|img| img.width),
        caption: None,
    }
}
