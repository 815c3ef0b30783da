//! Signature marker resolution for rich-text stage bodies.
//!
//! Authors type `[ASSINATURA: name | role | sector]` anywhere in the editor.
//! The editor often wraps it in a styled inline container, so the wrapped
//! ("rich") form is matched first and the bare ("plain") form only in the
//! text left between rich matches. Matching is regex-based: a marker wrapped
//! in two nested containers resolves the inner one and leaves the outer pair
//! as empty markup.

use crate::model::SignatureStamp;
use regex::Regex;
use std::sync::OnceLock;

fn rich_regex() -> &'static Regex {
    static RICH: OnceLock<Regex> = OnceLock::new();
    RICH.get_or_init(|| {
        Regex::new(
            r"(?i)<(?:span|strong|b|em|i|u)\b[^>]*>\s*\[ASSINATURA:([^\]]*)\]\s*</(?:span|strong|b|em|i|u)>",
        )
        .expect("valid rich marker pattern")
    })
}

fn plain_regex() -> &'static Regex {
    static PLAIN: OnceLock<Regex> = OnceLock::new();
    PLAIN.get_or_init(|| Regex::new(r"(?i)\[ASSINATURA:([^\]]*)\]").expect("valid marker pattern"))
}

/// A piece of a stage body after marker resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichSegment {
    /// Markup between markers
    Markup(String),
    /// A resolved signature marker
    Signature(SignatureStamp),
}

/// Replace every signature marker with a structured stamp.
pub fn resolve_markers(html: &str) -> Vec<RichSegment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in rich_regex().captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        resolve_plain(&html[last..whole.start()], &mut segments);
        segments.push(RichSegment::Signature(parse_fields(&caps[1])));
        last = whole.end();
    }
    resolve_plain(&html[last..], &mut segments);

    segments
}

/// Count the markers a body would resolve, without building segments.
pub fn count_markers(html: &str) -> usize {
    resolve_markers(html)
        .iter()
        .filter(|s| matches!(s, RichSegment::Signature(_)))
        .count()
}

fn resolve_plain(html: &str, segments: &mut Vec<RichSegment>) {
    let mut last = 0;
    for caps in plain_regex().captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        push_markup(segments, &html[last..whole.start()]);
        segments.push(RichSegment::Signature(parse_fields(&caps[1])));
        last = whole.end();
    }
    push_markup(segments, &html[last..]);
}

fn push_markup(segments: &mut Vec<RichSegment>, html: &str) {
    if !html.is_empty() {
        segments.push(RichSegment::Markup(html.to_string()));
    }
}

fn parse_fields(inner: &str) -> SignatureStamp {
    let mut fields = inner.splitn(3, '|');
    let name = fields.next().unwrap_or_default();
    let role = fields.next().unwrap_or_default();
    let sector = fields.next().unwrap_or_default();
    SignatureStamp::new(name, role, sector)
}
