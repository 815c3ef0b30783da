//! Inline formatting span resolution for plain-body text.
//!
//! Recognizes `<b>`, `<strong>`, `<i>`, `<em>` and `<u>` with their closing
//! tags. State is three booleans rather than a stack: an opening tag sets a
//! flag, any matching closing tag clears it, so malformed nesting degrades
//! silently instead of failing.

use crate::model::{TextRun, TextStyle};
use regex::Regex;
use std::sync::OnceLock;

fn span_regex() -> &'static Regex {
    static SPAN: OnceLock<Regex> = OnceLock::new();
    SPAN.get_or_init(|| {
        Regex::new(r"(?i)<(/?)(b|strong|i|em|u)>").expect("valid span pattern")
    })
}

/// Resolve one paragraph into styled runs.
///
/// Formatting state starts plain for every paragraph. Adjacent text with the
/// same style is merged into one run.
pub fn resolve_spans(paragraph: &str) -> Vec<TextRun> {
    let mut runs: Vec<TextRun> = Vec::new();
    let mut style = TextStyle::default();
    let mut last = 0;

    for caps in span_regex().captures_iter(paragraph) {
        let Some(tag) = caps.get(0) else { continue };
        push_text(&mut runs, &paragraph[last..tag.start()], style);
        last = tag.end();

        let closing = !caps[1].is_empty();
        match caps[2].to_ascii_lowercase().as_str() {
            "b" | "strong" => style.bold = !closing,
            "i" | "em" => style.italic = !closing,
            _ => style.underline = !closing,
        }
    }
    push_text(&mut runs, &paragraph[last..], style);

    runs
}

fn push_text(runs: &mut Vec<TextRun>, text: &str, style: TextStyle) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(prev) if prev.style == style => prev.text.push_str(text),
        _ => runs.push(TextRun::styled(text, style)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paragraph() {
        let runs = resolve_spans("Senhor Secretário,");
        assert_eq!(runs.len(), 1);
        assert!(runs[0].style.is_plain());
    }

    #[test]
    fn test_bold_and_italic() {
        let runs = resolve_spans("Solicito <b>com urgência</b> o <em>envio</em>.");
        let texts: Vec<_> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Solicito ", "com urgência", " o ", "envio", "."]);
        assert!(runs[1].style.bold);
        assert!(runs[3].style.italic);
        assert!(runs[4].style.is_plain());
    }

    #[test]
    fn test_strong_closes_b() {
        // Boolean state: </strong> clears bold opened by <b>
        let runs = resolve_spans("<b>a</strong>b");
        assert!(runs[0].style.bold);
        assert!(!runs[1].style.bold);
    }

    #[test]
    fn test_nested_underline() {
        let runs = resolve_spans("<u><b>x</b>y</u>");
        assert!(runs[0].style.bold && runs[0].style.underline);
        assert!(!runs[1].style.bold && runs[1].style.underline);
    }

    #[test]
    fn test_unclosed_tag_runs_to_end() {
        let runs = resolve_spans("<i>sem fechamento");
        assert_eq!(runs.len(), 1);
        assert!(runs[0].style.italic);
    }

    #[test]
    fn test_tags_only_yield_no_runs() {
        assert!(resolve_spans("<b></b>").is_empty());
    }

    #[test]
    fn test_merges_same_style() {
        let runs = resolve_spans("a<b></b>b");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "ab");
    }
}
