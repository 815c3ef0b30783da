//! Cost estimator: converts a block into estimated printed lines.
//!
//! Costs are a pure function of block content and the budget, never of where
//! the block lands. Nothing is measured; widths come from `chars_per_line`.

use super::CapacityBudget;
use crate::model::{Block, TextLine};
use regex::Regex;
use std::sync::OnceLock;

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"))
}

fn img_regex() -> &'static Regex {
    static IMG: OnceLock<Regex> = OnceLock::new();
    IMG.get_or_init(|| Regex::new(r"(?i)<img\b").expect("valid img pattern"))
}

/// Estimated line cost of a block.
pub fn cost(block: &Block, budget: &CapacityBudget) -> f32 {
    let costs = &budget.costs;
    match block {
        Block::TextLine(line) => text_line_cost(line, budget),
        Block::EmptyLine => 1.0,
        Block::Image { .. } => costs.image_lines,
        Block::SignatureStamp(_) => costs.signature_lines,
        Block::SectionHeader { .. } => costs.section_header_lines,
        Block::ItemRow { item, .. } => {
            text_lines(item.name.chars().count(), budget.chars_per_line) + costs.paragraph_spacing
        }
        Block::Markup { html } => markup_cost(html, budget),
    }
}

/// Cost of a text line; whole paragraphs carry their bottom margin.
pub fn text_line_cost(line: &TextLine, budget: &CapacityBudget) -> f32 {
    let lines = text_lines(line.char_count(), budget.chars_per_line);
    if line.is_whole() {
        lines + budget.costs.paragraph_spacing
    } else {
        lines
    }
}

/// Lines needed for `chars` characters, never less than one.
pub fn text_lines(chars: usize, chars_per_line: usize) -> f32 {
    let per_line = chars_per_line.max(1);
    chars.div_ceil(per_line).max(1) as f32
}

/// Visible text of a markup fragment: tags removed, `&nbsp;` as a space.
pub fn visible_text(html: &str) -> String {
    tag_regex()
        .replace_all(html, "")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

/// Check if a fragment closes a paragraph or block container.
pub fn closes_block(html: &str) -> bool {
    let tail = html.trim_end().to_ascii_lowercase();
    tail.ends_with("</p>") || tail.ends_with("</div>")
}

fn markup_cost(html: &str, budget: &CapacityBudget) -> f32 {
    let images = img_regex().find_iter(html).count() as f32 * budget.costs.image_lines;
    let text = visible_text(html);

    let text_cost = if !text.trim().is_empty() {
        text_lines(text.chars().count(), budget.chars_per_line)
    } else if html.to_ascii_lowercase().contains("<br") {
        1.0
    } else {
        // Structural residue, e.g. a lone closing tag
        0.0
    };

    let spacing = if text_cost > 0.0 && closes_block(html) {
        budget.costs.paragraph_spacing
    } else {
        0.0
    };

    images + text_cost + spacing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PurchaseItem, SignatureStamp, TextRun};

    fn budget() -> CapacityBudget {
        CapacityBudget::new(24.0, 28.0, 90)
    }

    #[test]
    fn test_text_lines_minimum_one() {
        assert_eq!(text_lines(0, 90), 1.0);
        assert_eq!(text_lines(90, 90), 1.0);
        assert_eq!(text_lines(91, 90), 2.0);
        assert_eq!(text_lines(5, 0), 5.0);
    }

    #[test]
    fn test_whole_paragraph_spacing() {
        let b = budget();
        let whole = Block::text("short");
        assert!((cost(&whole, &b) - 2.2).abs() < 1e-6);

        let (head, _) = TextLine::plain("short text").split_at(5, 1);
        assert_eq!(cost(&Block::TextLine(head), &b), 1.0);
    }

    #[test]
    fn test_flat_costs() {
        let b = budget();
        assert_eq!(cost(&Block::EmptyLine, &b), 1.0);
        assert_eq!(cost(&Block::image("x"), &b), 12.0);
        assert_eq!(cost(&Block::header("Etapa 01"), &b), 3.0);
        let stamp = Block::SignatureStamp(SignatureStamp::new("a", "b", "c"));
        assert_eq!(cost(&stamp, &b), 5.0);
    }

    #[test]
    fn test_empty_text_costs_minimum() {
        let b = budget().with_paragraph_spacing(0.0);
        let empty = Block::TextLine(TextLine::new(vec![TextRun::new("")], 0));
        assert_eq!(cost(&empty, &b), 1.0);
    }

    #[test]
    fn test_item_row_cost() {
        let b = budget().with_paragraph_spacing(0.8);
        let row = Block::ItemRow {
            number: 1,
            item: PurchaseItem::new("Resma de papel A4", 10.0, "cx"),
        };
        assert!((cost(&row, &b) - 1.8).abs() < 1e-6);
    }

    #[test]
    fn test_markup_costs() {
        let b = budget();
        let para = Block::markup("<p>Objeto da licitação</p>");
        assert!((cost(&para, &b) - 2.2).abs() < 1e-6);

        let br = Block::markup("linha<br>");
        assert_eq!(cost(&br, &b), 1.0);

        let empty_br = Block::markup("<p><br>");
        assert_eq!(cost(&empty_br, &b), 1.0);

        let residue = Block::markup("</p>");
        assert_eq!(cost(&residue, &b), 0.0);

        let img = Block::markup(r#"<p><img src="a.png"></p>"#);
        assert_eq!(cost(&img, &b), 12.0);
    }

    #[test]
    fn test_visible_text() {
        assert_eq!(visible_text("<p><b>a</b>&nbsp;b</p>"), "a b");
        assert!(closes_block("<p>x</P>  "));
        assert!(!closes_block("x<br>"));
    }
}
