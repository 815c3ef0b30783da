//! Per-diem request layout.
//!
//! The request itself is a single form page. Free-text notes and photo
//! evidence follow as annex flows: notes are packed whole paragraph by whole
//! paragraph, evidence is sliced into fixed pairs without cost estimation.

use super::policy::{chunk_fixed, number_group};
use super::splitter::split_paragraphs;
use super::{CapacityBudget, PagePolicy, PaginationStats, Paginator};
use crate::model::{Block, DocumentContent, EvidenceItem, Page, PageRole};

/// Upper bound on lines per notes page.
pub const NOTES_PAGE_LINES: f32 = 30.0;

/// Evidence exhibits per page.
pub const EVIDENCE_PER_PAGE: usize = 2;

/// Paginate a per-diem request: form, then notes, then evidence.
pub fn layout_per_diem(
    content: &DocumentContent,
    budget: &CapacityBudget,
    hide_page_numbers: bool,
) -> (Vec<Page>, PaginationStats) {
    let mut pages = vec![Page::new(PageRole::Form)];
    let mut stats = PaginationStats::new();

    let notes = split_paragraphs(&content.extra_notes);
    if !notes.is_empty() {
        let (notes_pages, notes_stats) = layout_notes(notes, budget);
        pages.extend(notes_pages);
        stats.merge(&notes_stats);
    }

    pages.extend(evidence_pages(&content.evidence));

    number_group(&mut pages, 0);
    for page in &mut pages {
        page.force_hide_page_numbers = hide_page_numbers;
    }
    stats.page_count = pages.len() as u32;
    (pages, stats)
}

fn layout_notes(notes: Vec<Block>, budget: &CapacityBudget) -> (Vec<Page>, PaginationStats) {
    let mut capped = *budget;
    capped.first_page_limit = capped.first_page_limit.min(NOTES_PAGE_LINES);
    capped.normal_page_limit = capped.normal_page_limit.min(NOTES_PAGE_LINES);

    let policy = PagePolicy::new()
        .with_paragraph_splitting(false)
        .with_role(PageRole::Notes);
    Paginator::new(&capped, &policy).paginate_with_stats(notes)
}

/// Slice evidence into pages of [`EVIDENCE_PER_PAGE`] captioned images.
pub fn evidence_pages(evidence: &[EvidenceItem]) -> Vec<Page> {
    chunk_fixed(evidence, EVIDENCE_PER_PAGE, PageRole::Evidence, |index, item| {
        Block::Image {
            id: format!("evidence-{}", index + 1),
            url: (!item.image_url.is_empty()).then(|| item.image_url.clone()),
            width: None,
            caption: Some(item.title.clone()),
        }
    })
}
