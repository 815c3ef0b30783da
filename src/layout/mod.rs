//! Layout module: from document content to pages.
//!
//! Content is split into blocks, every block gets an estimated line cost,
//! and the paginator packs blocks greedily into pages under a
//! [`CapacityBudget`]. Each document kind is a budget plus a [`PagePolicy`]
//! plus a few hooks from [`policy`].

mod budget;
pub mod cost;
pub mod dossier;
mod inline;
pub mod letter;
pub mod markers;
mod memo;
mod options;
mod paginator;
pub mod per_diem;
pub mod policy;
pub mod purchase;
pub mod splitter;
mod stats;

pub use budget::{
    BlockCosts, BudgetTable, CapacityBudget, ADDRESS_BLOCK_RESERVE_LINES, IMAGE_LINES_ALLOWANCE,
    NOTES_PARAGRAPH_SPACING, PARAGRAPH_SPACING, PURCHASE_ITEM_SPACING, SECTION_HEADER_LINES,
    SIGNATURE_STAMP_LINES,
};
pub use cost::cost;
pub use dossier::{stage_title, StageView, DRAFT_PLACEHOLDER, MAX_STAGES};
pub use inline::resolve_spans;
pub use memo::{LayoutKey, PaginationCache};
pub use options::LayoutOptions;
pub use paginator::{paginate, Paginator};
pub use policy::PagePolicy;
pub use stats::PaginationStats;

use crate::error::Result;
use crate::model::{DocumentContent, DocumentKind, PaginatedDocument};

/// Lay out document content into pages.
///
/// Fails only on an invalid budget or an out-of-range dossier stage view;
/// pagination itself never fails.
pub fn layout_document(content: &DocumentContent, options: &LayoutOptions) -> Result<PaginatedDocument> {
    let budget = options.budget(content.kind);
    budget.validate()?;
    let hide = options.hide_page_numbers;

    let (pages, stats) = match content.kind {
        DocumentKind::Letter => letter::layout_letter(content, budget, hide),
        DocumentKind::PurchaseRequest => purchase::layout_purchase(content, budget, hide),
        DocumentKind::PerDiem => per_diem::layout_per_diem(content, budget, hide),
        DocumentKind::Dossier => dossier::layout_dossier(content, budget, &options.stage_view, hide)?,
    };

    if stats.has_degraded_output() {
        log::warn!(
            "{} laid out with {} hard cuts and {} overflows",
            content.kind.label(),
            stats.hard_cuts,
            stats.overflows
        );
    }
    log::debug!("{} laid out on {} pages", content.kind.label(), pages.len());

    Ok(PaginatedDocument::new(content.kind, pages, stats))
}
