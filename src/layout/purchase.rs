//! Purchase request layout.
//!
//! Page 0 is a reserved preamble drawn by the frame (requester metadata and
//! justification). Item rows start on page 1, every items page opens below
//! the table header, and the closing signature either fits under the last
//! row or gets a page of its own.

use super::policy::{ensure_trailing_room, number_group, reserve_leading_pages};
use super::{CapacityBudget, PagePolicy, PaginationStats, Paginator};
use crate::model::{Block, DocumentContent, Page, PageRole};

/// Lines taken by the item table header on every items page.
pub const ITEMS_HEADER_LINES: f32 = 5.0;

/// Lines the closing signature block needs under the last row.
pub const SIGNATURE_BLOCK_LINES: f32 = 9.0;

/// Build one row block per item, numbered from 1.
pub fn item_blocks(content: &DocumentContent) -> Vec<Block> {
    content
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| Block::ItemRow {
            number: index + 1,
            item: item.clone(),
        })
        .collect()
}

/// Paginate a purchase request.
pub fn layout_purchase(
    content: &DocumentContent,
    budget: &CapacityBudget,
    hide_page_numbers: bool,
) -> (Vec<Page>, PaginationStats) {
    // Items follow the preamble page, so none of them sits on the first page
    let policy = PagePolicy::new()
        .with_continuation(true)
        .with_opening_reserve(ITEMS_HEADER_LINES)
        .with_paragraph_splitting(false)
        .with_hidden_page_numbers(hide_page_numbers);

    let (mut pages, mut stats) = Paginator::new(budget, &policy).paginate_with_stats(item_blocks(content));
    ensure_trailing_room(&mut pages, budget, &policy, SIGNATURE_BLOCK_LINES);
    reserve_leading_pages(&mut pages, PageRole::Preamble, 1);

    number_group(&mut pages, 0);
    for page in &mut pages {
        page.force_hide_page_numbers = hide_page_numbers;
    }
    stats.page_count = pages.len() as u32;
    (pages, stats)
}
