//! Page policies and the composable hooks layered around the paginator.
//!
//! `PagePolicy` tunes the generic walk. The free functions are the pre/post
//! steps document types combine: reserved leading pages, trailing signature
//! room, fixed-size chunking and group numbering.

use super::budget::ADDRESS_BLOCK_RESERVE_LINES;
use super::CapacityBudget;
use crate::model::{Block, Page, PageRole};

/// Options for one paginated flow.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePolicy {
    /// Take the addressing blocks' room from the first page
    pub reserve_address_blocks: bool,

    /// Lines the addressing blocks take
    pub address_reserve_lines: f32,

    /// Lines already used when every page opens (e.g. a table header)
    pub opening_reserve_lines: f32,

    /// Allow splitting text lines across pages
    pub split_paragraphs: bool,

    /// Role assigned to produced pages
    pub role: PageRole,

    /// Tell the frame not to print page numbers
    pub hide_page_numbers: bool,

    /// The flow starts after reserved pages, so its first page is a
    /// continuation page held to the normal limit
    pub continuation: bool,
}

impl PagePolicy {
    /// Create a policy with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the first-page address reserve.
    pub fn with_address_reserve(mut self, reserve: bool) -> Self {
        self.reserve_address_blocks = reserve;
        self
    }

    /// Set the lines used when a page opens.
    pub fn with_opening_reserve(mut self, lines: f32) -> Self {
        self.opening_reserve_lines = lines;
        self
    }

    /// Enable or disable paragraph splitting.
    pub fn with_paragraph_splitting(mut self, split: bool) -> Self {
        self.split_paragraphs = split;
        self
    }

    /// Set the role of produced pages.
    pub fn with_role(mut self, role: PageRole) -> Self {
        self.role = role;
        self
    }

    /// Hide page numbers on produced pages.
    pub fn with_hidden_page_numbers(mut self, hide: bool) -> Self {
        self.hide_page_numbers = hide;
        self
    }

    /// Start the flow on a continuation page.
    pub fn with_continuation(mut self, continuation: bool) -> Self {
        self.continuation = continuation;
        self
    }

    /// Capacity of a page at `page_index` within this flow.
    pub fn page_limit(&self, budget: &CapacityBudget, page_index: usize) -> f32 {
        let first = page_index == 0 && !self.continuation;
        let mut limit = budget.limit(first);
        if first && self.reserve_address_blocks {
            limit -= self.address_reserve_lines;
        }
        limit
    }
}

impl Default for PagePolicy {
    fn default() -> Self {
        Self {
            reserve_address_blocks: false,
            address_reserve_lines: ADDRESS_BLOCK_RESERVE_LINES,
            opening_reserve_lines: 0.0,
            split_paragraphs: true,
            role: PageRole::Body,
            hide_page_numbers: false,
            continuation: false,
        }
    }
}

/// Insert `count` empty pages with `role` before the flow.
pub fn reserve_leading_pages(pages: &mut Vec<Page>, role: PageRole, count: usize) {
    let leading = (0..count).map(|_| Page::new(role));
    pages.splice(0..0, leading);
}

/// Make sure the closing signature fits after the flow.
///
/// If the last page has fewer than `reserve_lines` left, an empty
/// `SignatureOnly` page is appended. The page that will host the signature is
/// flagged `carries_signature`. Returns whether a page was added.
pub fn ensure_trailing_room(
    pages: &mut Vec<Page>,
    budget: &CapacityBudget,
    policy: &PagePolicy,
    reserve_lines: f32,
) -> bool {
    let Some(last) = pages.last_mut() else {
        let mut page = Page::new(PageRole::SignatureOnly);
        page.carries_signature = true;
        pages.push(page);
        return true;
    };

    let headroom = policy.page_limit(budget, last.page_index) - last.lines_used;
    if headroom + 1e-4 >= reserve_lines {
        last.carries_signature = true;
        return false;
    }

    log::debug!(
        "{:.1} lines left on the last page, signature needs {:.1}; adding a signature page",
        headroom,
        reserve_lines
    );
    let mut page = Page::new(PageRole::SignatureOnly);
    page.carries_signature = true;
    page.force_hide_page_numbers = last.force_hide_page_numbers;
    pages.push(page);
    true
}

/// Slice an ordered list into pages of exactly `size` items (last may hold fewer).
///
/// No cost estimation is involved. An empty list yields no pages.
pub fn chunk_fixed<T, F>(items: &[T], size: usize, role: PageRole, mut to_block: F) -> Vec<Page>
where
    F: FnMut(usize, &T) -> Block,
{
    let size = size.max(1);
    items
        .chunks(size)
        .enumerate()
        .map(|(chunk_index, chunk)| {
            let mut page = Page::new(role);
            for (offset, item) in chunk.iter().enumerate() {
                page.add_block(to_block(chunk_index * size + offset, item));
            }
            page
        })
        .collect()
}

/// Assign group membership and in-group numbering to a run of pages.
pub fn number_group(pages: &mut [Page], group: usize) {
    let total = pages.len();
    for (index, page) in pages.iter_mut().enumerate() {
        page.group = group;
        page.page_index = index;
        page.total_pages = total;
    }
}
