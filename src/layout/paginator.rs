//! The paginator: greedy single-pass packing of blocks into pages.
//!
//! Blocks are walked in order against the current page's remaining capacity.
//! A block that fits is placed. A text line that does not fit is split at the
//! last space inside the remaining window, and its tail continues on a new
//! page. Any other block moves whole to a new page. There is no backtracking
//! across pages.

use super::cost::{cost, text_line_cost};
use super::{CapacityBudget, PagePolicy, PaginationStats};
use crate::model::{Block, Page, TextLine};

/// Slack for accumulated float error when comparing costs.
const EPSILON: f32 = 1e-4;

/// Outcome of trying to split a line into the remaining space.
enum LineSplit {
    /// Head fits here; tail continues on the next page
    Split(TextLine, TextLine),
    /// Not even one whole line of text fits
    NoRoom(TextLine),
}

/// Greedy paginator over one flow of blocks.
///
/// # Example
///
/// ```
/// use docpager::layout::{CapacityBudget, PagePolicy, Paginator};
/// use docpager::model::Block;
///
/// let budget = CapacityBudget::new(24.0, 28.0, 90);
/// let policy = PagePolicy::new();
/// let pages = Paginator::new(&budget, &policy).paginate(vec![Block::text("Prezados,")]);
/// assert_eq!(pages.len(), 1);
/// ```
pub struct Paginator<'a> {
    budget: &'a CapacityBudget,
    policy: &'a PagePolicy,
    pages: Vec<Page>,
    current: Vec<Block>,
    used: f32,
    first: bool,
    stats: PaginationStats,
}

impl<'a> Paginator<'a> {
    /// Create a paginator for one flow.
    pub fn new(budget: &'a CapacityBudget, policy: &'a PagePolicy) -> Self {
        Self {
            budget,
            policy,
            pages: Vec::new(),
            current: Vec::new(),
            used: policy.opening_reserve_lines,
            first: true,
            stats: PaginationStats::new(),
        }
    }

    /// Paginate blocks; always returns at least one page.
    pub fn paginate(self, blocks: impl IntoIterator<Item = Block>) -> Vec<Page> {
        self.paginate_with_stats(blocks).0
    }

    /// Paginate blocks and return the counters collected on the way.
    pub fn paginate_with_stats(
        mut self,
        blocks: impl IntoIterator<Item = Block>,
    ) -> (Vec<Page>, PaginationStats) {
        for block in blocks {
            self.place(block);
        }
        self.finish()
    }

    /// Capacity of the current page.
    fn limit(&self) -> f32 {
        let index = if self.first { 0 } else { self.pages.len() };
        self.policy.page_limit(self.budget, index)
    }

    fn remaining(&self) -> f32 {
        self.limit() - self.used
    }

    fn place(&mut self, mut block: Block) {
        loop {
            let needed = cost(&block, self.budget);
            let remaining = self.remaining();
            if needed <= remaining + EPSILON {
                self.push(block, needed);
                return;
            }

            let line = match block {
                Block::TextLine(line) if self.policy.split_paragraphs => line,
                other => {
                    if self.current.is_empty() {
                        self.push_overflow(other, needed);
                        return;
                    }
                    self.break_page();
                    block = other;
                    continue;
                }
            };
            match self.split_line(line, remaining) {
                LineSplit::Split(head, tail) => {
                    let head_cost = text_line_cost(&head, self.budget);
                    self.push(Block::TextLine(head), head_cost);
                    self.stats.splits += 1;
                    if tail.is_empty() {
                        return;
                    }
                    self.break_page();
                    block = Block::TextLine(tail);
                }
                LineSplit::NoRoom(line) => {
                    block = Block::TextLine(line);
                    if self.current.is_empty() {
                        self.push_overflow(block, needed);
                        return;
                    }
                    self.break_page();
                }
            }
        }
    }

    /// Split a line so its head fits in `remaining` lines.
    ///
    /// The character window is `floor(remaining) * chars_per_line`, with a
    /// width of zero treated as one character per line. The cut
    /// backs off to the last space inside the window and that space is
    /// consumed. With no space in the window the cut falls at the window edge.
    fn split_line(&mut self, line: TextLine, remaining: f32) -> LineSplit {
        let whole_lines = (remaining + EPSILON).floor().max(0.0) as usize;
        let offset = whole_lines * self.budget.chars_per_line.max(1);
        let chars: Vec<char> = line.plain_text().chars().collect();

        // Text fits but its paragraph spacing does not, or no line is left
        if whole_lines == 0 || offset >= chars.len() {
            return LineSplit::NoRoom(line);
        }

        let space = (1..=offset).rev().find(|&i| chars[i] == ' ');
        let (head, tail) = match space {
            Some(at) => line.split_at(at, 1),
            None => {
                log::warn!(
                    "hard cut inside a word: paragraph {} has no space in the first {} characters",
                    line.paragraph,
                    offset
                );
                self.stats.hard_cuts += 1;
                line.split_at(offset, 0)
            }
        };
        LineSplit::Split(head, tail)
    }

    fn push(&mut self, block: Block, cost: f32) {
        self.current.push(block);
        self.used += cost;
        self.stats.blocks_placed += 1;
    }

    fn push_overflow(&mut self, block: Block, cost: f32) {
        log::warn!(
            "block costing {:.1} lines exceeds page capacity {:.1}; placed alone",
            cost,
            self.remaining()
        );
        self.stats.overflows += 1;
        self.push(block, cost);
    }

    fn break_page(&mut self) {
        log::debug!(
            "page break after {} blocks ({:.1} lines used)",
            self.current.len(),
            self.used
        );
        let blocks = std::mem::take(&mut self.current);
        let mut page = Page::with_blocks(blocks, self.used);
        page.role = self.policy.role;
        self.pages.push(page);
        self.used = self.policy.opening_reserve_lines;
        self.first = false;
    }

    fn finish(mut self) -> (Vec<Page>, PaginationStats) {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.break_page();
        }

        let total = self.pages.len();
        for (index, page) in self.pages.iter_mut().enumerate() {
            page.page_index = index;
            page.total_pages = total;
            page.force_hide_page_numbers = self.policy.hide_page_numbers;
        }
        self.stats.page_count = total as u32;
        (self.pages, self.stats)
    }
}

/// Paginate one flow of blocks.
pub fn paginate(blocks: Vec<Block>, budget: &CapacityBudget, policy: &PagePolicy) -> Vec<Page> {
    Paginator::new(budget, policy).paginate(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinePart, PageRole};

    fn budget() -> CapacityBudget {
        CapacityBudget::new(24.0, 28.0, 90)
    }

    fn words(count: usize) -> String {
        (0..count).map(|_| "palavra").collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_empty_stream_single_page() {
        let pages = paginate(Vec::new(), &budget(), &PagePolicy::new());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
        assert_eq!(pages[0].total_pages, 1);
    }

    #[test]
    fn test_short_paragraphs_one_page() {
        let blocks = vec![Block::text("a"), Block::text("b"), Block::text("c")];
        let pages = paginate(blocks, &budget(), &PagePolicy::new());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].block_count(), 3);
        assert!((pages[0].lines_used - 6.6).abs() < 1e-4);
    }

    #[test]
    fn test_indivisible_moves_to_next_page() {
        let budget = CapacityBudget::new(14.0, 14.0, 90);
        let blocks = vec![Block::text("a"), Block::image("x")];
        let pages = paginate(blocks, &budget, &PagePolicy::new());
        assert_eq!(pages.len(), 2);
        assert!(pages[1].blocks[0].is_image());
        assert_eq!(pages[1].page_index, 1);
        assert_eq!(pages[0].total_pages, 2);
    }

    #[test]
    fn test_oversized_block_on_empty_page_overflows() {
        let budget = CapacityBudget::new(10.0, 10.0, 90);
        let (pages, stats) = Paginator::new(&budget, &PagePolicy::new())
            .paginate_with_stats(vec![Block::image("x"), Block::text("depois")]);
        assert_eq!(pages.len(), 2);
        assert_eq!(stats.overflows, 1);
    }

    #[test]
    fn test_split_at_word_boundary() {
        let budget = CapacityBudget::new(3.0, 28.0, 20);
        let text = words(20);
        let pages = paginate(vec![Block::text(text.clone())], &budget, &PagePolicy::new());
        assert_eq!(pages.len(), 2);

        let head = pages[0].blocks[0].as_text_line().unwrap();
        let tail = pages[1].blocks[0].as_text_line().unwrap();
        assert_eq!(head.part, LinePart::Fragment);
        assert!(head.char_count() <= 60);
        assert!(head.plain_text().ends_with("palavra"));
        assert_eq!(format!("{} {}", head.plain_text(), tail.plain_text()), text);
    }

    #[test]
    fn test_long_paragraph_spans_many_pages() {
        let budget = CapacityBudget::new(5.0, 5.0, 40);
        let text = words(200);
        let (pages, stats) = Paginator::new(&budget, &PagePolicy::new())
            .paginate_with_stats(vec![Block::text(text.clone())]);
        assert!(pages.len() > 5);
        assert_eq!(stats.hard_cuts, 0);
        let joined = pages
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(joined, text);
    }

    #[test]
    fn test_hard_cut_without_spaces() {
        let budget = CapacityBudget::new(2.0, 2.0, 10);
        let token = "x".repeat(45);
        let (pages, stats) = Paginator::new(&budget, &PagePolicy::new())
            .paginate_with_stats(vec![Block::text(token.clone())]);
        assert!(stats.hard_cuts >= 1);
        assert_eq!(pages[0].blocks[0].plain_text().len(), 20);
        let joined: String = pages.iter().map(|p| p.plain_text()).collect();
        assert_eq!(joined, token);
    }

    #[test]
    fn test_spacing_only_overflow_moves_line() {
        // 90 chars fit in one line, but 1 + 1.2 does not fit in 1.5
        let budget = CapacityBudget::new(3.7, 28.0, 90);
        let blocks = vec![Block::text("a"), Block::text("b".repeat(90))];
        let pages = paginate(blocks, &budget, &PagePolicy::new());
        assert_eq!(pages.len(), 2);
        assert!(pages[1].blocks[0].as_text_line().unwrap().is_whole());
    }

    #[test]
    fn test_no_split_policy_keeps_paragraphs_whole() {
        let budget = CapacityBudget::new(4.0, 4.0, 10);
        let policy = PagePolicy::new().with_paragraph_splitting(false);
        let blocks = vec![Block::text("a"), Block::text(words(3))];
        let pages = paginate(blocks, &budget, &policy);
        assert_eq!(pages.len(), 2);
        assert!(pages[1].blocks[0].as_text_line().unwrap().is_whole());
    }

    #[test]
    fn test_address_reserve_first_page_only() {
        let budget = CapacityBudget::new(12.0, 12.0, 90);
        let policy = PagePolicy::new().with_address_reserve(true);
        let blocks: Vec<_> = (0..6).map(|i| Block::text(format!("p{}", i))).collect();
        let pages = paginate(blocks, &budget, &policy);
        // 4 lines on the first page hold one paragraph, 12 hold five
        assert_eq!(pages[0].block_count(), 1);
        assert_eq!(pages[1].block_count(), 5);
    }

    #[test]
    fn test_opening_reserve_and_role() {
        let budget = CapacityBudget::new(10.0, 10.0, 90);
        let policy = PagePolicy::new()
            .with_opening_reserve(5.0)
            .with_role(PageRole::Notes)
            .with_hidden_page_numbers(true);
        let blocks: Vec<_> = (0..3).map(|_| Block::text("x")).collect();
        let pages = paginate(blocks, &budget, &policy);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].block_count(), 2);
        assert!((pages[1].lines_used - 7.2).abs() < 1e-4);
        assert!(pages.iter().all(|p| p.role == PageRole::Notes));
        assert!(pages.iter().all(|p| p.force_hide_page_numbers));
    }

    #[test]
    fn test_zero_width_budget_still_terminates() {
        let budget = CapacityBudget::new(24.0, 28.0, 0);
        let (pages, stats) = Paginator::new(&budget, &PagePolicy::new())
            .paginate_with_stats(vec![Block::text("x ".repeat(40))]);
        assert!(pages.len() > 1);
        assert_eq!(stats.overflows, 0);
        assert_eq!(stats.hard_cuts, 0);
        let placed: usize = pages.iter().map(|p| p.plain_text().matches('x').count()).sum();
        assert_eq!(placed, 40);
    }

    #[test]
    fn test_trailing_space_split_leaves_no_empty_tail() {
        let budget = CapacityBudget::new(1.0, 28.0, 10);
        let text = format!("{} ", "y".repeat(10));
        let pages = paginate(vec![Block::text(text)], &budget, &PagePolicy::new());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].blocks[0].plain_text(), "y".repeat(10));
    }
}
