//! Generic letter layout.

use super::splitter::split_token_stream;
use super::{CapacityBudget, PagePolicy, PaginationStats, Paginator};
use crate::model::{Block, DocumentContent, Page, SignatureStamp};

/// Build the letter's block stream: body tokens, then the signature stamp.
pub fn letter_blocks(content: &DocumentContent) -> Vec<Block> {
    let mut blocks = split_token_stream(&content.body, &content.images);
    if let Some(signature) = &content.signature {
        blocks.push(Block::SignatureStamp(SignatureStamp::from(signature)));
    }
    blocks
}

/// Paginate a letter.
///
/// The first page gives up room for the addressing blocks when they are
/// shown; later pages use the normal limit.
pub fn layout_letter(
    content: &DocumentContent,
    budget: &CapacityBudget,
    hide_page_numbers: bool,
) -> (Vec<Page>, PaginationStats) {
    let policy = PagePolicy::new()
        .with_address_reserve(content.reserves_address_blocks())
        .with_hidden_page_numbers(hide_page_numbers);
    Paginator::new(budget, &policy).paginate_with_stats(letter_blocks(content))
}
