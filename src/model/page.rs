//! Page-level types.

use super::{Block, DocumentKind};
use crate::layout::PaginationStats;
use serde::{Deserialize, Serialize};

/// What a page is for, independent of its content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageRole {
    /// Paginated body content
    #[default]
    Body,
    /// Reserved for requester metadata and justification
    Preamble,
    /// Single-page form drawn entirely by the frame
    Form,
    /// Per-diem extra notes
    Notes,
    /// Per-diem evidence exhibits
    Evidence,
    /// Empty page hosting only the closing signature
    SignatureOnly,
    /// One page of a dossier stage
    Stage,
}

/// One fixed-size printable canvas's worth of placed blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Position in the whole document (0-indexed, stable)
    pub number: usize,

    /// Position within the containing group (0-indexed)
    pub page_index: usize,

    /// Size of the containing group
    pub total_pages: usize,

    /// Containing group (dossier stage index, otherwise 0)
    pub group: usize,

    /// Page role
    pub role: PageRole,

    /// Placed blocks, in order
    pub blocks: Vec<Block>,

    /// Estimated lines consumed, including reserved opening lines
    pub lines_used: f32,

    /// First page of a dossier stage
    #[serde(default)]
    pub is_first_page_of_stage: bool,

    /// Page belongs to the opening stage (Início)
    #[serde(default)]
    pub is_start_stage: bool,

    /// Page belongs to the stage currently being edited
    #[serde(default)]
    pub is_active_view: bool,

    /// The frame draws the closing signature on this page
    #[serde(default)]
    pub carries_signature: bool,

    /// The frame must not print page numbers
    #[serde(default)]
    pub force_hide_page_numbers: bool,
}

impl Page {
    /// Create an empty page with the given role.
    pub fn new(role: PageRole) -> Self {
        Self {
            number: 0,
            page_index: 0,
            total_pages: 1,
            group: 0,
            role,
            blocks: Vec::new(),
            lines_used: 0.0,
            is_first_page_of_stage: false,
            is_start_stage: false,
            is_active_view: false,
            carries_signature: false,
            force_hide_page_numbers: false,
        }
    }

    /// Create a body page holding the given blocks.
    pub fn with_blocks(blocks: Vec<Block>, lines_used: f32) -> Self {
        Self {
            blocks,
            lines_used,
            ..Self::new(PageRole::Body)
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The ordered page sequence produced for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedDocument {
    /// Document type the pages were laid out for
    pub kind: DocumentKind,

    /// Pages in print order; never empty
    pub pages: Vec<Page>,

    /// Counters collected during pagination
    pub stats: PaginationStats,
}

impl PaginatedDocument {
    /// Wrap a page sequence, renumbering pages in print order.
    pub fn new(kind: DocumentKind, mut pages: Vec<Page>, stats: PaginationStats) -> Self {
        if pages.is_empty() {
            pages.push(Page::new(PageRole::Body));
        }
        for (number, page) in pages.iter_mut().enumerate() {
            page.number = number;
        }
        Self { kind, pages, stats }
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by its 0-indexed number.
    pub fn get_page(&self, number: usize) -> Option<&Page> {
        self.pages.get(number)
    }

    /// Iterate over the pages of one group.
    pub fn group(&self, group: usize) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(move |page| page.group == group)
    }

    /// All placed blocks in print order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.pages.iter().flat_map(|page| page.blocks.iter())
    }

    /// Get plain text content of every page.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
