//! Rendering options and configuration.

use std::ops::RangeInclusive;

/// Options for rendering paginated documents.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page selection
    pub page_selection: PageSelection,

    /// Width of the plain-text frame in characters
    pub frame_width: usize,

    /// Append pagination statistics after the last page
    pub include_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }

    /// Set the frame width.
    pub fn with_frame_width(mut self, width: usize) -> Self {
        self.frame_width = width.max(20);
        self
    }

    /// Enable or disable the statistics footer.
    pub fn with_stats(mut self, include: bool) -> Self {
        self.include_stats = include;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_selection: PageSelection::All,
            frame_width: 72,
            include_stats: false,
        }
    }
}

/// Page selection for rendering.
#[derive(Debug, Clone, Default)]
pub enum PageSelection {
    /// Render all pages
    #[default]
    All,
    /// Render a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Render specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start = parse_page(start)?;
                let end = parse_page(end)?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            match part.split_once('-') {
                Some((start, end)) => pages.extend(parse_page(start)?..=parse_page(end)?),
                None => pages.push(parse_page(part)?),
            }
        }
        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page(s: &str) -> Result<u32, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("Invalid page number: {:?}", s.trim()))
}
