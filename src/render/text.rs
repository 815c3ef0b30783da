//! Plain-text page previews.

use crate::error::Result;
use crate::model::{DocumentContent, PaginatedDocument};

use super::{Frame, FrameContext, RenderOptions, TextFrame};

/// Render the selected pages with the plain-text frame.
pub fn to_text(
    doc: &PaginatedDocument,
    content: &DocumentContent,
    options: &RenderOptions,
) -> Result<String> {
    let mut frame = TextFrame::new(options.frame_width);
    Ok(render_pages(doc, content, &mut frame, options))
}

/// Render the selected pages with any frame.
pub fn render_pages<F: Frame + ?Sized>(
    doc: &PaginatedDocument,
    content: &DocumentContent,
    frame: &mut F,
    options: &RenderOptions,
) -> String {
    let mut output = String::new();

    for page in doc
        .pages
        .iter()
        .filter(|page| options.page_selection.includes(page.number as u32 + 1))
    {
        if !output.is_empty() {
            output.push('\n');
        }
        let ctx = FrameContext::new(content, page);
        frame.render_page(&ctx, &page.blocks, &mut output);
    }

    if options.include_stats {
        let stats = &doc.stats;
        output.push_str(&format!(
            "\n{} pages, {} blocks, {} splits, {} hard cuts, {} overflows\n",
            doc.page_count(),
            stats.blocks_placed,
            stats.splits,
            stats.hard_cuts,
            stats.overflows
        ));
    }

    output
}
