//! Page chrome around placed blocks.
//!
//! A [`Frame`] draws the letterhead, footer, page numbers and any
//! document-kind chrome (the purchase preamble, the per-diem form, the item
//! table header, the closing signature) around a page's blocks. The line
//! budgets in `layout` are calibrated against this chrome, so a frame must
//! not draw more above or below the content than the budgets assume.

use crate::layout::cost::visible_text;
use crate::model::{Block, DocumentContent, DocumentKind, Page, PageRole, SignatureStamp};

/// What a frame knows about the page it is drawing.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Position within the page's group (0-indexed)
    pub page_index: usize,

    /// Size of the page's group
    pub total_pages: usize,

    /// The document being drawn
    pub document: &'a DocumentContent,

    /// Page numbers must not be printed
    pub force_hide_page_numbers: bool,

    /// The page being drawn
    pub page: &'a Page,
}

impl<'a> FrameContext<'a> {
    /// Build the context of a page.
    pub fn new(document: &'a DocumentContent, page: &'a Page) -> Self {
        Self {
            page_index: page.page_index,
            total_pages: page.total_pages,
            document,
            force_hide_page_numbers: page.force_hide_page_numbers,
            page,
        }
    }

    /// Footer label, e.g. `Página 2 de 5`.
    pub fn page_label(&self) -> String {
        format!("Página {} de {}", self.page_index + 1, self.total_pages)
    }
}

/// Draws one page.
pub trait Frame {
    /// Append the rendering of a page to `out`.
    fn render_page(&mut self, ctx: &FrameContext<'_>, blocks: &[Block], out: &mut String);
}

/// Plain-text frame for terminal previews.
#[derive(Debug, Clone)]
pub struct TextFrame {
    width: usize,
}

impl TextFrame {
    /// Create a frame of the given width in characters.
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    fn rule(&self, ch: char, out: &mut String) {
        out.extend(std::iter::repeat(ch).take(self.width));
        out.push('\n');
    }

    fn centered(&self, text: &str, out: &mut String) {
        let len = text.chars().count();
        let pad = self.width.saturating_sub(len) / 2;
        out.extend(std::iter::repeat(' ').take(pad));
        out.push_str(text);
        out.push('\n');
    }

    fn header(&self, ctx: &FrameContext<'_>, out: &mut String) {
        let doc = ctx.document;
        let letterhead = doc
            .branding
            .as_ref()
            .map(|b| b.letterhead.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| doc.kind.label().to_uppercase());
        self.centered(&letterhead, out);
        if let Some(protocol) = &doc.protocol {
            self.centered(&format!("Protocolo {}", protocol), out);
        }
        self.rule('=', out);

        if ctx.page.number == 0 && doc.kind == DocumentKind::Letter {
            if let Some(title) = &doc.title {
                self.centered(title, out);
                out.push('\n');
            }
        }
        if ctx.page.number == 0 && doc.reserves_address_blocks() {
            let left = doc.left_address.as_deref().unwrap_or_default();
            let right = doc.right_address.as_deref().unwrap_or_default();
            let gap = self.width.saturating_sub(left.chars().count() + right.chars().count()).max(1);
            out.push_str(left);
            out.extend(std::iter::repeat(' ').take(gap));
            out.push_str(right);
            out.push_str("\n\n");
        }
    }

    fn role_chrome(&self, ctx: &FrameContext<'_>, out: &mut String) {
        match ctx.page.role {
            PageRole::Preamble => self.centered("[Requisitante e justificativa]", out),
            PageRole::Form => self.centered("[Formulário de diárias]", out),
            PageRole::Notes => self.centered("OBSERVAÇÕES", out),
            PageRole::Evidence => self.centered("COMPROVANTES", out),
            PageRole::Body if ctx.document.kind == DocumentKind::PurchaseRequest => {
                out.push_str(&format!("{:>4}  {:<40} {:>8}  {}\n", "Nº", "Item", "Qtd", "Un"));
                self.rule('-', out);
            }
            _ => {}
        }
    }

    fn block(&self, block: &Block, out: &mut String) {
        match block {
            Block::TextLine(line) => {
                out.push_str(&line.plain_text());
                out.push('\n');
            }
            Block::EmptyLine => out.push('\n'),
            Block::Image { id, caption, .. } => {
                out.push_str(&format!("[imagem {}]\n", id));
                if let Some(caption) = caption {
                    self.centered(caption, out);
                }
            }
            Block::SignatureStamp(stamp) => self.stamp(stamp, out),
            Block::SectionHeader { text } => {
                out.push_str(&text.to_uppercase());
                out.push('\n');
                self.rule('-', out);
            }
            Block::ItemRow { number, item } => {
                out.push_str(&format!(
                    "{:>4}  {:<40} {:>8}  {}\n",
                    number, item.name, item.quantity, item.unit
                ));
            }
            Block::Markup { html } => {
                let text = visible_text(html);
                let text = text.trim();
                if !text.is_empty() {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
    }

    fn stamp(&self, stamp: &SignatureStamp, out: &mut String) {
        out.push('\n');
        self.centered("______________________________", out);
        self.centered(&stamp.name, out);
        self.centered(&stamp.role, out);
        self.centered(&stamp.sector, out);
        if let Some(attestation) = &stamp.attestation {
            self.centered(
                &format!(
                    "Assinado digitalmente em {} ({})",
                    attestation.signed_at.format("%d/%m/%Y %H:%M"),
                    attestation.id
                ),
                out,
            );
        }
    }

    fn footer(&self, ctx: &FrameContext<'_>, out: &mut String) {
        if ctx.page.carries_signature {
            if let Some(signature) = &ctx.document.signature {
                self.stamp(&SignatureStamp::from(signature), out);
            }
        }
        self.rule('=', out);
        if let Some(footer) = ctx
            .document
            .branding
            .as_ref()
            .map(|b| b.footer.trim())
            .filter(|f| !f.is_empty())
        {
            self.centered(footer, out);
        }
        if !ctx.force_hide_page_numbers {
            self.centered(&ctx.page_label(), out);
        }
    }
}

impl Default for TextFrame {
    fn default() -> Self {
        Self::new(72)
    }
}

impl Frame for TextFrame {
    fn render_page(&mut self, ctx: &FrameContext<'_>, blocks: &[Block], out: &mut String) {
        self.header(ctx, out);
        self.role_chrome(ctx, out);
        for block in blocks {
            self.block(block, out);
        }
        self.footer(ctx, out);
    }
}
