//! # docpager
//!
//! Print-accurate pagination for official administrative documents.
//!
//! This library takes the structured content of a letter, purchase request,
//! per-diem request or multi-stage dossier and partitions it into fixed-size
//! pages, never placing content off-page or mid-element.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docpager::{load_file, paginate_document, render};
//!
//! fn main() -> docpager::Result<()> {
//!     // Load document content exported by the editor
//!     let content = load_file("oficio.json")?;
//!
//!     // Lay it out with the default budgets
//!     let doc = paginate_document(&content)?;
//!     println!("{} pages", doc.page_count());
//!
//!     // Preview as plain text
//!     let preview = render::to_text(&doc, &content, &render::RenderOptions::default())?;
//!     println!("{}", preview);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **One paginator**: four document kinds as budget + policy + hooks
//! - **Word-safe splitting**: long paragraphs break at the last space that fits
//! - **Signature markers**: `[ASSINATURA: name | role | sector]` becomes a stamp
//! - **Configurable budgets**: line limits and block costs load from JSON
//! - **Memoization**: [`PaginationCache`] re-paginates only on layout changes

pub mod error;
pub mod layout;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{
    layout_document, BlockCosts, BudgetTable, CapacityBudget, LayoutKey, LayoutOptions,
    PagePolicy, PaginationCache, PaginationStats, Paginator, StageView,
};
pub use model::{
    Block, DocumentContent, DocumentKind, Page, PageRole, PaginatedDocument, Signature,
    SignatureStamp, Stage, TextLine, TextRun, TextStyle,
};
pub use render::{Frame, FrameContext, JsonFormat, PageSelection, RenderOptions, TextFrame};

use std::io::Read;
use std::path::Path;

/// Load document content from a JSON file.
///
/// # Example
///
/// ```no_run
/// use docpager::load_file;
///
/// let content = load_file("oficio.json").unwrap();
/// println!("{}", content.kind.label());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<DocumentContent> {
    let json = std::fs::read_to_string(path)?;
    from_json(&json)
}

/// Parse document content from a JSON string.
pub fn from_json(json: &str) -> Result<DocumentContent> {
    Ok(serde_json::from_str(json)?)
}

/// Read document content from a reader.
///
/// # Example
///
/// ```no_run
/// use docpager::from_reader;
///
/// let content = from_reader(std::io::stdin()).unwrap();
/// ```
pub fn from_reader<R: Read>(reader: R) -> Result<DocumentContent> {
    Ok(serde_json::from_reader(reader)?)
}

/// Paginate document content with the default budgets.
///
/// # Example
///
/// ```
/// use docpager::{paginate_document, DocumentContent};
///
/// let content = DocumentContent::letter("Prezados,\nSegue o relatório.");
/// let doc = paginate_document(&content).unwrap();
/// assert_eq!(doc.page_count(), 1);
/// ```
pub fn paginate_document(content: &DocumentContent) -> Result<PaginatedDocument> {
    layout_document(content, &LayoutOptions::default())
}

/// Paginate document content with custom options.
///
/// # Example
///
/// ```
/// use docpager::{paginate_document_with, DocumentContent, DocumentKind, LayoutOptions, Stage, StageView};
///
/// let mut content = DocumentContent::new(DocumentKind::Dossier);
/// content.stages = vec![Stage::with_body("<p>Abertura</p>")];
/// let options = LayoutOptions::new().with_stage_view(StageView::active(1));
/// let doc = paginate_document_with(&content, &options).unwrap();
/// assert!(doc.pages.iter().any(|p| p.is_active_view));
/// ```
pub fn paginate_document_with(
    content: &DocumentContent,
    options: &LayoutOptions,
) -> Result<PaginatedDocument> {
    layout_document(content, options)
}

/// Paginate a JSON content file and preview it as plain text.
///
/// # Example
///
/// ```no_run
/// use docpager::{to_text, RenderOptions};
///
/// let text = to_text("oficio.json", &RenderOptions::default()).unwrap();
/// println!("{}", text);
/// ```
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let content = load_file(path)?;
    let doc = paginate_document(&content)?;
    render::to_text(&doc, &content, options)
}

/// Paginate a JSON content file and serialize the pages as JSON.
///
/// # Example
///
/// ```no_run
/// use docpager::{to_json, JsonFormat};
///
/// let json = to_json("oficio.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("pages.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let content = load_file(path)?;
    let doc = paginate_document(&content)?;
    render::to_json(&doc, format)
}

/// Builder for paginating and rendering documents.
///
/// # Example
///
/// ```no_run
/// use docpager::{Docpager, StageView};
///
/// let preview = Docpager::new()
///     .with_stage_view(StageView::active(2))
///     .hide_page_numbers()
///     .paginate_file("dossie.json")?
///     .to_text()?;
/// # Ok::<(), docpager::Error>(())
/// ```
pub struct Docpager {
    layout_options: LayoutOptions,
    render_options: RenderOptions,
}

impl Docpager {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            layout_options: LayoutOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Use a custom budget table.
    pub fn with_budgets(mut self, budgets: BudgetTable) -> Self {
        self.layout_options = self.layout_options.with_budgets(budgets);
        self
    }

    /// Load the budget table from a JSON file.
    pub fn with_budget_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let budgets = BudgetTable::load(path)?;
        Ok(self.with_budgets(budgets))
    }

    /// Set the active dossier stage.
    pub fn with_stage_view(mut self, view: StageView) -> Self {
        self.layout_options = self.layout_options.with_stage_view(view);
        self
    }

    /// Suppress page numbers.
    pub fn hide_page_numbers(mut self) -> Self {
        self.layout_options = self.layout_options.with_hidden_page_numbers(true);
        self
    }

    /// Set page selection for rendering.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.render_options = self.render_options.with_pages(pages);
        self
    }

    /// Paginate content.
    pub fn paginate(self, content: DocumentContent) -> Result<PaginationResult> {
        let document = layout_document(&content, &self.layout_options)?;
        Ok(PaginationResult {
            content,
            document,
            render_options: self.render_options,
        })
    }

    /// Load and paginate a JSON content file.
    pub fn paginate_file<P: AsRef<Path>>(self, path: P) -> Result<PaginationResult> {
        let content = load_file(path)?;
        self.paginate(content)
    }
}

impl Default for Docpager {
    fn default() -> Self {
        Self::new()
    }
}

/// Content together with its pages.
pub struct PaginationResult {
    /// The source content
    pub content: DocumentContent,
    /// The pages
    pub document: PaginatedDocument,
    /// Render options to use
    render_options: RenderOptions,
}

impl PaginationResult {
    /// Render a plain-text preview.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.content, &self.render_options)
    }

    /// Serialize the pages as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the pages.
    pub fn document(&self) -> &PaginatedDocument {
        &self.document
    }
}
