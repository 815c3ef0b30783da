//! Document model types.
//!
//! `DocumentContent` is the logical, unpaginated input edited upstream.
//! `Block` is the atomic unit the paginator places, and `Page` /
//! `PaginatedDocument` are the pure output recomputed on every change.

mod block;
mod document;
mod page;

pub use block::{Block, LinePart, SignatureStamp, TextLine, TextRun, TextStyle};
pub use document::{
    Branding, DigitalAttestation, DocumentContent, DocumentKind, EvidenceItem, ImageRef,
    PurchaseItem, Signature, Stage, MISSING_FIELD,
};
pub use page::{Page, PageRole, PaginatedDocument};
