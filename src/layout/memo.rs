//! Memoized pagination keyed on the content that affects layout.
//!
//! Branding and the protocol number are drawn by the frame and never move a
//! block, so editing them keeps the cached pages.

use super::{layout_document, LayoutOptions};
use crate::error::Result;
use crate::model::{
    DocumentContent, DocumentKind, EvidenceItem, ImageRef, PaginatedDocument, PurchaseItem,
    Signature, Stage,
};
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// The fields pagination reads, borrowed for hashing.
#[derive(Serialize)]
struct LayoutFields<'a> {
    kind: DocumentKind,
    title: &'a Option<String>,
    body: &'a str,
    reserves_address_blocks: bool,
    signature: &'a Option<Signature>,
    images: &'a [ImageRef],
    items: &'a [PurchaseItem],
    extra_notes: &'a str,
    evidence: &'a [EvidenceItem],
    stages: &'a [Stage],
    options: &'a LayoutOptions,
}

/// Fingerprint of everything that can change a document's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutKey(u64);

impl LayoutKey {
    /// Compute the key of content laid out with options.
    pub fn of(content: &DocumentContent, options: &LayoutOptions) -> Result<Self> {
        let fields = LayoutFields {
            kind: content.kind,
            title: &content.title,
            body: &content.body,
            reserves_address_blocks: content.reserves_address_blocks(),
            signature: &content.signature,
            images: &content.images,
            items: &content.items,
            extra_notes: &content.extra_notes,
            evidence: &content.evidence,
            stages: &content.stages,
            options,
        };
        let bytes = serde_json::to_vec(&fields)?;

        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        Ok(Self(hasher.finish()))
    }
}

/// Holds the last pagination and recomputes only when its key changes.
#[derive(Debug, Default)]
pub struct PaginationCache {
    entry: Option<(LayoutKey, PaginatedDocument)>,
    hits: u64,
    misses: u64,
}

impl PaginationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached pages, or lay the content out again.
    pub fn get_or_paginate(
        &mut self,
        content: &DocumentContent,
        options: &LayoutOptions,
    ) -> Result<&PaginatedDocument> {
        let key = LayoutKey::of(content, options)?;

        match self.entry.take() {
            Some((cached, document)) if cached == key => {
                self.hits += 1;
                Ok(&self.entry.insert((cached, document)).1)
            }
            _ => {
                self.misses += 1;
                log::debug!("layout key changed; re-paginating {}", content.kind.label());
                let document = layout_document(content, options)?;
                Ok(&self.entry.insert((key, document)).1)
            }
        }
    }

    /// Drop the cached pages.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of lookups served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that re-paginated.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
