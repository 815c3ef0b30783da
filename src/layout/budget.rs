//! Capacity model: how many estimated lines fit on a page.
//!
//! Every constant here is calibrated against the frame's fixed top and
//! bottom margin bands. Changing one without the other reintroduces overflow.

use crate::error::{Error, Result};
use crate::model::DocumentKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bottom margin carried by a whole generic paragraph.
pub const PARAGRAPH_SPACING: f32 = 1.2;

/// Bottom margin carried by a purchase table row.
pub const PURCHASE_ITEM_SPACING: f32 = 0.8;

/// Bottom margin carried by a per-diem note paragraph.
pub const NOTES_PARAGRAPH_SPACING: f32 = 0.8;

/// Flat cost of an embedded image, whatever its pixel height.
pub const IMAGE_LINES_ALLOWANCE: f32 = 12.0;

/// Flat cost of a name/role/sector signature stamp.
pub const SIGNATURE_STAMP_LINES: f32 = 5.0;

/// Flat cost of a section header.
pub const SECTION_HEADER_LINES: f32 = 3.0;

/// Lines taken from the first page when addressing blocks are shown.
pub const ADDRESS_BLOCK_RESERVE_LINES: f32 = 8.0;

/// Per-block line costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockCosts {
    /// Added to whole paragraphs and table rows
    pub paragraph_spacing: f32,

    /// Flat image allowance
    pub image_lines: f32,

    /// Flat signature stamp allowance
    pub signature_lines: f32,

    /// Flat section header allowance
    pub section_header_lines: f32,
}

impl BlockCosts {
    /// Default costs with the given paragraph spacing.
    pub fn with_spacing(paragraph_spacing: f32) -> Self {
        Self {
            paragraph_spacing,
            ..Self::default()
        }
    }
}

impl Default for BlockCosts {
    fn default() -> Self {
        Self {
            paragraph_spacing: PARAGRAPH_SPACING,
            image_lines: IMAGE_LINES_ALLOWANCE,
            signature_lines: SIGNATURE_STAMP_LINES,
            section_header_lines: SECTION_HEADER_LINES,
        }
    }
}

/// Line-count limits governing a page, by page position.
///
/// The intended relationship is
/// `first_page_limit <= normal_page_limit <= total_lines - security_margin_lines`.
/// It is not enforced; first pages usually hold less because title and
/// addressing chrome sit above the text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityBudget {
    /// Lines in the printable area between the frame bands
    pub total_lines: f32,

    /// Lines kept free at the bottom of every page
    pub security_margin_lines: f32,

    /// Capacity of the first page
    pub first_page_limit: f32,

    /// Capacity of every later page
    pub normal_page_limit: f32,

    /// Characters that fit on one justified line
    pub chars_per_line: usize,

    /// Per-block costs
    #[serde(default)]
    pub costs: BlockCosts,
}

impl CapacityBudget {
    /// Create a budget with default block costs.
    pub fn new(first_page_limit: f32, normal_page_limit: f32, chars_per_line: usize) -> Self {
        Self {
            total_lines: normal_page_limit,
            security_margin_lines: 0.0,
            first_page_limit,
            normal_page_limit,
            chars_per_line,
            costs: BlockCosts::default(),
        }
    }

    /// Budget of a generic letter.
    pub fn letter() -> Self {
        Self {
            total_lines: 34.0,
            security_margin_lines: 2.0,
            first_page_limit: 24.0,
            normal_page_limit: 30.0,
            chars_per_line: 90,
            costs: BlockCosts::default(),
        }
    }

    /// Budget of a purchase request item table.
    pub fn purchase_request() -> Self {
        Self {
            total_lines: 32.0,
            security_margin_lines: 2.0,
            first_page_limit: 28.0,
            normal_page_limit: 28.0,
            chars_per_line: 60,
            costs: BlockCosts::with_spacing(PURCHASE_ITEM_SPACING),
        }
    }

    /// Budget of the per-diem extra-notes flow.
    pub fn per_diem_notes() -> Self {
        Self {
            total_lines: 32.0,
            security_margin_lines: 2.0,
            first_page_limit: 30.0,
            normal_page_limit: 30.0,
            chars_per_line: 95,
            costs: BlockCosts::with_spacing(NOTES_PARAGRAPH_SPACING),
        }
    }

    /// Budget of a dossier stage.
    pub fn dossier() -> Self {
        Self {
            total_lines: 36.0,
            security_margin_lines: 2.0,
            first_page_limit: 26.0,
            normal_page_limit: 32.0,
            chars_per_line: 95,
            costs: BlockCosts::default(),
        }
    }

    /// Default budget for a document kind.
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Letter => Self::letter(),
            DocumentKind::PurchaseRequest => Self::purchase_request(),
            DocumentKind::PerDiem => Self::per_diem_notes(),
            DocumentKind::Dossier => Self::dossier(),
        }
    }

    /// Set the per-block costs.
    pub fn with_costs(mut self, costs: BlockCosts) -> Self {
        self.costs = costs;
        self
    }

    /// Set the paragraph spacing.
    pub fn with_paragraph_spacing(mut self, spacing: f32) -> Self {
        self.costs.paragraph_spacing = spacing;
        self
    }

    /// Capacity of a page by position.
    pub fn limit(&self, first_page: bool) -> f32 {
        if first_page {
            self.first_page_limit
        } else {
            self.normal_page_limit
        }
    }

    /// Reject budgets the paginator cannot make progress with.
    pub fn validate(&self) -> Result<()> {
        if self.chars_per_line == 0 {
            return Err(Error::InvalidBudget(
                "chars_per_line must be positive".to_string(),
            ));
        }
        if !(self.first_page_limit > 0.0 && self.normal_page_limit > 0.0) {
            return Err(Error::InvalidBudget(format!(
                "page limits must be positive (first {}, normal {})",
                self.first_page_limit, self.normal_page_limit
            )));
        }
        let costs = [
            self.costs.paragraph_spacing,
            self.costs.image_lines,
            self.costs.signature_lines,
            self.costs.section_header_lines,
        ];
        if costs.iter().any(|c| !c.is_finite() || *c < 0.0) {
            return Err(Error::InvalidBudget(
                "block costs must be finite and non-negative".to_string(),
            ));
        }

        let printable = self.total_lines - self.security_margin_lines;
        if self.first_page_limit > self.normal_page_limit || self.normal_page_limit > printable {
            log::debug!(
                "budget limits out of the usual order: first {} normal {} printable {}",
                self.first_page_limit,
                self.normal_page_limit,
                printable
            );
        }
        Ok(())
    }
}

impl Default for CapacityBudget {
    fn default() -> Self {
        Self::letter()
    }
}

/// Budgets for every document kind, loadable as configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetTable {
    /// Generic letter
    pub letter: CapacityBudget,

    /// Purchase request item table
    pub purchase_request: CapacityBudget,

    /// Per-diem extra notes
    pub per_diem_notes: CapacityBudget,

    /// Dossier stages
    pub dossier: CapacityBudget,
}

impl BudgetTable {
    /// Parse a budget table from JSON; missing kinds keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: BudgetTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a budget table from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Budget for a document kind.
    pub fn for_kind(&self, kind: DocumentKind) -> &CapacityBudget {
        match kind {
            DocumentKind::Letter => &self.letter,
            DocumentKind::PurchaseRequest => &self.purchase_request,
            DocumentKind::PerDiem => &self.per_diem_notes,
            DocumentKind::Dossier => &self.dossier,
        }
    }

    /// Replace the budget for a document kind.
    pub fn set(&mut self, kind: DocumentKind, budget: CapacityBudget) {
        match kind {
            DocumentKind::Letter => self.letter = budget,
            DocumentKind::PurchaseRequest => self.purchase_request = budget,
            DocumentKind::PerDiem => self.per_diem_notes = budget,
            DocumentKind::Dossier => self.dossier = budget,
        }
    }

    /// Validate every budget in the table.
    pub fn validate(&self) -> Result<()> {
        self.letter.validate()?;
        self.purchase_request.validate()?;
        self.per_diem_notes.validate()?;
        self.dossier.validate()
    }
}

impl Default for BudgetTable {
    fn default() -> Self {
        Self {
            letter: CapacityBudget::letter(),
            purchase_request: CapacityBudget::purchase_request(),
            per_diem_notes: CapacityBudget::per_diem_notes(),
            dossier: CapacityBudget::dossier(),
        }
    }
}
