//! Document-level types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rendering used for any missing signature or item field.
pub const MISSING_FIELD: &str = "---";

/// The kind of official document being composed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Generic letter (ofício) with title, addressing blocks and free body
    #[default]
    Letter,
    /// Purchase request with an item table
    PurchaseRequest,
    /// Per-diem request: single form page plus notes and evidence flows
    PerDiem,
    /// Multi-stage bidding dossier (licitação)
    Dossier,
}

impl DocumentKind {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Letter => "letter",
            DocumentKind::PurchaseRequest => "purchase request",
            DocumentKind::PerDiem => "per-diem request",
            DocumentKind::Dossier => "dossier",
        }
    }
}

/// The logical, unpaginated document.
///
/// Every field is optional in JSON so partially filled drafts from the editor
/// screens still deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentContent {
    /// Document type
    pub kind: DocumentKind,

    /// Document title
    pub title: Option<String>,

    /// Free-text body with inline spans and `{{IMG::<id>}}` tokens
    pub body: String,

    /// Left addressing block (sender)
    pub left_address: Option<String>,

    /// Right addressing block (recipient)
    pub right_address: Option<String>,

    /// Whether the addressing blocks are shown on the first page
    pub show_address_blocks: bool,

    /// Signature metadata
    pub signature: Option<Signature>,

    /// Images referenced from the body
    pub images: Vec<ImageRef>,

    /// Purchase request items
    pub items: Vec<PurchaseItem>,

    /// Per-diem free-text notes
    pub extra_notes: String,

    /// Per-diem evidence exhibits
    pub evidence: Vec<EvidenceItem>,

    /// Dossier stages, indexed 0-6
    pub stages: Vec<Stage>,

    /// Protocol number shown by the frame
    pub protocol: Option<String>,

    /// Letterhead and watermark settings (frame only)
    pub branding: Option<Branding>,
}

impl DocumentContent {
    /// Create empty content of the given kind.
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Create letter content with the given body.
    pub fn letter(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::new(DocumentKind::Letter)
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the signature.
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Show both addressing blocks.
    pub fn with_addresses(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.left_address = Some(left.into());
        self.right_address = Some(right.into());
        self.show_address_blocks = true;
        self
    }

    /// Whether the addressing blocks take room on the first page.
    pub fn reserves_address_blocks(&self) -> bool {
        self.show_address_blocks && (self.left_address.is_some() || self.right_address.is_some())
    }
}

/// Signature metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
    /// Signer name
    pub name: String,

    /// Signer role
    pub role: String,

    /// Signer sector
    pub sector: String,

    /// Digital-signature attestation
    pub digital: Option<DigitalAttestation>,
}

impl Signature {
    /// Create a signature from its name/role/sector triple.
    pub fn new(name: impl Into<String>, role: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            sector: sector.into(),
            digital: None,
        }
    }

    /// Attach a digital attestation.
    pub fn with_attestation(mut self, attestation: DigitalAttestation) -> Self {
        self.digital = Some(attestation);
        self
    }
}

/// Digital-signature attestation printed under a signature stamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigitalAttestation {
    /// When the document was signed
    pub signed_at: DateTime<Utc>,

    /// Signature identifier
    pub id: String,

    /// Signer IP address
    #[serde(default)]
    pub ip: String,
}

/// Image referenced by an `{{IMG::<id>}}` token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    /// Token id
    pub id: String,

    /// Image location
    pub url: String,

    /// Intrinsic width in pixels
    pub width: Option<f32>,
}

/// One row of a purchase request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseItem {
    /// Item description
    pub name: String,

    /// Requested quantity
    pub quantity: f64,

    /// Unit of measure
    pub unit: String,
}

impl PurchaseItem {
    /// Create an item.
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// One per-diem evidence exhibit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceItem {
    /// Caption
    pub title: String,

    /// Photo location
    pub image_url: String,
}

impl EvidenceItem {
    /// Create an evidence item.
    pub fn new(title: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image_url: image_url.into(),
        }
    }
}

/// One phase of a multi-stage dossier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage {
    /// Stage title (defaults to the fixed stage name when empty)
    pub title: String,

    /// Rich-text body
    pub body: String,

    /// Stage signer
    pub signature: Option<Signature>,
}

impl Stage {
    /// Create a stage with a body.
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    /// Check if the body would print nothing: no visible text and no image.
    pub fn is_blank(&self) -> bool {
        crate::layout::dossier::is_blank_body(&self.body)
    }
}

/// Letterhead and watermark settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    /// Letterhead line printed at the top of each page
    pub letterhead: String,

    /// Footer line
    pub footer: String,

    /// Watermark text
    pub watermark: Option<String>,
}
