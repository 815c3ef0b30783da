//! Multi-stage dossier layout.
//!
//! A dossier holds up to [`MAX_STAGES`] stages. Each stage is paginated on
//! its own: it opens with a section header, carries its own page numbering,
//! and closes with its signer's stamp. Signature markers typed in the body
//! become stamps where they appear.
//!
//! Which stage is being edited is passed in explicitly as a [`StageView`].
//! The active stage is laid out from its live content and is kept even when
//! empty; every other stage uses its saved snapshot and is dropped when
//! blank.

use super::cost::visible_text;
use super::policy::number_group;
use super::splitter::split_rich_fragments;
use super::{CapacityBudget, PagePolicy, PaginationStats, Paginator};
use crate::error::{Error, Result};
use crate::model::{Block, DocumentContent, Page, PageRole, SignatureStamp, Stage};
use serde::{Deserialize, Serialize};

/// Maximum number of stages in a dossier.
pub const MAX_STAGES: usize = 7;

/// Line shown for an active stage with no content yet.
pub const DRAFT_PLACEHOLDER: &str = "[content being drafted]";

/// Fixed name of a stage by index: `Início`, then `Etapa 01` to `Etapa 06`.
pub fn stage_title(index: usize) -> String {
    if index == 0 {
        "Início".to_string()
    } else {
        format!("Etapa {:02}", index)
    }
}

/// The stage currently being edited, with its unsaved content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageView {
    /// Index of the active stage
    pub active: Option<usize>,

    /// Live content of the active stage; the saved snapshot is used when absent
    pub live: Option<Stage>,
}

impl StageView {
    /// View with no active stage.
    pub fn none() -> Self {
        Self::default()
    }

    /// Mark a stage active, using its saved snapshot.
    pub fn active(index: usize) -> Self {
        Self {
            active: Some(index),
            live: None,
        }
    }

    /// Mark a stage active with live content.
    pub fn live(index: usize, stage: Stage) -> Self {
        Self {
            active: Some(index),
            live: Some(stage),
        }
    }

    /// Check if the stage at `index` is the active one.
    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Reject an active index outside the dossier.
    pub fn validate(&self) -> Result<()> {
        match self.active {
            Some(index) if index >= MAX_STAGES => Err(Error::StageOutOfRange(index, MAX_STAGES)),
            _ => Ok(()),
        }
    }
}

/// Check if a stage body would print nothing.
pub fn is_blank_body(html: &str) -> bool {
    visible_text(html).trim().is_empty() && !html.to_ascii_lowercase().contains("<img")
}

/// Build one stage's block stream.
pub fn stage_blocks(index: usize, stage: &Stage, active: bool) -> Vec<Block> {
    let title = if stage.title.trim().is_empty() {
        stage_title(index)
    } else {
        stage.title.trim().to_string()
    };

    let mut blocks = vec![Block::header(title)];
    if active && stage.is_blank() {
        blocks.push(Block::text(DRAFT_PLACEHOLDER));
    } else {
        blocks.extend(split_rich_fragments(&stage.body));
    }
    if let Some(signature) = &stage.signature {
        blocks.push(Block::SignatureStamp(SignatureStamp::from(signature)));
    }
    blocks
}

/// Paginate a dossier, one page group per emitted stage.
pub fn layout_dossier(
    content: &DocumentContent,
    budget: &CapacityBudget,
    view: &StageView,
    hide_page_numbers: bool,
) -> Result<(Vec<Page>, PaginationStats)> {
    view.validate()?;
    if content.stages.len() > MAX_STAGES {
        log::warn!(
            "dossier has {} stages; only the first {} are laid out",
            content.stages.len(),
            MAX_STAGES
        );
    }

    let stage_count = content
        .stages
        .len()
        .max(view.active.map_or(0, |i| i + 1))
        .min(MAX_STAGES);

    let mut pages = Vec::new();
    let mut stats = PaginationStats::new();
    let mut first_emitted = true;

    for index in 0..stage_count {
        let active = view.is_active(index);
        let saved = content.stages.get(index);
        let stage = match (&view.live, saved) {
            (Some(live), _) if active => live.clone(),
            (_, Some(saved)) => saved.clone(),
            (_, None) => Stage::default(),
        };

        if !active && stage.is_blank() {
            log::debug!("skipping empty stage {}", index);
            continue;
        }

        let policy = PagePolicy::new()
            .with_role(PageRole::Stage)
            .with_address_reserve(first_emitted && content.reserves_address_blocks())
            .with_hidden_page_numbers(hide_page_numbers);
        first_emitted = false;

        let (mut stage_pages, stage_stats) =
            Paginator::new(budget, &policy).paginate_with_stats(stage_blocks(index, &stage, active));
        number_group(&mut stage_pages, index);
        for page in &mut stage_pages {
            page.is_first_page_of_stage = page.page_index == 0;
            page.is_start_stage = index == 0;
            page.is_active_view = active;
        }

        stats.merge(&stage_stats);
        pages.extend(stage_pages);
    }

    stats.page_count = pages.len() as u32;
    Ok((pages, stats))
}
