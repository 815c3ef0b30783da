//! Layout options and configuration.

use super::{BudgetTable, CapacityBudget, StageView};
use crate::model::DocumentKind;
use serde::{Deserialize, Serialize};

/// Options for laying out document content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Capacity budgets per document kind
    pub budgets: BudgetTable,

    /// Suppress page numbers on every page
    pub hide_page_numbers: bool,

    /// Dossier stage being edited
    pub stage_view: StageView,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the budget table.
    pub fn with_budgets(mut self, budgets: BudgetTable) -> Self {
        self.budgets = budgets;
        self
    }

    /// Override the budget of one document kind.
    pub fn with_budget(mut self, kind: DocumentKind, budget: CapacityBudget) -> Self {
        self.budgets.set(kind, budget);
        self
    }

    /// Enable or disable page numbers.
    pub fn with_hidden_page_numbers(mut self, hide: bool) -> Self {
        self.hide_page_numbers = hide;
        self
    }

    /// Set the active dossier stage.
    pub fn with_stage_view(mut self, view: StageView) -> Self {
        self.stage_view = view;
        self
    }

    /// Budget used for a document kind.
    pub fn budget(&self, kind: DocumentKind) -> &CapacityBudget {
        self.budgets.for_kind(kind)
    }
}
