//! Selection record maintained by the cascade controller.
//!
//! # Invariants
//! - A downstream selection is never set while its upstream one is empty.
//! - Clearing a level clears every level below it in the same step.

use crate::model::node::{ForestLevel, NodeId};
use serde::{Deserialize, Serialize};

/// Current notebook/section/page selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionContext {
    pub notebook: Option<NodeId>,
    pub section: Option<NodeId>,
    pub page: Option<NodeId>,
}

impl SelectionContext {
    /// Returns the selected node at `level`.
    pub fn at(&self, level: ForestLevel) -> Option<NodeId> {
        match level {
            ForestLevel::Notebook => self.notebook,
            ForestLevel::Section => self.section,
            ForestLevel::Page => self.page,
        }
    }

    /// Clears `level` and everything below it.
    pub fn clear_from(&mut self, level: ForestLevel) {
        match level {
            ForestLevel::Notebook => {
                self.notebook = None;
                self.section = None;
                self.page = None;
            }
            ForestLevel::Section => {
                self.section = None;
                self.page = None;
            }
            ForestLevel::Page => self.page = None,
        }
    }
}
