//! Three-level outline store.

use crate::model::node::{ForestLevel, NodeId, OutlineNode};
use crate::store::forest::OutlineForest;

/// Notebook, section, and page forests side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineStore {
    notebooks: OutlineForest,
    sections: OutlineForest,
    pages: OutlineForest,
}

impl Default for OutlineStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineStore {
    /// Creates a store with three empty forests.
    pub fn new() -> Self {
        Self {
            notebooks: OutlineForest::new(ForestLevel::Notebook),
            sections: OutlineForest::new(ForestLevel::Section),
            pages: OutlineForest::new(ForestLevel::Page),
        }
    }

    pub fn forest(&self, level: ForestLevel) -> &OutlineForest {
        match level {
            ForestLevel::Notebook => &self.notebooks,
            ForestLevel::Section => &self.sections,
            ForestLevel::Page => &self.pages,
        }
    }

    pub fn forest_mut(&mut self, level: ForestLevel) -> &mut OutlineForest {
        match level {
            ForestLevel::Notebook => &mut self.notebooks,
            ForestLevel::Section => &mut self.sections,
            ForestLevel::Page => &mut self.pages,
        }
    }

    pub fn notebooks(&self) -> &OutlineForest {
        &self.notebooks
    }

    pub fn sections(&self) -> &OutlineForest {
        &self.sections
    }

    pub fn pages(&self) -> &OutlineForest {
        &self.pages
    }

    /// Finds `id` in whichever forest holds it.
    pub fn locate(&self, id: NodeId) -> Option<(ForestLevel, &OutlineNode)> {
        [ForestLevel::Notebook, ForestLevel::Section, ForestLevel::Page]
            .into_iter()
            .find_map(|level| self.forest(level).get(id).map(|node| (level, node)))
    }

    /// Label of `id` inside the forest at `level`.
    pub fn label(&self, level: ForestLevel, id: NodeId) -> Option<&str> {
        self.forest(level).get(id).map(|node| node.label.as_str())
    }
}
