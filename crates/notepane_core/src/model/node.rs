//! Outline node model.
//!
//! # Responsibility
//! - Define the canonical tree element used by all three outline levels.
//! - Validate labels and kind/level pairing at construction time.
//!
//! # Invariants
//! - `id` is stable and never reused for another node.
//! - `label` is trimmed and non-empty.
//! - `is_group` is only ever `true` for `NodeKind::SectionGroup`.
//! - `parent` is navigation-only; ownership lives in the forest arena.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one outline node.
pub type NodeId = Uuid;

/// Outline level a forest (and every node inside it) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForestLevel {
    Notebook,
    Section,
    Page,
}

impl ForestLevel {
    /// Stable lowercase name used in log lines and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notebook => "notebook",
            Self::Section => "section",
            Self::Page => "page",
        }
    }
}

impl Display for ForestLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node category inside the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Top-level container listed in the notebook panel.
    Notebook,
    /// Non-leaf grouping container in the section tree.
    SectionGroup,
    /// Page-bearing section.
    Section,
    /// Page at the root of the page tree.
    Page,
    /// Page nested under another page or subpage.
    Subpage,
}

impl NodeKind {
    /// Returns the forest level this kind lives in.
    pub fn level(self) -> ForestLevel {
        match self {
            Self::Notebook => ForestLevel::Notebook,
            Self::SectionGroup | Self::Section => ForestLevel::Section,
            Self::Page | Self::Subpage => ForestLevel::Page,
        }
    }

    /// Whether the kind is one of the two page-tree kinds.
    pub fn is_page_like(self) -> bool {
        matches!(self, Self::Page | Self::Subpage)
    }
}

/// Validation errors for node construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValidationError {
    /// Label is empty after trimming.
    BlankLabel,
    /// Node kind does not belong to the target forest.
    KindLevelMismatch { kind: NodeKind, level: ForestLevel },
}

impl Display for NodeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankLabel => write!(f, "node label must not be blank"),
            Self::KindLevelMismatch { kind, level } => {
                write!(f, "node kind {kind:?} cannot live in the {level} forest")
            }
        }
    }
}

impl Error for NodeValidationError {}

/// Canonical outline tree element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Stable id, unique within its forest.
    pub id: NodeId,
    /// Trimmed display name. Labels are not unique.
    pub label: String,
    pub kind: NodeKind,
    /// Explicit group marker; only section groups carry `true`.
    pub is_group: bool,
    /// Child ids in display order (newest last).
    pub children: Vec<NodeId>,
    /// Parent id. `None` means the node sits at the forest root.
    pub parent: Option<NodeId>,
}

impl OutlineNode {
    /// Creates a detached node with a fresh id and no children.
    ///
    /// # Errors
    /// - `BlankLabel` when `label` trims to nothing.
    pub fn new(label: &str, kind: NodeKind) -> Result<Self, NodeValidationError> {
        Self::with_id(Uuid::new_v4(), label, kind)
    }

    /// Creates a detached node with a caller-provided id.
    pub fn with_id(id: NodeId, label: &str, kind: NodeKind) -> Result<Self, NodeValidationError> {
        let label = normalize_label(label)?;
        Ok(Self {
            id,
            label,
            kind,
            is_group: kind == NodeKind::SectionGroup,
            children: Vec::new(),
            parent: None,
        })
    }

    /// Whether the node sits at its forest root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Trims a user-supplied label and rejects blank input.
pub fn normalize_label(value: &str) -> Result<String, NodeValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NodeValidationError::BlankLabel);
    }
    Ok(trimmed.to_string())
}
