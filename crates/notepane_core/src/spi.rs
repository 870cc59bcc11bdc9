//! Collaborator contracts consumed by the organizer.
//!
//! # Responsibility
//! - Describe the content source, renderer, name prompt, and presenter at
//!   their interface boundary.
//! - Keep cascade logic independent from storage and UI implementations.
//!
//! # Invariants
//! - Listing calls are keyed by labels only.
//! - Rendering is a pure function of `(notebook, section, page)` labels.

use crate::model::node::{ForestLevel, NodeId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One row returned by a content listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub label: String,
}

impl ListingEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Failure reported by a listing source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingError {
    pub message: String,
}

impl ListingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ListingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "content listing failed: {}", self.message)
    }
}

impl Error for ListingError {}

/// Result type for listing calls.
pub type ListingResult = Result<Vec<ListingEntry>, ListingError>;

/// Source of the notebook/section/page lists shown in the outline.
pub trait ContentListing {
    /// Notebooks seeded at startup.
    fn list_notebooks(&self) -> ListingResult;
    /// Sections belonging to `notebook`.
    fn list_sections(&self, notebook: &str) -> ListingResult;
    /// Pages belonging to `(notebook, section)`.
    fn list_pages(&self, notebook: &str, section: &str) -> ListingResult;
}

/// Produces editor text for a fully-resolved page path.
pub trait ContentRenderer {
    fn render_content(&self, notebook: &str, section: &str, page: &str) -> String;
}

/// Asks the user for a name.
pub trait NamePrompt {
    /// Returns `None` on cancel.
    fn prompt(&mut self, title: &str, label: &str) -> Option<String>;
}

/// Receives outbound display hints.
pub trait Presenter {
    /// Fire-and-forget user notification for precondition failures.
    fn warn(&mut self, title: &str, message: &str);

    fn select_node(&mut self, _level: ForestLevel, _id: NodeId) {}

    fn expand_node(&mut self, _level: ForestLevel, _id: NodeId) {}
}
