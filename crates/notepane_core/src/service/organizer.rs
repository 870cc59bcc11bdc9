//! Organizer session state.
//!
//! # Responsibility
//! - Own the outline store, selection record, view state, and content
//!   collaborators for one running session.
//! - Queue outbound display hints until the presentation layer drains them.
//! - Seed the notebook level at startup and auto-select the first notebook.
//!
//! # Invariants
//! - All mutations run synchronously to completion on the caller thread.
//! - Errors are returned before any state change; precondition failures are
//!   reported as warnings, not errors.

use crate::catalog::{CatalogError, PlaceholderRenderer, StaticCatalog};
use crate::config::{HeaderDefaults, OrganizerConfig};
use crate::model::node::{ForestLevel, NodeId, NodeKind};
use crate::model::selection::SelectionContext;
use crate::spi::{ContentListing, ContentRenderer, ListingEntry, ListingResult, Presenter};
use crate::store::forest::{ForestError, ParentRef};
use crate::store::outline::OutlineStore;
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for organizer operations.
pub type OrganizerResult<T> = Result<T, OrganizerError>;

/// Errors from organizer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizerError {
    /// Caller referenced an id that is not in the expected forest.
    UnknownNode { level: ForestLevel, id: NodeId },
    /// Store rejected a structural change.
    Forest(ForestError),
}

impl Display for OrganizerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode { level, id } => write!(f, "unknown {level} node: {id}"),
            Self::Forest(err) => write!(f, "{err}"),
        }
    }
}

impl Error for OrganizerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Forest(err) => Some(err),
            Self::UnknownNode { .. } => None,
        }
    }
}

impl From<ForestError> for OrganizerError {
    fn from(value: ForestError) -> Self {
        Self::Forest(value)
    }
}

/// Failed precondition of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    NotebookRequired,
    /// No page-bearing section is selected; a selected section group does
    /// not count.
    SectionRequired,
    ParentPageRequired,
    SubpageRequired,
}

impl Precondition {
    /// User-facing warning text.
    pub fn message(self) -> &'static str {
        match self {
            Self::NotebookRequired => "Please select a notebook first.",
            Self::SectionRequired => "Please select a section first.",
            Self::ParentPageRequired => "Please select a parent page first.",
            Self::SubpageRequired => "Please select a subpage to promote.",
        }
    }
}

/// What a mutation call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// New node inserted and selected.
    Created(NodeId),
    /// Existing node moved one level up and selected.
    Promoted(NodeId),
    /// Prompt canceled or left blank; nothing changed.
    Cancelled,
    /// Precondition failed; a warning was queued and nothing changed.
    Rejected(Precondition),
}

/// Outbound display hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSignal {
    Warning { title: String, message: String },
    Select { level: ForestLevel, id: NodeId },
    Expand { level: ForestLevel, id: NodeId },
}

/// Presentation-facing state derived from the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Section panel header: selected notebook label or default.
    pub section_header: String,
    /// Page panel header: selected section label or default.
    pub page_header: String,
    /// Editor pane text.
    pub editor: String,
    /// Nodes the presentation should show expanded.
    pub expanded: HashSet<NodeId>,
}

/// Outline session: store, selection, and collaborators.
pub struct Organizer {
    pub(crate) store: OutlineStore,
    pub(crate) selection: SelectionContext,
    pub(crate) view: ViewState,
    pub(crate) headers: HeaderDefaults,
    pub(crate) listing: Box<dyn ContentListing>,
    pub(crate) renderer: Box<dyn ContentRenderer>,
    pub(crate) signals: Vec<ViewSignal>,
}

impl Organizer {
    /// Creates an empty session. Call `start` to seed notebooks.
    pub fn new(
        listing: Box<dyn ContentListing>,
        renderer: Box<dyn ContentRenderer>,
        headers: HeaderDefaults,
    ) -> Self {
        let view = ViewState {
            section_header: headers.sections.clone(),
            page_header: headers.pages.clone(),
            ..ViewState::default()
        };
        Self {
            store: OutlineStore::new(),
            selection: SelectionContext::default(),
            view,
            headers,
            listing,
            renderer,
            signals: Vec::new(),
        }
    }

    /// Session over the built-in placeholder catalog.
    pub fn with_placeholder_content() -> Self {
        Self::new(
            Box::new(StaticCatalog::seeded()),
            Box::new(PlaceholderRenderer),
            HeaderDefaults::default(),
        )
    }

    /// Session built from configuration; loads the catalog file if set.
    pub fn from_config(config: &OrganizerConfig) -> Result<Self, CatalogError> {
        let catalog = match config.catalog_path.as_deref() {
            Some(path) => StaticCatalog::load(path)?,
            None => StaticCatalog::seeded(),
        };
        Ok(Self::new(
            Box::new(catalog),
            Box::new(PlaceholderRenderer),
            config.headers.clone(),
        ))
    }

    /// Seeds the notebook forest and auto-selects the first notebook.
    pub fn start(&mut self) -> OrganizerResult<()> {
        self.store.forest_mut(ForestLevel::Notebook).clear();
        let listed = self.listing.list_notebooks();
        let entries = self.listed_or_empty(ForestLevel::Notebook, listed);
        let count = self.populate(ForestLevel::Notebook, NodeKind::Notebook, entries)?;
        info!(
            "event=organizer_start module=organizer status=ok notebooks={}",
            count
        );

        match self.store.notebooks().first_root() {
            Some(first) => self.auto_select(ForestLevel::Notebook, first),
            None => self.select_notebook(None),
        }
    }

    pub fn store(&self) -> &OutlineStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionContext {
        &self.selection
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn editor_text(&self) -> &str {
        &self.view.editor
    }

    /// Pending display hints without draining them.
    pub fn pending_signals(&self) -> &[ViewSignal] {
        &self.signals
    }

    /// Drains pending display hints.
    pub fn take_signals(&mut self) -> Vec<ViewSignal> {
        std::mem::take(&mut self.signals)
    }

    /// Drains pending display hints into `presenter`, in emission order.
    pub fn flush_signals(&mut self, presenter: &mut dyn Presenter) {
        for signal in self.take_signals() {
            match signal {
                ViewSignal::Warning { title, message } => presenter.warn(&title, &message),
                ViewSignal::Select { level, id } => presenter.select_node(level, id),
                ViewSignal::Expand { level, id } => presenter.expand_node(level, id),
            }
        }
    }

    pub(crate) fn ensure_known(&self, level: ForestLevel, id: NodeId) -> OrganizerResult<()> {
        if self.store.forest(level).contains(id) {
            Ok(())
        } else {
            Err(OrganizerError::UnknownNode { level, id })
        }
    }

    pub(crate) fn label_of(&self, level: ForestLevel, id: NodeId) -> OrganizerResult<String> {
        self.store
            .label(level, id)
            .map(str::to_string)
            .ok_or(OrganizerError::UnknownNode { level, id })
    }

    /// Listing failures degrade to an empty list.
    pub(crate) fn listed_or_empty(
        &self,
        level: ForestLevel,
        listed: ListingResult,
    ) -> Vec<ListingEntry> {
        match listed {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    "event=listing_failed module=organizer status=error level={} error={}",
                    level, err
                );
                Vec::new()
            }
        }
    }

    /// Appends one root node per entry; blank entries are skipped.
    pub(crate) fn populate(
        &mut self,
        level: ForestLevel,
        kind: NodeKind,
        entries: Vec<ListingEntry>,
    ) -> OrganizerResult<usize> {
        let forest = self.store.forest_mut(level);
        let mut inserted = 0;
        for entry in entries {
            if entry.label.trim().is_empty() {
                warn!(
                    "event=listing_entry_skipped module=organizer status=skipped level={} reason=blank_label",
                    level
                );
                continue;
            }
            forest.insert(ParentRef::Root, entry.label.as_str(), kind)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    pub(crate) fn warn_precondition(
        &mut self,
        title: &str,
        failed: Precondition,
    ) -> MutationOutcome {
        info!(
            "event=precondition_failed module=organizer status=skipped action={:?} precondition={:?}",
            title, failed
        );
        self.signals.push(ViewSignal::Warning {
            title: title.to_string(),
            message: failed.message().to_string(),
        });
        MutationOutcome::Rejected(failed)
    }

    pub(crate) fn expand(&mut self, level: ForestLevel, id: NodeId) {
        self.view.expanded.insert(id);
        self.signals.push(ViewSignal::Expand { level, id });
    }

    /// Selects on behalf of the user and emits the matching display hint.
    pub(crate) fn auto_select(&mut self, level: ForestLevel, id: NodeId) -> OrganizerResult<()> {
        self.signals.push(ViewSignal::Select { level, id });
        match level {
            ForestLevel::Notebook => self.select_notebook(Some(id)),
            ForestLevel::Section => self.select_section(Some(id)),
            ForestLevel::Page => self.select_page(Some(id)),
        }
    }

    /// Empties `level` and every level below it, dropping stale expansion.
    pub(crate) fn reset_from(&mut self, level: ForestLevel) {
        let cleared: &[ForestLevel] = match level {
            ForestLevel::Notebook => &[
                ForestLevel::Notebook,
                ForestLevel::Section,
                ForestLevel::Page,
            ],
            ForestLevel::Section => &[ForestLevel::Section, ForestLevel::Page],
            ForestLevel::Page => &[ForestLevel::Page],
        };
        for level in cleared {
            self.store.forest_mut(*level).clear();
        }
        self.selection.clear_from(level);
        let store = &self.store;
        self.view
            .expanded
            .retain(|id| store.locate(*id).is_some());
    }
}
