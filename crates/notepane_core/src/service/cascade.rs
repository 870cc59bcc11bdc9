//! Selection cascade.
//!
//! # Responsibility
//! - React to a selection at one level by clearing and repopulating the
//!   levels below it, updating headers and editor text.
//!
//! # Invariants
//! - Dependency is strictly top-down: notebook -> section -> page -> editor.
//! - Clearing is transitive; a level is never left populated under a
//!   cleared parent level.
//! - Auto-selection always picks index 0 of the freshly populated level.
//! - Selecting a section group clears the page level but loads no pages.

use crate::model::node::{ForestLevel, NodeId, NodeKind};
use crate::service::organizer::{Organizer, OrganizerResult};
use log::debug;

impl Organizer {
    /// Notebook selection changed.
    ///
    /// # Errors
    /// - `UnknownNode` when `id` is not in the notebook forest; nothing is
    ///   cleared in that case.
    pub fn select_notebook(&mut self, id: Option<NodeId>) -> OrganizerResult<()> {
        if let Some(id) = id {
            self.ensure_known(ForestLevel::Notebook, id)?;
        }

        self.reset_from(ForestLevel::Section);
        self.view.editor.clear();

        let Some(id) = id else {
            self.selection.notebook = None;
            self.view.section_header = self.headers.sections.clone();
            self.view.page_header = self.headers.pages.clone();
            debug!("event=notebook_cleared module=cascade status=ok");
            return Ok(());
        };

        let notebook = self.label_of(ForestLevel::Notebook, id)?;
        self.selection.notebook = Some(id);
        self.view.section_header = notebook.clone();
        self.view.page_header = self.headers.pages.clone();

        let listed = self.listing.list_sections(notebook.as_str());
        let entries = self.listed_or_empty(ForestLevel::Section, listed);
        let count = self.populate(ForestLevel::Section, NodeKind::Section, entries)?;
        debug!(
            "event=notebook_selected module=cascade status=ok node_id={} sections={}",
            id, count
        );

        match self.store.sections().first_root() {
            Some(first) => self.auto_select(ForestLevel::Section, first),
            None => Ok(()),
        }
    }

    /// Section selection changed.
    ///
    /// # Errors
    /// - `UnknownNode` when `id` is not in the section forest.
    pub fn select_section(&mut self, id: Option<NodeId>) -> OrganizerResult<()> {
        if let Some(id) = id {
            self.ensure_known(ForestLevel::Section, id)?;
        }

        self.reset_from(ForestLevel::Page);
        self.view.editor.clear();

        let Some(id) = id else {
            self.selection.section = None;
            self.view.page_header = self.headers.pages.clone();
            debug!("event=section_cleared module=cascade status=ok");
            return Ok(());
        };

        let section = self.label_of(ForestLevel::Section, id)?;
        self.selection.section = Some(id);
        self.view.page_header = section.clone();

        let is_group = self
            .store
            .sections()
            .get(id)
            .map(|node| node.is_group)
            .unwrap_or(false);
        if is_group {
            debug!(
                "event=section_selected module=cascade status=ok node_id={} group=true",
                id
            );
            return Ok(());
        }

        let listed = match self.selected_label(ForestLevel::Notebook) {
            Some(notebook) => self.listing.list_pages(notebook.as_str(), section.as_str()),
            None => Ok(Vec::new()),
        };
        let entries = self.listed_or_empty(ForestLevel::Page, listed);
        let count = self.populate(ForestLevel::Page, NodeKind::Page, entries)?;
        debug!(
            "event=section_selected module=cascade status=ok node_id={} pages={}",
            id, count
        );

        match self.store.pages().first_root() {
            Some(first) => self.auto_select(ForestLevel::Page, first),
            None => Ok(()),
        }
    }

    /// Page selection changed.
    ///
    /// A `None` selection leaves the editor as-is.
    ///
    /// # Errors
    /// - `UnknownNode` when `id` is not in the page forest.
    pub fn select_page(&mut self, id: Option<NodeId>) -> OrganizerResult<()> {
        let Some(id) = id else {
            self.selection.page = None;
            return Ok(());
        };
        self.ensure_known(ForestLevel::Page, id)?;

        let page = self.label_of(ForestLevel::Page, id)?;
        self.selection.page = Some(id);

        let notebook = self.selected_label(ForestLevel::Notebook).unwrap_or_default();
        let section = self.selected_label(ForestLevel::Section).unwrap_or_default();
        self.view.editor = self
            .renderer
            .render_content(notebook.as_str(), section.as_str(), page.as_str());
        debug!(
            "event=page_selected module=cascade status=ok node_id={} chars={}",
            id,
            self.view.editor.chars().count()
        );
        Ok(())
    }

    fn selected_label(&self, level: ForestLevel) -> Option<String> {
        self.selection
            .at(level)
            .and_then(|id| self.store.label(level, id))
            .map(str::to_string)
    }
}
