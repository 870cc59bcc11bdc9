//! Outline mutation policy.
//!
//! # Responsibility
//! - Decide where newly named nodes are attached given the selection.
//! - Promote a subpage one level up with its subtree.
//!
//! # Invariants
//! - A canceled or blank prompt never creates a node.
//! - A failed precondition queues one warning and changes nothing.
//! - "Add Page" never nests; nesting only comes from "Add Subpage".
//! - Section groups are only created at the section root.

use crate::model::node::{ForestLevel, NodeId, NodeKind};
use crate::service::organizer::{MutationOutcome, Organizer, OrganizerResult, Precondition};
use crate::spi::NamePrompt;
use crate::store::forest::{OutlineForest, ParentRef};
use log::info;

const ADD_NOTEBOOK: &str = "Add Notebook";
const ADD_SECTION: &str = "Add Section";
const ADD_SECTION_GROUP: &str = "Add Section Group";
const ADD_PAGE: &str = "Add Page";
const ADD_SUBPAGE: &str = "Add Subpage";
const PROMOTE_SUBPAGE: &str = "Promote Subpage";

/// Parent for a new section: the selected group, otherwise the root.
pub fn section_parent(sections: &OutlineForest, selected: Option<NodeId>) -> ParentRef {
    match selected.and_then(|id| sections.get(id)) {
        Some(node) if node.is_group => ParentRef::Node(node.id),
        _ => ParentRef::Root,
    }
}

/// Parent for a new page: sibling of the selected node.
///
/// A selected subpage yields its parent; a selected top-level page or no
/// selection yields the root.
pub fn page_parent(pages: &OutlineForest, selected: Option<NodeId>) -> ParentRef {
    match selected.and_then(|id| pages.get(id)) {
        Some(node) => node.parent.into(),
        None => ParentRef::Root,
    }
}

/// New parent for promoting `id`: its grandparent, or the root.
///
/// Returns `None` when `id` is unknown or already top-level.
pub fn promotion_target(pages: &OutlineForest, id: NodeId) -> Option<ParentRef> {
    let parent = pages.get(id)?.parent?;
    Some(pages.get(parent)?.parent.into())
}

impl Organizer {
    /// Prompts for a notebook name and appends it at the notebook root.
    pub fn add_notebook(
        &mut self,
        prompt: &mut dyn NamePrompt,
    ) -> OrganizerResult<MutationOutcome> {
        let Some(name) = ask_name(prompt, ADD_NOTEBOOK, "Notebook name:") else {
            return Ok(self.cancelled(ADD_NOTEBOOK));
        };
        let id = self.store.forest_mut(ForestLevel::Notebook).insert(
            ParentRef::Root,
            name.as_str(),
            NodeKind::Notebook,
        )?;
        self.created(ADD_NOTEBOOK, ForestLevel::Notebook, id, ParentRef::Root)
    }

    /// Prompts for a section name; nests under the selected group if any.
    pub fn add_section(&mut self, prompt: &mut dyn NamePrompt) -> OrganizerResult<MutationOutcome> {
        if self.selection.notebook.is_none() {
            return Ok(self.warn_precondition(ADD_SECTION, Precondition::NotebookRequired));
        }
        let Some(name) = ask_name(prompt, ADD_SECTION, "Section name:") else {
            return Ok(self.cancelled(ADD_SECTION));
        };

        let parent = section_parent(self.store.sections(), self.selection.section);
        let id = self.store.forest_mut(ForestLevel::Section).insert(
            parent,
            name.as_str(),
            NodeKind::Section,
        )?;
        self.created(ADD_SECTION, ForestLevel::Section, id, parent)
    }

    /// Prompts for a group name and appends the group at the section root.
    pub fn add_section_group(
        &mut self,
        prompt: &mut dyn NamePrompt,
    ) -> OrganizerResult<MutationOutcome> {
        if self.selection.notebook.is_none() {
            return Ok(self.warn_precondition(ADD_SECTION_GROUP, Precondition::NotebookRequired));
        }
        let Some(name) = ask_name(prompt, ADD_SECTION_GROUP, "Group name:") else {
            return Ok(self.cancelled(ADD_SECTION_GROUP));
        };

        let id = self.store.forest_mut(ForestLevel::Section).insert(
            ParentRef::Root,
            name.as_str(),
            NodeKind::SectionGroup,
        )?;
        self.created(ADD_SECTION_GROUP, ForestLevel::Section, id, ParentRef::Root)
    }

    /// Prompts for a page name and appends it as a sibling of the selection.
    ///
    /// Requires a selected page-bearing section; a selected group does not
    /// qualify.
    pub fn add_page(&mut self, prompt: &mut dyn NamePrompt) -> OrganizerResult<MutationOutcome> {
        let has_section = self
            .selection
            .section
            .and_then(|id| self.store.sections().get(id))
            .is_some_and(|node| !node.is_group);
        if !has_section {
            return Ok(self.warn_precondition(ADD_PAGE, Precondition::SectionRequired));
        }
        let Some(name) = ask_name(prompt, ADD_PAGE, "Page name:") else {
            return Ok(self.cancelled(ADD_PAGE));
        };

        let parent = page_parent(self.store.pages(), self.selection.page);
        let id = self.store.forest_mut(ForestLevel::Page).insert(
            parent,
            name.as_str(),
            NodeKind::Page,
        )?;
        self.created(ADD_PAGE, ForestLevel::Page, id, parent)
    }

    /// Prompts for a subpage name and appends it as the last child of the
    /// selected page, at any depth.
    pub fn add_subpage(
        &mut self,
        prompt: &mut dyn NamePrompt,
    ) -> OrganizerResult<MutationOutcome> {
        let Some(parent_id) = self
            .selection
            .page
            .filter(|id| self.store.pages().contains(*id))
        else {
            return Ok(self.warn_precondition(ADD_SUBPAGE, Precondition::ParentPageRequired));
        };
        let Some(name) = ask_name(prompt, ADD_SUBPAGE, "Subpage name:") else {
            return Ok(self.cancelled(ADD_SUBPAGE));
        };

        let parent = ParentRef::Node(parent_id);
        let id = self.store.forest_mut(ForestLevel::Page).insert(
            parent,
            name.as_str(),
            NodeKind::Subpage,
        )?;
        self.created(ADD_SUBPAGE, ForestLevel::Page, id, parent)
    }

    /// Moves the selected subpage, with its subtree, to the end of its
    /// grandparent (or the page root).
    pub fn promote_subpage(&mut self) -> OrganizerResult<MutationOutcome> {
        let target = self
            .selection
            .page
            .and_then(|id| promotion_target(self.store.pages(), id).map(|to| (id, to)));
        let Some((id, new_parent)) = target else {
            return Ok(self.warn_precondition(PROMOTE_SUBPAGE, Precondition::SubpageRequired));
        };

        self.store
            .forest_mut(ForestLevel::Page)
            .move_subtree(id, new_parent)?;
        info!(
            "event=subpage_promoted module=mutation status=ok node_id={} to_root={}",
            id,
            new_parent == ParentRef::Root
        );

        self.auto_select(ForestLevel::Page, id)?;
        if let ParentRef::Node(parent_id) = new_parent {
            self.expand(ForestLevel::Page, parent_id);
        }
        Ok(MutationOutcome::Promoted(id))
    }

    fn created(
        &mut self,
        action: &str,
        level: ForestLevel,
        id: NodeId,
        parent: ParentRef,
    ) -> OrganizerResult<MutationOutcome> {
        info!(
            "event=node_created module=mutation status=ok action={:?} level={} node_id={} nested={}",
            action,
            level,
            id,
            parent != ParentRef::Root
        );
        if let ParentRef::Node(parent_id) = parent {
            self.expand(level, parent_id);
        }
        self.auto_select(level, id)?;
        Ok(MutationOutcome::Created(id))
    }

    fn cancelled(&self, action: &str) -> MutationOutcome {
        info!(
            "event=prompt_cancelled module=mutation status=skipped action={:?}",
            action
        );
        MutationOutcome::Cancelled
    }
}

fn ask_name(prompt: &mut dyn NamePrompt, title: &str, label: &str) -> Option<String> {
    prompt
        .prompt(title, label)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
