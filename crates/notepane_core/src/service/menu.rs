//! Context-menu action availability for the section and page trees.

use crate::model::node::NodeId;
use crate::service::organizer::{MutationOutcome, Organizer, OrganizerResult};
use crate::spi::NamePrompt;
use crate::store::forest::OutlineForest;

/// Action offered by a tree context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddSectionGroup,
    AddSection,
    AddPage,
    AddSubpage,
    PromoteSubpage,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::AddSectionGroup => "Add Section Group...",
            Self::AddSection => "Add Section...",
            Self::AddPage => "Add Page...",
            Self::AddSubpage => "Add Subpage...",
            Self::PromoteSubpage => "Promote Subpage",
        }
    }
}

/// One menu row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub action: MenuAction,
    pub enabled: bool,
}

impl MenuEntry {
    fn new(action: MenuAction, enabled: bool) -> Self {
        Self { action, enabled }
    }
}

/// Section tree menu for a click on `target` (`None` = empty space).
///
/// "Add Section" is enabled on empty space or on a group.
pub fn section_menu(sections: &OutlineForest, target: Option<NodeId>) -> Vec<MenuEntry> {
    let target = target.and_then(|id| sections.get(id));
    let on_group = target.is_some_and(|node| node.is_group);
    vec![
        MenuEntry::new(MenuAction::AddSectionGroup, true),
        MenuEntry::new(MenuAction::AddSection, on_group || target.is_none()),
    ]
}

/// Page tree menu for a click on `target` (`None` = empty space).
pub fn page_menu(pages: &OutlineForest, target: Option<NodeId>) -> Vec<MenuEntry> {
    let target = target.and_then(|id| pages.get(id));
    let on_item = target.is_some();
    let on_subpage = target.is_some_and(|node| !node.is_root());
    vec![
        MenuEntry::new(MenuAction::AddPage, !on_item || on_subpage),
        MenuEntry::new(MenuAction::AddSubpage, on_item),
        MenuEntry::new(MenuAction::PromoteSubpage, on_subpage),
    ]
}

impl Organizer {
    /// Runs a menu action against the current selection.
    pub fn run_action(
        &mut self,
        action: MenuAction,
        prompt: &mut dyn NamePrompt,
    ) -> OrganizerResult<MutationOutcome> {
        match action {
            MenuAction::AddSectionGroup => self.add_section_group(prompt),
            MenuAction::AddSection => self.add_section(prompt),
            MenuAction::AddPage => self.add_page(prompt),
            MenuAction::AddSubpage => self.add_subpage(prompt),
            MenuAction::PromoteSubpage => self.promote_subpage(),
        }
    }
}
