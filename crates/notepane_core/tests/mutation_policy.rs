use notepane_core::{
    ForestLevel, HeaderDefaults, MenuAction, MutationOutcome, NamePrompt, NodeId, NodeKind,
    Organizer, ParentRef, PlaceholderRenderer, Precondition, Presenter, StaticCatalog, ViewSignal,
};
use std::collections::{HashSet, VecDeque};

/// Prompt answering from a fixed script; `None` entries cancel.
struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    asked: Vec<(String, String)>,
}

impl ScriptedPrompt {
    fn answering(answers: &[Option<&str>]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|answer| answer.map(str::to_string))
                .collect(),
            asked: Vec::new(),
        }
    }

    fn names(names: &[&str]) -> Self {
        let answers: Vec<Option<&str>> = names.iter().map(|name| Some(*name)).collect();
        Self::answering(&answers)
    }
}

impl NamePrompt for ScriptedPrompt {
    fn prompt(&mut self, title: &str, label: &str) -> Option<String> {
        self.asked.push((title.to_string(), label.to_string()));
        self.answers.pop_front().flatten()
    }
}

#[derive(Default)]
struct RecordingPresenter {
    warnings: Vec<(String, String)>,
    selected: Vec<NodeId>,
    expanded: Vec<NodeId>,
}

impl Presenter for RecordingPresenter {
    fn warn(&mut self, title: &str, message: &str) {
        self.warnings.push((title.to_string(), message.to_string()));
    }

    fn select_node(&mut self, _level: ForestLevel, id: NodeId) {
        self.selected.push(id);
    }

    fn expand_node(&mut self, _level: ForestLevel, id: NodeId) {
        self.expanded.push(id);
    }
}

fn started() -> Organizer {
    let mut organizer = Organizer::with_placeholder_content();
    organizer.start().unwrap();
    organizer.take_signals();
    organizer
}

fn select_notebook_named(organizer: &mut Organizer, label: &str) {
    let id = find(organizer, ForestLevel::Notebook, label);
    organizer.select_notebook(Some(id)).unwrap();
}

fn find(organizer: &Organizer, level: ForestLevel, label: &str) -> NodeId {
    organizer
        .store()
        .forest(level)
        .walk()
        .into_iter()
        .find(|(_, node)| node.label == label)
        .map(|(_, node)| node.id)
        .unwrap()
}

fn created(outcome: MutationOutcome) -> NodeId {
    match outcome {
        MutationOutcome::Created(id) => id,
        other => panic!("expected Created, got {other:?}"),
    }
}

fn warnings(organizer: &mut Organizer) -> Vec<(String, String)> {
    let mut presenter = RecordingPresenter::default();
    organizer.flush_signals(&mut presenter);
    presenter.warnings
}

#[test]
fn add_notebook_appends_and_selects_new_notebook() {
    let mut organizer = started();
    let mut prompt = ScriptedPrompt::names(&["  Spanish  "]);

    let id = created(organizer.add_notebook(&mut prompt).unwrap());

    let notebooks = organizer.store().notebooks();
    assert_eq!(notebooks.roots().len(), 5);
    assert_eq!(notebooks.roots()[4], id);
    assert_eq!(notebooks.get(id).unwrap().label, "Spanish");
    assert_eq!(organizer.selection().notebook, Some(id));
    assert_eq!(organizer.view().section_header, "Spanish");
    assert!(organizer.store().sections().is_empty());
    assert_eq!(
        prompt.asked,
        vec![("Add Notebook".to_string(), "Notebook name:".to_string())]
    );
}

#[test]
fn canceled_or_blank_add_notebook_leaves_forest_unchanged() {
    let mut organizer = started();
    let mut prompt = ScriptedPrompt::answering(&[None, Some("   ")]);

    assert_eq!(
        organizer.add_notebook(&mut prompt).unwrap(),
        MutationOutcome::Cancelled
    );
    assert_eq!(
        organizer.add_notebook(&mut prompt).unwrap(),
        MutationOutcome::Cancelled
    );

    assert_eq!(organizer.store().notebooks().roots().len(), 4);
    assert!(warnings(&mut organizer).is_empty());
}

#[test]
fn add_section_without_notebook_warns_and_skips_prompt() {
    let mut organizer = started();
    organizer.select_notebook(None).unwrap();
    let mut prompt = ScriptedPrompt::names(&["never"]);

    let outcome = organizer.add_section(&mut prompt).unwrap();

    assert_eq!(
        outcome,
        MutationOutcome::Rejected(Precondition::NotebookRequired)
    );
    assert!(prompt.asked.is_empty());
    assert!(organizer.store().sections().is_empty());
    assert_eq!(
        warnings(&mut organizer),
        vec![(
            "Add Section".to_string(),
            "Please select a notebook first.".to_string()
        )]
    );
}

#[test]
fn add_section_with_plain_section_selected_goes_to_root() {
    let mut organizer = started();
    let mut prompt = ScriptedPrompt::names(&["4"]);

    let id = created(organizer.add_section(&mut prompt).unwrap());

    let sections = organizer.store().sections();
    assert_eq!(sections.roots().len(), 4);
    assert_eq!(sections.roots()[3], id);
    assert_eq!(sections.get(id).unwrap().kind, NodeKind::Section);
    assert_eq!(organizer.selection().section, Some(id));
    assert_eq!(organizer.view().page_header, "4");
    assert!(organizer.store().pages().is_empty());
}

#[test]
fn add_section_with_group_selected_nests_and_expands_group() {
    let mut organizer = started();
    let mut prompt = ScriptedPrompt::names(&["Grammar", "Verbs"]);

    let group = created(organizer.add_section_group(&mut prompt).unwrap());
    organizer.take_signals();
    let section = created(organizer.add_section(&mut prompt).unwrap());

    let sections = organizer.store().sections();
    assert_eq!(sections.roots().len(), 4);
    assert_eq!(sections.children_of(ParentRef::Node(group)).unwrap(), &[section]);
    assert!(organizer.view().expanded.contains(&group));
    assert_eq!(organizer.selection().section, Some(section));

    let mut presenter = RecordingPresenter::default();
    organizer.flush_signals(&mut presenter);
    assert_eq!(presenter.expanded, vec![group]);
    assert_eq!(presenter.selected, vec![section]);
}

#[test]
fn add_section_group_is_always_top_level_and_loads_no_pages() {
    let mut organizer = started();
    let mut prompt = ScriptedPrompt::names(&["Outer", "Inner"]);

    let outer = created(organizer.add_section_group(&mut prompt).unwrap());
    let inner = created(organizer.add_section_group(&mut prompt).unwrap());

    let sections = organizer.store().sections();
    assert_eq!(sections.parent_of(inner).unwrap(), ParentRef::Root);
    assert!(sections.get(outer).unwrap().is_group);
    assert!(sections.get(inner).unwrap().is_group);
    assert_eq!(sections.get(inner).unwrap().kind, NodeKind::SectionGroup);
    assert_eq!(organizer.selection().section, Some(inner));
    assert!(organizer.store().pages().is_empty());
    assert_eq!(organizer.editor_text(), "");
}

#[test]
fn add_section_group_without_notebook_warns() {
    let mut organizer = started();
    organizer.select_notebook(None).unwrap();
    let mut prompt = ScriptedPrompt::names(&["G"]);

    let outcome = organizer.add_section_group(&mut prompt).unwrap();

    assert_eq!(
        outcome,
        MutationOutcome::Rejected(Precondition::NotebookRequired)
    );
    assert_eq!(warnings(&mut organizer)[0].0, "Add Section Group");
}

#[test]
fn add_page_without_section_warns() {
    let mut organizer = started();
    select_notebook_named(&mut organizer, "VHK B2");
    let mut prompt = ScriptedPrompt::names(&["p"]);

    let outcome = organizer.add_page(&mut prompt).unwrap();

    assert_eq!(outcome, MutationOutcome::Rejected(Precondition::SectionRequired));
    assert!(prompt.asked.is_empty());
    assert_eq!(
        warnings(&mut organizer),
        vec![(
            "Add Page".to_string(),
            "Please select a section first.".to_string()
        )]
    );
}

#[test]
fn add_page_with_group_selected_is_rejected() {
    let mut organizer = started();
    let mut prompt = ScriptedPrompt::names(&["Group", "page"]);
    created(organizer.add_section_group(&mut prompt).unwrap());

    let outcome = organizer.add_page(&mut prompt).unwrap();

    assert_eq!(outcome, MutationOutcome::Rejected(Precondition::SectionRequired));
    assert!(organizer.store().pages().is_empty());
}

#[test]
fn add_page_with_top_level_page_selected_goes_to_root() {
    let mut organizer = started();
    let mut prompt = ScriptedPrompt::names(&["New"]);

    let id = created(organizer.add_page(&mut prompt).unwrap());

    let pages = organizer.store().pages();
    assert_eq!(pages.roots().len(), 3);
    assert_eq!(pages.roots()[2], id);
    assert_eq!(pages.get(id).unwrap().kind, NodeKind::Page);
    assert_eq!(organizer.selection().page, Some(id));
    assert!(organizer.editor_text().contains("page 'New' in section '1'"));
}

#[test]
fn add_page_with_subpage_selected_creates_sibling() {
    let mut organizer = started();
    let intro_parent = organizer.store().pages().roots()[0];
    let mut prompt = ScriptedPrompt::names(&["child", "sibling"]);

    let child = created(organizer.add_subpage(&mut prompt).unwrap());
    let sibling = created(organizer.add_page(&mut prompt).unwrap());

    let pages = organizer.store().pages();
    assert_eq!(pages.roots().len(), 2);
    assert_eq!(
        pages.children_of(ParentRef::Node(intro_parent)).unwrap(),
        &[child, sibling]
    );
    assert!(pages.get(child).unwrap().children.is_empty());
    assert_eq!(pages.get(sibling).unwrap().kind, NodeKind::Subpage);
}

#[test]
fn add_subpage_appends_last_child_of_selected_page() {
    let mut organizer = started();
    select_notebook_named(&mut organizer, "PC3");
    let intro = find(&organizer, ForestLevel::Page, "Intro");
    organizer.select_page(Some(intro)).unwrap();
    let mut prompt = ScriptedPrompt::names(&["Detail", "Deeper"]);

    let detail = created(organizer.add_subpage(&mut prompt).unwrap());
    let deeper = created(organizer.add_subpage(&mut prompt).unwrap());

    let pages = organizer.store().pages();
    assert_eq!(pages.roots().len(), 2);
    assert_eq!(pages.children_of(ParentRef::Node(intro)).unwrap(), &[detail]);
    assert_eq!(pages.children_of(ParentRef::Node(detail)).unwrap(), &[deeper]);
    assert_eq!(pages.depth(deeper).unwrap(), 2);
    assert!(organizer.view().expanded.contains(&intro));
    assert!(organizer.view().expanded.contains(&detail));
    assert_eq!(organizer.selection().page, Some(deeper));
    assert_eq!(
        prompt.asked[0],
        ("Add Subpage".to_string(), "Subpage name:".to_string())
    );
}

#[test]
fn add_subpage_without_page_warns() {
    let mut organizer = started();
    organizer.select_page(None).unwrap();
    let mut prompt = ScriptedPrompt::names(&["x"]);

    let outcome = organizer.add_subpage(&mut prompt).unwrap();

    assert_eq!(
        outcome,
        MutationOutcome::Rejected(Precondition::ParentPageRequired)
    );
    assert_eq!(
        warnings(&mut organizer)[0].1,
        "Please select a parent page first."
    );
}

#[test]
fn promote_moves_subpage_with_children_next_to_former_parent() {
    let mut organizer = started();
    let second_section = organizer.store().sections().roots()[1];
    organizer.select_section(Some(second_section)).unwrap();
    let page_2a = find(&organizer, ForestLevel::Page, "2a");
    let mut prompt = ScriptedPrompt::names(&["2b Notes", "inner"]);

    let notes = created(organizer.add_subpage(&mut prompt).unwrap());
    let inner = created(organizer.add_subpage(&mut prompt).unwrap());
    organizer.select_page(Some(notes)).unwrap();

    let outcome = organizer.promote_subpage().unwrap();

    assert_eq!(outcome, MutationOutcome::Promoted(notes));
    let pages = organizer.store().pages();
    assert_eq!(pages.parent_of(notes).unwrap(), ParentRef::Root);
    assert_eq!(pages.roots().last(), Some(&notes));
    assert_eq!(pages.get(notes).unwrap().kind, NodeKind::Page);
    assert!(pages.get(page_2a).unwrap().children.is_empty());
    assert_eq!(pages.children_of(ParentRef::Node(notes)).unwrap(), &[inner]);
    assert_eq!(organizer.selection().page, Some(notes));
    assert!(organizer.editor_text().contains("page '2b Notes'"));
}

#[test]
fn promote_nested_subpage_moves_under_grandparent() {
    let mut organizer = started();
    let top = organizer.store().pages().roots()[0];
    let mut prompt = ScriptedPrompt::names(&["mid", "leaf"]);
    let mid = created(organizer.add_subpage(&mut prompt).unwrap());
    let leaf = created(organizer.add_subpage(&mut prompt).unwrap());
    organizer.take_signals();

    organizer.promote_subpage().unwrap();

    let pages = organizer.store().pages();
    assert_eq!(pages.parent_of(leaf).unwrap(), ParentRef::Node(top));
    assert_eq!(pages.children_of(ParentRef::Node(top)).unwrap(), &[mid, leaf]);
    assert_eq!(pages.get(leaf).unwrap().kind, NodeKind::Subpage);
    let signals = organizer.take_signals();
    assert!(signals.contains(&ViewSignal::Expand {
        level: ForestLevel::Page,
        id: top
    }));
}

#[test]
fn promote_top_level_page_warns_without_mutation() {
    let mut organizer = started();
    let before = organizer.store().pages().clone();

    let outcome = organizer.promote_subpage().unwrap();

    assert_eq!(outcome, MutationOutcome::Rejected(Precondition::SubpageRequired));
    assert_eq!(organizer.store().pages(), &before);
    assert_eq!(
        warnings(&mut organizer),
        vec![(
            "Promote Subpage".to_string(),
            "Please select a subpage to promote.".to_string()
        )]
    );
}

#[test]
fn canceled_add_page_creates_nothing() {
    let mut organizer = started();
    let before = organizer.store().clone();
    let mut prompt = ScriptedPrompt::answering(&[None]);

    assert_eq!(
        organizer.run_action(MenuAction::AddPage, &mut prompt).unwrap(),
        MutationOutcome::Cancelled
    );
    assert_eq!(organizer.store(), &before);
}

#[test]
fn every_created_node_is_unique_and_stored_once() {
    let mut organizer = Organizer::new(
        Box::new(StaticCatalog::seeded()),
        Box::new(PlaceholderRenderer),
        HeaderDefaults::default(),
    );
    organizer.start().unwrap();
    let mut prompt = ScriptedPrompt::names(&["s", "s", "g", "s", "p", "p", "sp", "sp", "p"]);

    let mut created_ids = Vec::new();
    for action in [
        MenuAction::AddSection,
        MenuAction::AddSection,
        MenuAction::AddSectionGroup,
        MenuAction::AddSection,
    ] {
        created_ids.push(created(organizer.run_action(action, &mut prompt).unwrap()));
    }
    let last_section = *created_ids.last().unwrap();
    organizer.select_section(Some(last_section)).unwrap();
    for action in [
        MenuAction::AddPage,
        MenuAction::AddPage,
        MenuAction::AddSubpage,
        MenuAction::AddSubpage,
        MenuAction::AddPage,
    ] {
        created_ids.push(created(organizer.run_action(action, &mut prompt).unwrap()));
    }

    let unique: HashSet<NodeId> = created_ids.iter().copied().collect();
    assert_eq!(unique.len(), created_ids.len());

    let store = organizer.store();
    let mut seen = HashSet::new();
    for level in [ForestLevel::Notebook, ForestLevel::Section, ForestLevel::Page] {
        for (_, node) in store.forest(level).walk() {
            assert!(seen.insert(node.id), "node {} stored twice", node.id);
        }
    }
    for id in &created_ids {
        assert!(store.locate(*id).is_some());
    }
}
