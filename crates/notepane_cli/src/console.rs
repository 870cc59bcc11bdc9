//! Terminal adapters for the organizer collaborators.

use notepane_core::{ForestLevel, NamePrompt, NodeId, Organizer, OutlineForest, Presenter};
use std::io::{self, BufRead, Write};

/// Reads one line from stdin per prompt; EOF cancels.
pub struct StdinPrompt;

impl NamePrompt for StdinPrompt {
    fn prompt(&mut self, title: &str, label: &str) -> Option<String> {
        print!("[{title}] {label} ");
        io::stdout().flush().ok()?;
        read_line()
    }
}

/// Prints warnings to stderr; selection hints are reflected by `render`.
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn warn(&mut self, title: &str, message: &str) {
        eprintln!("warning: {title}: {message}");
    }

    fn expand_node(&mut self, level: ForestLevel, id: NodeId) {
        log::debug!("event=expand_hint module=cli level={} node_id={}", level, id);
    }
}

/// Reads one trimmed line; `None` on EOF or read error.
pub fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Parses `1.0.2` into a child-index path.
pub fn parse_path(value: &str) -> Option<Vec<usize>> {
    value
        .split('.')
        .map(|part| part.trim().parse::<usize>().ok())
        .collect()
}

/// Draws the three panels and the editor pane.
pub fn render(organizer: &Organizer) -> String {
    let view = organizer.view();
    let selection = organizer.selection();
    let store = organizer.store();
    let mut out = String::new();

    render_panel(&mut out, "Notebooks", store.notebooks(), selection.notebook);
    render_panel(&mut out, &view.section_header, store.sections(), selection.section);
    render_panel(&mut out, &view.page_header, store.pages(), selection.page);
    out.push_str("== Editor ==\n");
    out.push_str(&view.editor);
    out.push('\n');
    out
}

fn render_panel(out: &mut String, header: &str, forest: &OutlineForest, selected: Option<NodeId>) {
    out.push_str(&format!("== {header} ==\n"));
    for (depth, node) in forest.walk() {
        let marker = if Some(node.id) == selected { '*' } else { ' ' };
        let path = forest
            .path_of(node.id)
            .map(|path| {
                path.iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(".")
            })
            .unwrap_or_default();
        let group = if node.is_group { " [group]" } else { "" };
        out.push_str(&format!(
            "{marker} {indent}{path} {label}{group}\n",
            indent = "  ".repeat(depth),
            label = node.label
        ));
    }
}
