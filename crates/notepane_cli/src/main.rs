//! Interactive terminal front end for the notepane organizer.
//!
//! # Responsibility
//! - Load configuration, start logging, and seed the outline.
//! - Translate typed commands into organizer selections and mutations.

mod console;

use clap::Parser;
use console::{parse_path, read_line, render, ConsolePresenter, StdinPrompt};
use notepane_core::{
    init_logging_from_config, page_menu, section_menu, ForestLevel, MenuAction, MutationOutcome,
    Organizer, OrganizerConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
commands:
  show                                   redraw panels and editor
  select notebook|section|page <path|->  select by index path (e.g. 0.1), '-' clears
  add notebook|section|group|page|subpage
  promote                                promote the selected subpage
  menu section|page [path]               list context-menu actions for a target
  help | quit";

#[derive(Debug, Parser)]
#[command(name = "notepane", version, about = "Notebook / section / page outline organizer")]
struct Args {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log level override (trace|debug|info|warn|error).
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match args.config.as_deref() {
        Some(path) => OrganizerConfig::load(path)?,
        None => OrganizerConfig::default(),
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(dir) = args.log_dir {
        config.logging.log_dir = Some(dir);
    }
    init_logging_from_config(&config.logging)?;

    let mut organizer = Organizer::from_config(&config)?;
    organizer.start()?;
    let mut presenter = ConsolePresenter;
    organizer.flush_signals(&mut presenter);
    println!("notepane {}", notepane_core::core_version());
    println!("{}", render(&organizer));

    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;
        let Some(line) = read_line() else {
            return Ok(());
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["quit"] | ["exit"] => return Ok(()),
            ["help"] => println!("{HELP}"),
            ["show"] => println!("{}", render(&organizer)),
            ["select", level, target] => {
                let Some(level) = parse_level(level) else {
                    eprintln!("unknown level `{level}`");
                    continue;
                };
                match select(&mut organizer, level, target) {
                    Ok(()) => println!("{}", render(&organizer)),
                    Err(message) => eprintln!("{message}"),
                }
            }
            ["add", what] => {
                let mut prompt = StdinPrompt;
                let outcome = match *what {
                    "notebook" => organizer.add_notebook(&mut prompt),
                    "section" => organizer.add_section(&mut prompt),
                    "group" => organizer.add_section_group(&mut prompt),
                    "page" => organizer.add_page(&mut prompt),
                    "subpage" => organizer.add_subpage(&mut prompt),
                    other => {
                        eprintln!("cannot add `{other}`");
                        continue;
                    }
                }?;
                report(&mut organizer, &mut presenter, outcome);
            }
            ["promote"] => {
                let outcome = organizer.promote_subpage()?;
                report(&mut organizer, &mut presenter, outcome);
            }
            ["menu", level, rest @ ..] => show_menu(&organizer, level, rest.first().copied()),
            [] => {}
            _ => eprintln!("unrecognized command; type `help`"),
        }
    }
}

fn parse_level(value: &str) -> Option<ForestLevel> {
    match value {
        "notebook" => Some(ForestLevel::Notebook),
        "section" => Some(ForestLevel::Section),
        "page" => Some(ForestLevel::Page),
        _ => None,
    }
}

fn select(organizer: &mut Organizer, level: ForestLevel, target: &str) -> Result<(), String> {
    let id = if target == "-" {
        None
    } else {
        let path = parse_path(target).ok_or_else(|| format!("invalid path `{target}`"))?;
        let id = organizer
            .store()
            .forest(level)
            .resolve_path(&path)
            .ok_or_else(|| format!("no {level} at `{target}`"))?;
        Some(id)
    };
    let result = match level {
        ForestLevel::Notebook => organizer.select_notebook(id),
        ForestLevel::Section => organizer.select_section(id),
        ForestLevel::Page => organizer.select_page(id),
    };
    result.map_err(|err| err.to_string())
}

fn report(organizer: &mut Organizer, presenter: &mut ConsolePresenter, outcome: MutationOutcome) {
    organizer.flush_signals(presenter);
    match outcome {
        MutationOutcome::Created(_) | MutationOutcome::Promoted(_) => {
            println!("{}", render(organizer))
        }
        MutationOutcome::Cancelled => println!("canceled"),
        MutationOutcome::Rejected(_) => {}
    }
}

fn show_menu(organizer: &Organizer, level: &str, target: Option<&str>) {
    let level = match parse_level(level) {
        Some(level @ (ForestLevel::Section | ForestLevel::Page)) => level,
        _ => {
            eprintln!("menus exist for `section` and `page` only");
            return;
        }
    };
    let forest = organizer.store().forest(level);
    let target = target
        .and_then(parse_path)
        .and_then(|path| forest.resolve_path(&path));
    let entries = match level {
        ForestLevel::Section => section_menu(forest, target),
        _ => page_menu(forest, target),
    };
    for entry in entries {
        let state = if entry.enabled { "enabled" } else { "disabled" };
        println!("  {:<22} {state}", MenuAction::label(entry.action));
    }
}
