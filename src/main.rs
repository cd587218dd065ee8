use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;

use floorplan::cli::{Action, CliArgs, Source};
use floorplan::commands::Cmd;
use floorplan::config::EditorConfig;
use floorplan::messages::Msg;
use floorplan::model::{AppModel, Diagnostic};
use floorplan::session::SessionStore;
use floorplan::update::update;

/// Perform the side effects of one update
fn run_command(cmd: Cmd, model: &mut AppModel, store: &SessionStore) {
    match cmd {
        Cmd::Redraw => {}
        Cmd::PersistSession => {
            if let Err(e) = store.save(&model.session_state()) {
                tracing::warn!("Failed to save session: {}", e);
                model.diagnostic = Some(Diagnostic::Persist(e.to_string()));
            }
        }
        Cmd::Batch(cmds) => {
            for cmd in cmds {
                run_command(cmd, model, store);
            }
        }
    }
}

fn dispatch(model: &mut AppModel, store: &SessionStore, msg: Msg) {
    if let Some(cmd) = update(model, msg) {
        run_command(cmd, model, store);
    }
}

fn read_text(source: &Source) -> Result<String> {
    match source {
        Source::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read card text from stdin")?;
            Ok(text)
        }
        Source::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
    }
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    floorplan::tracing::init();

    let config = match &args.config {
        Some(path) => EditorConfig::load_from(path),
        None => EditorConfig::load(),
    };
    let store = match &args.session {
        Some(path) => SessionStore::new(path),
        None => SessionStore::default_location(),
    };
    let action = args.action();
    if action == Action::WriteConfig {
        let written = match &args.config {
            Some(path) => config.save_to(path),
            None => config.save(),
        };
        written.map_err(anyhow::Error::msg)?;
        return Ok(());
    }

    let mut model = AppModel::new(store.load(), config);

    match action {
        Action::Show => {}
        Action::Labels => {
            for label in model.labels() {
                println!("{}\t{}", label.address, label.text);
            }
            return Ok(());
        }
        Action::Highlight(address) => {
            dispatch(&mut model, &store, Msg::DragStarted(address));
            let lines: Vec<String> = model
                .highlighted_lines()
                .iter()
                .map(|n| n.to_string())
                .collect();
            println!("{}", lines.join(" "));
            return Ok(());
        }
        Action::ReadText(source) => {
            let text = read_text(&source)?;
            dispatch(&mut model, &store, Msg::TextEdited(text));
        }
        Action::ReadImage(path) => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            dispatch(&mut model, &store, Msg::ImageDropped { bytes, filename });
        }
        Action::Send(msg) => dispatch(&mut model, &store, msg),
        Action::WriteConfig => {}
    }

    if let Some(diagnostic) = &model.diagnostic {
        eprintln!("warning: {}", diagnostic);
    }
    print!("{}", model.text);
    if !model.text.ends_with('\n') {
        println!();
    }
    Ok(())
}
