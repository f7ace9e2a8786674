//! Line-oriented command console standing in for the picker and buttons.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use textlift_core::Msg;

use crate::input;
use crate::session::Session;

const HELP: &str = "\
commands:
  select <path>...   replace the selection with these images
  extract            run OCR over the current selection
  clear              drop selection, previews and report
  status             print the current view again
  help               show this text
  quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(Vec<PathBuf>),
    Extract,
    Clear,
    Status,
    Help,
    Quit,
}

/// `Ok(None)` for blank input.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let command = match verb {
        "select" | "open" => Command::Select(words.map(PathBuf::from).collect()),
        "extract" | "run" => Command::Extract,
        "clear" | "reset" => Command::Clear,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(command))
}

pub fn run(session: &mut Session, output: Option<&Path>) -> anyhow::Result<()> {
    eprintln!("{HELP}");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        session.drain();
        eprint!("> ");
        io::stderr().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let command = match parse_command(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            Command::Select(paths) => {
                session.dispatch(Msg::FilesSelected(input::read_selection(&paths)));
            }
            Command::Extract => {
                session.dispatch(Msg::ExtractClicked);
                session.run_until_idle();
                if let Some(target) = output {
                    if session.view().results_visible {
                        if let Err(err) = session.export(target) {
                            eprintln!("{err:#}");
                        }
                    }
                }
            }
            Command::Clear => session.dispatch(Msg::ClearClicked),
            Command::Status => session.redraw(),
            Command::Help => eprintln!("{HELP}"),
            Command::Quit => break,
        }

        // The notice has been printed; the console treats that as acknowledged.
        if session.view().notification.is_some() {
            session.dispatch(Msg::NotificationDismissed);
        }
    }
    Ok(())
}
