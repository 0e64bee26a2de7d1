//! Line-oriented interactive front-end.
//!
//! Each input line is parsed into a [`ShellCommand`] and applied to a
//! [`Session`]. `title` and `desc` write into the edit buffer while an edit is
//! in progress and into the add form otherwise.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::models::MissionId;
use crate::render;
use crate::session::Session;

const PROMPT: &str = "missions> ";

const HELP: &str = "\
Commands:
  list                          show all missions
  add [TITLE [-- DESCRIPTION]]  add a mission (without arguments, submit the draft)
  title TEXT                    set the title being drafted or edited
  desc TEXT                     set the description being drafted or edited
  edit ID                       start editing a mission
  save                          save the edit in progress
  cancel                        discard the edit in progress
  toggle ID                     mark a mission done or not done
  delete ID                     delete a mission
  show ID                       show a mission's details
  close                         close the details panel
  help                          show this help
  quit                          leave the shell
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Add {
        title: Option<String>,
        description: Option<String>,
    },
    Title(String),
    Description(String),
    Edit(MissionId),
    Save,
    Cancel,
    Toggle(MissionId),
    Delete(MissionId),
    Show(MissionId),
    Close,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),
    #[error("`{0}` needs a mission id")]
    MissingId(&'static str),
    #[error("invalid mission id: {0}")]
    InvalidId(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "list" | "ls" => ShellCommand::List,
        "add" => parse_add(rest),
        "title" => ShellCommand::Title(rest.to_string()),
        "desc" => ShellCommand::Description(rest.to_string()),
        "edit" => ShellCommand::Edit(parse_id("edit", rest)?),
        "save" => ShellCommand::Save,
        "cancel" => ShellCommand::Cancel,
        "toggle" | "done" => ShellCommand::Toggle(parse_id("toggle", rest)?),
        "delete" | "rm" => ShellCommand::Delete(parse_id("delete", rest)?),
        "show" => ShellCommand::Show(parse_id("show", rest)?),
        "close" => ShellCommand::Close,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn parse_add(rest: &str) -> ShellCommand {
    if rest.is_empty() {
        return ShellCommand::Add {
            title: None,
            description: None,
        };
    }

    // The separator is a standalone `--` word; `--` inside a word is title text.
    let (title, description) = if let Some((title, description)) = rest.split_once(" -- ") {
        (title.trim(), Some(description.trim()))
    } else if let Some(title) = rest.strip_suffix(" --") {
        (title.trim(), Some(""))
    } else if let Some(description) = rest.strip_prefix("-- ") {
        ("", Some(description.trim()))
    } else if rest == "--" {
        ("", Some(""))
    } else {
        (rest, None)
    };

    ShellCommand::Add {
        title: Some(title.to_string()),
        description: description.map(str::to_string),
    }
}

fn parse_id(command: &'static str, rest: &str) -> Result<MissionId, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingId(command));
    }
    rest.trim_start_matches('#')
        .parse()
        .map_err(|_| ParseError::InvalidId(rest.to_string()))
}

/// Apply one command. Returns `false` when the shell should stop.
pub fn execute(
    session: &mut Session,
    command: ShellCommand,
    out: &mut impl Write,
) -> io::Result<bool> {
    match command {
        ShellCommand::List => print_list(session, out)?,
        ShellCommand::Add { title, description } => {
            if let Some(title) = title {
                session.set_draft_title(title);
            }
            if let Some(description) = description {
                session.set_draft_description(description);
            }
            match session.submit_draft() {
                Some(id) => writeln!(out, "Added mission #{}", id)?,
                None => writeln!(out, "A mission needs a title.")?,
            }
        }
        ShellCommand::Title(text) => {
            if !session.set_edit_title(text.clone()) {
                session.set_draft_title(text);
            }
        }
        ShellCommand::Description(text) => {
            if !session.set_edit_description(text.clone()) {
                session.set_draft_description(text);
            }
        }
        ShellCommand::Edit(id) => {
            if session.begin_edit(id) {
                writeln!(out, "Editing #{}. Use `title`, `desc`, then `save` or `cancel`.", id)?;
            } else {
                writeln!(out, "No mission #{}", id)?;
            }
        }
        ShellCommand::Save => match session.editing_id() {
            None => writeln!(out, "Nothing is being edited.")?,
            Some(id) => {
                if session.save_edit() {
                    writeln!(out, "Saved mission #{}", id)?;
                } else {
                    writeln!(out, "A mission needs a title.")?;
                }
            }
        },
        ShellCommand::Cancel => session.cancel_edit(),
        ShellCommand::Toggle(id) => {
            session.toggle(id);
            match session.store().get(id) {
                Some(m) if m.is_completed => writeln!(out, "Completed #{}", id)?,
                Some(_) => writeln!(out, "Reopened #{}", id)?,
                None => writeln!(out, "No mission #{}", id)?,
            }
        }
        ShellCommand::Delete(id) => {
            if session.store().get(id).is_some() {
                session.delete(id);
                writeln!(out, "Deleted mission #{}", id)?;
            } else {
                writeln!(out, "No mission #{}", id)?;
            }
        }
        ShellCommand::Show(id) => match session.select(id) {
            Some(mission) => write!(out, "{}", render::render_detail(mission))?,
            None => writeln!(out, "No mission #{}", id)?,
        },
        ShellCommand::Close => session.close_detail(),
        ShellCommand::Help => write!(out, "{}", HELP)?,
        ShellCommand::Quit => return Ok(false),
    }

    Ok(true)
}

fn print_list(session: &Session, out: &mut impl Write) -> io::Result<()> {
    let store = session.store();
    write!(
        out,
        "{}",
        render::render_list(store.missions(), store.selected(), session.edit_buffer())
    )
}

/// Read commands until `quit` or end of input.
pub fn run(session: &mut Session, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
    print_list(session, out)?;
    write!(out, "{}", PROMPT)?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(Some(command)) => {
                if !execute(session, command, out)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => writeln!(out, "{}", e)?,
        }
        write!(out, "{}", PROMPT)?;
        out.flush()?;
    }

    Ok(())
}
