//! Line-oriented interactive session.
//!
//! Plain lines accumulate in the input buffer; an empty line (or `:analyze`)
//! submits it. A line is a command only when it names one of the commands
//! below, so text such as `:) great day` is still analyzed.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use sentisense_core::scorer::Scorer;
use sentisense_core::session::{Action, Outcome, Session};
use sentisense_report::{export, text, timeline};

const HELP: &str = "\
Type or paste text, then submit it with an empty line or :analyze.

Commands:
  :analyze, :a        analyze the current input
  :clear              clear the input buffer
  :reset              reset the analysis history
  :show               show the current result again
  :history, :h        show the history timeline
  :export [PATH]      write the history as CSV
  :paste ... :end     take every line up to :end as input, blank lines too
  :help               show this help
  :quit, :q           leave the session

Start a line with :: to enter text that begins with a colon.
";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    Submit,
    Analyze,
    Clear,
    Reset,
    Show,
    History,
    Export(Option<PathBuf>),
    Paste,
    EndPaste,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Command {
    let body = line.trim_end_matches(['\r', '\n']);
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Command::Submit;
    }
    if let Some(rest) = trimmed.strip_prefix("::") {
        return Command::Text(format!(":{rest}"));
    }
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Text(body.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match (name, arg) {
        ("export", arg) => Command::Export(arg.map(PathBuf::from)),
        ("analyze" | "a", None) => Command::Analyze,
        ("clear", None) => Command::Clear,
        ("reset", None) => Command::Reset,
        ("show", None) => Command::Show,
        ("history" | "h", None) => Command::History,
        ("paste", None) => Command::Paste,
        ("end", None) => Command::EndPaste,
        ("help" | "?", None) => Command::Help,
        ("quit" | "q" | "exit", None) => Command::Quit,
        _ => Command::Text(body.to_string()),
    }
}

/// Settings the loop needs besides the session itself.
pub struct ReplOptions {
    pub precision: usize,
    pub export_path: PathBuf,
    pub prompt: bool,
}

/// Drive `session` from `input` until EOF or `:quit`.
pub fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    session: &mut Session,
    scorer: &dyn Scorer,
    options: &ReplOptions,
) -> Result<()> {
    writeln!(
        out,
        "{} Type :help for commands.",
        "SentiSense: your text analysis companion.".bold()
    )?;

    let mut lines = input.lines();
    let mut pasting = false;
    loop {
        if options.prompt {
            let prompt = match (pasting, session.input().is_empty()) {
                (true, _) => "| ",
                (false, true) => "> ",
                (false, false) => ". ",
            };
            write!(out, "{prompt}")?;
            out.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;

        if pasting {
            if parse_command(&line) == Command::EndPaste {
                pasting = false;
                writeln!(out, "Paste finished. Submit with an empty line or :analyze.")?;
            } else {
                session.push_input_line(line.trim_end_matches('\r'));
            }
            continue;
        }

        match parse_command(&line) {
            Command::Text(text) => session.push_input_line(&text),
            Command::Submit => {
                if !session.input().is_empty() {
                    apply(out, session, scorer, Action::Analyze, options)?;
                }
            }
            Command::Analyze => apply(out, session, scorer, Action::Analyze, options)?,
            Command::Clear => apply(out, session, scorer, Action::ClearInput, options)?,
            Command::Reset => apply(out, session, scorer, Action::ResetHistory, options)?,
            Command::Show => match session.current() {
                Some(record) => write!(out, "{}", text::format_result(record, options.precision))?,
                None => writeln!(out, "No result yet.")?,
            },
            Command::History => {
                let tl = timeline::project(session.history().snapshot());
                write!(out, "{}", text::format_timeline(&tl, options.precision))?;
                write!(out, "{}", text::format_summary(session.history()))?;
            }
            Command::Export(path) => {
                let target = path.unwrap_or_else(|| options.export_path.clone());
                export_history(out, session, &target)?;
            }
            Command::Paste => {
                pasting = true;
                writeln!(out, "Pasting. Finish with :end on its own line.")?;
            }
            Command::EndPaste => writeln!(out, "Not pasting. Start with :paste.")?,
            Command::Help => write!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }

    out.flush()?;
    Ok(())
}

fn apply<W: Write>(
    out: &mut W,
    session: &mut Session,
    scorer: &dyn Scorer,
    action: Action,
    options: &ReplOptions,
) -> Result<()> {
    match session.apply(action, scorer) {
        Ok(Outcome::Analyzed(record)) => {
            write!(out, "{}", text::format_result(&record, options.precision))?;
            write!(out, "\n{}", text::format_summary(session.history()))?;
        }
        Ok(Outcome::EmptyInputWarning) => {
            writeln!(
                out,
                "{}: Please enter text for analysis.",
                "Warning".yellow().bold()
            )?;
        }
        Ok(Outcome::InputCleared) => writeln!(out, "Input cleared.")?,
        Ok(Outcome::HistoryReset) => writeln!(out, "History reset.")?,
        // A failed analysis ends this interaction only; the session carries on.
        Err(e) => writeln!(out, "{}: {e}", "Error".red().bold())?,
    }
    Ok(())
}

/// Write the history as CSV, reporting the outcome on `out`.
pub fn export_history<W: Write>(out: &mut W, session: &Session, target: &Path) -> Result<()> {
    if session.history().is_empty() {
        writeln!(out, "Nothing to export yet.")?;
        return Ok(());
    }
    match export::write_file(target, session.history().snapshot()) {
        Ok(written) => writeln!(
            out,
            "Exported {} rows to {} ({})",
            session.history().len(),
            written.display(),
            export::EXPORT_MIME
        )?,
        Err(e) => writeln!(out, "{}: {e:#}", "Error".red().bold())?,
    }
    Ok(())
}
