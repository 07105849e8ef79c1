use std::env;

use super::session::{plural_suffix, Session};
use crate::error::ShellError;
use crate::path::PathExpander;
use crate::process::{Outcome, Supervisor};

/// What the read-eval loop should do after a command; errors travel
/// separately through `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Terminate,
}

/// Execute one tokenized command: built-ins first, then the external
/// fallback. Built-in recognition is exact whole-token equality, so a
/// program named `exitfoo` or `cdrom` is never mistaken for a built-in.
pub fn dispatch(
    session: &mut Session,
    supervisor: &Supervisor,
    tokens: &[String],
) -> Result<Dispatch, ShellError> {
    let Some(name) = tokens.first() else {
        return Ok(Dispatch::Continue);
    };

    match name.as_str() {
        // Trailing tokens after "exit" are ignored.
        "exit" => Ok(Dispatch::Terminate),
        "prompt" => {
            let text = tokens.get(1).ok_or(ShellError::MissingArgument("prompt"))?;
            session.set_prompt(text);
            Ok(Dispatch::Continue)
        }
        "for" => repeat_command(session, supervisor, tokens),
        "timeout" => configure_timeout(session, tokens),
        "cd" => {
            change_directory(tokens.get(1).map(String::as_str))?;
            Ok(Dispatch::Continue)
        }
        _ => match supervisor.run(tokens, session.timeout_secs())? {
            Outcome::Completed(_) | Outcome::Killed => Ok(Dispatch::Continue),
        },
    }
}

/// `for <count> <command...>`: re-dispatch the inner tokens `<count>` times.
/// Nested built-ins are honored on every iteration, and an inner `exit`
/// terminates the whole loop, not just one iteration.
fn repeat_command(
    session: &mut Session,
    supervisor: &Supervisor,
    tokens: &[String],
) -> Result<Dispatch, ShellError> {
    let count_token = tokens.get(1).ok_or(ShellError::MissingArgument("for"))?;
    let count: u32 = count_token
        .parse()
        .map_err(|_| ShellError::InvalidNumber(count_token.clone()))?;

    let inner = &tokens[2..];
    if inner.is_empty() {
        return Err(ShellError::MissingArgument("for"));
    }

    for _ in 0..count {
        if dispatch(session, supervisor, inner)? == Dispatch::Terminate {
            return Ok(Dispatch::Terminate);
        }
    }
    Ok(Dispatch::Continue)
}

/// `timeout` alone reports the current value on stdout; `timeout <secs>`
/// updates it (the session announces the change on stderr).
fn configure_timeout(session: &mut Session, tokens: &[String]) -> Result<Dispatch, ShellError> {
    match tokens.get(1) {
        None => {
            let secs = session.timeout_secs();
            println!("Current timeout is {} second{}", secs, plural_suffix(secs));
        }
        Some(token) => {
            let secs: u32 = token
                .parse()
                .map_err(|_| ShellError::InvalidNumber(token.clone()))?;
            session.set_timeout(secs);
        }
    }
    Ok(Dispatch::Continue)
}

/// `cd` with no argument or `~` goes home; anything else is expanded and
/// chdir'd into. On failure the working directory is left untouched.
fn change_directory(arg: Option<&str>) -> Result<(), ShellError> {
    let expander = PathExpander::new();
    let target = match arg {
        None | Some("~") => expander.home_dir()?,
        Some(path) => expander.expand(path)?,
    };

    env::set_current_dir(&target)
        .map_err(|e| ShellError::DirectoryChange(target.display().to_string(), e.to_string()))
}
