//! Editor command parsing.
//!
//! ```text
//! list | ls
//! add <METHOD> <PATH> [status] [delay=<ms>] [header=<Name>:<Value>]... [json body]
//! rm | delete <id | index>
//! help
//! quit | exit
//! ```

use std::str::FromStr;

use thiserror::Error;

use crate::endpoints::EndpointDraft;

pub const HELP: &str = "\
commands:
  list                                   show endpoints
  add <METHOD> <PATH> [status] [delay=<ms>] [header=<Name>:<Value>]... [json body]
  rm <id|index>                          delete an endpoint
  help                                   show this help
  quit                                   stop the server";

#[derive(Debug)]
pub enum Command {
    List,
    Add(EndpointDraft),
    Remove(String),
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("header must look like header=<Name>:<Value>, got {0}")]
    MalformedHeader(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let Some((verb, args)) = next_token(line) else {
            return Ok(Command::Empty);
        };

        match verb.to_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "add" | "a" => parse_add(args).map(Command::Add),
            "rm" | "delete" | "d" => next_token(args)
                .map(|(selector, _)| Command::Remove(selector.to_string()))
                .ok_or(CommandError::MissingArgument("id or index")),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(verb.to_string())),
        }
    }
}

fn parse_add(args: &str) -> Result<EndpointDraft, CommandError> {
    let (method, rest) = next_token(args).ok_or(CommandError::MissingArgument("method"))?;
    let (path, mut rest) = next_token(rest).ok_or(CommandError::MissingArgument("path"))?;

    let mut draft = EndpointDraft::new(method, path);
    let mut status_seen = false;

    // Options come first; the first token that is not one starts the body.
    while let Some((token, tail)) = next_token(rest) {
        if let Some(ms) = token.strip_prefix("delay=") {
            draft.delay = ms.to_string();
        } else if let Some(header) = token.strip_prefix("header=") {
            let (name, value) = header
                .split_once(':')
                .ok_or_else(|| CommandError::MalformedHeader(header.to_string()))?;
            draft.headers.push((name.to_string(), value.to_string()));
        } else if !status_seen && token.bytes().all(|b| b.is_ascii_digit()) {
            draft.status = token.to_string();
            status_seen = true;
        } else {
            break;
        }
        rest = tail;
    }

    draft.body = rest.trim().to_string();
    Ok(draft)
}

fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    Some(s.split_once(char::is_whitespace).unwrap_or((s, "")))
}
