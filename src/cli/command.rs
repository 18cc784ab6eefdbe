//! Line-oriented command language of the shell
//!
//! One command per line. The first whitespace-separated token names the
//! command (upper case); text and messages are the remaining tokens joined
//! by single spaces.

use crate::core::{
    error::{Result, TimefsError},
    types::{RankLimit, VersionId},
};

/// Message reported for unknown commands and wrong argument counts
pub const USAGE_ERROR: &str = "Unknown command or incorrect arguments.";

/// Warning reported when a ranking count cannot be parsed
pub const INVALID_COUNT_WARNING: &str = "Invalid number. Showing all by default.";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { name: String },
    Read { name: String },
    Insert { name: String, text: String },
    Update { name: String, text: String },
    Snapshot { name: String, message: String },
    Rollback { name: String, target: Option<VersionId> },
    History { name: String },
    RecentFiles { limit: RankLimit },
    BiggestTrees { limit: RankLimit },
    Info { name: String },
    Tree { name: String },
    Exit,
}

/// A command plus any non-fatal warning raised while parsing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub command: Command,
    pub warning: Option<String>,
}

impl From<Command> for ParsedLine {
    fn from(command: Command) -> Self {
        Self {
            command,
            warning: None,
        }
    }
}

/// Parse one input line
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<ParsedLine>> {
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = tokens.collect();

    let parsed: ParsedLine = match (keyword, args.as_slice()) {
        ("CREATE", [name]) => Command::Create {
            name: name.to_string(),
        }
        .into(),
        ("READ", [name]) => Command::Read {
            name: name.to_string(),
        }
        .into(),
        ("INSERT", [name, rest @ ..]) if !rest.is_empty() => Command::Insert {
            name: name.to_string(),
            text: rest.join(" "),
        }
        .into(),
        ("UPDATE", [name, rest @ ..]) if !rest.is_empty() => Command::Update {
            name: name.to_string(),
            text: rest.join(" "),
        }
        .into(),
        ("SNAPSHOT", [name, rest @ ..]) if !rest.is_empty() => Command::Snapshot {
            name: name.to_string(),
            message: rest.join(" "),
        }
        .into(),
        ("ROLLBACK", [name]) => Command::Rollback {
            name: name.to_string(),
            target: None,
        }
        .into(),
        ("ROLLBACK", [name, id]) => Command::Rollback {
            name: name.to_string(),
            target: Some(id.parse::<VersionId>()?),
        }
        .into(),
        ("HISTORY", [name]) => Command::History {
            name: name.to_string(),
        }
        .into(),
        ("INFO", [name]) => Command::Info {
            name: name.to_string(),
        }
        .into(),
        ("TREE", [name]) => Command::Tree {
            name: name.to_string(),
        }
        .into(),
        ("RECENT_FILES", rest) => {
            let (limit, warning) = parse_limit(rest.first().copied());
            ParsedLine {
                command: Command::RecentFiles { limit },
                warning,
            }
        },
        ("BIGGEST_TREES", rest) => {
            let (limit, warning) = parse_limit(rest.first().copied());
            ParsedLine {
                command: Command::BiggestTrees { limit },
                warning,
            }
        },
        ("EXIT" | "QUIT", _) => Command::Exit.into(),
        _ => return Err(TimefsError::command(USAGE_ERROR)),
    };

    Ok(Some(parsed))
}

/// A missing count means all; an unparsable one falls back to all with a warning
fn parse_limit(raw: Option<&str>) -> (RankLimit, Option<String>) {
    match raw.map(str::parse::<RankLimit>) {
        None => (RankLimit::All, None),
        Some(Ok(limit)) => (limit, None),
        Some(Err(_)) => (RankLimit::All, Some(INVALID_COUNT_WARNING.to_string())),
    }
}
