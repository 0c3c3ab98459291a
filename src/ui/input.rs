//! Command line parsing for the terminal front end.
//!
//! Each input line is one command. A line starting with `/` is a search
//! (`/heat`), and a lone `/` clears the search. Anything else starts with a
//! command word; `fav` and `open` take either a 1-based list position or a
//! movie id, and default to the highlighted row when given nothing.

use crate::domain::{Genre, UnknownGenre};
use thiserror::Error;

/// Help shown by the `help` command.
pub const HELP_TEXT: &str = "\
/text, search <text>   search (empty clears)
genre <name>, genres   filter by genre / list genres
j, k                   move the highlight
more                   load the next batch
fav [n|id]             toggle watchlist for row n, id, or the highlighted row
watchlist              toggle the watchlist-only view
open [n|id], close     show or hide movie details
retry                  re-run the last failed request
quit                   exit";

/// A movie reference typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 1-based position in the visible list.
    Position(usize),
    Id(String),
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Genre(Genre),
    ListGenres,
    Down,
    Up,
    More,
    /// `None` means the highlighted row.
    Favorite(Option<Target>),
    Watchlist,
    Open(Option<Target>),
    Close,
    Retry,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Genre(#[from] UnknownGenre),
}

/// Parses one input line.
///
/// # Errors
///
/// Returns [`CommandError`] for an empty line, an unknown command word, a
/// missing genre name, or an unknown genre.
///
/// # Example
///
/// ```rust
/// use cinemagic::ui::{parse_command, Command, Target};
/// use cinemagic::Genre;
///
/// assert_eq!(parse_command("/blade runner"), Ok(Command::Search("blade runner".into())));
/// assert_eq!(parse_command("genre sci-fi"), Ok(Command::Genre(Genre::SciFi)));
/// assert_eq!(parse_command("fav 3"), Ok(Command::Favorite(Some(Target::Position(3)))));
/// ```
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();

    if let Some(query) = line.strip_prefix('/') {
        return Ok(Command::Search(query.trim().to_string()));
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word.to_lowercase().as_str() {
        "search" | "s" => Command::Search(rest.to_string()),
        "genre" | "g" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("genre"));
            }
            Command::Genre(rest.parse()?)
        }
        "genres" => Command::ListGenres,
        "j" | "down" => Command::Down,
        "k" | "up" => Command::Up,
        "more" | "m" => Command::More,
        "fav" | "f" => Command::Favorite(parse_target(rest)),
        "watchlist" | "w" => Command::Watchlist,
        "open" | "o" => Command::Open(parse_target(rest)),
        "close" | "back" | "c" => Command::Close,
        "retry" | "r" => Command::Retry,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(line.to_string())),
    };

    Ok(command)
}

fn parse_target(arg: &str) -> Option<Target> {
    if arg.is_empty() {
        return None;
    }
    Some(match arg.parse::<usize>() {
        Ok(position) if position > 0 => Target::Position(position),
        _ => Target::Id(arg.to_string()),
    })
}
