//! Command line parser using nom
//!
//! One command per line:
//! ```text
//! PUT <key> <value...>
//! GET <key>
//! RESIZE <n>
//! ```
//! Verbs are case-insensitive. Keys are a single whitespace-free token; a
//! value is the rest of the line. Blank lines and `#` comments parse to
//! `None`.

use nom::{
    bytes::complete::take_till1,
    character::complete::{alpha1, digit1, multispace0, multispace1},
    combinator::{eof, map, map_res, rest},
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert or overwrite a value
    Put {
        /// Cache key
        key: String,
        /// Value, possibly containing spaces
        value: String,
    },
    /// Read a value, marking it most recently used
    Get(String),
    /// Read a value without touching recency
    Peek(String),
    /// Remove a key
    Del(String),
    /// Check for a key
    Exists(String),
    /// Drop every entry
    Clear,
    /// Change the bound (0 for unbounded)
    Resize(usize),
    /// Number of entries
    Size,
    /// Current bound
    MaxSize,
    /// Keys from least to most recently used
    Keys,
    /// Statistics counters
    Stats,
    /// Zero the statistics counters
    ResetStats,
    /// Command summary
    Help,
    /// End the session
    Quit,
}

/// Whitespace-separated token
fn token(input: &str) -> IResult<&str, &str> {
    preceded(multispace1, take_till1(char::is_whitespace))(input)
}

/// Decimal count
fn number(input: &str) -> IResult<&str, usize> {
    preceded(multispace1, map_res(digit1, |s: &str| s.parse::<usize>()))(input)
}

/// Everything after the separating whitespace
fn text(input: &str) -> IResult<&str, &str> {
    preceded(multispace1, rest)(input)
}

fn end(input: &str) -> IResult<&str, ()> {
    map(pair(multispace0, eof), |_| ())(input)
}

fn key_command<'a>(
    input: &'a str,
    build: fn(String) -> Command,
) -> IResult<&'a str, Command> {
    map(terminated(token, end), |key: &str| build(key.to_string()))(input)
}

fn bare_command(input: &str, command: Command) -> IResult<&str, Command> {
    map(end, move |_| command.clone())(input)
}

/// Parse a single line
///
/// # Returns
/// * `Ok(None)` for blank lines and comments
/// * `Err(message)` for unknown verbs or malformed arguments
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (args, verb) = alpha1::<_, nom::error::Error<&str>>(line)
        .map_err(|_| format!("invalid command '{}'", line))?;
    let verb = verb.to_ascii_uppercase();

    let parsed = match verb.as_str() {
        "PUT" | "SET" => map(tuple((token, text)), |(key, value): (&str, &str)| {
            Command::Put {
                key: key.to_string(),
                value: value.to_string(),
            }
        })(args),
        "GET" => key_command(args, Command::Get),
        "PEEK" => key_command(args, Command::Peek),
        "DEL" | "REMOVE" => key_command(args, Command::Del),
        "EXISTS" => key_command(args, Command::Exists),
        "RESIZE" => map(terminated(number, end), Command::Resize)(args),
        "CLEAR" => bare_command(args, Command::Clear),
        "SIZE" => bare_command(args, Command::Size),
        "MAXSIZE" => bare_command(args, Command::MaxSize),
        "KEYS" => bare_command(args, Command::Keys),
        "STATS" => bare_command(args, Command::Stats),
        "RESETSTATS" => bare_command(args, Command::ResetStats),
        "HELP" => bare_command(args, Command::Help),
        "QUIT" | "EXIT" => bare_command(args, Command::Quit),
        _ => return Err(format!("unknown command '{}'", verb)),
    };

    parsed
        .map(|(_, command)| Some(command))
        .map_err(|_| {
            format!(
                "wrong arguments for '{}' command (try HELP)",
                verb.to_ascii_lowercase()
            )
        })
}

/// Command summary printed by `HELP`
pub const HELP: &str = "\
PUT <key> <value>   insert or overwrite a value (alias: SET)
GET <key>           read a value and mark it most recently used
PEEK <key>          read a value without touching recency
DEL <key>           remove a key, 1 if removed, 0 if absent (alias: REMOVE)
EXISTS <key>        1 if the key is cached, 0 otherwise
CLEAR               remove every entry
RESIZE <n>          set the bound, 0 for unbounded (replies evicted count)
SIZE                number of entries
MAXSIZE             current bound
KEYS                keys from least to most recently used
STATS               hit/miss/eviction counters
RESETSTATS          zero the counters
QUIT                end the session (alias: EXIT)";
