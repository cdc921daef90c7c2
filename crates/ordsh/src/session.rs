//! Line-oriented session: read commands, print replies

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::warn;

use crate::command::{parse_line, Command};
use crate::handler::CommandHandler;
use crate::reply::Reply;

/// Run every command from `input`, writing one reply per command to `output`
///
/// Stops at end of input or at `QUIT`. Malformed lines produce an error
/// reply and the session carries on.
///
/// # Returns
/// * `Result<usize>` - number of commands executed
pub fn run<R, W>(handler: &CommandHandler, mut input: R, output: &mut W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut executed = 0;
    let mut buf = Vec::new();
    let mut n = 0;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        n += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                warn!(line = n, "invalid UTF-8: {}", e);
                writeln!(output, "{}", Reply::Error(format!("invalid UTF-8 on line {}", n)))?;
                continue;
            }
        };

        let reply = match parse_line(line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(cmd)) => {
                executed += 1;
                handler.handle(cmd)
            }
            Err(msg) => {
                warn!(line = n, "{}", msg);
                Reply::Error(msg)
            }
        };
        writeln!(output, "{}", reply)?;
    }

    output.flush()?;
    Ok(executed)
}
