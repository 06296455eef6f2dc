use std::ffi::OsString;

use clap::error::Error as ClapError;
use clap::{CommandFactory, Parser};

use crate::util::error::{Error, Result};

/// Parses the process arguments. `None` means help or version text was
/// printed and there is nothing left to do.
pub fn parse_args<P: Parser>() -> Result<Option<P>> {
    parse_from(std::env::args_os())
}

pub fn parse_from<P, I, T>(args: I) -> Result<Option<P>>
where
    P: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match P::try_parse_from(args) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) if !e.use_stderr() => {
            e.print()?;
            Ok(None)
        }
        Err(e) => Err(usage_error::<P>(&e)),
    }
}

/// Folds clap's multi-line report into one line followed by the usage string.
fn usage_error<P: CommandFactory>(error: &ClapError) -> Error {
    let rendered = error.render().to_string();
    let reason = rendered
        .lines()
        .map(str::trim)
        .take_while(|line| !line.starts_with("Usage:"))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let reason = reason.strip_prefix("error: ").unwrap_or(&reason);
    Error::Usage(format!("{}; {}", reason, P::command().render_usage()))
}
