//! Parsing of the prompt's commands.

use std::str::FromStr;

use crate::args::parse_rows;

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    First,
    Last,
    /// 1-based page number.
    Page(u32),
    Rows(u32),
    /// 1-based row numbers on the visible page.
    Toggle(Vec<usize>),
    All,
    None,
    Panel,
    /// Raw text for the bulk-count input.
    Count(String),
    Submit,
    /// Set the bulk count and submit in one go.
    Select(String),
    Selected,
    Show,
    Help,
    Quit,
}

/// Why a line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("{0}")]
    InvalidArgument(String),
}

pub const HELP: &str = "\
commands:
  next | n            next page
  prev | p            previous page
  first | last        jump to the first or last page
  page <n>            jump to page n
  rows <12|25|50>     change rows per page (back to page 1)
  toggle <row>...     tick or untick rows of the visible page
  all | none          tick or untick every row of the visible page
  panel               show or hide the bulk selection panel
  count <n>           set the bulk selection count
  submit              select the first <count> records from this page on
  select <n>          count + submit
  selected            list every selected artwork
  show                redraw the table
  help                this text
  quit | q            exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Command::Show);
        };
        let rest: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "first" => Command::First,
            "last" => Command::Last,
            "page" => Command::Page(parse_number(first_arg(&rest, "page")?, "page")?),
            "rows" => Command::Rows(
                parse_rows(first_arg(&rest, "rows")?).map_err(CommandError::InvalidArgument)?,
            ),
            "toggle" | "t" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("toggle"));
                }
                let rows = rest
                    .iter()
                    .map(|word| parse_number(word, "row").map(|n| n as usize))
                    .collect::<Result<Vec<_>, _>>()?;
                Command::Toggle(rows)
            }
            "all" => Command::All,
            "none" => Command::None,
            "panel" => Command::Panel,
            "count" => Command::Count(rest.join(" ")),
            "submit" => Command::Submit,
            "select" => Command::Select(first_arg(&rest, "select")?.to_string()),
            "selected" => Command::Selected,
            "show" | "ls" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn first_arg<'a>(rest: &[&'a str], command: &'static str) -> Result<&'a str, CommandError> {
    rest.first().copied().ok_or(CommandError::MissingArgument(command))
}

/// Parses a 1-based number.
fn parse_number(word: &str, what: &str) -> Result<u32, CommandError> {
    match word.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(CommandError::InvalidArgument(format!(
            "{} must be a number from 1, got '{}'",
            what, word
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation() {
        assert_eq!("n".parse(), Ok(Command::Next));
        assert_eq!("  PREV ".parse(), Ok(Command::Prev));
        assert_eq!("page 7".parse(), Ok(Command::Page(7)));
        assert_eq!("rows 25".parse(), Ok(Command::Rows(25)));
        assert_eq!("".parse(), Ok(Command::Show));
    }

    #[test]
    fn test_toggle_rows() {
        assert_eq!("toggle 1 4 12".parse(), Ok(Command::Toggle(vec![1, 4, 12])));
        assert_eq!(
            "toggle".parse::<Command>(),
            Err(CommandError::MissingArgument("toggle"))
        );
        assert!(matches!(
            "toggle 0".parse::<Command>(),
            Err(CommandError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bulk_commands_keep_raw_text() {
        assert_eq!("count 20".parse(), Ok(Command::Count("20".to_string())));
        assert_eq!("count".parse(), Ok(Command::Count(String::new())));
        assert_eq!("select -".parse(), Ok(Command::Select("-".to_string())));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            "dance".parse::<Command>(),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert!(matches!(
            "rows 13".parse::<Command>(),
            Err(CommandError::InvalidArgument(_))
        ));
        assert_eq!(
            "page".parse::<Command>(),
            Err(CommandError::MissingArgument("page"))
        );
    }
}
