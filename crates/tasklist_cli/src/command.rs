//! Input line grammar.
//!
//! Each stdin line is parsed as one subcommand with no binary name, so clap
//! supplies usage errors and the built-in `help` subcommand.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tasklist", no_binary_name = true, disable_version_flag = true)]
pub struct InputLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a task
    Add {
        #[arg(trailing_var_arg = true, num_args = 0.., allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Flip completion of the task at display row N
    Toggle { row: usize },
    /// Edit the task at display row N
    Edit { row: usize },
    /// Save the row being edited (empty text deletes it)
    Save {
        #[arg(trailing_var_arg = true, num_args = 0.., allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Delete the task at display row N
    #[command(visible_alias = "rm")]
    Delete { row: usize },
    /// Show the list
    #[command(visible_alias = "ls")]
    List,
    /// Exit
    #[command(visible_alias = "exit")]
    Quit,
}

/// Parses one input line; blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, clap::Error> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    InputLine::try_parse_from(line.split_whitespace()).map(|input| Some(input.command))
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command};
    use clap::error::ErrorKind;

    fn words(text: &[&str]) -> Vec<String> {
        text.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn add_keeps_text_after_verb() {
        assert_eq!(
            parse_command("add Buy milk\n").unwrap(),
            Some(Command::Add {
                text: words(&["Buy", "milk"])
            })
        );
    }

    #[test]
    fn save_without_text_is_allowed() {
        assert_eq!(
            parse_command("save").unwrap(),
            Some(Command::Save { text: Vec::new() })
        );
    }

    #[test]
    fn row_commands_require_numbers() {
        assert_eq!(
            parse_command("toggle 2").unwrap(),
            Some(Command::Toggle { row: 2 })
        );
        assert!(parse_command("delete two").is_err());
        assert!(parse_command("edit").is_err());
    }

    #[test]
    fn aliases_map_to_commands() {
        assert_eq!(
            parse_command("rm 3").unwrap(),
            Some(Command::Delete { row: 3 })
        );
        assert_eq!(parse_command("ls").unwrap(), Some(Command::List));
        assert_eq!(parse_command("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn blank_unknown_and_help_lines() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(
            parse_command("frobnicate").unwrap_err().kind(),
            ErrorKind::InvalidSubcommand
        );
        assert_eq!(
            parse_command("help").unwrap_err().kind(),
            ErrorKind::DisplayHelp
        );
    }
}
