//! Command line definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Gettext plural rules and catalogs from the command line
#[derive(Parser, Debug)]
#[command(name = "pomo", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (`.toml`, `.yml` or `.yaml`)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a Plural-Forms expression for one or more counts
    Eval(EvalArgs),

    /// Summarise a PO or MO catalog and report inconsistent plural entries
    Check(CheckArgs),

    /// Look up a message in a PO or MO catalog
    Translate(TranslateArgs),
}

/// Arguments for `pomo eval`
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Expression such as `n != 1`
    pub expression: String,

    /// Counts to evaluate
    #[arg(required = true, allow_negative_numbers = true)]
    pub counts: Vec<i64>,

    /// Also print the compiled postfix program
    #[arg(long)]
    pub rpn: bool,
}

/// Arguments for `pomo check`
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Catalog file
    pub file: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `pomo translate`
#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Catalog file
    pub file: PathBuf,

    /// Message id to look up
    pub msgid: String,

    /// Plural message id
    #[arg(long, requires = "count")]
    pub plural: Option<String>,

    /// Count selecting the plural form
    #[arg(long, requires = "plural", allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Message context (`msgctxt`)
    #[arg(long)]
    pub context: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_eval() {
        let cli = Cli::try_parse_from(["pomo", "eval", "n != 1", "0", "-1", "5", "--rpn"]).unwrap();
        match cli.command {
            Commands::Eval(args) => {
                assert_eq!(args.expression, "n != 1");
                assert_eq!(args.counts, vec![0, -1, 5]);
                assert!(args.rpn);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_eval_requires_counts() {
        assert!(Cli::try_parse_from(["pomo", "eval", "n != 1"]).is_err());
    }

    #[test]
    fn test_plural_requires_count() {
        assert!(Cli::try_parse_from(["pomo", "translate", "de.po", "file", "--plural", "files"]).is_err());

        let cli = Cli::try_parse_from([
            "pomo", "--config", "pomo.toml", "translate", "de.po", "file", "--plural", "files", "--count", "3",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("pomo.toml")));
        match cli.command {
            Commands::Translate(args) => {
                assert_eq!(args.plural.as_deref(), Some("files"));
                assert_eq!(args.count, Some(3));
                assert_eq!(args.context, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
