//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `list`: list the classes, interfaces and enums of a project
//! - `files`: show which source files would be scanned and why

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::List(cmd)) => cmd.common.verbose,
            Some(Command::Files(cmd)) => cmd.common.verbose,
            None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root (the directory holding tsconfig.json)
    #[arg(long, default_value = ".", env = "TSLISTER_PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct FilesCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List classes, interfaces and enums declared in the project's TypeScript sources
    List(ListCommand),
    /// Show the source files that would be scanned, and how they were found
    Files(FilesCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_defaults() {
        let args = Arguments::try_parse_from(["tslister", "list"]).unwrap();
        let Some(Command::List(cmd)) = args.command else {
            panic!("expected list command");
        };
        assert_eq!(cmd.common.project_dir, PathBuf::from("."));
        assert_eq!(cmd.format, OutputFormat::Text);
        assert!(!cmd.common.verbose);
    }

    #[test]
    fn test_files_with_flags() {
        let args =
            Arguments::try_parse_from(["tslister", "files", "--project-dir", "web", "-v"]).unwrap();
        assert!(args.verbose());
        let Some(Command::Files(cmd)) = args.command else {
            panic!("expected files command");
        };
        assert_eq!(cmd.common.project_dir, PathBuf::from("web"));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Arguments::try_parse_from(["tslister", "list", "--format", "xml"]).is_err());
    }
}
