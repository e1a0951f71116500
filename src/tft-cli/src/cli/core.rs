//! Core CLI definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tft")]
#[command(about = "TFT metadata refinement", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the hashed effect key for one or more names
    #[command(visible_alias = "h")]
    Hash {
        /// Symbolic effect names (e.g. "Damage", "MagicResist")
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Refine a CommunityDragon metadata JSON file
    #[command(visible_alias = "r")]
    Refine {
        /// Path to metadata JSON ("-" for stdin)
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Which part of the document to emit
        #[arg(short, long, value_enum, default_value_t = Section::All)]
        section: Section,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Refine the items of a metadata file and store them in the database
    Store {
        /// Path to metadata JSON ("-" for stdin)
        input: PathBuf,

        /// Database path (uses configured default if not provided)
        #[arg(long, env = "TFT_DB")]
        db: Option<PathBuf>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default database path
        #[arg(long)]
        db: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

/// Top-level section of the refined document
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    All,
    Items,
    SetData,
    Sets,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_refine() {
        let cli = Cli::try_parse_from([
            "tft", "refine", "meta.json", "-o", "out.json", "--section", "set-data", "--compact",
        ])
        .unwrap();

        match cli.command {
            Commands::Refine {
                input,
                output,
                section,
                compact,
            } => {
                assert_eq!(input, PathBuf::from("meta.json"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert_eq!(section, Section::SetData);
                assert!(compact);
            }
            _ => panic!("expected refine"),
        }
    }

    #[test]
    fn test_parse_refine_defaults() {
        let cli = Cli::try_parse_from(["tft", "r", "meta.json"]).unwrap();
        match cli.command {
            Commands::Refine {
                output,
                section,
                compact,
                ..
            } => {
                assert_eq!(output, None);
                assert_eq!(section, Section::All);
                assert!(!compact);
            }
            _ => panic!("expected refine"),
        }
    }

    #[test]
    fn test_hash_requires_names() {
        assert!(Cli::try_parse_from(["tft", "hash"]).is_err());

        let cli = Cli::try_parse_from(["tft", "hash", "Damage", "Shield"]).unwrap();
        match cli.command {
            Commands::Hash { names } => assert_eq!(names, vec!["Damage", "Shield"]),
            _ => panic!("expected hash"),
        }
    }
}
