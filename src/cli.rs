use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default catalogue location, relative to the working directory
pub const DEFAULT_CATALOGUE: &str = "data/storedata.json";

/// Bakfiets - Quote the rental price of a bicycle
#[derive(Parser, Debug)]
#[command(name = "bakfiets")]
#[command(about = "Interactive bicycle rental quote wizard")]
#[command(version)]
pub struct Cli {
    /// Path to the catalogue JSON document
    #[arg(
        long,
        global = true,
        env = "BAKFIETS_CATALOGUE",
        default_value = DEFAULT_CATALOGUE
    )]
    pub catalogue: PathBuf,

    /// Write logs to this file instead of stderr.
    ///
    /// The interactive wizard owns the terminal, so without a log file only
    /// warnings and errors are reported.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Load the catalogue and print a summary
    Validate,
    /// Print a quote without the interactive wizard
    Quote {
        /// Brand key
        #[arg(short, long)]
        brand: String,
        /// Model key within the brand
        #[arg(short, long)]
        model: String,
        /// Option key within the model (repeatable)
        #[arg(short, long = "option")]
        options: Vec<String>,
        /// First rental day (DD-MM-YYYY)
        #[arg(short, long)]
        start: String,
        /// Last rental day (DD-MM-YYYY), inclusive
        #[arg(short, long)]
        end: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_args() {
        // Running with no args should succeed (defaults to the wizard)
        let cli = Cli::try_parse_from(["bakfiets"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_cli_catalogue_override() {
        let cli = Cli::try_parse_from(["bakfiets", "--catalogue", "/tmp/shop.json", "validate"])
            .unwrap();
        assert_eq!(cli.catalogue, PathBuf::from("/tmp/shop.json"));
        assert_eq!(cli.command, Some(Commands::Validate));
    }

    #[test]
    fn test_cli_quote_command() {
        let cli = Cli::try_parse_from([
            "bakfiets",
            "quote",
            "--brand",
            "acme",
            "--model",
            "cargo",
            "--option",
            "rain_cover",
            "-o",
            "seat",
            "--start",
            "01-01-2024",
            "--end",
            "03-01-2024",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Quote {
                brand,
                model,
                options,
                start,
                end,
            }) => {
                assert_eq!(brand, "acme");
                assert_eq!(model, "cargo");
                assert_eq!(options, vec!["rain_cover", "seat"]);
                assert_eq!(start, "01-01-2024");
                assert_eq!(end, "03-01-2024");
            }
            other => panic!("Expected Quote command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_quote_requires_dates() {
        let result = Cli::try_parse_from(["bakfiets", "quote", "--brand", "a", "--model", "b"]);
        assert!(result.is_err());
    }
}
