//! CLI argument parsing for Atribuir

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for attribution reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// CSV format for spreadsheet analysis
    Csv,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "atribuir")]
#[command(version)]
#[command(about = "Attribute a source tree to categories and contributor groups", long_about = None)]
pub struct Cli {
    /// Root path to analyze, relative to the current directory
    #[arg(value_name = "PATH", default_value = ".")]
    pub root: PathBuf,

    /// Categories definition file (whitespace-separated labels; multi-word
    /// labels use underscores)
    #[arg(long, value_name = "FILE", conflicts_with = "contributors")]
    pub categories: Option<PathBuf>,

    /// Contributors definition file (TOML table of "Author" = "Group")
    #[arg(long, value_name = "FILE")]
    pub contributors: Option<PathBuf>,

    /// Output format (csv or json)
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report only the root aggregate instead of every node
    #[arg(long = "root-only")]
    pub root_only: bool,

    /// Enable debug logging to stderr
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_root_is_current_dir() {
        let cli = Cli::parse_from(["atribuir", "--categories", "cats.txt"]);
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn test_cli_parses_root_path() {
        let cli = Cli::parse_from(["atribuir", "src", "--categories", "cats.txt"]);
        assert_eq!(cli.root, PathBuf::from("src"));
    }

    #[test]
    fn test_cli_categories_and_contributors_conflict() {
        let result = Cli::try_parse_from([
            "atribuir",
            "--categories",
            "cats.txt",
            "--contributors",
            "people.toml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_default_format_is_csv() {
        let cli = Cli::parse_from(["atribuir", "--categories", "cats.txt"]);
        assert!(matches!(cli.format, OutputFormat::Csv));
    }

    #[test]
    fn test_cli_json_format() {
        let cli = Cli::parse_from(["atribuir", "--categories", "cats.txt", "--format", "json"]);
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn test_cli_root_only_default_false() {
        let cli = Cli::parse_from(["atribuir", "--categories", "cats.txt"]);
        assert!(!cli.root_only);
    }

    #[test]
    fn test_cli_root_only_flag() {
        let cli = Cli::parse_from(["atribuir", "--categories", "cats.txt", "--root-only"]);
        assert!(cli.root_only);
    }

    #[test]
    fn test_cli_output_file() {
        let cli = Cli::parse_from([
            "atribuir",
            "--categories",
            "cats.txt",
            "-o",
            "report.csv",
        ]);
        assert_eq!(cli.output, Some(PathBuf::from("report.csv")));
    }

    #[test]
    fn test_cli_debug_default_false() {
        let cli = Cli::parse_from(["atribuir", "--categories", "cats.txt"]);
        assert!(!cli.debug);
    }
}
