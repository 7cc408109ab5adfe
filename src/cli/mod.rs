use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wikitoc")]
#[command(version)]
#[command(about = "Insert a numbered table of contents into rendered wiki pages")]
#[command(
    long_about = "wikitoc - Scans a rendered HTML page for headings, inserts an anchor before each\n\
    one, and replaces the {TOC} token with a nested, numbered list of links.\n\n\
    Examples:\n  \
    wikitoc page.html              # Print the page with its contents block\n  \
    wikitoc --toc-only page.html   # Print only the contents block\n  \
    wikitoc --tree page.html       # Show the heading tree\n  \
    cat page.html | wikitoc -      # Read from stdin"
)]
pub struct Cli {
    /// Rendered HTML file, or '-' for stdin
    ///
    /// If no file is specified, input is read from stdin.
    pub file: Option<PathBuf>,

    /// Print only the rendered contents block
    #[arg(long = "toc-only")]
    pub toc_only: bool,

    /// Show the heading tree with box-drawing characters
    ///
    /// Placeholder entries for skipped levels are shown in brackets.
    #[arg(long = "tree")]
    pub tree: bool,

    /// List the headings found in the document
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Output format for --list and --tree modes
    ///
    ///   plain - Human-readable text (default)
    ///   json  - JSON for scripting/parsing
    #[arg(short = 'o', long = "output", default_value = "plain")]
    pub output: OutputFormat,

    /// Config file to use instead of the platform default
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Placeholder token to replace (default: {TOC})
    #[arg(long = "token", value_name = "TOKEN")]
    pub token: Option<String>,

    /// Heading level treated as top level (1-6)
    #[arg(long = "base-level", value_name = "LEVEL")]
    pub base_level: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Plain,
    /// JSON output
    Json,
}
