//! # wikitoc
//!
//! Insert a numbered table of contents into rendered wiki pages.
//!
//! ## Usage
//!
//! Process a page and print the result:
//! ```sh
//! wikitoc page.html
//! ```
//!
//! Show the heading tree:
//! ```sh
//! wikitoc --tree page.html
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, OutputFormat};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use std::io::{IsTerminal, Read};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wikitoc::parser::{self, TocOutput};
use wikitoc::{Config, Document, TocInjector};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    init_tracing(args.verbose);

    // Priority: CLI args > config file > defaults
    let mut config = match args.config.as_deref() {
        Some(path) => Config::load_from(path)
            .wrap_err_with(|| format!("loading config {}", path.display()))?,
        None => Config::load(),
    };
    if let Some(ref token) = args.token {
        config.document.token = token.clone();
    }
    if let Some(level) = args.base_level {
        config.document.base_level = level;
    }

    let injector = TocInjector::new(config.inject_options()?)?;
    let (content, source) = read_input(args.file.as_deref())?;
    debug!(source = source.as_deref().unwrap_or("<stdin>"), bytes = content.len(), "read input");

    let doc = parser::parse_html(&content);

    if args.list {
        return print_headings(&doc, args.output);
    }
    if args.tree {
        return print_tree(&doc, &injector, args.output, source);
    }
    if args.toc_only {
        let tree = doc.build_tree(&injector.options().toc)?;
        println!("{}", injector.contents_block(&tree));
        return Ok(());
    }

    let page = injector.process(&content)?;
    print!("{}", page.html);
    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Read the document from a file, or from stdin for `-` or no argument.
fn read_input(file: Option<&Path>) -> Result<(String, Option<String>)> {
    match file {
        Some(path) if path != Path::new("-") => {
            let content = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("reading {}", path.display()))?;
            Ok((content, Some(path.display().to_string())))
        }
        explicit => {
            let stdin = std::io::stdin();
            if explicit.is_none() && stdin.is_terminal() {
                bail!("no input: pass an HTML file, '-' for stdin, or pipe a page in");
            }
            let mut content = String::new();
            stdin.lock().read_to_string(&mut content).wrap_err("reading stdin")?;
            Ok((content, None))
        }
    }
}

fn print_headings(doc: &Document, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            for heading in &doc.headings {
                let indent = "  ".repeat(heading.level.saturating_sub(1));
                println!("{indent}h{} {}", heading.level, heading.text);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&doc.headings)?);
        }
    }
    Ok(())
}

fn print_tree(
    doc: &Document,
    injector: &TocInjector,
    format: OutputFormat,
    source: Option<String>,
) -> Result<()> {
    let tree = doc.build_tree(&injector.options().toc)?;

    match format {
        OutputFormat::Plain => print!("{}", tree.render_box_tree()),
        OutputFormat::Json => {
            let output = TocOutput::from_tree(&tree, source);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
