//! Command-line driver: extract article text or links from files, URLs,
//! or standard input.

use std::fs;
use std::io::{self, IsTerminal, Read};

use anyhow::Context;
use clap::{Parser, ValueEnum};

use pressclip::{output, Article, ChunkClassifier, Website};

/// What to pull out of each document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum ExtractMode {
    /// Article text, classified chunk by chunk.
    #[default]
    Content,
    /// Every outbound link in the body.
    Links,
}

/// Extract article text from news pages.
#[derive(Debug, Parser)]
#[command(name = "pressclip", version, about)]
struct Args {
    /// Files or http(s) URLs to read; stdin when none are given.
    #[arg(value_name = "INPUT")]
    inputs: Vec<String>,

    /// Print headings and emphasized text in bold
    /// (defaults to on when stdout is a terminal).
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    highlight: Option<bool>,

    /// Extraction mode.
    #[arg(long, value_enum, default_value_t)]
    extract: ExtractMode,
}

/// One unit of work: raw bytes plus where they came from.
struct Input {
    location: String,
    data: Vec<u8>,
}

fn read_inputs(args: &[String]) -> anyhow::Result<Vec<Input>> {
    if args.is_empty() {
        let mut data = Vec::new();
        io::stdin()
            .read_to_end(&mut data)
            .context("failed to read stdin")?;
        return Ok(vec![Input { location: String::new(), data }]);
    }

    let mut inputs = Vec::with_capacity(args.len());
    for arg in args {
        let data = if arg.starts_with("http://") || arg.starts_with("https://") {
            let response = reqwest::blocking::get(arg)
                .and_then(reqwest::blocking::Response::error_for_status)
                .with_context(|| format!("failed to fetch {arg}"))?;
            response
                .bytes()
                .with_context(|| format!("failed to read body of {arg}"))?
                .to_vec()
        } else {
            fs::read(arg).with_context(|| format!("failed to read {arg}"))?
        };
        inputs.push(Input { location: arg.clone(), data });
    }
    Ok(inputs)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let highlight = args
        .highlight
        .unwrap_or_else(|| io::stdout().is_terminal());

    for input in read_inputs(&args.inputs)? {
        match args.extract {
            ExtractMode::Content => {
                let article = Article::from_bytes(&input.data)
                    .with_context(|| display_location(&input.location))?;
                let accepted = ChunkClassifier::new().extract(&article);
                if !accepted.is_empty() {
                    println!("{}", output::render(&accepted, highlight));
                }
            }
            ExtractMode::Links => {
                let mut website = Website::from_bytes(&input.data)
                    .with_context(|| display_location(&input.location))?;
                website.resolve_base(&input.location);
                for link in website.links() {
                    println!("{}", link.href());
                }
            }
        }
    }
    Ok(())
}

fn display_location(location: &str) -> String {
    if location.is_empty() {
        "stdin".to_string()
    } else {
        location.to_string()
    }
}
