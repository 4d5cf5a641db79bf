//! cssc — condense CSS files.
//!
//! Usage: cssc [options] [file ...]
//! Reads stdin when no files are given; writes to stdout unless
//! `--output` names a file.

use anyhow::{bail, Context, Result};
use cc_core::Options;
use std::io::Read;

struct Cli {
    files: Vec<String>,
    output: Option<String>,
    options: Options,
}

const USAGE: &str = "usage: cssc [options] [file ...]

options:
  --pretty       readable output instead of compact
  --safe         never merge structurally-equivalent rules
  --no-sort      keep selector and declaration order
  --line-breaks  newline after every `}`
  --debug        prepend a structural dump of the parsed tree
  --output FILE  write to FILE instead of stdout
";

fn parse_args(args: &[String]) -> Result<Cli> {
    let mut cli = Cli {
        files: Vec::new(),
        output: None,
        options: Options::default(),
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--pretty" => cli.options.compress = false,
            "--safe" => cli.options.safe = true,
            "--no-sort" => cli.options.sort = false,
            "--line-breaks" => cli.options.line_breaks = true,
            "--debug" => cli.options.debug = true,
            "--output" => {
                let Some(path) = iter.next() else {
                    bail!("--output requires a file argument");
                };
                cli.output = Some(path.clone());
            }
            "-h" | "--help" => {
                print!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => bail!("unknown option: {flag}"),
            file => cli.files.push(file.to_string()),
        }
    }
    Ok(cli)
}

fn read_inputs(files: &[String]) -> Result<Vec<String>> {
    if files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(vec![text]);
    }
    files
        .iter()
        .map(|f| std::fs::read_to_string(f).with_context(|| format!("reading {f}")))
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    let mut output = String::new();
    for text in read_inputs(&cli.files)? {
        if let Err(err) = cc_parser_check(&text) {
            tracing::warn!("{err}");
        }
        output.push_str(&cc_condense::compress(&text, &cli.options));
    }

    match cli.output {
        Some(path) => {
            std::fs::write(&path, output).with_context(|| format!("writing {path}"))?
        }
        None => print!("{output}"),
    }
    Ok(())
}

/// Best-effort parse check so silently truncated input at least warns.
/// Runs the same textual pre-passes as the pipeline itself.
fn cc_parser_check(text: &str) -> cc_core::Result<()> {
    let parts = cc_condense::comments::prepare(text);
    cc_parser::parse_strict(&parts.code).map(|_| ())
}
