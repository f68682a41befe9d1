// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Command-line interface for applying paths to JSON documents

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use treepath::diagnostics::{DiagnosticFormatter, Format};
use treepath::{Path, TreePathError, Value, parse};

#[derive(Parser)]
#[command(name = "treepath")]
#[command(about = "Read and modify JSON documents with path expressions")]
#[command(version)]
struct Cli {
    /// JSON file containing the input tree (reads from stdin if not provided)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,
    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pretty: bool,
    /// Format used to report path errors
    #[arg(long, value_enum, default_value_t = ErrorFormat::Text, global = true)]
    error_format: ErrorFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every value the path addresses as a JSON array
    Get {
        /// Path expression
        path: String,
    },
    /// Print how many values the path addresses
    Count {
        /// Path expression
        path: String,
    },
    /// Overwrite addressed values and print the resulting document
    Set {
        /// Path expression
        path: String,
        /// Value literal, e.g. `{id:"a",n:1}`
        value: String,
    },
    /// Remove addressed values and print the resulting document
    Remove {
        /// Path expression
        path: String,
    },
    /// Insert values into addressed lists and print the resulting document
    Insert {
        /// Path expression
        path: String,
        /// Insert position; negative counts from the end
        #[arg(allow_negative_numbers = true)]
        index: i64,
        /// Value literals to insert
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Parse a path and print its nodes
    Parse {
        /// Path expression
        path: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ErrorFormat {
    Text,
    Compact,
    Json,
}

impl From<ErrorFormat> for Format {
    fn from(format: ErrorFormat) -> Self {
        match format {
            ErrorFormat::Text => Format::Text,
            ErrorFormat::Compact => Format::Compact,
            ErrorFormat::Json => Format::Json,
        }
    }
}

/// Path or literal error together with the text it points into
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
struct SourceError {
    text: String,
    error: TreePathError,
}

impl SourceError {
    fn new(text: &str, error: impl Into<TreePathError>) -> Self {
        Self {
            text: text.to_string(),
            error: error.into(),
        }
    }
}

fn main() -> ExitCode {
    human_panic::setup_panic!();
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, cli.error_format);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &anyhow::Error, format: ErrorFormat) {
    let diagnostic = err
        .downcast_ref::<SourceError>()
        .and_then(|source| source.error.to_diagnostic(&source.text));
    match diagnostic {
        Some(diagnostic) => {
            let formatter = DiagnosticFormatter::new(format.into());
            #[cfg(feature = "terminal")]
            let formatter =
                formatter.with_color(std::io::IsTerminal::is_terminal(&std::io::stderr()));
            eprintln!("{}", formatter.format(&diagnostic));
        }
        None => eprintln!("Error: {err:#}"),
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Get { path } => {
            let path = parse_path(path)?;
            let root = read_tree(cli.file.as_ref())?;
            let found = path.get(&root).map_err(|e| SourceError::new(path.to_text(), e))?;
            let json = serde_json::Value::Array(found.into_iter().map(Value::to_json).collect());
            print_json(&json, cli.pretty)
        }
        Commands::Count { path } => {
            let path = parse_path(path)?;
            let root = read_tree(cli.file.as_ref())?;
            println!("{}", path.count_matching(&root));
            Ok(())
        }
        Commands::Set { path, value } => {
            let path = parse_path(path)?;
            let value = parse_value(value)?;
            let mut root = read_tree(cli.file.as_ref())?;
            let changed = path
                .set_value(&mut root, &value)
                .map_err(|e| SourceError::new(path.to_text(), e))?;
            log::info!("set changed {changed} locations");
            print_json(&root.to_json(), cli.pretty)
        }
        Commands::Remove { path } => {
            let path = parse_path(path)?;
            let mut root = read_tree(cli.file.as_ref())?;
            let removed = path.remove(&mut root);
            log::info!("removed {removed} locations");
            print_json(&root.to_json(), cli.pretty)
        }
        Commands::Insert {
            path,
            index,
            values,
        } => {
            let path = parse_path(path)?;
            let values = values
                .iter()
                .map(|text| parse_value(text))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let mut root = read_tree(cli.file.as_ref())?;
            let changed = path
                .insert(*index, &mut root, &values)
                .map_err(|e| SourceError::new(path.to_text(), e))?;
            log::info!("inserted into {changed} lists");
            print_json(&root.to_json(), cli.pretty)
        }
        Commands::Parse { path } => {
            let path = parse_path(path)?;
            println!("Path: {path}");
            for (ordinal, node) in path.nodes().iter().enumerate() {
                println!("  {:<20} {node:?}", path.prefix_of(ordinal));
            }
            Ok(())
        }
    }
}

fn parse_path(text: &str) -> anyhow::Result<Path> {
    Ok(parse(text).map_err(|e| SourceError::new(text, e))?)
}

fn parse_value(text: &str) -> anyhow::Result<Value> {
    Ok(text.parse::<Value>().map_err(|e| SourceError::new(text, e))?)
}

fn read_tree(file: Option<&PathBuf>) -> anyhow::Result<Value> {
    let data = match file {
        Some(filename) => fs::read_to_string(filename)
            .with_context(|| format!("reading file '{}'", filename.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading from stdin")?;
            buffer
        }
    };
    let json: serde_json::Value = serde_json::from_str(&data).context("parsing JSON input")?;
    Ok(Value::from_json(&json)?)
}

fn print_json(json: &serde_json::Value, pretty: bool) -> anyhow::Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(json)?
    } else {
        serde_json::to_string(json)?
    };
    println!("{output}");
    Ok(())
}
