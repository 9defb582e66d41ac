use std::{
    io::{Read as _, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "promptpix", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a deterministic placeholder image from a JSON request.
    Image(IoArgs),
    /// Convert text into a document payload (doc/csv/txt).
    Doc(IoArgs),
}

#[derive(Parser, Debug)]
struct IoArgs {
    /// Request JSON file; stdin when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Response file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries exactly one JSON envelope.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (args, handler): (&IoArgs, fn(&str) -> String) = match &cli.cmd {
        Command::Image(args) => (args, promptpix::handle_image_request),
        Command::Doc(args) => (args, promptpix::handle_doc_request),
    };

    let raw = read_request(args)?;
    let response = handler(&raw);
    write_response(args, &response)
}

fn read_request(args: &IoArgs) -> anyhow::Result<String> {
    match &args.in_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read request '{}'", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("read request from stdin")?;
            Ok(raw)
        }
    }
}

fn write_response(args: &IoArgs, response: &str) -> anyhow::Result<()> {
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, response)
                .with_context(|| format!("write response '{}'", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(response.as_bytes())
                .context("write response to stdout")
        }
    }
}
