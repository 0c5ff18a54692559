use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use prompt_service::{extractor, utils, CompletionConfig, PromptService};

/// Runs a saved web page through the extraction and completion pipeline.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// HTML file to read (entity-escaped content is fine)
    #[arg(short, long)]
    file: PathBuf,

    /// Print the extracted text and skip the completion call
    #[arg(short, long)]
    extract_only: bool,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    prompt_service::init_tracing();

    let args = Args::parse();

    let page = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let result = if args.extract_only {
        extractor::html_to_text(&page)
    } else {
        let config = CompletionConfig::from_env()?;
        let service = PromptService::load(&config)?;
        service.create_completion(&page).await?
    };

    match args.output {
        Some(path) => utils::save_text(&result, &path)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{result}"),
    }

    Ok(())
}
