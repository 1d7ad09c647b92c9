//! CLI entry-point for the article body pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{cli::RunArgs, config::Settings, llm::OpenAiClient, pipeline};

/// Args for the `articles` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Cleaned `;`-delimited corpus.
    #[arg(long, default_value = "cleaned_master_corpus.csv")]
    pub input: PathBuf,
    /// Destination file, replaced if present.
    #[arg(long, default_value = "reframed_articles_full.csv")]
    pub output: PathBuf,
    /// Column holding the article body.
    #[arg(long, default_value = "text")]
    pub text_column: String,
    #[command(flatten)]
    pub run: RunArgs,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, mut settings: Settings) -> Result<()> {
    args.run
        .apply(&mut settings, args.input.clone(), args.output.clone())?;
    let client = OpenAiClient::from_settings(&settings)?;

    let report = pipeline::run_articles(&settings, &args.text_column, &client).await?;
    args.run.finish(&report)?;
    info!(
        output = %settings.output_path.display(),
        failed = report.failed(),
        "reframed articles saved"
    );
    Ok(())
}
