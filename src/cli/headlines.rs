//! CLI entry-point for the headline and illustration pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    cli::RunArgs,
    config::Settings,
    llm::OpenAiClient,
    pipeline::{self, HeadlineColumns},
};

/// Args for the `headlines` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// `;`-delimited table with id and title columns.
    #[arg(long, default_value = "reframed_title_txt.csv")]
    pub input: PathBuf,
    /// Destination file, replaced if present.
    #[arg(long, default_value = "complete_reframed.csv")]
    pub output: PathBuf,
    #[arg(long, default_value = "title")]
    pub title_column: String,
    /// Column used to name saved images.
    #[arg(long, default_value = "id")]
    pub id_column: String,
    /// Override the image folder (default from REFRAME_IMAGE_DIR or `img_reframe`).
    #[arg(long)]
    pub image_dir: Option<PathBuf>,
    #[command(flatten)]
    pub run: RunArgs,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, mut settings: Settings) -> Result<()> {
    args.run
        .apply(&mut settings, args.input.clone(), args.output.clone())?;
    if let Some(dir) = &args.image_dir {
        settings.image_dir = dir.clone();
    }
    let client = OpenAiClient::from_settings(&settings)?;
    let columns = HeadlineColumns {
        title: args.title_column.clone(),
        id: args.id_column.clone(),
    };

    let report = pipeline::run_headlines(&settings, &columns, &client, &client).await?;
    args.run.finish(&report)?;
    info!(
        output = %settings.output_path.display(),
        images = %settings.image_dir.display(),
        failed = report.failed(),
        "reframed titles and generated images saved"
    );
    Ok(())
}
