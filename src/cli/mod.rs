//! Command-line interface wiring for reframe-news.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::Level;

use crate::{config::Settings, emotion::Emotion, pipeline::RunReport};

pub mod articles;
pub mod headlines;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Reframe news articles and headlines into emotional variants", long_about = None)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Articles(args) => articles::run(args, settings).await,
            Commands::Headlines(args) => headlines::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reframe article bodies into one column per emotion.
    Articles(articles::Args),
    /// Reframe headlines and generate one illustration per emotion.
    Headlines(headlines::Args),
}

/// Options shared by both pipelines.
#[derive(Debug, Clone, ClapArgs)]
pub struct RunArgs {
    /// Comma separated emotions to process, in order.
    #[arg(long, value_delimiter = ',', value_enum)]
    pub emotions: Option<Vec<Emotion>>,
    /// Maximum in-flight requests per emotion column.
    #[arg(long)]
    pub concurrency: Option<usize>,
    /// Write a JSON run report to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl RunArgs {
    /// Fold CLI overrides into the environment-derived settings.
    pub fn apply(&self, settings: &mut Settings, input: PathBuf, output: PathBuf) -> Result<()> {
        settings.input_path = input;
        settings.output_path = output;
        if let Some(emotions) = &self.emotions {
            let mut ordered = Vec::new();
            for emotion in emotions {
                if !ordered.contains(emotion) {
                    ordered.push(*emotion);
                }
            }
            settings.emotions = ordered;
        }
        if let Some(concurrency) = self.concurrency {
            settings.concurrency = concurrency;
        }
        settings.validate()
    }

    pub fn finish(&self, report: &RunReport) -> Result<()> {
        if let Some(path) = &self.report {
            report.save(path)?;
        }
        Ok(())
    }
}
