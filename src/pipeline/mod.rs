//! Row-wise enrichment pipelines for article bodies and headlines.

pub mod progress;
pub mod reframer;
pub mod report;
pub mod synthesizer;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tracing::{info, instrument};

use crate::{
    config::Settings,
    data::{self, Table},
    error::DataError,
    llm::{ImageService, TextService},
};

pub use reframer::{ReframeMode, Reframer};
pub use report::{FailedCell, PipelineKind, RunReport};
pub use synthesizer::{image_file_name, image_prompt, Synthesizer};

/// Column names used by the headline pipeline.
#[derive(Debug, Clone)]
pub struct HeadlineColumns {
    pub title: String,
    pub id: String,
}

impl Default for HeadlineColumns {
    fn default() -> Self {
        Self {
            title: "title".into(),
            id: "id".into(),
        }
    }
}

/// Add a `text_{emotion}` column per configured emotion.
pub async fn process_articles(
    table: &mut Table,
    settings: &Settings,
    text_column: &str,
    service: &dyn TextService,
) -> Result<RunReport, DataError> {
    let texts: Vec<String> = owned(table.column(text_column)?);
    let reframer = Reframer::new(service, settings.model.as_str(), ReframeMode::Article);
    let mut report = RunReport::new(PipelineKind::Articles, table.len(), &settings.emotions);

    for &emotion in &settings.emotions {
        info!(%emotion, rows = texts.len(), "reframing articles");
        let bar = progress::column_bar(texts.len(), format!("Processing {emotion}"));
        let outcomes = progress::collect_with_progress(
            stream::iter(texts.iter())
                .map(|text| reframer.reframe(text, emotion))
                .buffered(settings.concurrency.max(1)),
            &bar,
        )
        .await;
        let column = emotion.text_column();
        let cells = report.record_column(&column, outcomes, |v| v);
        table.set_column(&column, cells)?;
        info!(%emotion, "reframing completed");
    }

    report.finish();
    Ok(report)
}

/// Add `{emotion}_title` and `{emotion}_img` columns per configured emotion.
///
/// The image for a row is generated from its reframed headline. When
/// reframing that row failed, the prompt is built from the source headline
/// rather than from the `{emotion}_title` cell, which then holds the
/// `Failed to reframe` marker.
pub async fn process_headlines(
    table: &mut Table,
    settings: &Settings,
    columns: &HeadlineColumns,
    text: &dyn TextService,
    images: &dyn ImageService,
) -> Result<RunReport, DataError> {
    let ids: Vec<String> = owned(table.column(&columns.id)?);
    let titles: Vec<String> = owned(table.column(&columns.title)?);
    let reframer = Reframer::new(text, settings.model.as_str(), ReframeMode::Headline);
    let synthesizer = Synthesizer::new(
        images,
        settings.image_dir.clone(),
        settings.image_size.as_str(),
    );
    let width = settings.concurrency.max(1);
    let mut report = RunReport::new(PipelineKind::Headlines, table.len(), &settings.emotions);

    for &emotion in &settings.emotions {
        info!(%emotion, rows = titles.len(), "reframing headlines");
        let bar = progress::column_bar(titles.len(), format!("Reframing titles to {emotion}"));
        let reframed = progress::collect_with_progress(
            stream::iter(titles.iter())
                .map(|title| reframer.reframe(title, emotion))
                .buffered(width),
            &bar,
        )
        .await;
        let sources: Vec<String> = reframed
            .iter()
            .zip(&titles)
            .map(|(outcome, title)| outcome.as_ref().unwrap_or(title).clone())
            .collect();
        let title_column = emotion.title_column();
        let cells = report.record_column(&title_column, reframed, |v| v);
        table.set_column(&title_column, cells)?;

        info!(%emotion, dir = %synthesizer.image_dir().display(), "generating images");
        let bar = progress::column_bar(sources.len(), format!("Generating {emotion} images"));
        let generated = progress::collect_with_progress(
            stream::iter(sources.iter().zip(&ids))
                .map(|(title, id)| synthesizer.synthesize(title, emotion, id))
                .buffered(width),
            &bar,
        )
        .await;
        let image_column = emotion.image_column();
        let cells = report.record_column(&image_column, generated, |p| p.display().to_string());
        table.set_column(&image_column, cells)?;
        info!(%emotion, "processing completed");
    }

    report.finish();
    Ok(report)
}

/// Load, reframe and write the article dataset described by `settings`.
#[instrument(skip(settings, service), fields(input = %settings.input_path.display()))]
pub async fn run_articles(
    settings: &Settings,
    text_column: &str,
    service: &dyn TextService,
) -> Result<RunReport> {
    let mut table = data::load_table(&settings.input_path, text_column)
        .with_context(|| format!("load {}", settings.input_path.display()))?;
    let report = process_articles(&mut table, settings, text_column, service).await?;
    data::write_table(&table, &settings.output_path)
        .with_context(|| format!("write {}", settings.output_path.display()))?;
    Ok(report)
}

/// Load, reframe, illustrate and write the headline dataset.
#[instrument(skip(settings, columns, text, images), fields(input = %settings.input_path.display()))]
pub async fn run_headlines(
    settings: &Settings,
    columns: &HeadlineColumns,
    text: &dyn TextService,
    images: &dyn ImageService,
) -> Result<RunReport> {
    let mut table = data::load_table(&settings.input_path, &columns.title)
        .with_context(|| format!("load {}", settings.input_path.display()))?;
    if table.column_index(&columns.id).is_none() {
        return Err(DataError::MissingColumn(columns.id.clone()))
            .context("the headline pipeline needs an identifier column to name images");
    }
    let report = process_headlines(&mut table, settings, columns, text, images).await?;
    data::write_table(&table, &settings.output_path)
        .with_context(|| format!("write {}", settings.output_path.display()))?;
    Ok(report)
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}
