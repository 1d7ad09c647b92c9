//! Summary of a batch run.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    emotion::Emotion,
    error::{CellError, FailureKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    Articles,
    Headlines,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedCell {
    pub row: usize,
    pub column: String,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub pipeline: PipelineKind,
    pub rows: usize,
    pub emotions: Vec<Emotion>,
    pub cells: usize,
    pub failures_by_kind: IndexMap<FailureKind, usize>,
    pub failures: Vec<FailedCell>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunReport {
    pub fn new(pipeline: PipelineKind, rows: usize, emotions: &[Emotion]) -> Self {
        Self {
            pipeline,
            rows,
            emotions: emotions.to_vec(),
            cells: 0,
            failures_by_kind: IndexMap::new(),
            failures: Vec::new(),
            finished_at: None,
        }
    }

    /// Fold one column of outcomes into the report and return the cell strings.
    pub fn record_column<T, F>(
        &mut self,
        column: &str,
        outcomes: Vec<Result<T, CellError>>,
        render: F,
    ) -> Vec<String>
    where
        F: Fn(T) -> String,
    {
        let mut cells = Vec::with_capacity(outcomes.len());
        for (row, outcome) in outcomes.into_iter().enumerate() {
            self.cells += 1;
            match outcome {
                Ok(value) => cells.push(render(value)),
                Err(err) => {
                    warn!(row, column, kind = ?err.kind, error = %err.message, "cell failed");
                    cells.push(err.to_string());
                    *self.failures_by_kind.entry(err.kind).or_insert(0) += 1;
                    self.failures.push(FailedCell {
                        row,
                        column: column.to_string(),
                        kind: err.kind,
                        message: err.message,
                    });
                }
            }
        }
        cells
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
        info!(
            pipeline = ?self.pipeline,
            rows = self.rows,
            cells = self.cells,
            failed = self.failed(),
            "run complete"
        );
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("write report {path:?}"))?;
        info!(path = %path.display(), "saved run report");
        Ok(())
    }
}
