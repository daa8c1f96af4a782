//! Batch evaluation of request files.
//!
//! Files are evaluated in parallel with rayon; the output keeps the order of
//! the input list. A failing file yields an error entry and does not stop the
//! others.

use std::path::{Path, PathBuf};

use log::warn;
use rayon::prelude::*;
use serde::Serialize;

use crate::app::pipeline::{RunDefaults, overlay_from_inputs};
use crate::error::{AppError, EXIT_IO};
use crate::io::{OverlayMeta, OverlayPayload, read_request_json};

/// One output line of `zth batch`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<OverlayMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Evaluate every file, preserving input order.
pub fn run_batch(files: &[PathBuf], defaults: RunDefaults) -> Vec<BatchEntry> {
    files
        .par_iter()
        .map(|path| match evaluate_file(path, defaults) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("{}: {}", path.display(), err);
                BatchEntry {
                    file: path.display().to_string(),
                    meta: None,
                    payload: None,
                    error: Some(err.message().to_string()),
                }
            }
        })
        .collect()
}

fn evaluate_file(path: &Path, defaults: RunDefaults) -> Result<BatchEntry, AppError> {
    let request = read_request_json(path)?;
    let inputs = request.to_inputs(defaults.order, defaults.n_grid)?;
    let overlay = overlay_from_inputs(&inputs)?;
    let payload = serde_json::to_value(OverlayPayload::from(&overlay))
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to serialize overlay JSON: {e}")))?;

    Ok(BatchEntry {
        file: path.display().to_string(),
        meta: Some(OverlayMeta::from(&overlay)),
        payload: Some(payload),
        error: None,
    })
}

/// Serialize entries as JSON lines.
pub fn to_json_lines(entries: &[BatchEntry]) -> Result<String, AppError> {
    let mut out = String::new();
    for entry in entries {
        let line = serde_json::to_string(entry)
            .map_err(|e| AppError::new(EXIT_IO, format!("Failed to serialize batch entry: {e}")))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}
