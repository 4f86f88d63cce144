use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ninepatch_core::{Density, Document};

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ProjectError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Resampling filter used when scaling content to a density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResampleFilter {
    pub fn filter_type(&self) -> FilterType {
        match self {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Settings for exporting nine-patch resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Density buckets to write, in order.
    pub densities: Vec<Density>,
    pub filter: ResampleFilter,
    /// The Android `res/` directory receiving `drawable-*` folders.
    pub out_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            densities: Density::ALL.to_vec(),
            filter: ResampleFilter::CatmullRom,
            out_dir: PathBuf::from("res"),
        }
    }
}

pub fn load_document(path: &Path) -> Result<Document, ProjectError> {
    let json = std::fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
    let doc = Document::from_json(&json).map_err(|e| ProjectError::json(path, e))?;
    log::info!(
        "Loaded document '{}': {} layers, {} selected",
        doc.name,
        doc.layer_count(),
        doc.selection.len()
    );
    Ok(doc)
}

pub fn save_document(doc: &Document, path: &Path) -> Result<(), ProjectError> {
    let json = doc.to_json().map_err(|e| ProjectError::json(path, e))?;
    std::fs::write(path, json).map_err(|e| ProjectError::io(path, e))?;
    log::info!("Saved document '{}' to {}", doc.name, path.display());
    Ok(())
}

pub fn load_settings(path: &Path) -> Result<ExportSettings, ProjectError> {
    let json = std::fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
    serde_json::from_str(&json).map_err(|e| ProjectError::json(path, e))
}
