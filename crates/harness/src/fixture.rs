//! Fixture loading: CSV vocabulary files and the JSON content catalog
//!
//! Vocabulary files are tabular with a header row containing at least
//! `type` and `value` columns; rows are grouped by `type` with row order
//! preserved within each category. The content catalog is a JSON array of
//! objects with `title` and `description` fields. Both loaders fail fast:
//! a test run cannot proceed without its vocabulary.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::info;

use crate::error::{HarnessError, HarnessResult};

/// Pools of name and address components loaded from the vocabulary files.
///
/// Loaded once by the test runner and passed by reference into generator
/// calls; never mutated after load.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub last_names: Vec<String>,
    pub middle_names: Vec<String>,
    pub first_names: Vec<String>,
    pub streets: Vec<String>,
    pub districts: Vec<String>,
}

/// A chapter or lesson entry from the content catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentItem {
    pub title: String,
    pub description: String,
}

pub type ContentCatalog = Vec<ContentItem>;

fn data_source_err(path: &Path, reason: impl Into<String>) -> HarnessError {
    HarnessError::DataSource {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Read a `type`,`value` CSV into per-category ordered lists.
pub fn load_categories(path: &Path) -> HarnessResult<HashMap<String, Vec<String>>> {
    let file = File::open(path).map_err(|e| data_source_err(path, e.to_string()))?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| data_source_err(path, e.to_string()))?;
    let type_idx = headers
        .iter()
        .position(|h| h == "type")
        .ok_or_else(|| data_source_err(path, "missing required column 'type'"))?;
    let value_idx = headers
        .iter()
        .position(|h| h == "value")
        .ok_or_else(|| data_source_err(path, "missing required column 'value'"))?;

    let mut categories: HashMap<String, Vec<String>> = HashMap::new();
    for row in reader.records() {
        let record = row.map_err(|e| data_source_err(path, e.to_string()))?;
        let (tag, value) = match (record.get(type_idx), record.get(value_idx)) {
            (Some(t), Some(v)) => (t, v),
            _ => return Err(data_source_err(path, "row missing type or value field")),
        };
        categories
            .entry(tag.to_string())
            .or_default()
            .push(value.to_string());
    }

    Ok(categories)
}

impl Vocabulary {
    /// Load name and location vocabulary from the two CSV fixtures.
    ///
    /// Unknown `type` tags are ignored. Any of the five categories being
    /// empty after load is fatal: the generator has nothing to draw from.
    pub fn load(names_path: &Path, locations_path: &Path) -> HarnessResult<Self> {
        let mut names = load_categories(names_path)?;
        let mut locations = load_categories(locations_path)?;

        let take = |map: &mut HashMap<String, Vec<String>>, tag: &str, path: &Path| {
            let entries = map.remove(tag).unwrap_or_default();
            if entries.is_empty() {
                Err(data_source_err(path, format!("no '{tag}' entries")))
            } else {
                Ok(entries)
            }
        };

        let vocab = Self {
            last_names: take(&mut names, "lastName", names_path)?,
            middle_names: take(&mut names, "middleName", names_path)?,
            first_names: take(&mut names, "firstName", names_path)?,
            streets: take(&mut locations, "street", locations_path)?,
            districts: take(&mut locations, "district", locations_path)?,
        };

        info!(
            last = vocab.last_names.len(),
            middle = vocab.middle_names.len(),
            first = vocab.first_names.len(),
            streets = vocab.streets.len(),
            districts = vocab.districts.len(),
            "vocabulary loaded"
        );
        Ok(vocab)
    }
}

/// Load the chapter/lesson catalog from a JSON array of objects.
pub fn load_content(path: &Path) -> HarnessResult<ContentCatalog> {
    let file = File::open(path).map_err(|e| data_source_err(path, e.to_string()))?;
    let catalog: ContentCatalog =
        serde_json::from_reader(file).map_err(|e| data_source_err(path, e.to_string()))?;
    info!(items = catalog.len(), path = %path.display(), "content catalog loaded");
    Ok(catalog)
}
