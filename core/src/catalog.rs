use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One catalog row. Empty CSV cells deserialize to `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub show_id: Option<String>,
    /// "Movie" or "TV Show".
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
    /// Non-numeric years load as `None` rather than rejecting the row.
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    /// Comma separated genre tags.
    #[serde(default)]
    pub listed_in: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Item {
    pub fn new(title: impl Into<String>, description: Option<&str>, listed_in: Option<&str>) -> Self {
        Self {
            title: title.into(),
            description: description.map(str::to_string),
            listed_in: listed_in.map(str::to_string),
            ..Self::default()
        }
    }
}

/// Load a catalog CSV file, keeping row order.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Item>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening catalog {}", path.display()))?;
    let items = read_catalog(f).with_context(|| format!("parsing catalog {}", path.display()))?;
    tracing::info!(path = %path.display(), items = items.len(), "loaded catalog");
    Ok(items)
}

pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<Item>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut items = Vec::new();
    for record in rdr.deserialize() {
        let item: Item = record?;
        items.push(item);
    }
    Ok(items)
}
