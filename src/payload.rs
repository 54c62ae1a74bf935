//! Export payload extraction.
//!
//! The host passes a JSON-LD document whose `@graph` lists the selected
//! items. Each item may carry `photo` entries (objects with a local `path`)
//! and `tag` entries (normally strings). JSON-LD compaction collapses
//! single-entry lists into bare values, so both shapes are accepted.

use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const GRAPH_KEY: &str = "@graph";
const PHOTO_KEY: &str = "photo";
const PATH_KEY: &str = "path";
const TAG_KEY: &str = "tag";

/// What an export payload contributes to a post
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Photo files that existed when the payload was read, in payload order
    pub paths: Vec<PathBuf>,
    /// Every tag string found on any item, deduplicated
    pub tags: BTreeSet<String>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// The item list, or `None` when there is nothing to export
pub fn graph_items(payload: Option<&Value>) -> Option<&Vec<Value>> {
    payload?
        .get(GRAPH_KEY)?
        .as_array()
        .filter(|items| !items.is_empty())
}

pub fn extract(payload: Option<&Value>) -> Extraction {
    graph_items(payload)
        .map(|items| extract_items(items))
        .unwrap_or_default()
}

/// Photo paths and tags of an already located item list
pub fn extract_items(items: &[Value]) -> Extraction {
    let mut extraction = Extraction::default();

    for item in items {
        for photo in entries(item, PHOTO_KEY) {
            if let Some(path) = existing_photo_path(photo) {
                extraction.paths.push(path);
            }
        }

        for tag in entries(item, TAG_KEY) {
            extraction.tags.insert(tag_text(tag));
        }
    }

    log::debug!(
        "Extracted {} photo(s) and {} tag(s) from {} item(s)",
        extraction.paths.len(),
        extraction.tags.len(),
        items.len()
    );

    extraction
}

// Tags are taken as-is; non-string entries keep their JSON text
fn tag_text(tag: &Value) -> String {
    match tag {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Entries of a list-valued item member; a bare value counts as one entry
fn entries<'a>(item: &'a Value, key: &str) -> &'a [Value] {
    match item.get(key) {
        Some(Value::Array(values)) => values.as_slice(),
        Some(Value::Null) | None => &[],
        Some(single) => std::slice::from_ref(single),
    }
}

fn existing_photo_path(photo: &Value) -> Option<PathBuf> {
    let path = photo.get(PATH_KEY)?.as_str()?;

    if path.is_empty() {
        return None;
    }

    let path = Path::new(path);
    if path.is_file() {
        Some(path.to_path_buf())
    } else {
        log::debug!("Skipping missing photo file: {}", path.display());
        None
    }
}
