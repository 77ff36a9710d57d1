//! JSON serialization for scene documents.
//!
//! This is the interchange format of the crate. It is useful for:
//! - Storing normalized detections independent of image resolution
//! - Debugging producers by inspecting the entity tree
//! - Feeding the CLI subcommands

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::document::SceneDocument;
use crate::error::ScenemarkError;

/// Reads a scene document from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_scene_json(path: &Path) -> Result<SceneDocument, ScenemarkError> {
    let file = File::open(path).map_err(ScenemarkError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| ScenemarkError::SceneJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a scene document to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_scene_json(path: &Path, document: &SceneDocument) -> Result<(), ScenemarkError> {
    let file = File::create(path).map_err(ScenemarkError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, document).map_err(|source| {
        ScenemarkError::SceneJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads a scene document from a JSON string.
pub fn from_json_str(json: &str) -> Result<SceneDocument, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a scene document from raw bytes without requiring UTF-8 upfront.
pub fn from_json_slice(bytes: &[u8]) -> Result<SceneDocument, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a scene document to a JSON string.
pub fn to_json_string(document: &SceneDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}
