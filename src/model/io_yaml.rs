//! YAML serialization for scene documents.
//!
//! Same document shape as the JSON format, for hand-edited fixtures and
//! configuration-style scene files.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::document::SceneDocument;
use crate::error::ScenemarkError;

/// Reads a scene document from a YAML file.
pub fn read_scene_yaml(path: &Path) -> Result<SceneDocument, ScenemarkError> {
    let file = File::open(path).map_err(ScenemarkError::Io)?;
    let reader = BufReader::new(file);

    serde_yaml::from_reader(reader).map_err(|source| ScenemarkError::SceneYamlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a scene document to a YAML file.
pub fn write_scene_yaml(path: &Path, document: &SceneDocument) -> Result<(), ScenemarkError> {
    let file = File::create(path).map_err(ScenemarkError::Io)?;
    let writer = BufWriter::new(file);

    serde_yaml::to_writer(writer, document).map_err(|source| ScenemarkError::SceneYamlWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub fn from_yaml_str(yaml: &str) -> Result<SceneDocument, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

pub fn from_yaml_slice(bytes: &[u8]) -> Result<SceneDocument, serde_yaml::Error> {
    serde_yaml::from_slice(bytes)
}

pub fn to_yaml_string(document: &SceneDocument) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(document)
}
