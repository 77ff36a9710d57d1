//! Self-describing scene documents.

use serde::{Deserialize, Serialize};

use super::scene::Scene;
use super::space::{Normalized, Pixel, SpaceKind};

/// A scene tagged with its coordinate space.
///
/// Serialized with a `"space"` field (`"pixel"` or `"normalized"`) next to
/// the scene fields, so a file states which space its coordinates are in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "space", rename_all = "snake_case")]
pub enum SceneDocument {
    Pixel(Scene<Pixel>),
    Normalized(Scene<Normalized>),
}

impl SceneDocument {
    pub fn space(&self) -> SpaceKind {
        match self {
            SceneDocument::Pixel(_) => SpaceKind::Pixel,
            SceneDocument::Normalized(_) => SpaceKind::Normalized,
        }
    }

    pub fn original_dimensions(&self) -> (i32, i32) {
        match self {
            SceneDocument::Pixel(s) => (s.original_width(), s.original_height()),
            SceneDocument::Normalized(s) => (s.original_width(), s.original_height()),
        }
    }
}

impl From<Scene<Pixel>> for SceneDocument {
    fn from(scene: Scene<Pixel>) -> Self {
        SceneDocument::Pixel(scene)
    }
}

impl From<Scene<Normalized>> for SceneDocument {
    fn from(scene: Scene<Normalized>) -> Self {
        SceneDocument::Normalized(scene)
    }
}
