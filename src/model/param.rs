//! Named, scored metadata attached to objects.

use serde::{Deserialize, Serialize};

/// The value carried by an [`ObjectParam`].
///
/// A closed set of kinds keeps equality and serialization well-defined.
/// `Opaque` holds anything else as a JSON value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Blob(Vec<u8>),
    Opaque(serde_json::Value),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            ParamValue::Blob(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<Vec<u8>> for ParamValue {
    fn from(v: Vec<u8>) -> Self {
        ParamValue::Blob(v)
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(v: serde_json::Value) -> Self {
        ParamValue::Opaque(v)
    }
}

fn default_score() -> f32 {
    1.0
}

/// Arbitrary metadata attached to an object, e.g. an emotion label or an
/// embedding. Params carry no coordinates and pass through conversions
/// unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectParam {
    pub type_id: String,
    pub value: ParamValue,
    #[serde(default = "default_score")]
    pub score: f32,
}

impl ObjectParam {
    /// Creates a new param with a score of 1.0.
    pub fn new(type_id: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            type_id: type_id.into(),
            value: value.into(),
            score: default_score(),
        }
    }

    /// Sets the score.
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }
}
