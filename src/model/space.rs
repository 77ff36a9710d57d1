//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to distinguish
//! between pixel and relative coordinates at compile time. Every entity in
//! the model is generic over one of them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker type for pixel coordinates (absolute values).
///
/// Pixel coordinates are floats representing absolute positions within an
/// image, where (0, 0) is the top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker type for normalized coordinates (0.0 to 1.0).
///
/// Normalized coordinates represent positions as fractions of the image
/// dimensions, matching the output convention of pose and face detectors.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {} // Pixel has no variants
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {} // Normalized has no variants
    }
}

/// Runtime view of a coordinate space marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceKind {
    Pixel,
    Normalized,
}

impl fmt::Display for SpaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpaceKind::Pixel => write!(f, "pixel"),
            SpaceKind::Normalized => write!(f, "normalized"),
        }
    }
}

/// Implemented by the coordinate space markers.
///
/// Lets generic code ask which space it is working in, e.g. to pick the
/// right bounds during validation.
pub trait CoordSpace: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    const KIND: SpaceKind;
}

impl CoordSpace for Pixel {
    const KIND: SpaceKind = SpaceKind::Pixel;
}

impl CoordSpace for Normalized {
    const KIND: SpaceKind = SpaceKind::Normalized;
}
