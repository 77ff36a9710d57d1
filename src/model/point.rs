//! Three-component points tagged with their coordinate space.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use super::space::{Normalized, Pixel};
use crate::error::ScenemarkError;

/// A 3D point with a type-level marker for the coordinate space.
///
/// The `TSpace` parameter is either [`Pixel`] or [`Normalized`], so that
/// pixel and relative points cannot be mixed by accident. In relative space
/// `x` and `y` are expected in [0, 1]; `z` conventionally is too, but it is
/// only checked when the caller asks for it.
#[derive(Clone, Copy, PartialEq)]
pub struct Point3D<TSpace> {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Point3D<TSpace> {
    /// Builds a point without any range check. Only reachable from within
    /// the crate so relative points always pass through a conversion,
    /// a clamp or [`Point3D::try_new`].
    #[inline]
    pub(crate) fn from_raw(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            _space: PhantomData,
        }
    }

    /// Returns true if all three components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Point3D<Pixel> {
    /// Creates a new pixel-space point.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self::from_raw(x, y, z)
    }

    /// Creates a pixel-space point on the image plane (`z = 0`).
    #[inline]
    pub fn flat(x: f32, y: f32) -> Self {
        Self::from_raw(x, y, 0.0)
    }
}

impl Point3D<Normalized> {
    /// Creates a relative point, rejecting non-finite values and `x`/`y`
    /// outside [0, 1]. `z` is only required to be finite.
    pub fn try_new(x: f32, y: f32, z: f32) -> Result<Self, ScenemarkError> {
        let point = Self::from_raw(x, y, z);
        if !point.is_finite() {
            return Err(ScenemarkError::InvalidArgument(format!(
                "relative point ({}, {}, {}) is not finite",
                x, y, z
            )));
        }
        if !super::normalizer::is_valid_relative_point(&point, false) {
            return Err(ScenemarkError::InvalidArgument(format!(
                "relative point ({}, {}) lies outside [0, 1]",
                x, y
            )));
        }
        Ok(point)
    }
}

impl<TSpace> std::fmt::Debug for Point3D<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Point3D")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .finish()
    }
}

impl<TSpace> Default for Point3D<TSpace> {
    fn default() -> Self {
        Self::from_raw(0.0, 0.0, 0.0)
    }
}

// Custom serde implementation to avoid TSpace: Serialize/Deserialize bounds
impl<TSpace> Serialize for Point3D<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Point3D", 3)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.serialize_field("z", &self.z)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for Point3D<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct PointData {
            x: f32,
            y: f32,
            #[serde(default)]
            z: f32,
        }
        let data = PointData::deserialize(deserializer)?;
        Ok(Point3D::from_raw(data.x, data.y, data.z))
    }
}
