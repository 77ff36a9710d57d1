//! Axis-aligned bounding rectangles in left/top/right/bottom form.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use super::space::{Normalized, Pixel};
use crate::error::ScenemarkError;

/// An axis-aligned rectangle stored as `left, top, right, bottom`.
///
/// The `TSpace` parameter is either [`Pixel`] or [`Normalized`].
///
/// Note: ordering (`left <= right`, `top <= bottom`) is NOT enforced.
/// A malformed rectangle is representable so that validation can report it.
#[derive(Clone, Copy, PartialEq)]
pub struct Rect<TSpace> {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Rect<TSpace> {
    #[inline]
    pub(crate) fn from_raw(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            _space: PhantomData,
        }
    }

    /// Returns the width of the rectangle.
    ///
    /// May be negative if the rectangle is malformed (right < left).
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Returns the height of the rectangle.
    ///
    /// May be negative if the rectangle is malformed (bottom < top).
    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Returns true if all four components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// Returns true if the rectangle is properly ordered on both axes.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Returns the four components as `[left, top, right, bottom]`.
    #[inline]
    pub fn components(&self) -> [f32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }
}

impl Rect<Pixel> {
    /// Creates a new pixel-space rectangle.
    #[inline]
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::from_raw(left, top, right, bottom)
    }

    /// Creates a rectangle from its top-left corner and size.
    #[inline]
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::from_raw(left, top, left + width, top + height)
    }
}

impl Rect<Normalized> {
    /// Creates a relative rectangle, rejecting components outside [0, 1].
    pub fn try_new(left: f32, top: f32, right: f32, bottom: f32) -> Result<Self, ScenemarkError> {
        let rect = Self::from_raw(left, top, right, bottom);
        if !rect.is_within_unit() {
            return Err(ScenemarkError::InvalidArgument(format!(
                "relative rectangle ({}, {}, {}, {}) lies outside [0, 1]",
                left, top, right, bottom
            )));
        }
        Ok(rect)
    }

    /// The rectangle covering the whole image.
    #[inline]
    pub fn unit() -> Self {
        Self::from_raw(0.0, 0.0, 1.0, 1.0)
    }

    /// Returns true if all four components lie in [0, 1].
    #[inline]
    pub fn is_within_unit(&self) -> bool {
        self.components()
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}

impl<TSpace> std::fmt::Debug for Rect<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rect")
            .field("left", &self.left)
            .field("top", &self.top)
            .field("right", &self.right)
            .field("bottom", &self.bottom)
            .finish()
    }
}

impl<TSpace> Default for Rect<TSpace> {
    fn default() -> Self {
        Self::from_raw(0.0, 0.0, 0.0, 0.0)
    }
}

// Custom serde implementation to avoid TSpace: Serialize/Deserialize bounds
impl<TSpace> Serialize for Rect<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Rect", 4)?;
        state.serialize_field("left", &self.left)?;
        state.serialize_field("top", &self.top)?;
        state.serialize_field("right", &self.right)?;
        state.serialize_field("bottom", &self.bottom)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for Rect<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RectData {
            left: f32,
            top: f32,
            right: f32,
            bottom: f32,
        }
        let data = RectData::deserialize(deserializer)?;
        Ok(Rect::from_raw(data.left, data.top, data.right, data.bottom))
    }
}
