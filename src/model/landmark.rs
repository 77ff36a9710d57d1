//! Scored points of interest.

use serde::{Deserialize, Serialize};

use super::normalizer::{self, ImageScale};
use super::point::Point3D;
use super::space::{CoordSpace, Normalized, Pixel, SpaceKind};
use crate::error::ScenemarkError;

/// A typed, scored point of interest (e.g. `left_eye`).
///
/// `type_id` is a classification key and need not be unique within a
/// collection. `score` is conventionally a confidence in [0, 1] but is not
/// checked. Landmarks are never mutated; conversions return new values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Landmark<TSpace> {
    pub type_id: String,
    pub location: Point3D<TSpace>,
    pub score: f32,
}

impl<TSpace> Landmark<TSpace> {
    /// Creates a new landmark.
    pub fn new(type_id: impl Into<String>, location: Point3D<TSpace>, score: f32) -> Self {
        Self {
            type_id: type_id.into(),
            location,
            score,
        }
    }
}

impl<TSpace: CoordSpace> Landmark<TSpace> {
    /// Returns true if this landmark is in relative space.
    pub fn is_normalized(&self) -> bool {
        TSpace::KIND == SpaceKind::Normalized
    }
}

impl Landmark<Pixel> {
    /// Converts to relative coordinates, scaling depth by the image width.
    ///
    /// # Errors
    /// Returns [`ScenemarkError::InvalidArgument`] if either dimension is not positive.
    pub fn to_normalized(
        &self,
        image_width: i32,
        image_height: i32,
    ) -> Result<Landmark<Normalized>, ScenemarkError> {
        Ok(self.normalize(&ImageScale::new(image_width, image_height)?))
    }

    /// Converts to relative coordinates with an explicit depth scale.
    pub fn to_normalized_with_depth(
        &self,
        image_width: i32,
        image_height: i32,
        pixel_depth_scale: f32,
    ) -> Result<Landmark<Normalized>, ScenemarkError> {
        let scale = ImageScale::with_depth_scale(image_width, image_height, pixel_depth_scale)?;
        Ok(self.normalize(&scale))
    }

    /// Converts with an already validated scale.
    pub fn normalize(&self, scale: &ImageScale) -> Landmark<Normalized> {
        Landmark {
            type_id: self.type_id.clone(),
            location: scale.point_to_relative(&self.location),
            score: self.score,
        }
    }
}

impl Landmark<Normalized> {
    /// Converts back to pixel coordinates, scaling depth by the image width.
    pub fn to_pixel(
        &self,
        image_width: i32,
        image_height: i32,
    ) -> Result<Landmark<Pixel>, ScenemarkError> {
        Ok(self.denormalize(&ImageScale::new(image_width, image_height)?))
    }

    /// Converts back to pixel coordinates with an explicit depth scale.
    pub fn to_pixel_with_depth(
        &self,
        image_width: i32,
        image_height: i32,
        pixel_depth_scale: f32,
    ) -> Result<Landmark<Pixel>, ScenemarkError> {
        let scale = ImageScale::with_depth_scale(image_width, image_height, pixel_depth_scale)?;
        Ok(self.denormalize(&scale))
    }

    pub fn denormalize(&self, scale: &ImageScale) -> Landmark<Pixel> {
        Landmark {
            type_id: self.type_id.clone(),
            location: scale.point_to_pixel(&self.location),
            score: self.score,
        }
    }

    pub fn is_valid_normalized(&self, check_z: bool) -> bool {
        normalizer::is_valid_relative_point(&self.location, check_z)
    }

    /// Returns a copy with the location clamped into [0, 1].
    pub fn clamped(&self, clamp_z: bool) -> Landmark<Normalized> {
        Landmark {
            type_id: self.type_id.clone(),
            location: normalizer::clamp_to_relative_bounds(&self.location, clamp_z),
            score: self.score,
        }
    }
}
