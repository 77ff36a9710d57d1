//! Tracked bounding regions forming a recursive tree.

use serde::{Deserialize, Serialize};

use super::ids::ProcessorId;
use super::landmark::Landmark;
use super::normalizer::ImageScale;
use super::param::ObjectParam;
use super::rect::Rect;
use super::space::{CoordSpace, Normalized, Pixel, SpaceKind};
use crate::error::ScenemarkError;

/// Scene-only payload carried by an [`Object`] whose kind is `Scene`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneInfo {
    /// Width of the source image in pixels.
    pub original_width: i32,

    /// Height of the source image in pixels.
    pub original_height: i32,

    /// The processor that produced the scene.
    pub source_processor: ProcessorId,
}

/// Distinguishes ordinary objects from a whole-frame scene root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    #[default]
    Plain,
    Scene(SceneInfo),
}

impl ObjectKind {
    pub fn is_plain(&self) -> bool {
        matches!(self, ObjectKind::Plain)
    }
}

/// A typed, tracked bounding region.
///
/// `type_id` names a category (e.g. `face`), while `tracking_id` names one
/// physical instance across frames and is expected to be unique among
/// siblings (not enforced). Every node exclusively owns its landmarks,
/// params and child objects, so trees are always finite and acyclic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Object<TSpace> {
    pub type_id: String,

    pub tracking_id: String,

    pub bounding: Rect<TSpace>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<Landmark<TSpace>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<Object<TSpace>>,

    /// Metadata; never converted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ObjectParam>,

    #[serde(default, skip_serializing_if = "ObjectKind::is_plain")]
    pub kind: ObjectKind,
}

impl<TSpace> Object<TSpace> {
    /// Creates a plain object with no landmarks, children or params.
    pub fn new(
        type_id: impl Into<String>,
        tracking_id: impl Into<String>,
        bounding: Rect<TSpace>,
    ) -> Self {
        Self {
            type_id: type_id.into(),
            tracking_id: tracking_id.into(),
            bounding,
            landmarks: Vec::new(),
            objects: Vec::new(),
            params: Vec::new(),
            kind: ObjectKind::Plain,
        }
    }

    pub fn with_landmark(mut self, landmark: Landmark<TSpace>) -> Self {
        self.landmarks.push(landmark);
        self
    }

    pub fn with_landmarks(mut self, landmarks: impl IntoIterator<Item = Landmark<TSpace>>) -> Self {
        self.landmarks.extend(landmarks);
        self
    }

    pub fn with_object(mut self, object: Object<TSpace>) -> Self {
        self.objects.push(object);
        self
    }

    pub fn with_param(mut self, param: ObjectParam) -> Self {
        self.params.push(param);
        self
    }

    /// `right - left`; negative for a malformed bounding.
    #[inline]
    pub fn width(&self) -> f32 {
        self.bounding.width()
    }

    /// `bottom - top`; negative for a malformed bounding.
    #[inline]
    pub fn height(&self) -> f32 {
        self.bounding.height()
    }

    pub fn is_scene(&self) -> bool {
        matches!(self.kind, ObjectKind::Scene(_))
    }

    pub fn scene_info(&self) -> Option<&SceneInfo> {
        match &self.kind {
            ObjectKind::Scene(info) => Some(info),
            ObjectKind::Plain => None,
        }
    }

    /// Number of levels in this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.objects.iter().map(Object::depth).max().unwrap_or(0)
    }

    /// Returns this object followed by all of its descendants, depth-first
    /// in pre-order.
    pub fn flatten(&self) -> Vec<&Object<TSpace>> {
        let mut out = Vec::new();
        collect_preorder(self, &mut out);
        out
    }
}

fn collect_preorder<'a, TSpace>(object: &'a Object<TSpace>, out: &mut Vec<&'a Object<TSpace>>) {
    out.push(object);
    for child in &object.objects {
        collect_preorder(child, out);
    }
}

impl<TSpace: CoordSpace> Object<TSpace> {
    /// Returns true if this object is in relative space.
    pub fn is_normalized(&self) -> bool {
        TSpace::KIND == SpaceKind::Normalized
    }
}

impl Object<Pixel> {
    /// Converts the whole subtree to relative coordinates, scaling depth by
    /// the image width.
    ///
    /// # Errors
    /// Returns [`ScenemarkError::InvalidArgument`] if either dimension is not
    /// positive. Nothing is converted in that case.
    pub fn to_normalized(
        &self,
        image_width: i32,
        image_height: i32,
    ) -> Result<Object<Normalized>, ScenemarkError> {
        Ok(self.normalize(&ImageScale::new(image_width, image_height)?))
    }

    /// Converts the whole subtree with an explicit depth scale.
    pub fn to_normalized_with_depth(
        &self,
        image_width: i32,
        image_height: i32,
        pixel_depth_scale: f32,
    ) -> Result<Object<Normalized>, ScenemarkError> {
        let scale = ImageScale::with_depth_scale(image_width, image_height, pixel_depth_scale)?;
        Ok(self.normalize(&scale))
    }

    /// Converts with an already validated scale. Params and kind are copied.
    pub fn normalize(&self, scale: &ImageScale) -> Object<Normalized> {
        Object {
            type_id: self.type_id.clone(),
            tracking_id: self.tracking_id.clone(),
            bounding: scale.rect_to_relative(&self.bounding),
            landmarks: self.landmarks.iter().map(|l| l.normalize(scale)).collect(),
            objects: self.objects.iter().map(|o| o.normalize(scale)).collect(),
            params: self.params.clone(),
            kind: self.kind.clone(),
        }
    }
}

impl Object<Normalized> {
    /// Converts the whole subtree back to pixel coordinates, scaling depth
    /// by the image width.
    pub fn to_pixel(
        &self,
        image_width: i32,
        image_height: i32,
    ) -> Result<Object<Pixel>, ScenemarkError> {
        Ok(self.denormalize(&ImageScale::new(image_width, image_height)?))
    }

    pub fn to_pixel_with_depth(
        &self,
        image_width: i32,
        image_height: i32,
        pixel_depth_scale: f32,
    ) -> Result<Object<Pixel>, ScenemarkError> {
        let scale = ImageScale::with_depth_scale(image_width, image_height, pixel_depth_scale)?;
        Ok(self.denormalize(&scale))
    }

    pub fn denormalize(&self, scale: &ImageScale) -> Object<Pixel> {
        Object {
            type_id: self.type_id.clone(),
            tracking_id: self.tracking_id.clone(),
            bounding: scale.rect_to_pixel(&self.bounding),
            landmarks: self.landmarks.iter().map(|l| l.denormalize(scale)).collect(),
            objects: self.objects.iter().map(|o| o.denormalize(scale)).collect(),
            params: self.params.clone(),
            kind: self.kind.clone(),
        }
    }

    /// Returns true only if the entire subtree lies in [0, 1].
    ///
    /// Checks the bounding first, then the landmarks, then the children,
    /// stopping at the first violation.
    pub fn is_valid_normalized(&self, check_z: bool) -> bool {
        self.bounding.is_within_unit()
            && self
                .landmarks
                .iter()
                .all(|l| l.is_valid_normalized(check_z))
            && self
                .objects
                .iter()
                .all(|o| o.is_valid_normalized(check_z))
    }

    /// Returns a copy of the subtree with every coordinate clamped into [0, 1].
    pub fn clamped(&self, clamp_z: bool) -> Object<Normalized> {
        Object {
            type_id: self.type_id.clone(),
            tracking_id: self.tracking_id.clone(),
            bounding: super::normalizer::clamp_rect_to_relative_bounds(&self.bounding),
            landmarks: self.landmarks.iter().map(|l| l.clamped(clamp_z)).collect(),
            objects: self.objects.iter().map(|o| o.clamped(clamp_z)).collect(),
            params: self.params.clone(),
            kind: self.kind.clone(),
        }
    }
}
