//! Whole-frame scenes: the root object of one frame's detections.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Deref};

use super::ids::ProcessorId;
use super::landmark::Landmark;
use super::normalizer::ImageScale;
use super::object::{Object, ObjectKind, SceneInfo};
use super::param::ObjectParam;
use super::rect::Rect;
use super::space::{CoordSpace, Normalized, Pixel};
use crate::error::ScenemarkError;

/// Type id shared by every scene root.
pub const SCENE_TYPE_ID: &str = "scene";

/// Tracking id shared by every scene root.
pub const SCENE_TRACKING_ID: &str = "scene";

/// An [`Object`] of kind `Scene`: everything detected in one frame.
///
/// The type and tracking ids are the fixed sentinels [`SCENE_TYPE_ID`] and
/// [`SCENE_TRACKING_ID`], and the bounding always covers the whole image:
/// `(0, 0, original_width, original_height)` in pixel space, `(0, 0, 1, 1)`
/// in relative space. A scene derefs to its root object, so it can be used
/// wherever an `&Object` is expected.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene<TSpace>(Object<TSpace>);

/// Space-specific bounding of a scene root.
pub trait SceneBounds: CoordSpace {
    fn scene_bounding(original_width: i32, original_height: i32) -> Rect<Self>;
}

impl SceneBounds for Pixel {
    fn scene_bounding(original_width: i32, original_height: i32) -> Rect<Self> {
        Rect::from_raw(0.0, 0.0, original_width as f32, original_height as f32)
    }
}

impl SceneBounds for Normalized {
    fn scene_bounding(_original_width: i32, _original_height: i32) -> Rect<Self> {
        Rect::unit()
    }
}

impl<TSpace: SceneBounds> Scene<TSpace> {
    /// Creates a scene for an image of the given size.
    pub fn new(
        original_width: i32,
        original_height: i32,
        source_processor: impl Into<ProcessorId>,
        landmarks: Vec<Landmark<TSpace>>,
        objects: Vec<Object<TSpace>>,
        params: Vec<ObjectParam>,
    ) -> Self {
        let info = SceneInfo {
            original_width,
            original_height,
            source_processor: source_processor.into(),
        };
        Self::from_parts(info, landmarks, objects, params)
    }

    /// Creates a scene with nothing detected.
    pub fn empty(
        original_width: i32,
        original_height: i32,
        source_processor: impl Into<ProcessorId>,
    ) -> Self {
        Self::new(
            original_width,
            original_height,
            source_processor,
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
    }

    fn from_parts(
        info: SceneInfo,
        landmarks: Vec<Landmark<TSpace>>,
        objects: Vec<Object<TSpace>>,
        params: Vec<ObjectParam>,
    ) -> Self {
        Scene(Object {
            type_id: SCENE_TYPE_ID.to_string(),
            tracking_id: SCENE_TRACKING_ID.to_string(),
            bounding: TSpace::scene_bounding(info.original_width, info.original_height),
            landmarks,
            objects,
            params,
            kind: ObjectKind::Scene(info),
        })
    }

    /// Merges two scenes of the same image size.
    ///
    /// Landmarks, objects and params of `self` come first, followed by those
    /// of `other`. Nothing is deduplicated, not even repeated tracking ids.
    /// The source processor is taken from `self`.
    ///
    /// # Errors
    /// Returns [`ScenemarkError::DimensionMismatch`] if the original image
    /// dimensions differ. Nothing is merged in that case.
    pub fn combine(&self, other: &Scene<TSpace>) -> Result<Scene<TSpace>, ScenemarkError> {
        let (a, b) = (self.info(), other.info());
        if a.original_width != b.original_width || a.original_height != b.original_height {
            log::warn!(
                "refusing to combine scenes from {} ({}x{}) and {} ({}x{})",
                a.source_processor,
                a.original_width,
                a.original_height,
                b.source_processor,
                b.original_width,
                b.original_height
            );
            return Err(ScenemarkError::DimensionMismatch {
                left_width: a.original_width,
                left_height: a.original_height,
                right_width: b.original_width,
                right_height: b.original_height,
            });
        }

        Ok(Self::from_parts(
            a.clone(),
            concat(&self.0.landmarks, &other.0.landmarks),
            concat(&self.0.objects, &other.0.objects),
            concat(&self.0.params, &other.0.params),
        ))
    }
}

fn concat<T: Clone>(first: &[T], second: &[T]) -> Vec<T> {
    first.iter().chain(second).cloned().collect()
}

impl<TSpace> Scene<TSpace> {
    /// Scene-only fields.
    pub fn info(&self) -> &SceneInfo {
        match &self.0.kind {
            ObjectKind::Scene(info) => info,
            ObjectKind::Plain => unreachable!("a Scene always wraps a scene-kind object"),
        }
    }

    #[inline]
    pub fn original_width(&self) -> i32 {
        self.info().original_width
    }

    #[inline]
    pub fn original_height(&self) -> i32 {
        self.info().original_height
    }

    #[inline]
    pub fn source_processor(&self) -> &ProcessorId {
        &self.info().source_processor
    }

    /// Returns the root object.
    pub fn as_object(&self) -> &Object<TSpace> {
        &self.0
    }

    /// Unwraps the root object.
    pub fn into_object(self) -> Object<TSpace> {
        self.0
    }
}

impl<TSpace> Deref for Scene<TSpace> {
    type Target = Object<TSpace>;

    fn deref(&self) -> &Object<TSpace> {
        &self.0
    }
}

impl<TSpace> From<Scene<TSpace>> for Object<TSpace> {
    fn from(scene: Scene<TSpace>) -> Self {
        scene.0
    }
}

impl<TSpace: SceneBounds> TryFrom<Object<TSpace>> for Scene<TSpace> {
    type Error = ScenemarkError;

    /// Accepts only objects of kind `Scene`. The sentinel ids and the
    /// bounding are re-derived from the scene info.
    fn try_from(object: Object<TSpace>) -> Result<Self, Self::Error> {
        let Object {
            landmarks,
            objects,
            params,
            kind,
            ..
        } = object;
        match kind {
            ObjectKind::Scene(info) => Ok(Self::from_parts(info, landmarks, objects, params)),
            ObjectKind::Plain => Err(ScenemarkError::InvalidArgument(
                "object is not a scene".to_string(),
            )),
        }
    }
}

/// `a + b` is [`Scene::combine`]; the output is a `Result` because the
/// merge is refused for scenes of different sizes.
impl<TSpace: SceneBounds> Add for Scene<TSpace> {
    type Output = Result<Scene<TSpace>, ScenemarkError>;

    fn add(self, other: Scene<TSpace>) -> Self::Output {
        self.combine(&other)
    }
}

impl<TSpace: SceneBounds> Add<&Scene<TSpace>> for &Scene<TSpace> {
    type Output = Result<Scene<TSpace>, ScenemarkError>;

    fn add(self, other: &Scene<TSpace>) -> Self::Output {
        self.combine(other)
    }
}

impl Scene<Pixel> {
    /// Converts every top-level landmark and object (recursively) to
    /// relative coordinates, scaling depth by the original image width.
    ///
    /// # Errors
    /// Returns [`ScenemarkError::InvalidArgument`] if the scene dimensions
    /// are not positive.
    pub fn to_normalized(&self) -> Result<Scene<Normalized>, ScenemarkError> {
        let scale = ImageScale::new(self.original_width(), self.original_height())?;
        Ok(self.normalize(&scale))
    }

    /// Converts to relative coordinates with an explicit depth scale.
    pub fn to_normalized_with_depth(
        &self,
        pixel_depth_scale: f32,
    ) -> Result<Scene<Normalized>, ScenemarkError> {
        let scale = ImageScale::with_depth_scale(
            self.original_width(),
            self.original_height(),
            pixel_depth_scale,
        )?;
        Ok(self.normalize(&scale))
    }

    /// Converts with an already validated scale.
    pub fn normalize(&self, scale: &ImageScale) -> Scene<Normalized> {
        log::debug!(
            "normalizing scene from {} with {} landmark(s) and {} object(s)",
            self.source_processor(),
            self.landmarks.len(),
            self.objects.len()
        );
        Scene::from_parts(
            self.info().clone(),
            self.landmarks.iter().map(|l| l.normalize(scale)).collect(),
            self.objects.iter().map(|o| o.normalize(scale)).collect(),
            self.params.clone(),
        )
    }
}

impl Scene<Normalized> {
    /// Converts back to pixel coordinates, scaling depth by the original
    /// image width.
    pub fn to_pixel(&self) -> Result<Scene<Pixel>, ScenemarkError> {
        let scale = ImageScale::new(self.original_width(), self.original_height())?;
        Ok(self.denormalize(&scale))
    }

    pub fn to_pixel_with_depth(
        &self,
        pixel_depth_scale: f32,
    ) -> Result<Scene<Pixel>, ScenemarkError> {
        let scale = ImageScale::with_depth_scale(
            self.original_width(),
            self.original_height(),
            pixel_depth_scale,
        )?;
        Ok(self.denormalize(&scale))
    }

    pub fn denormalize(&self, scale: &ImageScale) -> Scene<Pixel> {
        Scene::from_parts(
            self.info().clone(),
            self.landmarks.iter().map(|l| l.denormalize(scale)).collect(),
            self.objects.iter().map(|o| o.denormalize(scale)).collect(),
            self.params.clone(),
        )
    }

    /// Returns true if every landmark and every object subtree lies in [0, 1].
    pub fn is_valid_normalized(&self, check_z: bool) -> bool {
        self.landmarks
            .iter()
            .all(|l| l.is_valid_normalized(check_z))
            && self
                .objects
                .iter()
                .all(|o| o.is_valid_normalized(check_z))
    }

    /// Returns a copy with every coordinate clamped into [0, 1].
    pub fn clamped(&self, clamp_z: bool) -> Scene<Normalized> {
        Scene::from_parts(
            self.info().clone(),
            self.landmarks.iter().map(|l| l.clamped(clamp_z)).collect(),
            self.objects.iter().map(|o| o.clamped(clamp_z)).collect(),
            self.params.clone(),
        )
    }
}

impl<TSpace> Serialize for Scene<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, TSpace: SceneBounds> Deserialize<'de> for Scene<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Object::<TSpace>::deserialize(deserializer)?;
        Scene::try_from(object).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point3D;
    use approx::assert_relative_eq;

    fn landmark(name: &str, x: f32, y: f32) -> Landmark<Pixel> {
        Landmark::new(name, Point3D::new(x, y, 0.0), 1.0)
    }

    fn scene_with(processor: &str, names: &[&str]) -> Scene<Pixel> {
        Scene::new(
            640,
            480,
            processor,
            names.iter().map(|n| landmark(n, 10.0, 20.0)).collect(),
            vec![Object::new("face", format!("{}-face", processor), Rect::new(0.0, 0.0, 64.0, 48.0))],
            vec![ObjectParam::new("source", processor)],
        )
    }

    #[test]
    fn test_scene_derives_bounding_and_sentinels() {
        let scene: Scene<Pixel> = Scene::empty(640, 480, "face");
        assert_eq!(scene.type_id, SCENE_TYPE_ID);
        assert_eq!(scene.tracking_id, SCENE_TRACKING_ID);
        assert_eq!(scene.bounding, Rect::new(0.0, 0.0, 640.0, 480.0));
        assert_eq!(scene.width(), 640.0);
        assert!(scene.is_scene());
        assert_eq!(scene.source_processor().as_str(), "face");
    }

    #[test]
    fn test_combine_concatenates_in_order() {
        let a = scene_with("a", &["l1", "l2"]);
        let b = scene_with("b", &["l3"]);

        let merged = a.combine(&b).unwrap();
        let names: Vec<&str> = merged.landmarks.iter().map(|l| l.type_id.as_str()).collect();
        assert_eq!(names, vec!["l1", "l2", "l3"]);
        assert_eq!(merged.objects.len(), 2);
        assert_eq!(merged.objects[1].tracking_id, "b-face");
        assert_eq!(merged.params.len(), 2);
        assert_eq!(merged.source_processor().as_str(), "a");
        assert_eq!(merged.bounding, a.bounding);
    }

    #[test]
    fn test_combine_keeps_duplicate_tracking_ids() {
        let a = scene_with("a", &[]);
        let merged = (&a + &a).unwrap();
        assert_eq!(merged.objects.len(), 2);
        assert_eq!(merged.objects[0].tracking_id, merged.objects[1].tracking_id);
    }

    #[test]
    fn test_combine_rejects_dimension_mismatch() {
        let a: Scene<Pixel> = Scene::empty(640, 480, "a");
        let b: Scene<Pixel> = Scene::empty(640, 481, "b");

        let err = (a + b).unwrap_err();
        assert!(matches!(
            err,
            ScenemarkError::DimensionMismatch {
                left_width: 640,
                left_height: 480,
                right_width: 640,
                right_height: 481,
            }
        ));
    }

    #[test]
    fn test_scene_normalize_roundtrip() {
        let scene = scene_with("a", &["l1"]);
        let normalized = scene.to_normalized().unwrap();

        assert_eq!(normalized.bounding, Rect::unit());
        assert_eq!(normalized.original_width(), 640);
        assert_eq!(normalized.source_processor(), scene.source_processor());
        assert_relative_eq!(normalized.objects[0].bounding.right, 0.1);
        assert!(normalized.is_valid_normalized(true));

        let back = normalized.to_pixel().unwrap();
        assert_eq!(back.bounding, scene.bounding);
        assert_relative_eq!(back.landmarks[0].location.x, 10.0, epsilon = 1e-4);
        assert_eq!(back.params, scene.params);
    }

    #[test]
    fn test_scene_with_bad_dimensions_cannot_convert() {
        let scene: Scene<Pixel> = Scene::empty(0, 480, "broken");
        assert!(matches!(
            scene.to_normalized(),
            Err(ScenemarkError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_try_from_object() {
        let plain = Object::new("face", "1", Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(Scene::try_from(plain).is_err());

        let scene = scene_with("a", &["l1"]);
        let object: Object<Pixel> = scene.clone().into();
        assert!(object.is_scene());
        assert_eq!(Scene::try_from(object).unwrap(), scene);
    }

    #[test]
    fn test_scene_serde_rejects_plain_objects() {
        let scene = scene_with("a", &["l1"]);
        let json = serde_json::to_string(&scene).unwrap();
        let restored: Scene<Pixel> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, scene);

        let plain = r#"{"type_id":"face","tracking_id":"1","bounding":{"left":0,"top":0,"right":1,"bottom":1}}"#;
        assert!(serde_json::from_str::<Scene<Pixel>>(plain).is_err());
    }
}
