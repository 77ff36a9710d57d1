//! Entity model for scenemark.
//!
//! This module defines the landmarks, objects and scenes produced by a
//! computer-vision pipeline, and the transforms between pixel space and the
//! relative [0, 1] space used by pose and face detectors.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: Every entity is generic over a coordinate space
//!    marker ([`Pixel`] or [`Normalized`]), so pixel and relative trees
//!    cannot be mixed. Relative values only come from conversions, clamps,
//!    checked constructors or deserialization.
//!
//! 2. **Closed Variants**: A scene is an [`Object`] with a `Scene` kind
//!    instead of a subclass, and param values are a closed [`ParamValue`].
//!
//! 3. **Permissive Construction**: Malformed rectangles and out-of-range
//!    deserialized values are representable, so that validation can report
//!    them rather than panic during parsing.
//!
//! # Example
//!
//! ```
//! use scenemark::model::{Landmark, Object, Pixel, Point3D, Rect, Scene};
//!
//! let scene: Scene<Pixel> = Scene::new(
//!     640,
//!     480,
//!     "face_detector",
//!     vec![],
//!     vec![Object::new("face", "face-1", Rect::new(100.0, 80.0, 300.0, 320.0))
//!         .with_landmark(Landmark::new("nose", Point3D::new(200.0, 200.0, 0.0), 0.9))],
//!     vec![],
//! );
//!
//! let normalized = scene.to_normalized().unwrap();
//! assert!(normalized.is_valid_normalized(false));
//! ```

mod document;
mod ids;
pub mod io_json;
pub mod io_yaml;
mod landmark;
pub mod lookup;
pub mod normalizer;
mod object;
mod param;
mod point;
mod rect;
mod scene;
mod space;

// Re-export core types for convenient access
pub use document::SceneDocument;
pub use ids::ProcessorId;
pub use landmark::Landmark;
pub use lookup::{
    first_by_type, get_by_tracking_id, get_by_type, get_by_type_prefix, Lookup, Tracked, Typed,
};
pub use normalizer::ImageScale;
pub use object::{Object, ObjectKind, SceneInfo};
pub use param::{ObjectParam, ParamValue};
pub use point::Point3D;
pub use rect::Rect;
pub use scene::{Scene, SceneBounds, SCENE_TRACKING_ID, SCENE_TYPE_ID};
pub use space::{CoordSpace, Normalized, Pixel, SpaceKind};
