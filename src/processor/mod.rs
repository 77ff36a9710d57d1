//! The boundary with image processors.
//!
//! Detection itself happens elsewhere. A processor receives an image,
//! returns a pixel-space [`Scene`] (or nothing), and may hand the data a
//! renderer needs to a [`DrawingSurface`]. Results from several processors
//! run over the same frame are reconciled into one scene by
//! [`compose_scene_from_processing_results`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::ScenemarkError;
use crate::model::{
    Landmark, Object, ObjectParam, Pixel, Point3D, ProcessorId, Rect, Scene, SceneBounds,
};

/// An image handed to a processor: its size plus an opaque pixel buffer.
#[derive(Clone, Copy, Debug)]
pub struct ImageRef<'a> {
    pub width: i32,
    pub height: i32,
    pub pixels: &'a [u8],
}

impl<'a> ImageRef<'a> {
    pub fn new(width: i32, height: i32, pixels: &'a [u8]) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// An image known only by its size.
    pub fn dimensions_only(width: i32, height: i32) -> ImageRef<'static> {
        ImageRef {
            width,
            height,
            pixels: &[],
        }
    }
}

/// Receives overlay primitives from [`ImageProcessor::render_visualization`].
pub trait DrawingSurface {
    fn draw_rect(&mut self, type_id: &str, rect: &Rect<Pixel>);
    fn draw_point(&mut self, type_id: &str, point: &Point3D<Pixel>);
}

/// One value produced while processing a frame.
///
/// Only `Scene` values take part in composition; everything else is
/// carried along for the caller.
#[derive(Clone)]
pub enum ProcessingResult<TSpace = Pixel> {
    Scene(Scene<TSpace>),
    Landmarks(Vec<Landmark<TSpace>>),
    Objects(Vec<Object<TSpace>>),
    Params(Vec<ObjectParam>),
    Opaque(Arc<dyn std::any::Any + Send + Sync>),
}

impl<TSpace: fmt::Debug> fmt::Debug for ProcessingResult<TSpace> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingResult::Scene(s) => f.debug_tuple("Scene").field(s).finish(),
            ProcessingResult::Landmarks(l) => f.debug_tuple("Landmarks").field(l).finish(),
            ProcessingResult::Objects(o) => f.debug_tuple("Objects").field(o).finish(),
            ProcessingResult::Params(p) => f.debug_tuple("Params").field(p).finish(),
            ProcessingResult::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl<TSpace> From<Scene<TSpace>> for ProcessingResult<TSpace> {
    fn from(scene: Scene<TSpace>) -> Self {
        ProcessingResult::Scene(scene)
    }
}

/// Folds every scene in `results` into one with [`Scene::combine`], in
/// encounter order. Non-scene results are skipped.
///
/// Returns `Ok(None)` if there is no scene at all.
///
/// # Errors
/// Returns [`ScenemarkError::DimensionMismatch`] as soon as two scenes
/// disagree on their image size. All results of one frame must come from
/// the same image, so this is never smoothed over.
pub fn compose_scene_from_processing_results<TSpace, I>(
    results: I,
) -> Result<Option<Scene<TSpace>>, ScenemarkError>
where
    TSpace: SceneBounds,
    I: IntoIterator<Item = ProcessingResult<TSpace>>,
{
    let mut composed: Option<Scene<TSpace>> = None;
    let mut scene_count = 0usize;

    for result in results {
        let ProcessingResult::Scene(scene) = result else {
            continue;
        };
        scene_count += 1;
        composed = Some(match composed {
            None => scene,
            Some(acc) => acc.combine(&scene)?,
        });
    }

    log::debug!("composed {} scene(s) from processing results", scene_count);
    Ok(composed)
}

/// A detector plugged into the frame pipeline.
pub trait ImageProcessor {
    /// The handle stamped into every scene this processor creates.
    fn id(&self) -> ProcessorId;

    /// Runs detection over one image. `None` means nothing was detected.
    fn process(&mut self, image: &ImageRef<'_>) -> Option<Scene<Pixel>>;

    /// Hands the scene's bounding rectangles and landmark points to `surface`.
    ///
    /// The default walks the whole tree, depth-first, skipping the scene's
    /// own bounding. Nothing is drawn by this crate.
    fn render_visualization(
        &self,
        scene: &Scene<Pixel>,
        _image: &ImageRef<'_>,
        surface: &mut dyn DrawingSurface,
    ) {
        for landmark in &scene.landmarks {
            surface.draw_point(&landmark.type_id, &landmark.location);
        }
        for object in &scene.objects {
            for node in object.flatten() {
                surface.draw_rect(&node.type_id, &node.bounding);
                for landmark in &node.landmarks {
                    surface.draw_point(&landmark.type_id, &landmark.location);
                }
            }
        }
    }

    /// Builds a result scene sized from `image` and stamped with [`Self::id`].
    fn create_result_scene(
        &self,
        image: &ImageRef<'_>,
        landmarks: Vec<Landmark<Pixel>>,
        objects: Vec<Object<Pixel>>,
        params: Vec<ObjectParam>,
    ) -> Scene<Pixel> {
        Scene::new(image.width, image.height, self.id(), landmarks, objects, params)
    }
}

/// Runs every processor over `image` and composes their scenes.
pub fn run_processors(
    processors: &mut [Box<dyn ImageProcessor>],
    image: &ImageRef<'_>,
) -> Result<Option<Scene<Pixel>>, ScenemarkError> {
    let results: Vec<ProcessingResult> = processors
        .iter_mut()
        .filter_map(|p| {
            let scene = p.process(image);
            if scene.is_none() {
                log::debug!("processor {} detected nothing", p.id());
            }
            scene
        })
        .map(ProcessingResult::Scene)
        .collect();

    compose_scene_from_processing_results(results)
}

/// Reads the pixel dimensions from an image file header.
///
/// Only the header is read; the image is not decoded.
pub fn read_image_dimensions(path: &Path) -> Result<(i32, i32), ScenemarkError> {
    let size = imagesize::size(path).map_err(|source| ScenemarkError::ImageDimensionRead {
        path: path.to_path_buf(),
        source,
    })?;

    let width: i32 = size.width.try_into().map_err(|_| {
        ScenemarkError::InvalidArgument(format!(
            "image width {} of {} does not fit in i32",
            size.width,
            path.display()
        ))
    })?;
    let height: i32 = size.height.try_into().map_err(|_| {
        ScenemarkError::InvalidArgument(format!(
            "image height {} of {} does not fit in i32",
            size.height,
            path.display()
        ))
    })?;

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProcessor {
        name: &'static str,
        width: i32,
        landmark_count: usize,
    }

    impl ImageProcessor for FixedProcessor {
        fn id(&self) -> ProcessorId {
            ProcessorId::from(self.name)
        }

        fn process(&mut self, image: &ImageRef<'_>) -> Option<Scene<Pixel>> {
            if self.landmark_count == 0 {
                return None;
            }
            let landmarks = (0..self.landmark_count)
                .map(|i| Landmark::new(format!("{}_{}", self.name, i), Point3D::flat(1.0, 1.0), 1.0))
                .collect();
            let image = ImageRef::dimensions_only(self.width, image.height);
            Some(self.create_result_scene(&image, landmarks, vec![], vec![]))
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        rects: Vec<String>,
        points: Vec<String>,
    }

    impl DrawingSurface for RecordingSurface {
        fn draw_rect(&mut self, type_id: &str, _rect: &Rect<Pixel>) {
            self.rects.push(type_id.to_string());
        }

        fn draw_point(&mut self, type_id: &str, _point: &Point3D<Pixel>) {
            self.points.push(type_id.to_string());
        }
    }

    fn scene(processor: &str, width: i32, names: &[&str]) -> Scene<Pixel> {
        Scene::new(
            width,
            100,
            processor,
            names
                .iter()
                .map(|n| Landmark::new(*n, Point3D::flat(0.0, 0.0), 1.0))
                .collect(),
            vec![],
            vec![],
        )
    }

    #[test]
    fn test_compose_skips_non_scene_results() {
        let results: Vec<ProcessingResult> = vec![
            ProcessingResult::Params(vec![ObjectParam::new("fps", 30.0)]),
            scene("a", 100, &["a1"]).into(),
            ProcessingResult::Opaque(Arc::new(42u32)),
            scene("b", 100, &["b1", "b2"]).into(),
        ];

        let composed = compose_scene_from_processing_results(results)
            .unwrap()
            .unwrap();
        let names: Vec<&str> = composed.landmarks.iter().map(|l| l.type_id.as_str()).collect();
        assert_eq!(names, vec!["a1", "b1", "b2"]);
        assert_eq!(composed.source_processor().as_str(), "a");
    }

    #[test]
    fn test_compose_without_scenes_is_none() {
        let results: Vec<ProcessingResult> = vec![ProcessingResult::Landmarks(vec![])];
        assert!(compose_scene_from_processing_results(results)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_compose_fails_loudly_on_mismatch() {
        let results = vec![
            ProcessingResult::from(scene("a", 100, &["a1"])),
            ProcessingResult::from(scene("b", 200, &["b1"])),
        ];
        assert!(matches!(
            compose_scene_from_processing_results(results),
            Err(ScenemarkError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_run_processors_composes_in_order() {
        let mut processors: Vec<Box<dyn ImageProcessor>> = vec![
            Box::new(FixedProcessor { name: "face", width: 64, landmark_count: 2 }),
            Box::new(FixedProcessor { name: "none", width: 64, landmark_count: 0 }),
            Box::new(FixedProcessor { name: "pose", width: 64, landmark_count: 1 }),
        ];
        let pixels = vec![0u8; 64 * 48];
        let image = ImageRef::new(64, 48, &pixels);

        let scene = run_processors(&mut processors, &image).unwrap().unwrap();
        assert_eq!(scene.landmarks.len(), 3);
        assert_eq!(scene.source_processor().as_str(), "face");
        assert_eq!(scene.landmarks[2].type_id, "pose_0");
        assert_eq!((scene.original_width(), scene.original_height()), (64, 48));
    }

    #[test]
    fn test_run_processors_rejects_mixed_sizes() {
        let mut processors: Vec<Box<dyn ImageProcessor>> = vec![
            Box::new(FixedProcessor { name: "face", width: 64, landmark_count: 1 }),
            Box::new(FixedProcessor { name: "pose", width: 32, landmark_count: 1 }),
        ];
        let image = ImageRef::dimensions_only(64, 48);
        assert!(run_processors(&mut processors, &image).is_err());
    }

    #[test]
    fn test_default_render_walks_tree() {
        let processor = FixedProcessor { name: "face", width: 64, landmark_count: 1 };
        let image = ImageRef::dimensions_only(64, 48);
        let scene = processor.create_result_scene(
            &image,
            vec![Landmark::new("nose", Point3D::flat(1.0, 1.0), 1.0)],
            vec![Object::new("face", "f1", Rect::new(0.0, 0.0, 10.0, 10.0))
                .with_landmark(Landmark::new("eye", Point3D::flat(2.0, 2.0), 1.0))
                .with_object(Object::new("mouth", "m1", Rect::new(1.0, 5.0, 9.0, 9.0)))],
            vec![],
        );
        assert_eq!(scene.source_processor().as_str(), "face");
        assert_eq!(scene.bounding, Rect::new(0.0, 0.0, 64.0, 48.0));

        let mut surface = RecordingSurface::default();
        processor.render_visualization(&scene, &image, &mut surface);
        assert_eq!(surface.rects, vec!["face", "mouth"]);
        assert_eq!(surface.points, vec!["nose", "eye"]);
    }

    #[test]
    fn test_read_image_dimensions_missing_file() {
        let err = read_image_dimensions(Path::new("missing.png")).unwrap_err();
        assert!(matches!(err, ScenemarkError::ImageDimensionRead { .. }));
    }
}
