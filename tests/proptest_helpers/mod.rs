#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use scenemark::model::{Landmark, Object, ObjectParam, ParamValue, Pixel, Point3D, Rect, Scene};

/// Absolute tolerance for a pixel value after a relative round trip.
pub fn eps_pixel(image_w: i32, image_h: i32) -> f32 {
    image_w.max(image_h) as f32 * 1e-5
}

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_dims() -> impl Strategy<Value = (i32, i32)> {
    (1i32..=4096, 1i32..=4096)
}

/// Coordinates are drawn from `[-overshoot * dim, (1 + overshoot) * dim]`;
/// an overshoot of zero keeps everything inside the image.
#[derive(Clone, Copy, Debug)]
pub struct Extent {
    pub width: i32,
    pub height: i32,
    pub overshoot: f32,
}

impl Extent {
    pub fn inside(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            overshoot: 0.0,
        }
    }

    fn axis(dim: i32, overshoot: f32) -> std::ops::RangeInclusive<f32> {
        let dim = dim as f32;
        (-overshoot * dim)..=((1.0 + overshoot) * dim)
    }

    fn x(&self) -> std::ops::RangeInclusive<f32> {
        Self::axis(self.width, self.overshoot)
    }

    fn y(&self) -> std::ops::RangeInclusive<f32> {
        Self::axis(self.height, self.overshoot)
    }

    // Depth is scaled by the width by default
    fn z(&self) -> std::ops::RangeInclusive<f32> {
        Self::axis(self.width, self.overshoot)
    }
}

fn arb_type_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("face".to_string()),
        Just("hand".to_string()),
        Just("hand_left".to_string()),
        "[a-z]{1,6}",
    ]
}

pub fn arb_point(extent: Extent) -> BoxedStrategy<Point3D<Pixel>> {
    (extent.x(), extent.y(), extent.z())
        .prop_map(|(x, y, z)| Point3D::new(x, y, z))
        .boxed()
}

pub fn arb_rect(extent: Extent) -> BoxedStrategy<Rect<Pixel>> {
    (extent.x(), extent.x(), extent.y(), extent.y())
        .prop_map(|(x1, x2, y1, y2)| Rect::new(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2)))
        .boxed()
}

pub fn arb_landmark(extent: Extent) -> BoxedStrategy<Landmark<Pixel>> {
    (arb_type_id(), arb_point(extent), 0.0f32..=1.0)
        .prop_map(|(type_id, location, score)| Landmark::new(type_id, location, score))
        .boxed()
}

pub fn arb_param() -> BoxedStrategy<ObjectParam> {
    let value = prop_oneof![
        (-1_000_000i32..1_000_000).prop_map(|n| ParamValue::Number(f64::from(n) / 4.0)),
        "[a-z ]{0,8}".prop_map(ParamValue::Text),
        any::<bool>().prop_map(ParamValue::Bool),
        prop::collection::vec(any::<u8>(), 0..6).prop_map(ParamValue::Blob),
    ];
    (arb_type_id(), value, 0.0f32..=1.0)
        .prop_map(|(type_id, value, score)| ObjectParam::new(type_id, value).with_score(score))
        .boxed()
}

fn arb_leaf(extent: Extent) -> BoxedStrategy<Object<Pixel>> {
    (
        arb_type_id(),
        "[a-z0-9]{1,8}",
        arb_rect(extent),
        prop::collection::vec(arb_landmark(extent), 0..4),
        prop::collection::vec(arb_param(), 0..2),
    )
        .prop_map(|(type_id, tracking_id, rect, landmarks, params)| {
            let mut object = Object::new(type_id, tracking_id, rect).with_landmarks(landmarks);
            object.params = params;
            object
        })
        .boxed()
}

/// A pixel object tree up to four levels deep.
pub fn arb_object_tree(extent: Extent) -> BoxedStrategy<Object<Pixel>> {
    arb_leaf(extent)
        .prop_recursive(3, 24, 3, move |inner| {
            (arb_leaf(extent), prop::collection::vec(inner, 0..3)).prop_map(|(mut node, kids)| {
                node.objects = kids;
                node
            })
        })
        .boxed()
}

pub fn arb_pixel_scene_in(extent: Extent) -> BoxedStrategy<Scene<Pixel>> {
    (
        prop::collection::vec(arb_landmark(extent), 0..4),
        prop::collection::vec(arb_object_tree(extent), 0..3),
        prop::collection::vec(arb_param(), 0..2),
    )
        .prop_map(move |(landmarks, objects, params)| {
            Scene::new(
                extent.width,
                extent.height,
                "proptest",
                landmarks,
                objects,
                params,
            )
        })
        .boxed()
}

/// A pixel scene whose every coordinate lies inside the image.
pub fn arb_pixel_scene() -> BoxedStrategy<Scene<Pixel>> {
    arb_dims()
        .prop_flat_map(|(w, h)| arb_pixel_scene_in(Extent::inside(w, h)))
        .boxed()
}

/// A pixel scene with coordinates up to half an image outside the frame.
pub fn arb_overflowing_pixel_scene() -> BoxedStrategy<Scene<Pixel>> {
    arb_dims()
        .prop_flat_map(|(width, height)| {
            arb_pixel_scene_in(Extent {
                width,
                height,
                overshoot: 0.5,
            })
        })
        .boxed()
}

pub fn assert_points_close(a: &Point3D<Pixel>, b: &Point3D<Pixel>, eps: f32) {
    assert!(
        (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps && (a.z - b.z).abs() <= eps,
        "points differ beyond {}: {:?} vs {:?}",
        eps,
        a,
        b
    );
}

pub fn assert_rects_close(a: &Rect<Pixel>, b: &Rect<Pixel>, eps: f32) {
    for (x, y) in a.components().iter().zip(b.components()) {
        assert!(
            (x - y).abs() <= eps,
            "rects differ beyond {}: {:?} vs {:?}",
            eps,
            a,
            b
        );
    }
}

/// Asserts two pixel subtrees have the same shape, ids and params, with
/// coordinates equal up to `eps`.
pub fn assert_objects_close(a: &Object<Pixel>, b: &Object<Pixel>, eps: f32) {
    assert_eq!(a.type_id, b.type_id);
    assert_eq!(a.tracking_id, b.tracking_id);
    assert_eq!(a.params, b.params);
    assert_eq!(a.kind, b.kind);
    assert_rects_close(&a.bounding, &b.bounding, eps);

    assert_eq!(a.landmarks.len(), b.landmarks.len());
    for (la, lb) in a.landmarks.iter().zip(&b.landmarks) {
        assert_eq!(la.type_id, lb.type_id);
        assert_eq!(la.score, lb.score);
        assert_points_close(&la.location, &lb.location, eps);
    }

    assert_eq!(a.objects.len(), b.objects.len());
    for (ca, cb) in a.objects.iter().zip(&b.objects) {
        assert_objects_close(ca, cb, eps);
    }
}
