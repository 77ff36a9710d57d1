//! Scene validation for scenemark.
//!
//! [`Scene::is_valid_normalized`] answers yes or no. This module explains
//! why, for scenes in either space:
//! - Geometric validity (finite values, ordered boundings, within the image)
//! - Identity hygiene (empty type ids, repeated tracking ids among siblings)
//! - Score sanity (confidences outside [0, 1])

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::HashMap;

use crate::model::{CoordSpace, Landmark, Object, ObjectParam, Point3D, Rect, Scene, SpaceKind};

/// Options for validation behavior.
#[derive(Clone, Debug)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,

    /// Also check depth values against their range.
    pub check_z: bool,

    /// Slack, in pixels, allowed outside the image for pixel-space scenes.
    pub pixel_tolerance: f32,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            strict: false,
            check_z: false,
            pixel_tolerance: 0.5,
        }
    }
}

/// Inclusive coordinate range a scene's values must fall in.
#[derive(Clone, Copy, Debug)]
struct Bounds {
    max_x: f32,
    max_y: f32,
    max_z: f32,
    tolerance: f32,
}

impl Bounds {
    fn axis_ok(value: f32, max: f32, tolerance: f32) -> bool {
        value >= -tolerance && value <= max + tolerance
    }

    fn contains_xy<S>(&self, point: &Point3D<S>) -> bool {
        Self::axis_ok(point.x, self.max_x, self.tolerance)
            && Self::axis_ok(point.y, self.max_y, self.tolerance)
    }

    fn contains_z<S>(&self, point: &Point3D<S>) -> bool {
        Self::axis_ok(point.z, self.max_z, self.tolerance)
    }

    fn contains_rect<S>(&self, rect: &Rect<S>) -> bool {
        Self::axis_ok(rect.left, self.max_x, self.tolerance)
            && Self::axis_ok(rect.right, self.max_x, self.tolerance)
            && Self::axis_ok(rect.top, self.max_y, self.tolerance)
            && Self::axis_ok(rect.bottom, self.max_y, self.tolerance)
    }
}

/// Validates a scene and returns a report of all issues found.
///
/// Pixel scenes are checked against `[0, W] x [0, H]` (depth against
/// `[0, W]`) with [`ValidateOptions::pixel_tolerance`] of slack; relative
/// scenes against [0, 1] exactly, matching `is_valid_normalized`.
pub fn validate_scene<S: CoordSpace>(scene: &Scene<S>, opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();

    let (width, height) = (scene.original_width(), scene.original_height());
    if width <= 0 || height <= 0 {
        report.add(ValidationIssue::error(
            IssueCode::InvalidSceneDimensions,
            format!("Invalid dimensions {}x{} (must be positive)", width, height),
            IssueContext::Scene,
        ));
    }

    let bounds = match S::KIND {
        SpaceKind::Normalized => Some(Bounds {
            max_x: 1.0,
            max_y: 1.0,
            max_z: 1.0,
            tolerance: 0.0,
        }),
        SpaceKind::Pixel if width > 0 && height > 0 => Some(Bounds {
            max_x: width as f32,
            max_y: height as f32,
            max_z: width as f32,
            tolerance: opts.pixel_tolerance,
        }),
        // Without usable dimensions there is nothing to check pixels against
        SpaceKind::Pixel => None,
    };

    let walker = Walker { bounds, opts };
    walker.landmarks(&scene.landmarks, "", &mut report);
    walker.params(&scene.params, "", &mut report);
    walker.siblings(&scene.objects, "", &mut report);

    log::debug!(
        "validated {} scene: {} error(s), {} warning(s)",
        S::KIND,
        report.error_count(),
        report.warning_count()
    );
    report
}

struct Walker<'a> {
    bounds: Option<Bounds>,
    opts: &'a ValidateOptions,
}

fn child_path(parent: &str, index: usize) -> String {
    if parent.is_empty() {
        format!("objects[{}]", index)
    } else {
        format!("{}.objects[{}]", parent, index)
    }
}

fn check_score(score: f32, context: IssueContext, report: &mut ValidationReport) {
    if !(0.0..=1.0).contains(&score) {
        report.add(ValidationIssue::warning(
            IssueCode::ScoreOutOfRange,
            format!("Score {} outside [0, 1]", score),
            context,
        ));
    }
}

impl Walker<'_> {
    fn landmarks<S>(&self, landmarks: &[Landmark<S>], path: &str, report: &mut ValidationReport) {
        for (index, landmark) in landmarks.iter().enumerate() {
            let context = || IssueContext::Landmark {
                path: path.to_string(),
                index,
            };

            if landmark.type_id.is_empty() {
                report.add(ValidationIssue::warning(
                    IssueCode::EmptyTypeId,
                    "Empty landmark type id",
                    context(),
                ));
            }
            check_score(landmark.score, context(), report);

            let location = &landmark.location;
            if !location.is_finite() {
                report.add(ValidationIssue::error(
                    IssueCode::NonFiniteCoordinate,
                    format!(
                        "Non-finite location ({}, {}, {})",
                        location.x, location.y, location.z
                    ),
                    context(),
                ));
                continue;
            }

            let Some(bounds) = self.bounds else {
                continue;
            };
            if !bounds.contains_xy(location) {
                report.add(ValidationIssue::error(
                    IssueCode::LandmarkOutOfBounds,
                    format!(
                        "'{}' at ({}, {}) lies outside (0, 0, {}, {})",
                        landmark.type_id, location.x, location.y, bounds.max_x, bounds.max_y
                    ),
                    context(),
                ));
            }
            if self.opts.check_z && !bounds.contains_z(location) {
                report.add(ValidationIssue::error(
                    IssueCode::DepthOutOfBounds,
                    format!(
                        "'{}' depth {} lies outside [0, {}]",
                        landmark.type_id, location.z, bounds.max_z
                    ),
                    context(),
                ));
            }
        }
    }

    fn params(&self, params: &[ObjectParam], path: &str, report: &mut ValidationReport) {
        for (index, param) in params.iter().enumerate() {
            let context = || IssueContext::Param {
                path: path.to_string(),
                index,
            };
            if param.type_id.is_empty() {
                report.add(ValidationIssue::warning(
                    IssueCode::EmptyTypeId,
                    "Empty param type id",
                    context(),
                ));
            }
            check_score(param.score, context(), report);
        }
    }

    /// Validates one sibling list, including tracking id uniqueness within it.
    fn siblings<S>(&self, objects: &[Object<S>], parent: &str, report: &mut ValidationReport) {
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for (index, object) in objects.iter().enumerate() {
            let path = child_path(parent, index);

            if let Some(first) = seen.get(object.tracking_id.as_str()) {
                report.add(ValidationIssue::warning(
                    IssueCode::DuplicateTrackingId,
                    format!(
                        "Duplicate tracking id '{}' (first seen at {})",
                        object.tracking_id,
                        child_path(parent, *first)
                    ),
                    IssueContext::Object { path: path.clone() },
                ));
            } else {
                seen.insert(&object.tracking_id, index);
            }

            self.object(object, &path, report);
        }
    }

    fn object<S>(&self, object: &Object<S>, path: &str, report: &mut ValidationReport) {
        let context = || IssueContext::Object {
            path: path.to_string(),
        };

        if object.type_id.is_empty() {
            report.add(ValidationIssue::warning(
                IssueCode::EmptyTypeId,
                "Empty object type id",
                context(),
            ));
        }

        let rect = &object.bounding;
        if !rect.is_finite() {
            report.add(ValidationIssue::error(
                IssueCode::NonFiniteCoordinate,
                format!(
                    "Non-finite bounding ({}, {}, {}, {})",
                    rect.left, rect.top, rect.right, rect.bottom
                ),
                context(),
            ));
        } else {
            if !rect.is_ordered() {
                report.add(ValidationIssue::error(
                    IssueCode::InvalidRectOrdering,
                    format!(
                        "Invalid ordering: ({}, {}) should be <= ({}, {})",
                        rect.left, rect.top, rect.right, rect.bottom
                    ),
                    context(),
                ));
            }
            if let Some(bounds) = self.bounds {
                if !bounds.contains_rect(rect) {
                    report.add(ValidationIssue::error(
                        IssueCode::ObjectOutOfBounds,
                        format!(
                            "Bounding ({}, {}, {}, {}) extends outside (0, 0, {}, {})",
                            rect.left,
                            rect.top,
                            rect.right,
                            rect.bottom,
                            bounds.max_x,
                            bounds.max_y
                        ),
                        context(),
                    ));
                }
            }
        }

        self.landmarks(&object.landmarks, path, report);
        self.params(&object.params, path, report);
        self.siblings(&object.objects, path, report);
    }
}
