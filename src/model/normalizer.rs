//! Pixel/relative coordinate transforms.
//!
//! All functions here are pure. The transforms divide (or multiply) `x` by
//! the image width, `y` by the image height and `z` by a depth scale that
//! defaults to the image width, which is the depth convention used by pose
//! and face landmark detectors.
//!
//! Dimension checks happen once, when an [`ImageScale`] is built. Tree
//! conversions validate first and then map every node with the already
//! checked scale, so a bad dimension never yields a partially converted tree.

use super::point::Point3D;
use super::rect::Rect;
use super::space::{Normalized, Pixel};
use crate::error::ScenemarkError;

/// Validated image dimensions plus the depth scale used for `z`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageScale {
    width: f32,
    height: f32,
    depth: f32,
}

impl ImageScale {
    /// Creates a scale whose depth scale equals the image width.
    ///
    /// # Errors
    /// Returns [`ScenemarkError::InvalidArgument`] if either dimension is not positive.
    pub fn new(image_width: i32, image_height: i32) -> Result<Self, ScenemarkError> {
        Self::with_depth_scale(image_width, image_height, image_width as f32)
    }

    /// Creates a scale with an explicit depth scale.
    ///
    /// The depth scale itself is not checked.
    pub fn with_depth_scale(
        image_width: i32,
        image_height: i32,
        pixel_depth_scale: f32,
    ) -> Result<Self, ScenemarkError> {
        check_dimensions(image_width, image_height)?;
        Ok(Self {
            width: image_width as f32,
            height: image_height as f32,
            depth: pixel_depth_scale,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn depth_scale(&self) -> f32 {
        self.depth
    }

    /// Maps a pixel point into relative space.
    #[inline]
    pub fn point_to_relative(&self, point: &Point3D<Pixel>) -> Point3D<Normalized> {
        Point3D::from_raw(
            point.x / self.width,
            point.y / self.height,
            point.z / self.depth,
        )
    }

    /// Maps a relative point back into pixel space.
    #[inline]
    pub fn point_to_pixel(&self, point: &Point3D<Normalized>) -> Point3D<Pixel> {
        Point3D::from_raw(
            point.x * self.width,
            point.y * self.height,
            point.z * self.depth,
        )
    }

    /// Maps the four rectangle components independently, per axis.
    #[inline]
    pub fn rect_to_relative(&self, rect: &Rect<Pixel>) -> Rect<Normalized> {
        Rect::from_raw(
            rect.left / self.width,
            rect.top / self.height,
            rect.right / self.width,
            rect.bottom / self.height,
        )
    }

    #[inline]
    pub fn rect_to_pixel(&self, rect: &Rect<Normalized>) -> Rect<Pixel> {
        Rect::from_raw(
            rect.left * self.width,
            rect.top * self.height,
            rect.right * self.width,
            rect.bottom * self.height,
        )
    }
}

fn check_dimensions(image_width: i32, image_height: i32) -> Result<(), ScenemarkError> {
    if image_width <= 0 || image_height <= 0 {
        return Err(ScenemarkError::invalid_dimensions(image_width, image_height));
    }
    Ok(())
}

/// Converts a pixel point to relative coordinates, scaling depth by the image width.
pub fn pixel_to_relative(
    point: &Point3D<Pixel>,
    image_width: i32,
    image_height: i32,
) -> Result<Point3D<Normalized>, ScenemarkError> {
    Ok(ImageScale::new(image_width, image_height)?.point_to_relative(point))
}

/// Converts a pixel point to relative coordinates with an explicit depth scale.
pub fn pixel_to_relative_with_depth(
    point: &Point3D<Pixel>,
    image_width: i32,
    image_height: i32,
    pixel_depth_scale: f32,
) -> Result<Point3D<Normalized>, ScenemarkError> {
    Ok(
        ImageScale::with_depth_scale(image_width, image_height, pixel_depth_scale)?
            .point_to_relative(point),
    )
}

/// Converts a relative point to pixel coordinates, scaling depth by the image width.
pub fn relative_to_pixel(
    point: &Point3D<Normalized>,
    image_width: i32,
    image_height: i32,
) -> Result<Point3D<Pixel>, ScenemarkError> {
    Ok(ImageScale::new(image_width, image_height)?.point_to_pixel(point))
}

/// Converts a relative point to pixel coordinates with an explicit depth scale.
pub fn relative_to_pixel_with_depth(
    point: &Point3D<Normalized>,
    image_width: i32,
    image_height: i32,
    pixel_depth_scale: f32,
) -> Result<Point3D<Pixel>, ScenemarkError> {
    Ok(
        ImageScale::with_depth_scale(image_width, image_height, pixel_depth_scale)?
            .point_to_pixel(point),
    )
}

/// Returns `height / width`.
pub fn calculate_aspect_ratio(image_width: i32, image_height: i32) -> Result<f32, ScenemarkError> {
    check_dimensions(image_width, image_height)?;
    Ok(image_height as f32 / image_width as f32)
}

/// Returns true if `x` and `y` lie in [0, 1], and `z` too when `check_z` is set.
pub fn is_valid_relative_point(point: &Point3D<Normalized>, check_z: bool) -> bool {
    let unit = 0.0..=1.0;
    unit.contains(&point.x) && unit.contains(&point.y) && (!check_z || unit.contains(&point.z))
}

/// Clamps `x` and `y` (and `z` when `clamp_z` is set) into [0, 1].
pub fn clamp_to_relative_bounds(point: &Point3D<Normalized>, clamp_z: bool) -> Point3D<Normalized> {
    let z = if clamp_z {
        point.z.clamp(0.0, 1.0)
    } else {
        point.z
    };
    Point3D::from_raw(point.x.clamp(0.0, 1.0), point.y.clamp(0.0, 1.0), z)
}

/// Clamps all four components of a relative rectangle into [0, 1].
pub fn clamp_rect_to_relative_bounds(rect: &Rect<Normalized>) -> Rect<Normalized> {
    Rect::from_raw(
        rect.left.clamp(0.0, 1.0),
        rect.top.clamp(0.0, 1.0),
        rect.right.clamp(0.0, 1.0),
        rect.bottom.clamp(0.0, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pixel_to_relative_default_depth_uses_width() {
        let point = Point3D::new(320.0, 120.0, 64.0);
        let relative = pixel_to_relative(&point, 640, 480).unwrap();
        assert_relative_eq!(relative.x, 0.5);
        assert_relative_eq!(relative.y, 0.25);
        assert_relative_eq!(relative.z, 0.1);
    }

    #[test]
    fn test_explicit_depth_scale() {
        let point = Point3D::new(0.0, 0.0, 50.0);
        let relative = pixel_to_relative_with_depth(&point, 640, 480, 100.0).unwrap();
        assert_relative_eq!(relative.z, 0.5);

        let back = relative_to_pixel_with_depth(&relative, 640, 480, 100.0).unwrap();
        assert_relative_eq!(back.z, 50.0);
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        let point = Point3D::new(1.0, 1.0, 1.0);
        for (w, h) in [(0, 480), (640, 0), (-1, 480), (640, -5)] {
            assert!(matches!(
                pixel_to_relative(&point, w, h),
                Err(ScenemarkError::InvalidArgument(_))
            ));
            assert!(calculate_aspect_ratio(w, h).is_err());
        }
        let relative = Point3D::<Normalized>::try_new(0.5, 0.5, 0.0).unwrap();
        assert!(relative_to_pixel(&relative, 0, 0).is_err());
    }

    #[test]
    fn test_aspect_ratio_is_height_over_width() {
        assert_relative_eq!(calculate_aspect_ratio(640, 480).unwrap(), 0.75);
        assert_relative_eq!(calculate_aspect_ratio(1080, 1920).unwrap(), 1920.0 / 1080.0);
    }

    #[test]
    fn test_is_valid_relative_point() {
        let inside = pixel_to_relative(&Point3D::new(10.0, 10.0, 2000.0), 100, 100).unwrap();
        assert!(is_valid_relative_point(&inside, false));
        assert!(!is_valid_relative_point(&inside, true));

        let outside = pixel_to_relative(&Point3D::new(-1.0, 10.0, 0.0), 100, 100).unwrap();
        assert!(!is_valid_relative_point(&outside, false));
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let wild = pixel_to_relative(&Point3D::new(-50.0, 250.0, 300.0), 100, 100).unwrap();

        let clamped = clamp_to_relative_bounds(&wild, false);
        assert_eq!(clamped.x, 0.0);
        assert_eq!(clamped.y, 1.0);
        assert_relative_eq!(clamped.z, 3.0);
        assert_eq!(clamp_to_relative_bounds(&clamped, false), clamped);

        let clamped_z = clamp_to_relative_bounds(&wild, true);
        assert_eq!(clamped_z.z, 1.0);
        assert!(is_valid_relative_point(&clamped_z, true));
    }

    #[test]
    fn test_rect_roundtrip() {
        let scale = ImageScale::new(640, 480).unwrap();
        let rect = Rect::new(64.0, 48.0, 320.0, 240.0);
        let relative = scale.rect_to_relative(&rect);
        assert_relative_eq!(relative.left, 0.1);
        assert_relative_eq!(relative.bottom, 0.5);

        let back = scale.rect_to_pixel(&relative);
        assert_relative_eq!(back.right, 320.0);
        assert_relative_eq!(back.top, 48.0);
    }
}
